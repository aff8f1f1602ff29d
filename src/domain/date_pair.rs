// ============================================================
// Layer 3 — DatePair Domain Type
// ============================================================
// One training example in its raw string form:
//   human:   "saturday march 7 1987"
//   machine: "1987-03-07"
//
// The fixed-length integer encodings are produced later by the
// data layer; this struct only carries the text.

use serde::{Deserialize, Serialize};

/// A human-readable date and its ISO-8601 equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    /// Free-form date as a person might write it, lowercased, no commas
    pub human: String,

    /// Standardised `YYYY-MM-DD` form
    pub machine: String,
}

impl DatePair {
    pub fn new(human: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            human:   human.into(),
            machine: machine.into(),
        }
    }

    /// True when a decoded prediction reproduces the machine date exactly
    pub fn is_match(&self, predicted: &str) -> bool {
        self.machine == predicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_match_requires_exact_string() {
        let pair = DatePair::new("9 may 1998", "1998-05-09");
        assert!(pair.is_match("1998-05-09"));
        assert!(!pair.is_match("1998-05-08"));
        assert!(!pair.is_match("1998-05-09 "));
    }
}
