// ============================================================
// Layer 4 — Index Preprocessor
// ============================================================
// Converts raw date strings into fixed-length index sequences.
//
// Steps for one string (applied in order):
//   1. Lowercase and strip commas
//   2. Truncate to `length` characters
//   3. Map each character through the vocabulary; characters
//      the vocabulary has never seen become <unk>
//   4. Right-pad with <pad> up to `length`
//
// Example (length 12):
//   "Mar 7, 1987" → "mar 7 1987" → [m a r ␣ 7 ␣ 1 9 8 7 <pad> <pad>]
//
// The encoder assumes every input has exactly `human_len`
// positions, so padding is the only way shorter dates reach it.

use anyhow::{bail, Result};

use crate::data::{dataset::DateSample, generator::humanize};
use crate::domain::{corpus::DateCorpus, vocab::Vocabulary};

pub struct Preprocessor {
    /// Encoder time-steps (human side)
    human_len:   usize,
    /// Decoder time-steps (machine side)
    machine_len: usize,
}

impl Preprocessor {
    pub fn new(human_len: usize, machine_len: usize) -> Self {
        Self { human_len, machine_len }
    }

    /// Encode every pair of the corpus.
    pub fn preprocess(&self, corpus: &DateCorpus) -> Result<Vec<DateSample>> {
        corpus
            .pairs
            .iter()
            .map(|pair| {
                Ok(DateSample {
                    human_ids:   string_to_indices(&pair.human, self.human_len, &corpus.human_vocab)?,
                    machine_ids: string_to_indices(&pair.machine, self.machine_len, &corpus.machine_vocab)?,
                    pair:        pair.clone(),
                })
            })
            .collect()
    }
}

/// Normalise, truncate, look up and pad `text` to exactly `length` indices.
pub fn string_to_indices(text: &str, length: usize, vocab: &Vocabulary) -> Result<Vec<usize>> {
    if vocab.is_empty() {
        bail!("cannot encode {text:?} with an empty vocabulary");
    }
    let normalised = humanize(text);

    let mut indices = Vec::with_capacity(length);
    for c in normalised.chars().take(length) {
        let idx = match (vocab.index_of(c), vocab.unk()) {
            (Some(idx), _)    => idx,
            (None, Some(unk)) => unk,
            (None, None)      => bail!("character {c:?} in {text:?} is not in the vocabulary"),
        };
        indices.push(idx);
    }

    if indices.len() < length {
        let Some(pad) = vocab.pad() else {
            bail!("{text:?} is shorter than {length} and the vocabulary has no <pad>");
        };
        indices.resize(length, pad);
    }

    Ok(indices)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date_pair::DatePair;

    fn human_vocab() -> Vocabulary {
        Vocabulary::with_specials("0123456789/- ".chars())
    }

    #[test]
    fn test_short_input_is_padded() {
        let v   = human_vocab();
        let ids = string_to_indices("1/1/20", 10, &v).unwrap();
        assert_eq!(ids.len(), 10);
        assert!(ids[6..].iter().all(|&i| Some(i) == v.pad()));
    }

    #[test]
    fn test_long_input_is_truncated() {
        let v   = human_vocab();
        let ids = string_to_indices("01/01/2020", 4, &v).unwrap();
        let expected: Vec<usize> = "01/0".chars().map(|c| v.index_of(c).unwrap()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_unknown_chars_map_to_unk() {
        let v   = human_vocab();
        let ids = string_to_indices("x1", 2, &v).unwrap();
        assert_eq!(Some(ids[0]), v.unk());
    }

    #[test]
    fn test_commas_and_case_are_normalised() {
        let v = Vocabulary::with_specials("mar 7".chars());
        assert_eq!(
            string_to_indices("MAR, 7", 5, &v).unwrap(),
            string_to_indices("mar 7", 5, &v).unwrap(),
        );
    }

    #[test]
    fn test_vocab_without_specials_rejects_unknown_and_short() {
        let v = Vocabulary::from_chars("0123456789-".chars());
        assert!(string_to_indices("2020-01-0x", 10, &v).is_err());
        assert!(string_to_indices("2020-01", 10, &v).is_err());
        assert_eq!(string_to_indices("2020-01-01", 10, &v).unwrap().len(), 10);
    }

    #[test]
    fn test_empty_vocab_is_rejected() {
        let v = Vocabulary::from_chars("".chars());
        assert!(v.is_empty());
        assert!(string_to_indices("", 0, &v).is_err());
        assert!(string_to_indices("1/1/20", 10, &v).is_err());
    }

    #[test]
    fn test_preprocess_produces_fixed_lengths() {
        let corpus = DateCorpus::from_pairs(vec![
            DatePair::new("01/01/2020", "2020-01-01"),
            DatePair::new("tuesday march 3 1987", "1987-03-03"),
        ]);
        let samples = Preprocessor::new(30, 10).preprocess(&corpus).unwrap();
        assert_eq!(samples.len(), 2);
        for s in &samples {
            assert_eq!(s.human_ids.len(), 30);
            assert_eq!(s.machine_ids.len(), 10);
        }
    }
}
