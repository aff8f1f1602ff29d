// ============================================================
// Layer 4 — Synthetic Date Generator
// ============================================================
// Produces (human date, machine date) pairs from random
// calendar dates rendered in one of many human formats.
//
// Each example:
//   1. Draw a date uniformly between 1970-01-01 and 2020-12-31
//   2. Pick a human format (the "full" weekday format is listed
//      ten times so it dominates, like real-world text)
//   3. Render with chrono, lowercase, drop commas
//   4. Machine form is always ISO `YYYY-MM-DD`
//
// The RNG is seeded so the train and eval runs generate the same
// corpus and therefore the same vocabularies.
//
// Reference: chrono crate documentation (strftime specifiers)
//            rand crate documentation (SeedableRng)

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::domain::{corpus::DateCorpus, date_pair::DatePair, traits::DatasetProvider};

pub const DEFAULT_SEED: u64 = 12345;

/// strftime patterns for the human side.
///   short  = M/d/yy
///   medium = MMM d, y
///   long   = MMMM d, y
///   full   = EEEE, MMMM d, y
const HUMAN_FORMATS: [&str; 24] = [
    "%-m/%-d/%y",
    "%b %-d, %Y",
    "%B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%A, %B %-d, %Y",
    "%-d %b %Y",
    "%-d %B %Y",
    "%d %b %Y",
    "%-d %b, %Y",
    "%-d %B, %Y",
    "%d, %b %Y",
    "%-d %m %y",
    "%-d %B %Y",
    "%B %-d %Y",
    "%B %-d, %Y",
    "%d.%m.%y",
];

/// Seeded random date source implementing `DatasetProvider`.
#[derive(Debug, Clone)]
pub struct SyntheticDates {
    seed:  u64,
    start: NaiveDate,
    end:   NaiveDate,
}

impl SyntheticDates {
    pub fn new(seed: u64) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(1970, 1, 1).context("invalid start date")?;
        let end   = NaiveDate::from_ymd_opt(2020, 12, 31).context("invalid end date")?;
        Ok(Self { seed, start, end })
    }

    /// Generate a single pair from the given RNG.
    fn sample_pair<R: Rng>(&self, rng: &mut R) -> Result<DatePair> {
        let span = (self.end - self.start).num_days() as u64;
        let date = self.start
            .checked_add_days(Days::new(rng.gen_range(0..=span)))
            .context("date offset out of range")?;

        let format = HUMAN_FORMATS
            .choose(rng)
            .context("no human date formats configured")?;

        Ok(DatePair::new(
            humanize(&date.format(format).to_string()),
            date.format("%Y-%m-%d").to_string(),
        ))
    }
}

impl DatasetProvider for SyntheticDates {
    fn load_dataset(&self, n: usize) -> Result<DateCorpus> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let pairs = (0..n)
            .map(|_| self.sample_pair(&mut rng))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Generated {} synthetic date pairs (seed={})", pairs.len(), self.seed);
        Ok(DateCorpus::from_pairs(pairs))
    }
}

/// Lowercase and remove commas, the normal form of every human date.
pub fn humanize(text: &str) -> String {
    text.to_lowercase().replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_gives_same_corpus() {
        let a = SyntheticDates::new(7).unwrap().load_dataset(50).unwrap();
        let b = SyntheticDates::new(7).unwrap().load_dataset(50).unwrap();
        assert_eq!(a.pairs, b.pairs);
        assert_eq!(a.human_vocab, b.human_vocab);
    }

    #[test]
    fn test_machine_dates_are_iso() {
        let corpus = SyntheticDates::new(DEFAULT_SEED).unwrap().load_dataset(200).unwrap();
        for pair in &corpus.pairs {
            assert_eq!(pair.machine.len(), 10);
            assert!(NaiveDate::parse_from_str(&pair.machine, "%Y-%m-%d").is_ok());
        }
    }

    #[test]
    fn test_human_dates_are_normalised_and_fit() {
        let corpus = SyntheticDates::new(DEFAULT_SEED).unwrap().load_dataset(500).unwrap();
        for pair in &corpus.pairs {
            assert!(!pair.human.contains(','));
            assert_eq!(pair.human, pair.human.to_lowercase());
            // "wednesday september 30 1987" is the longest rendering
            assert!(pair.human.len() <= 30, "too long: {}", pair.human);
        }
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("Saturday, March 7, 1987"), "saturday march 7 1987");
    }

    #[test]
    fn test_machine_vocab_is_digits_and_dash() {
        let corpus = SyntheticDates::new(DEFAULT_SEED).unwrap().load_dataset(1000).unwrap();
        assert_eq!(corpus.machine_vocab.len(), 11);
        assert_eq!(corpus.machine_vocab.char_at(0), Some('-'));
    }

    #[test]
    fn test_full_weekday_format_weighting() {
        let full = HUMAN_FORMATS.iter().filter(|&&f| f == "%A, %B %-d, %Y").count();
        assert_eq!(full, 10);
        assert_eq!(HUMAN_FORMATS.len() - full, 14);
    }
}
