// ============================================================
// Layer 3 — Date Corpus
// ============================================================
// The full set of raw date pairs plus the two vocabularies
// derived from them. Vocabularies are built from the pairs
// themselves, so the same pairs always give the same indices.

use crate::domain::{date_pair::DatePair, vocab::Vocabulary};

#[derive(Debug, Clone)]
pub struct DateCorpus {
    pub pairs:         Vec<DatePair>,
    pub human_vocab:   Vocabulary,
    pub machine_vocab: Vocabulary,
}

impl DateCorpus {
    /// Collect every character seen on each side and build the vocabularies.
    /// The human side gets <unk>/<pad>; the machine side gets none.
    pub fn from_pairs(pairs: Vec<DatePair>) -> Self {
        let human_vocab = Vocabulary::with_specials(
            pairs.iter().flat_map(|p| p.human.chars()),
        );
        let machine_vocab = Vocabulary::from_chars(
            pairs.iter().flat_map(|p| p.machine.chars()),
        );
        Self { pairs, human_vocab, machine_vocab }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_cover_all_characters() {
        let corpus = DateCorpus::from_pairs(vec![
            DatePair::new("01/01/2020", "2020-01-01"),
            DatePair::new("3 may 1999", "1999-05-03"),
        ]);

        for pair in &corpus.pairs {
            assert!(pair.human.chars().all(|c| corpus.human_vocab.index_of(c).is_some()));
            assert!(pair.machine.chars().all(|c| corpus.machine_vocab.index_of(c).is_some()));
        }
        assert!(corpus.human_vocab.pad().is_some());
        assert!(corpus.machine_vocab.pad().is_none());
        // '-' and the digits 0,1,2,3,5,9
        assert_eq!(corpus.machine_vocab.len(), 7);
    }
}
