// ============================================================
// Layer 3 — Character Vocabulary
// ============================================================
// Maps characters to integer indices and back.
//
// Two vocabularies exist per corpus:
//   human   — every character seen in human dates, sorted,
//             followed by the two specials <unk> and <pad>
//   machine — every character seen in ISO dates, sorted,
//             with no specials (ISO dates are always 10 chars)
//
// Example (machine vocabulary):
//   '-' → 0, '0' → 1, '1' → 2, ..., '9' → 10
//
// A vocabulary is built once from the corpus and never
// mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const UNK_TOKEN: &str = "<unk>";
pub const PAD_TOKEN: &str = "<pad>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Character → index, iteration order is index order
    index: BTreeMap<char, usize>,
    /// Index → character for the non-special part of the vocabulary
    chars: Vec<char>,
    /// Index of <unk>, when the vocabulary carries specials
    unk:   Option<usize>,
    /// Index of <pad>, when the vocabulary carries specials
    pad:   Option<usize>,
}

impl Vocabulary {
    /// Build a vocabulary without special tokens.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let sorted: BTreeSet<char> = chars.into_iter().collect();
        let chars: Vec<char> = sorted.into_iter().collect();
        let index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { index, chars, unk: None, pad: None }
    }

    /// Build a vocabulary whose last two indices are <unk> and <pad>.
    pub fn with_specials(chars: impl IntoIterator<Item = char>) -> Self {
        let mut vocab = Self::from_chars(chars);
        let n = vocab.chars.len();
        vocab.unk = Some(n);
        vocab.pad = Some(n + 1);
        vocab
    }

    /// Number of indices, specials included.
    pub fn len(&self) -> usize {
        self.chars.len()
            + usize::from(self.unk.is_some())
            + usize::from(self.pad.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    pub fn unk(&self) -> Option<usize> {
        self.unk
    }

    pub fn pad(&self) -> Option<usize> {
        self.pad
    }

    /// Inverse lookup. Specials have no character and return `None`.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }
}

/// Prints the same mapping the startup log shows, e.g.
/// `{' ': 0, '.': 1, ..., <unk>: 35, <pad>: 36}`
impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.chars.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:?}: {i}")?;
        }
        for (token, idx) in [(UNK_TOKEN, self.unk), (PAD_TOKEN, self.pad)] {
            if let Some(idx) = idx {
                write!(f, ", {token}: {idx}")?;
            }
        }
        write!(f, "}}")
    }
}
