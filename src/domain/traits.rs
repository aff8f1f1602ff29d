// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only sees a DatasetProvider, so the
// synthetic generator can be swapped for a fixed corpus (as the
// tests do) or a file-backed one without touching the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::corpus::DateCorpus;

// ─── DatasetProvider ──────────────────────────────────────────────────────────
/// Any component that can produce a corpus of date pairs together
/// with the vocabularies built from it.
///
/// Implementations:
///   - SyntheticDates → seeded random calendar dates in many formats
pub trait DatasetProvider {
    /// Produce up to `n` examples and their vocabularies.
    fn load_dataset(&self, n: usize) -> Result<DateCorpus>;
}
