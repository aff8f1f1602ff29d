// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from random calendar dates to fixed-length index
// sequences the model can consume.
//
// The pipeline flows in this order:
//
//   SyntheticDates    → (human, machine) string pairs + vocabularies
//       │
//       ▼
//   Preprocessor      → lowercase, truncate/pad, map chars to ids
//       │
//       ▼
//   DateDataset       → implements Burn's Dataset trait
//
// Reference: Burn Book §4 (Datasets)
//            Rust Book §13 (Iterators and Closures)

/// Seeded random date pairs in many human formats
pub mod generator;

/// Fixed-length index encoding
pub mod preprocessor;

/// Implements Burn's Dataset trait for encoded date samples
pub mod dataset;
