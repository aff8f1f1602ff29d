// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the training and evaluation
// workflows:
//
//   checkpoint.rs — Saving and loading both parameter sets
//                   with Burn's file recorder, plus the model
//                   config as JSON so evaluation can verify the
//                   architecture before loading weights.
//
//   metrics.rs    — Running loss windows, the loss CSV log and
//                   the evaluation accuracy tally.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Loss windows, CSV logging, evaluation tally
pub mod metrics;
