// ============================================================
// Layer 1 — CLI Modes
// ============================================================
// The single required `--mode` flag accepts exactly two values.
// clap's ValueEnum derive rejects anything else with a usage
// error before any model work begins.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::ValueEnum;

/// What the binary should do this run
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Train the encoder and attention decoder, checkpointing every epoch
    Train,

    /// Reload the checkpoints and report greedy predictions
    Eval,
}
