// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses `--mode/-m {train, eval}` with clap and routes to the
// matching use case. All work is delegated to Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Mode;

use crate::application::{
    eval_use_case::{EvalConfig, EvalUseCase},
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::data::generator::SyntheticDates;

#[derive(Parser, Debug)]
#[command(
    name = "date-normalizer",
    version = "0.1.0",
    about = "Either train or evaluate attn model for normalizing dates."
)]
pub struct Cli {
    /// pick mode; either train or eval
    #[arg(short, long, value_enum)]
    pub mode: Mode,
}

impl Cli {
    /// Match on the mode and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.mode {
            Mode::Train => self.run_train(),
            Mode::Eval  => self.run_eval(),
        }
    }

    fn run_train(&self) -> Result<()> {
        let config   = TrainConfig::default();
        let provider = SyntheticDates::new(config.seed)?;

        tracing::info!("Starting training, checkpoints in '{}'", config.checkpoint_dir);
        TrainUseCase::new(config, provider).execute()?;

        println!("Training complete. Checkpoints saved.");
        Ok(())
    }

    fn run_eval(&self) -> Result<()> {
        let config   = EvalConfig::default();
        let provider = SyntheticDates::new(config.seed)?;

        EvalUseCase::new(config, provider).execute()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_and_short_flags() {
        let cli = Cli::try_parse_from(["date-normalizer", "--mode", "train"]).unwrap();
        assert_eq!(cli.mode, Mode::Train);
        let cli = Cli::try_parse_from(["date-normalizer", "-m", "eval"]).unwrap();
        assert_eq!(cli.mode, Mode::Eval);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["date-normalizer", "-m", "predict"]).is_err());
    }

    #[test]
    fn test_mode_is_required() {
        assert!(Cli::try_parse_from(["date-normalizer"]).is_err());
    }

    #[test]
    fn test_no_other_flags() {
        assert!(Cli::try_parse_from(["date-normalizer", "-m", "train", "--epochs", "3"]).is_err());
    }
}
