// ============================================================
// Layer 2 — Eval Use Case
// ============================================================
// Reloads the saved checkpoints and greedily translates a random
// sample of the corpus, one report per example plus an overall
// accuracy at the end.
//
// Sampling is uniform WITH replacement, so the same example may
// be reported more than once.

use anyhow::{ensure, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::application::{log_vocabularies, model_config_for};
use crate::data::preprocessor::Preprocessor;
use crate::domain::traits::DatasetProvider;
use crate::infra::{checkpoint::CheckpointManager, metrics::EvalTally};
use crate::ml::{inferencer::Inferencer, InferBackend};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub checkpoint_dir: String,
    /// Must match the training run so the vocabularies agree
    pub nb_samples:     usize,
    pub eval_samples:   usize,
    pub seed:           u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: ".".to_string(),
            nb_samples:     10_000,
            eval_samples:   100,
            seed:           crate::data::generator::DEFAULT_SEED,
        }
    }
}

pub struct EvalUseCase<P: DatasetProvider> {
    config:   EvalConfig,
    provider: P,
}

impl<P: DatasetProvider> EvalUseCase<P> {
    pub fn new(config: EvalConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn execute(&self) -> Result<EvalTally> {
        let cfg = &self.config;

        let corpus = self.provider.load_dataset(cfg.nb_samples)?;
        ensure!(!corpus.is_empty(), "dataset provider returned no examples");
        log_vocabularies(&corpus);

        let model_cfg    = model_config_for(&corpus);
        let preprocessor = Preprocessor::new(model_cfg.human_len, model_cfg.machine_len);
        let samples      = preprocessor.preprocess(&corpus)?;

        println!("loading models...");
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        let inferencer   = Inferencer::<InferBackend>::from_checkpoint(
            &ckpt_manager, &model_cfg, Default::default(),
        )?;

        let mut rng   = rand::thread_rng();
        let mut tally = EvalTally::default();

        for _ in 0..cfg.eval_samples {
            let sample    = &samples[rng.gen_range(0..samples.len())];
            let predicted = inferencer.translate(&sample.human_ids, &corpus.machine_vocab)?;
            let matched   = sample.pair.is_match(&predicted);

            println!("Input Human Date: {}", sample.pair.human);
            println!(
                "Predicted Machine Date: {} Actual Machine Date: {} {}",
                predicted,
                sample.pair.machine,
                if matched { "matches" } else { "MISMATCH" },
            );
            tally.record(matched);
        }

        println!(
            "Accuracy: {}/{} ({:.1}%)",
            tally.matches, tally.total, tally.accuracy() * 100.0,
        );
        Ok(tally)
    }
}
