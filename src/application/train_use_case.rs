// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Generate the date corpus     (Layer 4 - data)
//   Step 2: Log both vocabularies
//   Step 3: Encode to fixed-length ids   (Layer 4 - data)
//   Step 4: Build the Burn dataset       (Layer 4 - data)
//   Step 5: Run training loop            (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::application::{log_vocabularies, model_config_for};
use crate::data::{dataset::DateDataset, preprocessor::Preprocessor};
use crate::domain::traits::DatasetProvider;
use crate::infra::{checkpoint::CheckpointManager, metrics::LossLogger};
use crate::ml::{
    model::{AttnDecoderRnn, EncoderRnn},
    trainer::{run_training, TrainSchedule},
    TrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs besides the architecture,
// which lives in Seq2SeqConfig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub checkpoint_dir: String,
    pub nb_samples:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    /// Examples per logged loss window
    pub log_every:      usize,
    pub seed:           u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: ".".to_string(),
            nb_samples:     10_000,
            epochs:         4,
            lr:             0.01,
            log_every:      1000,
            seed:           crate::data::generator::DEFAULT_SEED,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase<P: DatasetProvider> {
    config:   TrainConfig,
    provider: P,
}

impl<P: DatasetProvider> TrainUseCase<P> {
    pub fn new(config: TrainConfig, provider: P) -> Self {
        Self { config, provider }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<(EncoderRnn<TrainBackend>, AttnDecoderRnn<TrainBackend>)> {
        let cfg = &self.config;

        // ── Step 1: Generate corpus ───────────────────────────────────────────
        let corpus = self.provider.load_dataset(cfg.nb_samples)?;
        ensure!(!corpus.is_empty(), "dataset provider returned no examples");

        // ── Step 2: Vocabulary dump ───────────────────────────────────────────
        log_vocabularies(&corpus);

        // ── Step 3: Fixed-length encoding ─────────────────────────────────────
        let model_cfg    = model_config_for(&corpus);
        let preprocessor = Preprocessor::new(model_cfg.human_len, model_cfg.machine_len);
        let samples      = preprocessor.preprocess(&corpus)?;

        // ── Step 4: Burn dataset ──────────────────────────────────────────────
        let dataset = DateDataset::new(samples);
        tracing::info!("Training on {} examples for {} epochs", dataset.sample_count(), cfg.epochs);

        // ── Step 5: Training loop (Layer 5) ───────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        let loss_logger  = LossLogger::new(&cfg.checkpoint_dir)?;
        tracing::info!("Logging window losses to '{}'", loss_logger.csv_path().display());
        let schedule = TrainSchedule {
            epochs:    cfg.epochs,
            lr:        cfg.lr,
            log_every: cfg.log_every,
        };

        run_training::<TrainBackend>(
            &model_cfg,
            &schedule,
            &dataset,
            &ckpt_manager,
            &loss_logger,
            Default::default(),
        )
    }
}
