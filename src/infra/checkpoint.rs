// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the two parameter sets using Burn's
// NamedMpkFileRecorder at full precision.
//
// What gets saved:
//   1. encoder_rnn_state.mpk       — encoder weights
//   2. attn_decoder_rnn_state.mpk  — attention decoder weights
//   3. seq2seq_config.json         — architecture the weights fit
//
// All three files keep fixed names and are rewritten together
// after every epoch, so only the latest epoch survives.
//
// The saved config is compared against the expected one before
// any weights are read; a mismatch is an error naming each field.
// The recorder accepts tensors of any shape, so the loaded weight
// shapes are checked as well: a config left over from a different
// run cannot smuggle wrong-sized weights into the model.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
};

use crate::ml::model::{AttnDecoderRnn, EncoderRnn, Seq2SeqConfig};

pub const ENCODER_FILE: &str = "encoder_rnn_state";
pub const DECODER_FILE: &str = "attn_decoder_rnn_state";
const CONFIG_FILE: &str = "seq2seq_config.json";

type CheckpointRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Write both parameter sets and the config they were built from,
    /// replacing the previous epoch's files.
    pub fn save_models<B: Backend>(
        &self,
        config:  &Seq2SeqConfig,
        encoder: &EncoderRnn<B>,
        decoder: &AttnDecoderRnn<B>,
    ) -> Result<()> {
        let recorder = CheckpointRecorder::new();

        let encoder_path = self.dir.join(ENCODER_FILE);
        recorder
            .record(encoder.clone().into_record(), encoder_path.clone())
            .with_context(|| {
                format!("Failed to save encoder to '{}'", encoder_path.display())
            })?;

        let decoder_path = self.dir.join(DECODER_FILE);
        recorder
            .record(decoder.clone().into_record(), decoder_path.clone())
            .with_context(|| {
                format!("Failed to save decoder to '{}'", decoder_path.display())
            })?;

        self.save_config(config)?;
        tracing::debug!("Saved checkpoints to '{}'", self.dir.display());
        Ok(())
    }

    /// Rebuild both modules for `expected` and restore their weights.
    ///
    /// Fails if the saved config is missing or describes a different
    /// architecture, if either weight file cannot be read, or if the
    /// weights read do not have the shapes `expected` implies.
    pub fn load_models<B: Backend>(
        &self,
        expected: &Seq2SeqConfig,
        device:   &B::Device,
    ) -> Result<(EncoderRnn<B>, AttnDecoderRnn<B>)> {
        let saved = self.load_config()?;
        let diffs = saved.mismatches(expected);
        if !diffs.is_empty() {
            bail!(
                "Checkpoint in '{}' does not match the current model ({})",
                self.dir.display(),
                diffs.join(", ")
            );
        }

        let recorder = CheckpointRecorder::new();

        let encoder_path = self.dir.join(ENCODER_FILE);
        let encoder_record = recorder
            .load(encoder_path.clone(), device)
            .with_context(|| {
                format!("Cannot load encoder '{}'. Have you trained the model first?",
                    encoder_path.display())
            })?;

        let decoder_path = self.dir.join(DECODER_FILE);
        let decoder_record = recorder
            .load(decoder_path.clone(), device)
            .with_context(|| {
                format!("Cannot load decoder '{}'. Have you trained the model first?",
                    decoder_path.display())
            })?;

        let encoder = expected.init_encoder::<B>(device);
        let decoder = expected.init_decoder::<B>(device);
        let wanted  = [encoder.weight_shapes(), decoder.weight_shapes()].concat();

        let encoder = encoder.load_record(encoder_record);
        let decoder = decoder.load_record(decoder_record);
        let loaded  = [encoder.weight_shapes(), decoder.weight_shapes()].concat();

        let diffs: Vec<String> = wanted
            .iter()
            .zip(&loaded)
            .filter(|((_, want), (_, got))| want != got)
            .map(|((name, want), (_, got))| format!("{name}: {got:?} != {want:?}"))
            .collect();
        if !diffs.is_empty() {
            bail!(
                "Weights in '{}' do not fit the saved config ({})",
                self.dir.display(),
                diffs.join(", ")
            );
        }

        Ok((encoder, decoder))
    }

    /// Save the model configuration to JSON.
    fn save_config(&self, cfg: &Seq2SeqConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved model config to '{}'", path.display());
        Ok(())
    }

    /// Load the model configuration from JSON.
    pub fn load_config(&self) -> Result<Seq2SeqConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run '--mode train' before '--mode eval'.",
                    path.display()
                )
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))
    }
}
