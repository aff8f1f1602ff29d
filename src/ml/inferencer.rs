// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Greedy decoding: at each of the `machine_len` steps take the
// single most likely character, never the ground truth.
use anyhow::{Context, Result};
use burn::prelude::*;

use crate::domain::vocab::Vocabulary;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{index_tensor, AttnDecoderRnn, EncoderRnn, Seq2SeqConfig};

pub struct Inferencer<B: Backend> {
    encoder: EncoderRnn<B>,
    decoder: AttnDecoderRnn<B>,
    config:  Seq2SeqConfig,
    device:  B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(
        encoder: EncoderRnn<B>,
        decoder: AttnDecoderRnn<B>,
        config:  Seq2SeqConfig,
        device:  B::Device,
    ) -> Self {
        Self { encoder, decoder, config, device }
    }

    /// Rebuild both modules for `expected` and load their saved weights.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        expected:     &Seq2SeqConfig,
        device:       B::Device,
    ) -> Result<Self> {
        let (encoder, decoder) = ckpt_manager.load_models::<B>(expected, &device)?;
        tracing::info!("Models loaded from checkpoint");
        Ok(Self::new(encoder, decoder, expected.clone(), device))
    }

    /// Decode exactly `machine_len` vocabulary indices for one input.
    pub fn decode_indices(&self, human_ids: &[usize]) -> Result<Vec<usize>> {
        let input = index_tensor::<B>(human_ids, self.config.human_len, &self.device)?;
        let encoder_outputs = self.encoder.forward(input);

        let mut state   = self.decoder.init_state(&self.device);
        let mut decoded = Vec::with_capacity(self.config.machine_len);

        for time_step in 0..self.config.machine_len {
            let step = self.decoder.forward(encoder_outputs.clone(), state, time_step);
            let best = step.log_probs.argmax(1).into_scalar().elem::<i64>();
            if tracing::enabled!(tracing::Level::TRACE) {
                let focus = step.attention.argmax(1).into_scalar().elem::<i64>();
                tracing::trace!(time_step, best, focus, "decode step");
            }
            decoded.push(best as usize);
            state = step.state;
        }

        Ok(decoded)
    }

    /// Greedy-decode and map the indices back through the machine vocabulary.
    pub fn translate(&self, human_ids: &[usize], machine_vocab: &Vocabulary) -> Result<String> {
        self.decode_indices(human_ids)?
            .into_iter()
            .map(|idx| {
                machine_vocab
                    .char_at(idx)
                    .with_context(|| format!("decoded index {idx} has no character"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_always_decodes_machine_len_chars() {
        let device = Default::default();
        let machine_vocab = Vocabulary::from_chars("0123456789-".chars());
        let cfg = Seq2SeqConfig::new(20, machine_vocab.len());
        let inferencer = Inferencer::new(
            cfg.init_encoder::<TestBackend>(&device),
            cfg.init_decoder::<TestBackend>(&device),
            cfg.clone(),
            device,
        );

        for ids in [vec![0; 30], vec![19; 30], (0..30).map(|i| i % 20).collect()] {
            let text = inferencer.translate(&ids, &machine_vocab).unwrap();
            assert_eq!(text.chars().count(), 10);
        }
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let device = Default::default();
        let cfg = Seq2SeqConfig::new(20, 11);
        let inferencer = Inferencer::new(
            cfg.init_encoder::<TestBackend>(&device),
            cfg.init_decoder::<TestBackend>(&device),
            cfg.clone(),
            device,
        );
        let ids: Vec<usize> = (0..30).map(|i| (i * 7) % 20).collect();
        assert_eq!(
            inferencer.decode_indices(&ids).unwrap(),
            inferencer.decode_indices(&ids).unwrap(),
        );
    }

    #[test]
    fn test_rejects_wrong_input_length() {
        let device = Default::default();
        let cfg = Seq2SeqConfig::new(20, 11);
        let inferencer = Inferencer::new(
            cfg.init_encoder::<TestBackend>(&device),
            cfg.init_decoder::<TestBackend>(&device),
            cfg.clone(),
            device,
        );
        assert!(inferencer.decode_indices(&[1; 12]).is_err());
    }
}
