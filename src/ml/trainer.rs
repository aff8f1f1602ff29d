// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Per-example SGD over the whole corpus, no mini-batching.
//
// One example:
//   encoder once → zero decoder state → 10 decode steps, each
//   adding the NLL of the ground-truth character → one backward
//   pass over the summed loss → one SGD step per parameter set.
//
// Key Burn insight:
//   - loss.backward() builds a fresh gradient set every call, so
//     there is nothing to zero between examples
//   - GradientsParams::from_module pulls out just the gradients
//     belonging to one module, which lets the encoder and decoder
//     keep separate optimisers
//
// Reference: Burn Book §5, Bahdanau et al. (2015)

use anyhow::Result;
use burn::{
    data::dataset::Dataset,
    optim::{GradientsParams, Optimizer, SgdConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::dataset::DateDataset;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{LossLogger, RunningLoss},
};
use crate::ml::model::{index_tensor, AttnDecoderRnn, EncoderRnn, Seq2SeqConfig};

/// Negative log-likelihood of `target` under one step's log-probabilities.
pub fn nll_loss<B: Backend>(log_probs: Tensor<B, 2>, target: usize) -> Tensor<B, 1> {
    log_probs.slice([0..1, target..target + 1]).sum().neg()
}

/// Holds both parameter sets and their optimisers.
pub struct Seq2SeqTrainer<B, OE, OD>
where
    B:  AutodiffBackend,
    OE: Optimizer<EncoderRnn<B>, B>,
    OD: Optimizer<AttnDecoderRnn<B>, B>,
{
    pub encoder:   EncoderRnn<B>,
    pub decoder:   AttnDecoderRnn<B>,
    encoder_optim: OE,
    decoder_optim: OD,
    lr:            f64,
    device:        B::Device,
}

impl<B, OE, OD> Seq2SeqTrainer<B, OE, OD>
where
    B:  AutodiffBackend,
    OE: Optimizer<EncoderRnn<B>, B>,
    OD: Optimizer<AttnDecoderRnn<B>, B>,
{
    pub fn new(
        encoder:       EncoderRnn<B>,
        decoder:       AttnDecoderRnn<B>,
        encoder_optim: OE,
        decoder_optim: OD,
        lr:            f64,
        device:        B::Device,
    ) -> Self {
        Self { encoder, decoder, encoder_optim, decoder_optim, lr, device }
    }

    /// Train on one example and return the mean per-step loss.
    pub fn train_example(&mut self, human_ids: &[usize], machine_ids: &[usize]) -> Result<f64> {
        let input = index_tensor::<B>(human_ids, self.encoder.seq_len, &self.device)?;
        let encoder_outputs = self.encoder.forward(input);

        let mut state = self.decoder.init_state(&self.device);
        let mut loss  = Tensor::<B, 1>::zeros([1], &self.device);

        for (time_step, &target) in machine_ids.iter().enumerate() {
            let step = self.decoder.forward(encoder_outputs.clone(), state, time_step);
            loss  = loss + nll_loss(step.log_probs, target);
            state = step.state;
        }

        let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

        // Backward pass + one SGD update per parameter set
        let mut grads    = loss.backward();
        let encoder_grads = GradientsParams::from_module(&mut grads, &self.encoder);
        let decoder_grads = GradientsParams::from_module(&mut grads, &self.decoder);
        self.encoder = self.encoder_optim.step(self.lr, self.encoder.clone(), encoder_grads);
        self.decoder = self.decoder_optim.step(self.lr, self.decoder.clone(), decoder_grads);

        Ok(loss_val / machine_ids.len().max(1) as f64)
    }
}

/// Settings the epoch loop needs beyond the model architecture.
#[derive(Debug, Clone)]
pub struct TrainSchedule {
    pub epochs:    usize,
    pub lr:        f64,
    pub log_every: usize,
}

/// Full training run: every example of every epoch, checkpoint after each epoch.
/// Returns the final parameter sets so callers can evaluate them in-process.
pub fn run_training<B: AutodiffBackend>(
    model_cfg:    &Seq2SeqConfig,
    schedule:     &TrainSchedule,
    dataset:      &DateDataset,
    ckpt_manager: &CheckpointManager,
    loss_logger:  &LossLogger,
    device:       B::Device,
) -> Result<(EncoderRnn<B>, AttnDecoderRnn<B>)> {
    let encoder = model_cfg.init_encoder::<B>(&device);
    let decoder = model_cfg.init_decoder::<B>(&device);
    tracing::info!(
        "Model ready: embedding={}, encoder_hidden={}x2, decoder_hidden={}",
        model_cfg.embedding_dim, model_cfg.encoder_hidden, model_cfg.decoder_hidden,
    );

    // ── SGD, one optimiser per parameter set ─────────────────────────────────
    // θ = θ - lr * g
    let mut trainer = Seq2SeqTrainer::new(
        encoder,
        decoder,
        SgdConfig::new().init::<B, EncoderRnn<B>>(),
        SgdConfig::new().init::<B, AttnDecoderRnn<B>>(),
        schedule.lr,
        device,
    );

    for epoch in 1..=schedule.epochs {
        let mut running = RunningLoss::new(schedule.log_every);

        for (i, sample) in dataset.iter().enumerate() {
            let loss = trainer.train_example(&sample.human_ids, &sample.machine_ids)?;

            if let Some(avg) = running.record(loss) {
                let seen = i + 1;
                println!("epoch {epoch} | {seen:>6} examples | loss={avg:.4}");
                loss_logger.log(epoch, seen, avg)?;
            }
        }

        if running.pending() > 0 {
            tracing::debug!("{} examples left in the final partial window", running.pending());
        }

        ckpt_manager.save_models(model_cfg, &trainer.encoder, &trainer.decoder)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok((trainer.encoder, trainer.decoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray>;

    #[test]
    fn test_nll_loss_picks_target() {
        let device = Default::default();
        let log_probs = Tensor::<NdArray, 2>::from_floats([[-0.5, -1.5, -2.5]], &device);
        let loss: f32 = nll_loss(log_probs, 1).into_scalar();
        assert!((loss - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_train_example_reduces_loss_on_repeat() {
        let device = Default::default();
        let cfg    = Seq2SeqConfig::new(5, 3).with_human_len(6).with_machine_len(4);
        let mut trainer = Seq2SeqTrainer::new(
            cfg.init_encoder::<TestBackend>(&device),
            cfg.init_decoder::<TestBackend>(&device),
            SgdConfig::new().init::<TestBackend, EncoderRnn<TestBackend>>(),
            SgdConfig::new().init::<TestBackend, AttnDecoderRnn<TestBackend>>(),
            0.1,
            device,
        );

        let human   = [0, 1, 2, 3, 4, 4];
        let machine = [2, 0, 1, 2];
        let first = trainer.train_example(&human, &machine).unwrap();
        let mut last = first;
        for _ in 0..30 {
            last = trainer.train_example(&human, &machine).unwrap();
        }
        assert!(first.is_finite());
        assert!(last < first, "loss did not drop: {first} -> {last}");
    }

    #[test]
    fn test_train_example_rejects_wrong_input_length() {
        let device = Default::default();
        let cfg    = Seq2SeqConfig::new(5, 3).with_human_len(6).with_machine_len(4);
        let mut trainer = Seq2SeqTrainer::new(
            cfg.init_encoder::<TestBackend>(&device),
            cfg.init_decoder::<TestBackend>(&device),
            SgdConfig::new().init::<TestBackend, EncoderRnn<TestBackend>>(),
            SgdConfig::new().init::<TestBackend, AttnDecoderRnn<TestBackend>>(),
            0.1,
            device,
        );
        assert!(trainer.train_example(&[0, 1, 2], &[0, 1, 2, 0]).is_err());
    }
}
