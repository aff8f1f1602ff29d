// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn model code.
//
// What's in this layer:
//
//   model.rs      — Seq2SeqConfig plus the two parameter sets:
//                   • EncoderRnn: char embedding + bidirectional LSTM
//                   • AttnDecoderRnn: attention over all encoder
//                     positions, one LSTM step, log-softmax head
//
//   trainer.rs    — Per-example SGD loop, running loss windows,
//                   checkpoint after every epoch
//
//   inferencer.rs — Greedy decoding of a fixed number of
//                   characters from saved weights
//
// The backend is picked once, at build time: ndarray on the CPU
// by default, wgpu with `--features gpu`.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Bahdanau et al. (2015) Neural Machine Translation
//            by Jointly Learning to Align and Translate

/// Encoder, attention decoder and their shared config
pub mod model;

/// Training loop with per-epoch checkpointing
pub mod trainer;

/// Greedy decoder over loaded checkpoints
pub mod inferencer;

#[cfg(not(feature = "gpu"))]
pub type InferBackend = burn::backend::NdArray;

#[cfg(feature = "gpu")]
pub type InferBackend = burn::backend::Wgpu;

pub type TrainBackend = burn::backend::Autodiff<InferBackend>;
