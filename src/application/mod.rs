// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training or evaluating).
//
// Rules for this layer:
//   - No ML math or model code here
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

use crate::domain::corpus::DateCorpus;
use crate::ml::model::Seq2SeqConfig;

// The training workflow
pub mod train_use_case;

// The checkpoint-reload + greedy evaluation workflow
pub mod eval_use_case;

/// Architecture for a corpus: vocabulary sizes from the data,
/// every other dimension at its default.
pub fn model_config_for(corpus: &DateCorpus) -> Seq2SeqConfig {
    Seq2SeqConfig::new(corpus.human_vocab.len(), corpus.machine_vocab.len())
}

pub fn log_vocabularies(corpus: &DateCorpus) {
    tracing::info!("Human vocab {}", corpus.human_vocab);
    tracing::info!("Machine vocab {}", corpus.machine_vocab);
    tracing::info!(
        "Inverse machine vocab {{{}}}",
        (0..corpus.machine_vocab.len())
            .filter_map(|i| corpus.machine_vocab.char_at(i).map(|c| format!("{i}: {c:?}")))
            .collect::<Vec<_>>()
            .join(", ")
    );
}
