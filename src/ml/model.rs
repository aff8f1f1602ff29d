use anyhow::{ensure, Result};
use burn::{
    nn::{
        BiLstm, BiLstmConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
    tensor::activation::{log_softmax, softmax},
};

/// Architecture of both networks. Saved next to the weights so a
/// checkpoint can be checked against the corpus before loading.
#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    pub human_vocab_size:   usize,
    pub machine_vocab_size: usize,
    /// Encoder time-steps
    #[config(default = 30)]
    pub human_len:          usize,
    /// Decoder time-steps
    #[config(default = 10)]
    pub machine_len:        usize,
    #[config(default = 50)]
    pub embedding_dim:      usize,
    /// Per direction; the encoder emits twice this
    #[config(default = 32)]
    pub encoder_hidden:     usize,
    #[config(default = 64)]
    pub decoder_hidden:     usize,
}

impl Seq2SeqConfig {
    /// Width of one encoder output position (forward ‖ backward).
    pub fn encoder_output_dim(&self) -> usize {
        2 * self.encoder_hidden
    }

    pub fn init_encoder<B: Backend>(&self, device: &B::Device) -> EncoderRnn<B> {
        let char_embeddings = EmbeddingConfig::new(self.human_vocab_size, self.embedding_dim)
            .init(device);
        let bi_lstm = BiLstmConfig::new(self.embedding_dim, self.encoder_hidden, true)
            .init(device);
        EncoderRnn { char_embeddings, bi_lstm, seq_len: self.human_len }
    }

    pub fn init_decoder<B: Backend>(&self, device: &B::Device) -> AttnDecoderRnn<B> {
        // One score per encoder position, computed from all positions at once.
        let attn_in = (self.encoder_output_dim() + self.decoder_hidden) * self.human_len;
        let attn_weighted = LinearConfig::new(attn_in, self.human_len).init(device);
        let lstm_cell = LstmConfig::new(self.encoder_output_dim(), self.decoder_hidden, true)
            .init(device);
        let out = LinearConfig::new(self.decoder_hidden, self.machine_vocab_size).init(device);
        AttnDecoderRnn { attn_weighted, lstm_cell, out, hidden_size: self.decoder_hidden }
    }

    /// Lists every field that differs from `other`; empty means the
    /// checkpoints written under one config load under the other.
    pub fn mismatches(&self, other: &Self) -> Vec<String> {
        let fields = [
            ("human_vocab_size",   self.human_vocab_size,   other.human_vocab_size),
            ("machine_vocab_size", self.machine_vocab_size, other.machine_vocab_size),
            ("human_len",          self.human_len,          other.human_len),
            ("machine_len",        self.machine_len,        other.machine_len),
            ("embedding_dim",      self.embedding_dim,      other.embedding_dim),
            ("encoder_hidden",     self.encoder_hidden,     other.encoder_hidden),
            ("decoder_hidden",     self.decoder_hidden,     other.decoder_hidden),
        ];
        fields
            .iter()
            .filter(|(_, a, b)| a != b)
            .map(|(name, a, b)| format!("{name}: {a} != {b}"))
            .collect()
    }
}

/// Build the `[1, len]` index tensor the encoder consumes.
/// Any other length is rejected here so the encoder never sees it.
pub fn index_tensor<B: Backend>(
    indices:  &[usize],
    expected: usize,
    device:   &B::Device,
) -> Result<Tensor<B, 2, Int>> {
    ensure!(
        indices.len() == expected,
        "encoder expects exactly {expected} positions, got {}",
        indices.len()
    );
    let flat: Vec<i32> = indices.iter().map(|&i| i as i32).collect();
    Ok(Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).unsqueeze::<2>())
}

// ─── Encoder ──────────────────────────────────────────────────────────────────

#[derive(Module, Debug)]
pub struct EncoderRnn<B: Backend> {
    pub char_embeddings: Embedding<B>,
    pub bi_lstm:         BiLstm<B>,
    /// Positions every input must have
    pub seq_len:         usize,
}

impl<B: Backend> EncoderRnn<B> {
    /// Named weight-matrix shapes, enough to pin down every encoder dimension.
    pub fn weight_shapes(&self) -> Vec<(&'static str, [usize; 2])> {
        vec![
            ("encoder.char_embeddings", self.char_embeddings.weight.val().dims()),
            ("encoder.bi_lstm.forward", self.bi_lstm.forward.input_gate.input_transform.weight.val().dims()),
            ("encoder.bi_lstm.reverse", self.bi_lstm.reverse.input_gate.input_transform.weight.val().dims()),
        ]
    }

    /// chars: [1, seq_len] → [seq_len, 2 * encoder_hidden]
    pub fn forward(&self, chars: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let embeds = self.char_embeddings.forward(chars); // [1, seq_len, embedding_dim]
        let (lstm_out, _) = self.bi_lstm.forward(embeds, None);
        let [_, seq_len, width] = lstm_out.dims();
        lstm_out.reshape([seq_len, width])
    }
}

// ─── Attention decoder ────────────────────────────────────────────────────────

/// Recurrent state carried across decode steps. Owned and threaded
/// by the caller; each step consumes one and returns the next.
#[derive(Debug, Clone)]
pub struct DecoderState<B: Backend> {
    /// [1, decoder_hidden]
    pub hidden: Tensor<B, 2>,
    /// [1, decoder_hidden]
    pub cell:   Tensor<B, 2>,
}

impl<B: Backend> DecoderState<B> {
    pub fn zeros(hidden_size: usize, device: &B::Device) -> Self {
        Self {
            hidden: Tensor::zeros([1, hidden_size], device),
            cell:   Tensor::zeros([1, hidden_size], device),
        }
    }
}

pub struct DecoderStep<B: Backend> {
    /// Log-probabilities over the machine vocabulary, [1, vocab]
    pub log_probs: Tensor<B, 2>,
    /// Attention weights over encoder positions, [1, seq_len]
    pub attention: Tensor<B, 2>,
    pub state:     DecoderState<B>,
}

#[derive(Module, Debug)]
pub struct AttnDecoderRnn<B: Backend> {
    pub attn_weighted: Linear<B>,
    pub lstm_cell:     Lstm<B>,
    pub out:           Linear<B>,
    pub hidden_size:   usize,
}

impl<B: Backend> AttnDecoderRnn<B> {
    pub fn init_state(&self, device: &B::Device) -> DecoderState<B> {
        DecoderState::zeros(self.hidden_size, device)
    }

    pub fn weight_shapes(&self) -> Vec<(&'static str, [usize; 2])> {
        vec![
            ("decoder.attn_weighted", self.attn_weighted.weight.val().dims()),
            ("decoder.lstm_cell",     self.lstm_cell.input_gate.input_transform.weight.val().dims()),
            ("decoder.lstm_hidden",   self.lstm_cell.input_gate.hidden_transform.weight.val().dims()),
            ("decoder.out",           self.out.weight.val().dims()),
        ]
    }

    /// encoder_outputs: [seq_len, enc_dim], hidden: [1, dec_hidden] → [1, seq_len]
    ///
    /// Every encoder position is paired with the decoder hidden state, the
    /// pairs are flattened into one vector, and a single linear layer scores
    /// all positions together before a softmax.
    pub fn attention_weights(
        &self,
        encoder_outputs: Tensor<B, 2>,
        hidden:          Tensor<B, 2>,
    ) -> Tensor<B, 2> {
        let [seq_len, _] = encoder_outputs.dims();
        let hidden = hidden.expand([seq_len, self.hidden_size]);
        let paired = Tensor::cat(vec![encoder_outputs, hidden], 1); // [seq_len, enc_dim + dec_hidden]
        let [_, width] = paired.dims();
        let scores = self.attn_weighted.forward(paired.reshape([1, seq_len * width]));
        softmax(scores, 1)
    }

    /// One decode step. `_time_step` is not used in scoring.
    pub fn forward(
        &self,
        encoder_outputs: Tensor<B, 2>,
        state:           DecoderState<B>,
        _time_step:      usize,
    ) -> DecoderStep<B> {
        let attention = self.attention_weights(encoder_outputs.clone(), state.hidden.clone());

        // Weighted sum of encoder positions: [1, seq_len] x [seq_len, enc_dim]
        let context = attention.clone().matmul(encoder_outputs);
        let [_, ctx_dim] = context.dims();

        let (_, next) = self.lstm_cell.forward(
            context.reshape([1, 1, ctx_dim]),
            Some(LstmState::new(state.cell, state.hidden)),
        );

        let log_probs = log_softmax(self.out.forward(next.hidden.clone()), 1);

        DecoderStep {
            log_probs,
            attention,
            state: DecoderState { hidden: next.hidden, cell: next.cell },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn small_config() -> Seq2SeqConfig {
        Seq2SeqConfig::new(13, 11)
    }

    #[test]
    fn test_default_hyperparameters() {
        let cfg = small_config();
        assert_eq!(cfg.human_len, 30);
        assert_eq!(cfg.machine_len, 10);
        assert_eq!(cfg.embedding_dim, 50);
        assert_eq!(cfg.encoder_output_dim(), 64);
        assert_eq!(cfg.decoder_hidden, 64);
    }

    #[test]
    fn test_encoder_output_shape() {
        let device  = Default::default();
        let cfg     = small_config();
        let encoder = cfg.init_encoder::<TestBackend>(&device);
        let input   = index_tensor::<TestBackend>(&[1; 30], 30, &device).unwrap();
        assert_eq!(encoder.forward(input).dims(), [30, 64]);
    }

    #[test]
    fn test_index_tensor_rejects_wrong_length() {
        let device = Default::default();
        assert!(index_tensor::<TestBackend>(&[0; 29], 30, &device).is_err());
        assert!(index_tensor::<TestBackend>(&[0; 31], 30, &device).is_err());
    }

    #[test]
    fn test_attention_weights_are_a_distribution() {
        let device  = Default::default();
        let cfg     = small_config();
        let encoder = cfg.init_encoder::<TestBackend>(&device);
        let decoder = cfg.init_decoder::<TestBackend>(&device);
        let ids: Vec<usize> = (0..30).map(|i| i % 13).collect();
        let outputs = encoder.forward(index_tensor(&ids, 30, &device).unwrap());

        let mut state = decoder.init_state(&device);
        for t in 0..cfg.machine_len {
            let step = decoder.forward(outputs.clone(), state, t);
            let weights: Vec<f32> = step.attention.into_data().to_vec().unwrap();
            assert_eq!(weights.len(), 30);
            assert!(weights.iter().all(|&w| w >= 0.0));
            assert!((weights.iter().sum::<f32>() - 1.0).abs() < 1e-4);
            state = step.state;
        }
    }

    #[test]
    fn test_step_output_is_log_distribution() {
        let device  = Default::default();
        let cfg     = small_config();
        let encoder = cfg.init_encoder::<TestBackend>(&device);
        let decoder = cfg.init_decoder::<TestBackend>(&device);
        let outputs = encoder.forward(index_tensor(&[3; 30], 30, &device).unwrap());

        let step = decoder.forward(outputs, decoder.init_state(&device), 0);
        assert_eq!(step.log_probs.dims(), [1, 11]);
        assert_eq!(step.state.hidden.dims(), [1, 64]);
        assert_eq!(step.state.cell.dims(), [1, 64]);

        let log_probs: Vec<f32> = step.log_probs.into_data().to_vec().unwrap();
        assert!(log_probs.iter().all(|&lp| lp <= 0.0));
        let total: f32 = log_probs.iter().map(|lp| lp.exp()).sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_state() {
        let device = Default::default();
        let state  = DecoderState::<TestBackend>::zeros(64, &device);
        let hidden: Vec<f32> = state.hidden.into_data().to_vec().unwrap();
        assert!(hidden.iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_mismatches_names_fields() {
        let a = small_config();
        let b = small_config().with_embedding_dim(40);
        assert!(a.mismatches(&a).is_empty());
        assert_eq!(a.mismatches(&b), vec!["embedding_dim: 50 != 40".to_string()]);
    }
}
