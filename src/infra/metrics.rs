// ============================================================
// Layer 6 — Metrics
// ============================================================
// Three small pieces of bookkeeping:
//
//   RunningLoss — sums per-example losses and yields the mean of
//                 every full window (1000 examples by default),
//                 then starts the next window from exactly zero
//   LossLogger  — appends each window's mean to a CSV file
//   EvalTally   — counts matches during evaluation and reports
//                 the aggregate accuracy
//
// Example CSV output (loss_log.csv):
//   epoch,examples,avg_loss
//   1,1000,1.872310
//   1,2000,1.204518
//   ...
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

// ─── RunningLoss ──────────────────────────────────────────────────────────────

/// Fixed-size loss window. Partial sums never cross a window boundary.
#[derive(Debug, Clone)]
pub struct RunningLoss {
    window: usize,
    total:  f64,
    count:  usize,
}

impl RunningLoss {
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1), total: 0.0, count: 0 }
    }

    /// Add one loss; returns the window mean when the window fills.
    pub fn record(&mut self, loss: f64) -> Option<f64> {
        self.total += loss;
        self.count += 1;
        if self.count == self.window {
            let mean = self.total / self.window as f64;
            self.total = 0.0;
            self.count = 0;
            Some(mean)
        } else {
            None
        }
    }

    /// Examples recorded since the last full window
    pub fn pending(&self) -> usize {
        self.count
    }
}

// ─── LossLogger ───────────────────────────────────────────────────────────────

/// Logs window losses to a CSV file for later analysis.
pub struct LossLogger {
    csv_path: PathBuf,
}

impl LossLogger {
    /// Create a new LossLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("loss_log.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,examples,avg_loss")?;
            tracing::debug!("Created loss CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one row: which epoch, how many examples into it, window mean.
    pub fn log(&self, epoch: usize, examples: usize, avg_loss: f64) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{},{:.6}", epoch, examples, avg_loss)?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── EvalTally ────────────────────────────────────────────────────────────────

/// Aggregate result of an evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalTally {
    pub total:   usize,
    pub matches: usize,
}

impl EvalTally {
    pub fn record(&mut self, matched: bool) {
        self.total += 1;
        if matched {
            self.matches += 1;
        }
    }

    /// Fraction of exact matches, 0.0 when nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches as f64 / self.total as f64
        }
    }
}
