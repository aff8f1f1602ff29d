use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::date_pair::DatePair;

/// One encoded example: the raw pair plus its fixed-length index
/// sequences (human length 30, machine length 10 by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSample {
    pub pair:        DatePair,
    pub human_ids:   Vec<usize>,
    pub machine_ids: Vec<usize>,
}

pub struct DateDataset {
    samples: Vec<DateSample>,
}

impl DateDataset {
    pub fn new(samples: Vec<DateSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<DateSample> for DateDataset {
    fn get(&self, index: usize) -> Option<DateSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
