use anyhow::{bail, Result};
use chunk_dataset::{InMemorySampleDataset, SampleDataset, SequenceSample};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builds `n_samples` sequences of `sample_length` tokens with globally
/// increasing token values and one synthetic document id per sample, so any
/// chunk's contents identify exactly where it came from.
pub fn make_sample_dataset(n_samples: usize, sample_length: usize) -> InMemorySampleDataset {
    let samples = (0..n_samples)
        .map(|s| {
            let base = s * sample_length;
            let token_ids: Vec<u32> = (0..sample_length).map(|t| (base + t) as u32).collect();
            SequenceSample::new(token_ids, vec![s as u64])
        })
        .collect();
    InMemorySampleDataset::new(samples)
}

/// Counts reads so tests can assert the chunk view fetches lazily.
pub struct CountingDataset {
    inner: InMemorySampleDataset,
    pub reads: AtomicUsize,
}

impl CountingDataset {
    pub fn new(inner: InMemorySampleDataset) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }
}

impl SampleDataset for CountingDataset {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Result<SequenceSample> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.inner.get(index)
    }
}

/// Always fails to read; exercises error propagation from lazy backends.
pub struct FailingDataset {
    pub n_samples: usize,
}

impl SampleDataset for FailingDataset {
    fn len(&self) -> usize {
        self.n_samples
    }

    fn get(&self, index: usize) -> Result<SequenceSample> {
        bail!("storage offline while reading sample {index}")
    }
}
