use crate::sample::SequenceSample;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// A `SampleDataset` provides ordered, random access to fixed-length
/// pretraining sequences.
///
/// Implementations can be in-memory (`InMemorySampleDataset`) or backed by
/// lazy storage reads; `get` returns an owned sample so a backend is free to
/// fetch on demand. The read path is synchronous and may block on I/O — the
/// chunk view built on top performs no I/O of its own.
///
/// All implementations must be `Send + Sync` so one instance can serve
/// multiple concurrent readers.
pub trait SampleDataset: Send + Sync {
    /// Returns the total number of samples.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Random-access lookup by index. `index` must be `< len()`.
    fn get(&self, index: usize) -> Result<SequenceSample>;
}

impl<D: SampleDataset + ?Sized> SampleDataset for Arc<D> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> Result<SequenceSample> {
        (**self).get(index)
    }
}

/// A sample dataset that stores all sequences in contiguous memory with
/// atomic reference counting (`Arc<[SequenceSample]>`).
///
/// Cloning only bumps the `Arc` counter, so the same dataset can be shared
/// cheaply across splits or worker threads.
#[derive(Debug, Clone)]
pub struct InMemorySampleDataset {
    samples: Arc<[SequenceSample]>,
    metadata: HashMap<String, String>,
}

impl InMemorySampleDataset {
    /// Creates a new in-memory dataset from a vector of samples.
    pub fn new(samples: Vec<SequenceSample>) -> Self {
        Self {
            samples: samples.into(),
            metadata: HashMap::new(),
        }
    }

    /// Adds/updates metadata and returns the modified dataset.
    /// Enables chaining: `dataset.with_metadata("split", "train")`.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the value of a metadata field, if it exists.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }
}

impl SampleDataset for InMemorySampleDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(&self, index: usize) -> Result<SequenceSample> {
        self.samples
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("sample index {} out of bounds ({})", index, self.samples.len()))
    }
}
