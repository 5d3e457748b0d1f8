//! Chunk-granular view over a sample-granular dataset.
//!
//! A [`ChunkDataset`] conceptually divides each fixed-length sample (e.g.,
//! length 2048) into consecutive chunks (e.g., length 64) and restructures
//! them into one flat dataset of length `n_samples * n_chunks_per_sample`.
//! A flat chunk index decomposes as
//!
//! ```text
//! sample_idx = idx / n_chunks_per_sample
//! chunk_idx  = idx % n_chunks_per_sample
//! ```
//!
//! which maps `[0, n_chunks)` bijectively onto `(sample_idx, chunk_idx)`
//! pairs in lexicographic order: chunks within a sample are contiguous and
//! ascending, samples keep their original dataset order. Retrieval-neighbor
//! indexes are keyed by flat chunk index, so this ordering must be stable
//! and reproducible across runs given the same sample dataset and chunk
//! length.

use crate::config::PipelineConfig;
use crate::dataset::SampleDataset;
use crate::error::{DataError, Result};
use std::sync::Arc;

/// A fixed-length contiguous sub-sequence of one sample's tokens, the unit
/// used for retrieval-neighbor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Identifiers of the documents that contributed to the parent sample,
    /// shared unmodified.
    pub document_ids: Arc<[u64]>,
    /// Exactly `chunk_length` token ids.
    pub token_ids: Vec<u32>,
}

/// A read-only, chunk-granular view wrapping a sample dataset.
///
/// The view owns the wrapped dataset and freezes its geometry at
/// construction; it performs no I/O and keeps no cache of its own beyond
/// what the wrapped dataset provides. Post-construction it is safe to use
/// from multiple concurrent readers.
#[derive(Debug)]
pub struct ChunkDataset<D> {
    sample_dataset: D,
    chunk_length: usize,
    n_chunks_per_sample: usize,
    n_samples: usize,
    n_chunks: usize,
}

impl<D: SampleDataset> ChunkDataset<D> {
    /// Creates a chunk-granular view over `sample_dataset`.
    ///
    /// `n_chunks_per_sample` must be consistent with
    /// `sample_length / chunk_length` for every sample; that consistency is
    /// an upstream configuration contract and is not re-checked per sample
    /// here. A violation surfaces at the first incompatible slice as
    /// [`DataError::BoundaryViolation`], never as silent truncation.
    ///
    /// # Errors
    /// - Returns [`DataError::InvalidConfig`] if either geometry parameter
    ///   is zero, or if the derived chunk count overflows.
    pub fn new(sample_dataset: D, chunk_length: usize, n_chunks_per_sample: usize) -> Result<Self> {
        if chunk_length == 0 {
            return Err(DataError::InvalidConfig(
                "chunk_length must be positive".into(),
            ));
        }
        if n_chunks_per_sample == 0 {
            return Err(DataError::InvalidConfig(
                "n_chunks_per_sample must be positive".into(),
            ));
        }
        // Bounding chunk_length * n_chunks_per_sample here keeps every token
        // offset computed in `get` within usize.
        chunk_length
            .checked_mul(n_chunks_per_sample)
            .ok_or_else(|| DataError::InvalidConfig("sample token span overflows".into()))?;

        let n_samples = sample_dataset.len();
        let n_chunks = n_samples
            .checked_mul(n_chunks_per_sample)
            .ok_or_else(|| DataError::InvalidConfig("chunk count overflows".into()))?;

        Ok(Self {
            sample_dataset,
            chunk_length,
            n_chunks_per_sample,
            n_samples,
            n_chunks,
        })
    }

    /// Creates the view with geometry derived from a [`PipelineConfig`]
    /// (`chunk_length` and `seq_length / chunk_length`).
    pub fn from_config(sample_dataset: D, config: &PipelineConfig) -> Result<Self> {
        let n_chunks_per_sample = config.n_chunks_per_sample()?;
        Self::new(sample_dataset, config.chunk_length, n_chunks_per_sample)
    }

    /// Total number of chunks.
    pub fn len(&self) -> usize {
        self.n_chunks
    }

    /// Checks if the view holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.n_chunks == 0
    }

    /// Tokens per chunk.
    pub fn chunk_length(&self) -> usize {
        self.chunk_length
    }

    /// Chunks cut from each sample.
    pub fn n_chunks_per_sample(&self) -> usize {
        self.n_chunks_per_sample
    }

    /// Samples in the wrapped dataset.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Returns the chunk at flat index `index`.
    ///
    /// Fetching the parent sample may block if the wrapped dataset reads
    /// lazily from storage.
    ///
    /// # Errors
    /// - [`DataError::IndexOutOfRange`] if `index >= len()`.
    /// - [`DataError::BoundaryViolation`] if the chunk slice would read past
    ///   the end of the parent sample.
    /// - [`DataError::SampleRead`] if the wrapped dataset fails.
    pub fn get(&self, index: usize) -> Result<Chunk> {
        if index >= self.n_chunks {
            return Err(DataError::IndexOutOfRange {
                index,
                n_chunks: self.n_chunks,
            });
        }

        // Convert flat chunk index to sample index & chunk-in-sample index.
        let sample_index = index / self.n_chunks_per_sample;
        let chunk_index = index % self.n_chunks_per_sample;

        let sample = self
            .sample_dataset
            .get(sample_index)
            .map_err(|source| DataError::SampleRead {
                index: sample_index,
                source: source.into(),
            })?;

        // Chunk start/end token offsets within the sample.
        let token_start = chunk_index * self.chunk_length;
        let token_end = token_start + self.chunk_length;
        if token_end > sample.token_ids.len() {
            return Err(DataError::BoundaryViolation {
                sample_index,
                token_end,
                sample_length: sample.token_ids.len(),
            });
        }

        Ok(Chunk {
            document_ids: sample.document_ids,
            token_ids: sample.token_ids[token_start..token_end].to_vec(),
        })
    }

    /// Iterates over all chunks in flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = Result<Chunk>> + '_ {
        (0..self.n_chunks).map(move |index| self.get(index))
    }
}
