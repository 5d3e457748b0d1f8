//! Pipeline configuration for the chunk-dataset stage.
//!
//! Chunk geometry and blend paths travel in an explicit [`PipelineConfig`]
//! threaded by the caller; nothing here reads process-wide state.
//!
//! Example:
//! ```ignore
//! let config = PipelineConfig::builder()
//!     .seq_length(2048)
//!     .chunk_length(64)
//!     .data_path(vec!["0.5".into(), "shardA".into(), "0.5".into(), "shardB".into()])
//!     .rank(0)
//!     .build();
//! assert_eq!(config.n_chunks_per_sample()?, 32);
//! ```

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};

/// A weighted multi-shard blend, as an ordered list of alternating
/// weight/prefix tokens, e.g. `["0.3", "shardA", "0.7", "shardB"]`.
///
/// The shard prefixes (odd positions, 0-based) define the shard order the
/// training dataset was blended in; the retrieval database must have been
/// built over the same shards in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendConfig {
    pub data_path: Vec<String>,
}

impl BlendConfig {
    pub fn new(data_path: Vec<String>) -> Self {
        Self { data_path }
    }

    /// Shard prefixes in blend order.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidConfig`] if `data_path` holds fewer than
    /// two entries — only blended datasets are supported.
    pub fn shard_prefixes(&self) -> Result<Vec<&str>> {
        if self.data_path.len() < 2 {
            return Err(DataError::InvalidConfig(
                "blended dataset required: data_path must list at least one \
                 (weight, prefix) pair"
                    .into(),
            ));
        }
        Ok(self
            .data_path
            .iter()
            .skip(1)
            .step_by(2)
            .map(String::as_str)
            .collect())
    }
}

/// Configuration threaded through chunk-dataset assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tokens per sample, uniform across the sample dataset.
    pub seq_length: usize,
    /// Tokens per chunk. Must divide `seq_length` exactly.
    pub chunk_length: usize,
    /// The blend the training dataset was assembled from.
    pub blend: BlendConfig,
    /// Rank of this worker process; informational logging is emitted on
    /// rank 0 only.
    pub rank: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seq_length: 2048,
            chunk_length: 64,
            blend: BlendConfig::default(),
            rank: 0,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Chunks cut from each sample, `seq_length / chunk_length`.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidConfig`] if either length is zero or
    /// `seq_length` is not exactly divisible by `chunk_length`. Divisibility
    /// is enforced here rather than truncating the tail of every sample
    /// silently.
    pub fn n_chunks_per_sample(&self) -> Result<usize> {
        if self.chunk_length == 0 {
            return Err(DataError::InvalidConfig(
                "chunk_length must be positive".into(),
            ));
        }
        if self.seq_length == 0 {
            return Err(DataError::InvalidConfig(
                "seq_length must be positive".into(),
            ));
        }
        if self.seq_length % self.chunk_length != 0 {
            return Err(DataError::InvalidConfig(format!(
                "seq_length {} is not divisible by chunk_length {}",
                self.seq_length, self.chunk_length
            )));
        }
        Ok(self.seq_length / self.chunk_length)
    }
}

/// Builder for [`PipelineConfig`] with method chaining.
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the sample sequence length.
    pub fn seq_length(mut self, seq_length: usize) -> Self {
        self.config.seq_length = seq_length;
        self
    }

    /// Set the chunk length.
    pub fn chunk_length(mut self, chunk_length: usize) -> Self {
        self.config.chunk_length = chunk_length;
        self
    }

    /// Set the blend configuration.
    pub fn blend(mut self, blend: BlendConfig) -> Self {
        self.config.blend = blend;
        self
    }

    /// Set the blend from its raw `data_path` token list.
    pub fn data_path(mut self, data_path: Vec<String>) -> Self {
        self.config.blend = BlendConfig::new(data_path);
        self
    }

    /// Set the worker rank.
    pub fn rank(mut self, rank: usize) -> Self {
        self.config.rank = rank;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
