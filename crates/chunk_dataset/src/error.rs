//! Error types for chunk-dataset construction and verification.

use thiserror::Error;

/// Failures that abort dataset construction.
///
/// Every variant is terminal for the calling pipeline stage. An undetected
/// ordering or boundary mismatch would corrupt training silently, so there is
/// no retry, no partial success, and no default-filling: the error propagates
/// to the top of the stage and the run stops.
#[derive(Debug, Error)]
pub enum DataError {
    /// The pipeline configuration cannot produce a valid chunk geometry or
    /// blend.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A flat chunk index outside `[0, n_chunks)`.
    #[error("chunk index {index} out of range for dataset of {n_chunks} chunks")]
    IndexOutOfRange { index: usize, n_chunks: usize },

    /// A chunk slice would read past the end of its parent sample. Implies a
    /// chunk-length / sample-length mismatch that the configuration check
    /// could not see.
    #[error(
        "chunk slice ends at token {token_end} but sample {sample_index} \
         holds only {sample_length} tokens"
    )]
    BoundaryViolation {
        sample_index: usize,
        token_end: usize,
        sample_length: usize,
    },

    /// Retrieval database and pretraining blend disagree on the number of
    /// shards.
    #[error("inconsistent dataset count between db ({db}) & pretraining ({pretraining})")]
    ShardCountMismatch { db: usize, pretraining: usize },

    /// Retrieval database and pretraining blend list the same number of
    /// shards but disagree on identity or order.
    #[error(
        "inconsistent dataset order between db & pretraining: shard {position} \
         is {db:?} in the db but {pretraining:?} in the blend"
    )]
    ShardOrderMismatch {
        position: usize,
        db: String,
        pretraining: String,
    },

    /// The wrapped sample dataset failed to produce a sample.
    #[error("failed to read sample {index} from the wrapped dataset")]
    SampleRead {
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for chunk-dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;
