//! Chunk-granular dataset views and shard-order verification for
//! retrieval-augmented pretraining.

pub mod chunk;
pub mod config;
pub mod dataset;
pub mod error;
pub mod query;
pub mod sample;
pub mod verify;

pub use chunk::{Chunk, ChunkDataset};
pub use config::{BlendConfig, PipelineConfig};
pub use dataset::{InMemorySampleDataset, SampleDataset};
pub use error::{DataError, Result};
pub use query::{build_chunk_dataset_map, ChunkDatasetEntry, SampleSplits, Split};
pub use sample::SequenceSample;
pub use verify::{load_indexed_dataset_infos, verify_shard_order, IndexedDatasetInfo};
