//! Per-split chunk-dataset assembly for the retrieval-query stage.
//!
//! Given the train/valid/test sample datasets produced by the (external)
//! dataset builder, this module verifies shard order against the retrieval
//! database and wraps each present split in a [`ChunkDataset`], tagging it
//! with the directory its precomputed neighbors live in. The order check
//! runs first and gates everything: a mismatch would mis-align every
//! neighbor lookup downstream.

use crate::chunk::ChunkDataset;
use crate::config::PipelineConfig;
use crate::dataset::SampleDataset;
use crate::error::Result;
use crate::verify::{verify_shard_order, IndexedDatasetInfo};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Dataset split keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-split sample datasets handed over by the dataset builder.
///
/// A split that was not requested stays `None` and is omitted from the
/// assembled map entirely.
pub struct SampleSplits<D> {
    pub train: Option<D>,
    pub valid: Option<D>,
    pub test: Option<D>,
}

impl<D> Default for SampleSplits<D> {
    fn default() -> Self {
        Self {
            train: None,
            valid: None,
            test: None,
        }
    }
}

impl<D> SampleSplits<D> {
    fn into_pairs(self) -> [(Split, Option<D>); 3] {
        [
            (Split::Train, self.train),
            (Split::Valid, self.valid),
            (Split::Test, self.test),
        ]
    }
}

/// One split's chunk dataset plus the directory holding its precomputed
/// neighbors.
#[derive(Debug)]
pub struct ChunkDatasetEntry<D> {
    pub neighbor_dir: PathBuf,
    pub data: ChunkDataset<D>,
}

/// Builds the train/valid/test chunk-dataset map.
///
/// `neighbor_dir` is the external naming collaborator: it tags each split's
/// entry with a directory derived from the split key and the sample dataset,
/// and is not otherwise consumed by the chunk transform.
///
/// # Errors
/// Fails before any dataset is wrapped if the shard order check fails, and
/// on any invalid chunk geometry; all failures abort assembly entirely.
pub fn build_chunk_dataset_map<D, F>(
    splits: SampleSplits<D>,
    db_infos: &[IndexedDatasetInfo],
    config: &PipelineConfig,
    neighbor_dir: F,
) -> Result<HashMap<Split, ChunkDatasetEntry<D>>>
where
    D: SampleDataset,
    F: Fn(Split, &D) -> PathBuf,
{
    verify_shard_order(db_infos, &config.blend)?;

    info_rank_0(config.rank, "building train, valid, and test chunk datasets");

    let n_chunks_per_sample = config.n_chunks_per_sample()?;
    let mut map = HashMap::new();
    for (split, sample_dataset) in splits.into_pairs() {
        let Some(sample_dataset) = sample_dataset else {
            continue;
        };
        let dir = neighbor_dir(split, &sample_dataset);
        let data = ChunkDataset::new(sample_dataset, config.chunk_length, n_chunks_per_sample)?;
        map.insert(split, ChunkDatasetEntry {
            neighbor_dir: dir,
            data,
        });
    }

    info_rank_0(config.rank, "finished creating chunk datasets");
    Ok(map)
}

/// Emits an informational event on rank 0 only, so a multi-process run
/// logs each banner once.
fn info_rank_0(rank: usize, message: &str) {
    if rank == 0 {
        info!("{message}");
    }
}
