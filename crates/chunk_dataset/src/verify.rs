//! Cross-dataset order-consistency check.
//!
//! The retrieval database records the shard order it was built over; the
//! training blend defines the shard order pretraining will consume. Neighbor
//! lookups are only valid if the two agree element for element, so the check
//! runs once per pipeline run, before any chunk dataset is handed to
//! training, and aborts on the first disagreement.

use crate::config::BlendConfig;
use crate::error::{DataError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One source shard as recorded by the retrieval database at its build time.
///
/// The persisted manifest may carry additional build-time fields; only the
/// shard prefix matters for order verification, so everything else is
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedDatasetInfo {
    /// Identifier of the source data file/partition.
    pub prefix: String,
}

impl IndexedDatasetInfo {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Loads the shard manifest recorded when the retrieval database was built.
///
/// The manifest is a JSON list of shard records, format owned by the
/// database builder.
pub fn load_indexed_dataset_infos(path: &Path) -> anyhow::Result<Vec<IndexedDatasetInfo>> {
    let file = File::open(path)
        .with_context(|| format!("open shard manifest {}", path.display()))?;
    let infos = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse shard manifest {}", path.display()))?;
    Ok(infos)
}

/// Verifies that pretraining shard order matches the retrieval database
/// order.
///
/// Pure and side-effect-free: the manifest records and blend are supplied
/// already loaded, success is silent, and any disagreement is terminal for
/// the calling pipeline stage.
///
/// # Errors
/// - [`DataError::InvalidConfig`] if the blend is not a blended dataset
///   (fewer than two `data_path` entries).
/// - [`DataError::ShardCountMismatch`] if the two sides list different
///   numbers of shards.
/// - [`DataError::ShardOrderMismatch`] at the first position where the
///   prefixes differ.
pub fn verify_shard_order(db_infos: &[IndexedDatasetInfo], blend: &BlendConfig) -> Result<()> {
    let pretraining_prefixes = blend.shard_prefixes()?;
    let db_prefixes: Vec<&str> = db_infos.iter().map(|info| info.prefix.as_str()).collect();

    if db_prefixes.len() != pretraining_prefixes.len() {
        return Err(DataError::ShardCountMismatch {
            db: db_prefixes.len(),
            pretraining: pretraining_prefixes.len(),
        });
    }

    for (position, (db, pretraining)) in
        db_prefixes.iter().zip(&pretraining_prefixes).enumerate()
    {
        if db != pretraining {
            return Err(DataError::ShardOrderMismatch {
                position,
                db: (*db).to_owned(),
                pretraining: (*pretraining).to_owned(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod verify_tests {
    use super::*;

    fn infos(prefixes: &[&str]) -> Vec<IndexedDatasetInfo> {
        prefixes.iter().map(|p| IndexedDatasetInfo::new(*p)).collect()
    }

    fn blend(data_path: &[&str]) -> BlendConfig {
        BlendConfig::new(data_path.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_matching_order_passes() {
        let db = infos(&["shardA", "shardB"]);
        let blend = blend(&["0.3", "shardA", "0.7", "shardB"]);
        assert!(verify_shard_order(&db, &blend).is_ok());
    }

    #[test]
    fn test_single_shard_pair_passes() {
        let db = infos(&["shardA"]);
        let blend = blend(&["1.0", "shardA"]);
        assert!(verify_shard_order(&db, &blend).is_ok());
    }

    #[test]
    fn test_count_mismatch() {
        let db = infos(&["shardA"]);
        let blend = blend(&["0.3", "shardA", "0.7", "shardB"]);
        assert!(matches!(
            verify_shard_order(&db, &blend),
            Err(DataError::ShardCountMismatch {
                db: 1,
                pretraining: 2
            })
        ));
    }

    #[test]
    fn test_order_mismatch_reports_first_position() {
        let db = infos(&["shardB", "shardA"]);
        let blend = blend(&["0.3", "shardA", "0.7", "shardB"]);
        match verify_shard_order(&db, &blend) {
            Err(DataError::ShardOrderMismatch {
                position,
                db,
                pretraining,
            }) => {
                assert_eq!(position, 0);
                assert_eq!(db, "shardB");
                assert_eq!(pretraining, "shardA");
            }
            other => panic!("expected order mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_single_position_difference_is_caught() {
        let db = infos(&["shardA", "shardX", "shardC"]);
        let blend = blend(&["1", "shardA", "1", "shardB", "1", "shardC"]);
        assert!(matches!(
            verify_shard_order(&db, &blend),
            Err(DataError::ShardOrderMismatch { position: 1, .. })
        ));
    }

    #[test]
    fn test_unblended_config_fails_before_comparison() {
        // A bare single-entry data_path is a configuration error even when
        // the db side would trivially "match".
        let db = infos(&["shardA"]);
        let blend = blend(&["shardA"]);
        assert!(matches!(
            verify_shard_order(&db, &blend),
            Err(DataError::InvalidConfig(_))
        ));
    }
}
