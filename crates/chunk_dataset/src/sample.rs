use std::sync::Arc;

/// One fixed-length pretraining sequence.
///
/// `token_ids` has the same length for every sample in a dataset (the
/// sequence length of the pretraining run). `document_ids` records which
/// source documents contributed tokens to this sample; the chunk transform
/// passes it through unmodified.
///
/// Both fields are reference-counted slices, so cloning a sample (or handing
/// its document ids to every chunk cut from it) only bumps a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSample {
    pub token_ids: Arc<[u32]>,
    pub document_ids: Arc<[u64]>,
}

impl SequenceSample {
    pub fn new(token_ids: impl Into<Arc<[u32]>>, document_ids: impl Into<Arc<[u64]>>) -> Self {
        Self {
            token_ids: token_ids.into(),
            document_ids: document_ids.into(),
        }
    }

    /// Number of tokens in this sample.
    pub fn sequence_length(&self) -> usize {
        self.token_ids.len()
    }
}
