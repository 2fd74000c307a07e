use crate::{Error, Result};

/// Candidate pool applied to the merged ranking before seeds are excluded
pub const DEFAULT_CANDIDATE_POOL: usize = 49;

/// Above this many items the similarity matrix is not materialized
pub const DEFAULT_DENSE_LIMIT: usize = 10_000;

/// Configuration shared by both recommenders
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub candidate_pool: usize,
    pub tag_delimiter: char,
    pub dense_limit: usize,
    /// Only use the first `n` catalog rows
    pub subset_size: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_pool: DEFAULT_CANDIDATE_POOL,
            tag_delimiter: '|',
            dense_limit: DEFAULT_DENSE_LIMIT,
            subset_size: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.candidate_pool == 0 {
            return Err(Error::InvalidConfig(
                "candidate_pool must be at least 1".to_string(),
            ));
        }
        if self.subset_size == Some(0) {
            return Err(Error::InvalidConfig(
                "subset_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
