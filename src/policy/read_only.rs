use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::traits::{ActionPolicy, CreatePolicy, SearchPolicy};
use std::path::Path;
use std::sync::Arc;

/// `erofs`: every role fails with a read-only error.
pub struct ReadOnlyPolicy;

impl SearchPolicy for ReadOnlyPolicy {
    fn search(&self, _: &[Arc<Branch>], _: &Path) -> Result<Vec<Arc<Branch>>, FsError> {
        Err(FsError::ReadOnly)
    }
}

impl CreatePolicy for ReadOnlyPolicy {
    fn create(&self, _: &[Arc<Branch>], _: &Path) -> Result<Vec<Arc<Branch>>, FsError> {
        Err(FsError::ReadOnly)
    }
}

impl ActionPolicy for ReadOnlyPolicy {
    fn action(&self, _: &[Arc<Branch>], _: &Path) -> Result<Vec<Arc<Branch>>, FsError> {
        Err(FsError::ReadOnly)
    }
}
