use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::traits::SearchPolicy;
use crate::policy::utils::exists;
use std::path::Path;
use std::sync::Arc;

/// Returns the first branch, in list order, holding the path.
pub struct FirstFoundSearchPolicy;

impl SearchPolicy for FirstFoundSearchPolicy {
    fn search(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        branches
            .iter()
            .find(|branch| exists(branch, path))
            .map(|branch| vec![Arc::clone(branch)])
            .ok_or(FsError::NotFound)
    }
}
