use crate::branch::Branch;
use crate::error::FsError;
use crate::fs_utils::dirname;
use crate::policy::create::ExistingPathSpaceCreatePolicy;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::SpaceMetric;
use std::path::Path;
use std::sync::Arc;

/// Most-shared-path policies (`msplfs`, `msplus`, `mspmfs`).
///
/// Like the matching existing-path policy, but when no branch holds the
/// directory the search walks up one ancestor at a time until a branch
/// does or the root is reached.
pub struct MostSharedPathCreatePolicy {
    pub metric: SpaceMetric,
}

impl CreatePolicy for MostSharedPathCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let inner = ExistingPathSpaceCreatePolicy {
            metric: self.metric,
        };
        let mut current = path.to_path_buf();

        loop {
            match inner.create(branches, &current) {
                Err(FsError::NotFound) if current != Path::new("/") => {
                    current = dirname(&current);
                }
                result => return result,
            }
        }
    }
}
