use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::{existing_path_create_eligible, pick_best, SpaceMetric};
use std::path::Path;
use std::sync::Arc;

/// Path-preserving space policies (`eplfs`, `eplus`, `epmfs`): only branches
/// already holding the directory qualify, then the space metric decides.
pub struct ExistingPathSpaceCreatePolicy {
    pub metric: SpaceMetric,
}

impl CreatePolicy for ExistingPathSpaceCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut candidates = Vec::new();

        for branch in branches {
            match existing_path_create_eligible(branch, path) {
                Ok(info) => candidates.push((Arc::clone(branch), info)),
                Err(reason) => rejection.record(reason),
            }
        }

        match pick_best(candidates, self.metric) {
            Some(branch) => {
                tracing::debug!(
                    "ep{:?} create selected {:?} for {:?}",
                    self.metric,
                    branch.path,
                    path
                );
                Ok(vec![branch])
            }
            None => Err(rejection.into_error()),
        }
    }
}
