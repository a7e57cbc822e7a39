use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::ActionPolicy;
use crate::policy::utils::{action_eligible, pick_best, SpaceMetric};
use std::path::Path;
use std::sync::Arc;

/// The writable branch holding the path that ranks best by a space metric.
pub struct ExistingPathSpaceActionPolicy {
    pub metric: SpaceMetric,
}

impl ActionPolicy for ExistingPathSpaceActionPolicy {
    fn action(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut candidates = Vec::new();

        for branch in branches {
            match action_eligible(branch, path) {
                Ok(info) => candidates.push((Arc::clone(branch), info)),
                Err(reason) => rejection.record(reason),
            }
        }

        pick_best(candidates, self.metric)
            .map(|branch| vec![branch])
            .ok_or_else(|| rejection.into_error())
    }
}
