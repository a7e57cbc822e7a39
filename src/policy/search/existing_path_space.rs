use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::traits::SearchPolicy;
use crate::policy::utils::{exists, pick_best, FsInfo, SpaceMetric};
use std::path::Path;
use std::sync::Arc;

/// The branch holding the path that ranks best by a space metric.
pub struct ExistingPathSpaceSearchPolicy {
    pub metric: SpaceMetric,
}

impl SearchPolicy for ExistingPathSpaceSearchPolicy {
    fn search(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let candidates = branches.iter().filter(|b| exists(b, path)).filter_map(|b| {
            FsInfo::for_path(&b.path)
                .ok()
                .map(|info| (Arc::clone(b), info))
        });

        pick_best(candidates, self.metric)
            .map(|branch| vec![branch])
            .ok_or(FsError::NotFound)
    }
}
