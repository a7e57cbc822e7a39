use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::{create_eligible, pick_best, SpaceMetric};
use std::path::Path;
use std::sync::Arc;

/// Space-balancing create policies (`lfs`, `lus`, `mfs`).
///
/// Scans every branch, discards those that are read-only or no-create,
/// whose space query fails, whose filesystem is mounted read-only, or whose
/// available space is below the branch threshold. Among the survivors the
/// best branch by `metric` wins, the earliest one on ties.
pub struct SpaceCreatePolicy {
    pub metric: SpaceMetric,
}

impl SpaceCreatePolicy {
    pub const fn least_free() -> Self {
        Self {
            metric: SpaceMetric::LeastFree,
        }
    }

    pub const fn least_used() -> Self {
        Self {
            metric: SpaceMetric::LeastUsed,
        }
    }

    pub const fn most_free() -> Self {
        Self {
            metric: SpaceMetric::MostFree,
        }
    }
}

impl CreatePolicy for SpaceCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        _path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut candidates = Vec::with_capacity(branches.len());

        for branch in branches {
            match create_eligible(branch) {
                Ok(info) => candidates.push((Arc::clone(branch), info)),
                Err(reason) => {
                    tracing::trace!("{:?} create skipped {:?}: {}", self.metric, branch.path, reason);
                    rejection.record(reason);
                }
            }
        }

        match pick_best(candidates, self.metric) {
            Some(branch) => {
                tracing::debug!("{:?} create selected {:?}", self.metric, branch.path);
                Ok(vec![branch])
            }
            None => Err(rejection.into_error()),
        }
    }
}
