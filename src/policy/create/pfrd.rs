use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::create_eligible;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Proportional Fill Random Distribution (PFRD) create policy.
/// Picks one create-eligible branch, weighted by its available space.
pub struct ProportionalFillRandomDistributionCreatePolicy;

impl CreatePolicy for ProportionalFillRandomDistributionCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        _path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let _span = tracing::debug_span!("pfrd_policy::create").entered();

        let mut rejection = Rejection::new();
        let mut candidates: Vec<(Arc<Branch>, u64)> = Vec::new();
        for branch in branches {
            match create_eligible(branch) {
                Ok(info) if info.space_available > 0 => {
                    candidates.push((Arc::clone(branch), info.space_available))
                }
                Ok(_) => rejection.record(FsError::OutOfSpace),
                Err(reason) => rejection.record(reason),
            }
        }

        if candidates.len() <= 1 {
            return candidates
                .pop()
                .map(|(branch, _)| vec![branch])
                .ok_or_else(|| rejection.into_error());
        }

        for (branch, weight) in &candidates {
            tracing::trace!("Branch {:?} has weight {} bytes", branch.path, weight);
        }

        let dist = WeightedIndex::new(candidates.iter().map(|(_, space)| *space)).map_err(|e| {
            tracing::error!("Failed to create weighted distribution: {}", e);
            rejection.into_error()
        })?;
        let (branch, space) = &candidates[dist.sample(&mut thread_rng())];
        tracing::debug!(
            "PFRD selected branch {:?} with {} bytes free space",
            branch.path,
            space
        );
        Ok(vec![Arc::clone(branch)])
    }
}
