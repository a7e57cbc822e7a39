use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::create_eligible;
use std::path::Path;
use std::sync::Arc;

/// Every branch that may receive a new path, in list order.
pub struct AllCreatePolicy;

impl CreatePolicy for AllCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        _path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut targets = Vec::new();

        for branch in branches {
            match create_eligible(branch) {
                Ok(_) => targets.push(Arc::clone(branch)),
                Err(reason) => rejection.record(reason),
            }
        }

        if targets.is_empty() {
            Err(rejection.into_error())
        } else {
            Ok(targets)
        }
    }
}
