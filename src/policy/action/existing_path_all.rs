use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::ActionPolicy;
use crate::policy::utils::action_eligible;
use std::path::Path;
use std::sync::Arc;

/// Every writable branch holding the path, in list order.
pub struct ExistingPathAllActionPolicy;

impl ActionPolicy for ExistingPathAllActionPolicy {
    fn action(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut targets = Vec::new();

        for branch in branches {
            match action_eligible(branch, path) {
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
