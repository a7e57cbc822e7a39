use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::ActionPolicy;
use crate::policy::utils::action_eligible;
use std::path::Path;
use std::sync::Arc;

/// The first writable branch holding the path.
pub struct ExistingPathFirstFoundActionPolicy;

impl ActionPolicy for ExistingPathFirstFoundActionPolicy {
    fn action(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();

        for branch in branches {
            match action_eligible(branch, path) {
                Ok(_) => return Ok(vec![Arc::clone(branch)]),
                Err(reason) => rejection.record(reason),
            }
        }

        Err(rejection.into_error())
    }
}
