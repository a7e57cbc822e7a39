use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::existing_path_create_eligible;
use std::path::Path;
use std::sync::Arc;

/// The first create-eligible branch that already holds the directory.
pub struct ExistingPathFirstFoundCreatePolicy;

impl CreatePolicy for ExistingPathFirstFoundCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();

        for branch in branches {
            match existing_path_create_eligible(branch, path) {
                Ok(_) => return Ok(vec![Arc::clone(branch)]),
                Err(reason) => rejection.record(reason),
            }
        }

        Err(rejection.into_error())
    }
}
