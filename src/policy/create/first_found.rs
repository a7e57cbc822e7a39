use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::create_eligible;
use std::path::Path;
use std::sync::Arc;

pub struct FirstFoundCreatePolicy;

impl CreatePolicy for FirstFoundCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        _path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();

        for branch in branches {
            match create_eligible(branch) {
                Ok(_) => return Ok(vec![Arc::clone(branch)]),
                Err(reason) => rejection.record(reason),
            }
        }

        Err(rejection.into_error())
    }
}
