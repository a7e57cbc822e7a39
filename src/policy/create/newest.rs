use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::search::newest::newest;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::existing_path_create_eligible;
use std::path::Path;
use std::sync::Arc;

/// The create-eligible branch whose copy of the directory is newest.
pub struct NewestCreatePolicy;

impl CreatePolicy for NewestCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut eligible = Vec::new();

        for branch in branches {
            match existing_path_create_eligible(branch, path) {
                Ok(_) => eligible.push(Arc::clone(branch)),
                Err(reason) => rejection.record(reason),
            }
        }

        newest(&eligible, path)
            .map(|branch| vec![branch])
            .ok_or_else(|| rejection.into_error())
    }
}
