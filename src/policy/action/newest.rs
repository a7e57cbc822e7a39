use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::search::newest::newest;
use crate::policy::traits::ActionPolicy;
use crate::policy::utils::action_eligible;
use std::path::Path;
use std::sync::Arc;

/// The writable branch whose copy of the path has the newest mtime.
pub struct NewestActionPolicy;

impl ActionPolicy for NewestActionPolicy {
    fn action(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut eligible = Vec::new();

        for branch in branches {
            match action_eligible(branch, path) {
                Ok(_) => eligible.push(Arc::clone(branch)),
                Err(reason) => rejection.record(reason),
            }
        }

        newest(&eligible, path)
            .map(|branch| vec![branch])
            .ok_or_else(|| rejection.into_error())
    }
}
