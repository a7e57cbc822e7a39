use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::traits::SearchPolicy;
use crate::policy::utils::mtime;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

/// Newest search policy - the branch whose copy has the newest mtime.
pub struct NewestSearchPolicy;

/// Pick the branch with the newest mtime among `candidates`, first on ties.
pub(crate) fn newest<'a>(
    candidates: impl IntoIterator<Item = &'a Arc<Branch>>,
    path: &Path,
) -> Option<Arc<Branch>> {
    let mut newest_branch = None;
    let mut newest_time = None::<SystemTime>;

    for branch in candidates {
        if let Some(modified) = mtime(branch, path) {
            if newest_time.map_or(true, |t| modified > t) {
                newest_time = Some(modified);
                newest_branch = Some(Arc::clone(branch));
            }
        }
    }

    newest_branch
}

impl SearchPolicy for NewestSearchPolicy {
    fn search(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        newest(branches, path)
            .map(|branch| vec![branch])
            .ok_or(FsError::NotFound)
    }
}
