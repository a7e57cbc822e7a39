use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::search::AllSearchPolicy;
use crate::policy::traits::SearchPolicy;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::path::Path;
use std::sync::Arc;

/// One randomly chosen branch among those holding the path.
pub struct RandomSearchPolicy;

impl SearchPolicy for RandomSearchPolicy {
    fn search(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let found = AllSearchPolicy.search(branches, path)?;
        found
            .choose(&mut thread_rng())
            .cloned()
            .map(|branch| vec![branch])
            .ok_or(FsError::NotFound)
    }
}
