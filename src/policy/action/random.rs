use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::action::ExistingPathAllActionPolicy;
use crate::policy::traits::ActionPolicy;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::path::Path;
use std::sync::Arc;

/// One randomly chosen writable branch among those holding the path.
pub struct RandomActionPolicy;

impl ActionPolicy for RandomActionPolicy {
    fn action(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let eligible = ExistingPathAllActionPolicy.action(branches, path)?;
        eligible
            .choose(&mut thread_rng())
            .cloned()
            .map(|branch| vec![branch])
            .ok_or(FsError::NotFound)
    }
}
