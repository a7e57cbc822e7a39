use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::create::{AllCreatePolicy, ExistingPathAllCreatePolicy};
use crate::policy::traits::CreatePolicy;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::path::Path;
use std::sync::Arc;

/// One random branch among those that may receive a new path.
pub struct RandomCreatePolicy;

/// One random branch among those that may receive a new path and already
/// hold the directory.
pub struct ExistingPathRandomCreatePolicy;

fn choose_one(candidates: Vec<Arc<Branch>>) -> Result<Vec<Arc<Branch>>, FsError> {
    candidates
        .choose(&mut thread_rng())
        .cloned()
        .map(|branch| vec![branch])
        .ok_or(FsError::NotFound)
}

impl CreatePolicy for RandomCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        choose_one(AllCreatePolicy.create(branches, path)?)
    }
}

impl CreatePolicy for ExistingPathRandomCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        choose_one(ExistingPathAllCreatePolicy.create(branches, path)?)
    }
}
