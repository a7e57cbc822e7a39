use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::error::Rejection;
use crate::policy::traits::CreatePolicy;
use crate::policy::utils::existing_path_create_eligible;
use std::path::Path;
use std::sync::Arc;

/// Every create-eligible branch that already holds the directory.
pub struct ExistingPathAllCreatePolicy;

impl CreatePolicy for ExistingPathAllCreatePolicy {
    fn create(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let mut rejection = Rejection::new();
        let mut targets = Vec::new();

        for branch in branches {
            match existing_path_create_eligible(branch, path) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::BranchMode;
    use crate::test_utils::TestBranches;

    #[test]
    fn test_epall_create_requires_existing_dir() {
        let setup = TestBranches::new(&[
            BranchMode::ReadWrite,
            BranchMode::ReadWrite,
            BranchMode::NoCreate,
            BranchMode::ReadWrite,
        ]);
        setup.mkdir(0, "data");
        setup.mkdir(2, "data");
        setup.mkdir(3, "data");

        let result = ExistingPathAllCreatePolicy
            .create(&setup.branches, Path::new("/data"))
            .unwrap();
        let paths: Vec<_> = result.iter().map(|b| b.path.clone()).collect();
        assert_eq!(paths, vec![setup.path(0), setup.path(3)]);

        let result = ExistingPathAllCreatePolicy.create(&setup.branches, Path::new("/none"));
        assert_eq!(result, Err(FsError::ReadOnly));
    }
}
