use crate::branch::Branch;
use crate::error::FsError;
use crate::policy::traits::SearchPolicy;
use crate::policy::utils::exists;
use std::path::Path;
use std::sync::Arc;

/// Union scan: every branch whose filesystem holds the path, in list order.
pub struct AllSearchPolicy;

impl SearchPolicy for AllSearchPolicy {
    fn search(
        &self,
        branches: &[Arc<Branch>],
        path: &Path,
    ) -> Result<Vec<Arc<Branch>>, FsError> {
        let found: Vec<Arc<Branch>> = branches
            .iter()
            .filter(|branch| exists(branch, path))
            .cloned()
            .collect();

        if found.is_empty() {
            Err(FsError::NotFound)
        } else {
            Ok(found)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::BranchMode;
    use crate::test_utils::TestBranches;

    #[test]
    fn test_all_finds_file_in_all_branches() {
        let setup = TestBranches::rw(3);
        for idx in 0..3 {
            setup.touch(idx, "test.txt");
        }

        let result = AllSearchPolicy
            .search(&setup.branches, Path::new("test.txt"))
            .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_all_returns_exact_holders_in_order() {
        let setup = TestBranches::new(&[
            BranchMode::ReadWrite,
            BranchMode::ReadOnly,
            BranchMode::ReadWrite,
            BranchMode::NoCreate,
        ]);
        setup.touch(3, "partial.txt");
        setup.touch(1, "partial.txt");

        let result = AllSearchPolicy
            .search(&setup.branches, Path::new("/partial.txt"))
            .unwrap();
        let paths: Vec<_> = result.iter().map(|b| b.path.clone()).collect();
        assert_eq!(paths, vec![setup.path(1), setup.path(3)]);
    }

    #[test]
    fn test_all_works_with_nested_paths() {
        let setup = TestBranches::rw(3);
        setup.touch(1, "dir1/dir2/file.txt");
        setup.mkdir(2, "dir1/dir2");

        let result = AllSearchPolicy
            .search(&setup.branches, Path::new("dir1/dir2/file.txt"))
            .unwrap();
        assert_eq!(result.len(), 1);

        let result = AllSearchPolicy
            .search(&setup.branches, Path::new("dir1/dir2"))
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_all_returns_error_when_not_found() {
        let setup = TestBranches::rw(3);
        let result = AllSearchPolicy.search(&setup.branches, Path::new("nonexistent.txt"));
        assert_eq!(result, Err(FsError::NotFound));
    }
}
