//! Test utilities for scripting branch filesystem info.
//!
//! A branch whose root holds a `.space_marker` file reports the values in
//! that file instead of the real statvfs result. The marker holds the
//! available space in MB, optionally followed by the used space in MB and
//! the word `ro`. Without an explicit used value, branches are assumed to be
//! 100MB in total.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use crate::branch::{Branch, BranchMode};
use crate::config::{create_config, ConfigRef};
use crate::ops::{RequestContext, UnionFs};
use crate::policy::utils::FsInfo;

pub const MB: u64 = 1024 * 1024;
const MARKER: &str = ".space_marker";

/// Write a marker giving `branch_path` the supplied space figures (in MB).
pub fn set_space(branch_path: &Path, available_mb: u64, used_mb: u64, readonly: bool) {
    let mut content = format!("{} {}", available_mb, used_mb);
    if readonly {
        content.push_str(" ro");
    }
    fs::write(branch_path.join(MARKER), content).unwrap();
}

/// Read the marker for `path`, if any.
pub fn get_test_fs_info(path: &Path) -> Option<FsInfo> {
    let content = fs::read_to_string(path.join(MARKER)).ok()?;
    let mut tokens = content.split_whitespace();

    let available_mb: u64 = tokens.next()?.parse().ok()?;
    let mut used_mb = 100u64.saturating_sub(available_mb);
    let mut readonly = false;
    for token in tokens {
        if token == "ro" {
            readonly = true;
        } else if let Ok(value) = token.parse() {
            used_mb = value;
        }
    }

    Some(FsInfo {
        space_available: available_mb * MB,
        space_used: used_mb * MB,
        readonly,
    })
}

/// A set of temporary branch directories kept alive for a test.
pub struct TestBranches {
    pub dirs: Vec<TempDir>,
    pub branches: Vec<Arc<Branch>>,
}

impl TestBranches {
    pub fn new(modes: &[BranchMode]) -> Self {
        let dirs: Vec<TempDir> = modes.iter().map(|_| TempDir::new().unwrap()).collect();
        let branches = dirs
            .iter()
            .zip(modes)
            .map(|(dir, mode)| Arc::new(Branch::new(dir.path().to_path_buf(), *mode)))
            .collect();
        Self { dirs, branches }
    }

    pub fn rw(count: usize) -> Self {
        Self::new(&vec![BranchMode::ReadWrite; count])
    }

    pub fn path(&self, idx: usize) -> PathBuf {
        self.dirs[idx].path().to_path_buf()
    }

    /// Create `relative` as a directory (with parents) on branch `idx`.
    pub fn mkdir(&self, idx: usize, relative: &str) {
        fs::create_dir_all(self.branches[idx].full_path(Path::new(relative))).unwrap();
    }

    /// Create `relative` as a file on branch `idx`.
    pub fn touch(&self, idx: usize, relative: &str) {
        let full = self.branches[idx].full_path(Path::new(relative));
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, relative).unwrap();
    }

    /// A fresh config over these branches with the default bindings.
    pub fn config(&self) -> ConfigRef {
        let config = create_config();
        config.write().branches.set(self.branches.clone());
        config
    }

    pub fn union_fs(&self) -> (ConfigRef, UnionFs) {
        let config = self.config();
        (config.clone(), UnionFs::new(config))
    }

    pub fn exists(&self, idx: usize, relative: &str) -> bool {
        self.branches[idx]
            .full_path(Path::new(relative))
            .symlink_metadata()
            .is_ok()
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::current()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_markers() {
        let setup = TestBranches::rw(2);
        fs::write(setup.path(0).join(MARKER), "80").unwrap();
        set_space(&setup.path(1), 10, 500, true);

        let info0 = FsInfo::for_path(&setup.path(0)).unwrap();
        assert_eq!(info0.space_available, 80 * MB);
        assert_eq!(info0.space_used, 20 * MB);
        assert!(!info0.readonly);

        let info1 = FsInfo::for_path(&setup.path(1)).unwrap();
        assert_eq!(info1.space_available, 10 * MB);
        assert_eq!(info1.space_used, 500 * MB);
        assert!(info1.readonly);
    }
}
