use parking_lot::RwLock;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::parse_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchMode {
    ReadWrite,
    ReadOnly,
    NoCreate,
}

impl BranchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchMode::ReadWrite => "RW",
            BranchMode::ReadOnly => "RO",
            BranchMode::NoCreate => "NC",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum BranchSpecError {
    #[error("Empty branch path")]
    EmptyPath,
    #[error("Unknown branch mode '{0}'")]
    InvalidMode(String),
    #[error("Invalid minfreespace '{0}'")]
    InvalidSize(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub path: PathBuf,
    pub mode: BranchMode,
    pub min_free_space: u64,
}

impl Branch {
    pub fn new(path: PathBuf, mode: BranchMode) -> Self {
        Self::with_min_free_space(path, mode, 0)
    }

    pub fn with_min_free_space(path: PathBuf, mode: BranchMode, min_free_space: u64) -> Self {
        Self {
            path,
            mode,
            min_free_space,
        }
    }

    /// Parse `PATH[=MODE[,MINFREESPACE]]`. The mode follows the last `=`, so
    /// paths may themselves contain `=`.
    pub fn parse(spec: &str, default_min_free_space: u64) -> Result<Self, BranchSpecError> {
        let (path, options) = match spec.rsplit_once('=') {
            Some((path, options)) => (path, Some(options)),
            None => (spec, None),
        };
        if path.is_empty() {
            return Err(BranchSpecError::EmptyPath);
        }

        let mut mode = BranchMode::ReadWrite;
        let mut min_free_space = default_min_free_space;
        if let Some(options) = options {
            let (mode_str, size_str) = match options.split_once(',') {
                Some((m, s)) => (m, Some(s)),
                None => (options, None),
            };
            mode = match mode_str.to_uppercase().as_str() {
                "RW" => BranchMode::ReadWrite,
                "RO" => BranchMode::ReadOnly,
                "NC" => BranchMode::NoCreate,
                _ => return Err(BranchSpecError::InvalidMode(mode_str.to_string())),
            };
            if let Some(size_str) = size_str {
                min_free_space = parse_size(size_str)
                    .ok_or_else(|| BranchSpecError::InvalidSize(size_str.to_string()))?;
            }
        }

        Ok(Self::with_min_free_space(PathBuf::from(path), mode, min_free_space))
    }

    /// Parse a `:` separated list of branch specs.
    pub fn parse_list(
        specs: &str,
        default_min_free_space: u64,
    ) -> Result<Vec<Arc<Branch>>, BranchSpecError> {
        specs
            .split(':')
            .filter(|s| !s.is_empty())
            .map(|s| Branch::parse(s, default_min_free_space).map(Arc::new))
            .collect()
    }

    pub fn ro(&self) -> bool {
        matches!(self.mode, BranchMode::ReadOnly)
    }

    /// Never a create target.
    pub fn ro_or_nc(&self) -> bool {
        matches!(self.mode, BranchMode::ReadOnly | BranchMode::NoCreate)
    }

    pub fn full_path(&self, relative_path: &Path) -> PathBuf {
        self.path.join(relative_path.strip_prefix("/").unwrap_or(relative_path))
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={},{}",
            self.path.display(),
            self.mode.as_str(),
            self.min_free_space
        )
    }
}

/// Ordered branch list guarded by a reader/writer lock.
///
/// Policy scans hold the read lock for their whole scan so they always see
/// one consistent list. Mutation only happens under the write lock.
#[derive(Debug, Default)]
pub struct Branches {
    vec: RwLock<Vec<Arc<Branch>>>,
}

impl Branches {
    pub fn new(vec: Vec<Arc<Branch>>) -> Self {
        Self {
            vec: RwLock::new(vec),
        }
    }

    /// Run `f` over the branch list while holding the read lock.
    pub fn for_each_read<R>(&self, f: impl FnOnce(&[Arc<Branch>]) -> R) -> R {
        let guard = self.vec.read();
        f(&guard)
    }

    pub fn snapshot(&self) -> Vec<Arc<Branch>> {
        self.vec.read().clone()
    }

    pub fn len(&self) -> usize {
        self.vec.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.read().is_empty()
    }

    pub fn set(&self, branches: Vec<Arc<Branch>>) {
        *self.vec.write() = branches;
    }

    pub fn push_back(&self, branches: Vec<Arc<Branch>>) {
        self.vec.write().extend(branches);
    }

    pub fn push_front(&self, branches: Vec<Arc<Branch>>) {
        let mut vec = self.vec.write();
        let tail = std::mem::replace(&mut *vec, branches);
        vec.extend(tail);
    }

    /// Remove every branch rooted at `path`. Returns whether anything was removed.
    pub fn remove(&self, path: &Path) -> bool {
        let mut vec = self.vec.write();
        let before = vec.len();
        vec.retain(|b| b.path != path);
        vec.len() != before
    }
}

impl Clone for Branches {
    fn clone(&self) -> Self {
        Self::new(self.snapshot())
    }
}

impl fmt::Display for Branches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.for_each_read(|branches| {
            let specs: Vec<String> = branches.iter().map(|b| b.to_string()).collect();
            write!(f, "{}", specs.join(":"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_branch_creation() {
        let temp_dir = TempDir::new().unwrap();
        let branch = Branch::new(temp_dir.path().to_path_buf(), BranchMode::ReadWrite);

        assert!(!branch.ro_or_nc());
        assert!(!branch.ro());
        assert_eq!(branch.path, temp_dir.path());
        assert_eq!(branch.min_free_space, 0);
    }

    #[test]
    fn test_branch_readonly_and_nocreate() {
        let temp_dir = TempDir::new().unwrap();
        let ro = Branch::new(temp_dir.path().to_path_buf(), BranchMode::ReadOnly);
        let nc = Branch::new(temp_dir.path().to_path_buf(), BranchMode::NoCreate);

        assert!(ro.ro_or_nc());
        assert!(ro.ro());
        assert!(nc.ro_or_nc());
        assert!(!nc.ro());
    }

    #[test]
    fn test_full_path() {
        let temp_dir = TempDir::new().unwrap();
        let branch = Branch::new(temp_dir.path().to_path_buf(), BranchMode::ReadWrite);

        let full_path = branch.full_path(Path::new("test.txt"));
        assert_eq!(full_path, temp_dir.path().join("test.txt"));

        let full_path_abs = branch.full_path(Path::new("/test.txt"));
        assert_eq!(full_path_abs, temp_dir.path().join("test.txt"));
    }

    #[test]
    fn test_parse_branch_spec() {
        let b = Branch::parse("/mnt/a", 100).unwrap();
        assert_eq!(b.path, PathBuf::from("/mnt/a"));
        assert_eq!(b.mode, BranchMode::ReadWrite);
        assert_eq!(b.min_free_space, 100);

        let b = Branch::parse("/mnt/b=ro", 100).unwrap();
        assert_eq!(b.mode, BranchMode::ReadOnly);
        assert_eq!(b.min_free_space, 100);

        let b = Branch::parse("/mnt/c=NC,1K", 100).unwrap();
        assert_eq!(b.mode, BranchMode::NoCreate);
        assert_eq!(b.min_free_space, 1024);

        assert_eq!(
            Branch::parse("/mnt/d=XX", 0),
            Err(BranchSpecError::InvalidMode("XX".to_string()))
        );
        assert_eq!(
            Branch::parse("/mnt/e=RW,lots", 0),
            Err(BranchSpecError::InvalidSize("lots".to_string()))
        );
        assert_eq!(Branch::parse("=RW", 0), Err(BranchSpecError::EmptyPath));
    }

    #[test]
    fn test_parse_path_containing_equals() {
        let b = Branch::parse("/mnt/a=b=NC,2K", 0).unwrap();
        assert_eq!(b.path, PathBuf::from("/mnt/a=b"));
        assert_eq!(b.mode, BranchMode::NoCreate);
        assert_eq!(b.min_free_space, 2048);
    }

    #[test]
    fn test_parse_list_and_display() {
        let list = Branch::parse_list("/a=RW,10:/b=RO", 5).unwrap();
        assert_eq!(list.len(), 2);

        let branches = Branches::new(list);
        assert_eq!(branches.to_string(), "/a=RW,10:/b=RO,5");
    }

    #[test]
    fn test_branches_mutation() {
        let branches = Branches::new(Branch::parse_list("/a:/b", 0).unwrap());

        branches.push_front(Branch::parse_list("/z", 0).unwrap());
        branches.push_back(Branch::parse_list("/c", 0).unwrap());
        let paths: Vec<PathBuf> = branches.snapshot().iter().map(|b| b.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/z"),
                PathBuf::from("/a"),
                PathBuf::from("/b"),
                PathBuf::from("/c")
            ]
        );

        assert!(branches.remove(Path::new("/a")));
        assert!(!branches.remove(Path::new("/missing")));
        assert_eq!(branches.len(), 3);
    }

    #[test]
    fn test_readers_never_observe_partial_reconfiguration() {
        let generation = |tag: &str| -> Vec<Arc<Branch>> {
            (0..8)
                .map(|i| {
                    Arc::new(Branch::new(
                        PathBuf::from(format!("/{}/{}", tag, i)),
                        BranchMode::ReadWrite,
                    ))
                })
                .collect()
        };

        let branches = Arc::new(Branches::new(generation("a")));

        let writer = {
            let branches = Arc::clone(&branches);
            let a = generation("a");
            let b = generation("b");
            thread::spawn(move || {
                for i in 0..500 {
                    branches.set(if i % 2 == 0 { b.clone() } else { a.clone() });
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let branches = Arc::clone(&branches);
                thread::spawn(move || {
                    for _ in 0..500 {
                        branches.for_each_read(|list| {
                            assert_eq!(list.len(), 8);
                            let first = list[0].path.components().nth(1);
                            assert!(list
                                .iter()
                                .all(|b| b.path.components().nth(1) == first));
                        });
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
