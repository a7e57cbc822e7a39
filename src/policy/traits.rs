use crate::branch::Branch;
use crate::error::FsError;
use std::path::Path;
use std::sync::Arc;

/// Search policies find branches holding an existing path for read and
/// path-resolution operations.
pub trait SearchPolicy: Send + Sync {
    fn search(&self, branches: &[Arc<Branch>], path: &Path)
        -> Result<Vec<Arc<Branch>>, FsError>;
}

/// Create policies choose the branches that receive a new path.
///
/// `path` is the parent directory of the path being created.
pub trait CreatePolicy: Send + Sync {
    fn create(&self, branches: &[Arc<Branch>], path: &Path)
        -> Result<Vec<Arc<Branch>>, FsError>;
}

/// Action policies find branches holding an existing path for operations
/// that mutate it.
pub trait ActionPolicy: Send + Sync {
    fn action(&self, branches: &[Arc<Branch>], path: &Path)
        -> Result<Vec<Arc<Branch>>, FsError>;
}
