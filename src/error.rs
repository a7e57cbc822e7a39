use nix::errno::Errno;
use std::io;
use thiserror::Error;

/// Failure of a policy decision or of a branch operation.
///
/// Policy scans produce the named kinds; primitives run against a branch
/// produce `Errno`. Everything is flattened to a single errno at the
/// protocol boundary via [`FsError::errno`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No branch holds the path")]
    NotFound,
    #[error("All eligible branches are read-only")]
    ReadOnly,
    #[error("All eligible branches are below their free space threshold")]
    OutOfSpace,
    #[error("Cross-device link")]
    CrossDevice,
    #[error("Policy selected no branches")]
    NoTargets,
    #[error("{0}")]
    Errno(Errno),
}

impl FsError {
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound => Errno::ENOENT as i32,
            FsError::ReadOnly => Errno::EROFS as i32,
            FsError::OutOfSpace => Errno::ENOSPC as i32,
            FsError::CrossDevice => Errno::EXDEV as i32,
            FsError::NoTargets => Errno::EIO as i32,
            FsError::Errno(e) => *e as i32,
        }
    }

    /// True when the underlying cause is a missing path component.
    pub fn is_not_found(&self) -> bool {
        self.errno() == Errno::ENOENT as i32
    }
}

impl From<Errno> for FsError {
    fn from(e: Errno) -> Self {
        FsError::Errno(e)
    }
}

impl From<io::Error> for FsError {
    fn from(e: io::Error) -> Self {
        FsError::Errno(e.raw_os_error().map(Errno::from_i32).unwrap_or(Errno::EIO))
    }
}
