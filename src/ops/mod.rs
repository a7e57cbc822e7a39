//! Mutating filesystem operations spread across branches.
//!
//! Every entry point holds the configuration read lock and the caller's
//! credentials for its whole duration, asks the bound policy for target
//! branches, runs the primitive on each and folds the outcomes.

mod link;
mod mkdir;
mod rmdir;
mod symlink;
mod unlink;

use std::sync::Arc;

use nix::unistd::{getegid, geteuid};

use crate::branch::Branch;
use crate::config::ConfigRef;
use crate::error::FsError;

/// Credentials of the process that issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub uid: u32,
    pub gid: u32,
}

impl RequestContext {
    pub fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }

    /// The credentials this process runs with.
    pub fn current() -> Self {
        Self::new(geteuid().as_raw(), getegid().as_raw())
    }
}

pub struct UnionFs {
    config: ConfigRef,
}

impl UnionFs {
    pub fn new(config: ConfigRef) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfigRef {
        &self.config
    }
}

/// `0` on success, negative errno on failure.
pub fn to_errno(result: &Result<(), FsError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => -e.errno(),
    }
}

fn first(branches: &[Arc<Branch>]) -> Result<&Arc<Branch>, FsError> {
    branches.first().ok_or(FsError::NoTargets)
}
