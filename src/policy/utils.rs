use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use crate::branch::Branch;
use crate::error::FsError;

/// Live filesystem information for one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsInfo {
    pub space_available: u64,
    pub space_used: u64,
    pub readonly: bool,
}

impl FsInfo {
    /// Query the filesystem backing `path`.
    ///
    /// Uses f_bavail for available space so filesystem reservations are
    /// respected, and (f_blocks - f_bfree) for used space.
    pub fn for_path(path: &Path) -> io::Result<FsInfo> {
        #[cfg(test)]
        {
            if let Some(info) = crate::test_utils::get_test_fs_info(path) {
                return Ok(info);
            }
        }

        use nix::sys::statvfs::{statvfs, FsFlags};

        let stat = statvfs(path).map_err(io::Error::from)?;

        let block_size = stat.fragment_size() as u64;
        let total = stat.blocks() as u64 * block_size;
        let available = stat.blocks_available() as u64 * block_size;
        let free = stat.blocks_free() as u64 * block_size;
        let readonly = stat.flags().contains(FsFlags::ST_RDONLY);

        tracing::trace!(
            "FsInfo for {:?}: total={}, available={}, free={}, readonly={}",
            path,
            total,
            available,
            free,
            readonly
        );

        Ok(FsInfo {
            space_available: available,
            space_used: total.saturating_sub(free),
            readonly,
        })
    }
}

/// lstat-style existence check of `relative` inside `branch`.
pub fn exists(branch: &Branch, relative: &Path) -> bool {
    branch.full_path(relative).symlink_metadata().is_ok()
}

/// Modification time of `relative` inside `branch`, without following symlinks.
pub fn mtime(branch: &Branch, relative: &Path) -> Option<SystemTime> {
    branch
        .full_path(relative)
        .symlink_metadata()
        .and_then(|m| m.modified())
        .ok()
}

/// Space figure a policy ranks branches by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceMetric {
    LeastFree,
    LeastUsed,
    MostFree,
}

impl SpaceMetric {
    /// Whether `candidate` beats `best`. Ties keep the earlier branch.
    pub fn better(&self, candidate: &FsInfo, best: &FsInfo) -> bool {
        match self {
            SpaceMetric::LeastFree => candidate.space_available < best.space_available,
            SpaceMetric::LeastUsed => candidate.space_used < best.space_used,
            SpaceMetric::MostFree => candidate.space_available > best.space_available,
        }
    }
}

/// Pick the best branch by `metric`, first in order on ties.
pub fn pick_best(
    candidates: impl IntoIterator<Item = (Arc<Branch>, FsInfo)>,
    metric: SpaceMetric,
) -> Option<Arc<Branch>> {
    let mut best: Option<(Arc<Branch>, FsInfo)> = None;
    for (branch, info) in candidates {
        let replace = match &best {
            Some((_, best_info)) => metric.better(&info, best_info),
            None => true,
        };
        if replace {
            best = Some((branch, info));
        }
    }
    best.map(|(branch, _)| branch)
}

/// Checks a branch may receive a new path. Returns its live info.
pub fn create_eligible(branch: &Branch) -> Result<FsInfo, FsError> {
    if branch.ro_or_nc() {
        return Err(FsError::ReadOnly);
    }
    let info = FsInfo::for_path(&branch.path).map_err(|_| FsError::NotFound)?;
    if info.readonly {
        return Err(FsError::ReadOnly);
    }
    if info.space_available < branch.min_free_space {
        return Err(FsError::OutOfSpace);
    }
    Ok(info)
}

/// Checks a branch holds `path` and may have it modified.
pub fn action_eligible(branch: &Branch, path: &Path) -> Result<FsInfo, FsError> {
    if branch.ro() {
        return Err(FsError::ReadOnly);
    }
    if !exists(branch, path) {
        return Err(FsError::NotFound);
    }
    let info = FsInfo::for_path(&branch.path).map_err(|_| FsError::NotFound)?;
    if info.readonly {
        return Err(FsError::ReadOnly);
    }
    Ok(info)
}

/// Checks a branch holds `path` and may receive new entries under it.
pub fn existing_path_create_eligible(branch: &Branch, path: &Path) -> Result<FsInfo, FsError> {
    if branch.ro_or_nc() {
        return Err(FsError::ReadOnly);
    }
    if !exists(branch, path) {
        return Err(FsError::NotFound);
    }
    create_eligible(branch)
}
