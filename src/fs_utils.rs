use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use filetime::{set_symlink_file_times, FileTime};
use nix::sys::stat::Mode;
use nix::unistd::{chown, Gid, Uid};

use crate::error::FsError;
use crate::ugid::UgidGuard;

/// Parent directory of a mount-relative path, `/` at the top.
pub fn dirname(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("/"),
    }
}

/// Recreate the directory `relative_path` of `src_base` under `dst_base`.
///
/// Every missing component is created in turn with the source's mode,
/// owner and timestamps. Components that already exist on the destination
/// are left untouched. Ownership is best effort: it needs privileges the
/// caller may not have.
pub fn clone_path(src_base: &Path, dst_base: &Path, relative_path: &Path) -> Result<(), FsError> {
    let relative_path = relative_path.strip_prefix("/").unwrap_or(relative_path);
    if relative_path.as_os_str().is_empty() {
        return Ok(());
    }

    let mut components: Vec<&Path> = relative_path
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    components.reverse();

    for component in components {
        let dst_dir = dst_base.join(component);
        if dst_dir.symlink_metadata().is_ok() {
            continue;
        }

        let src_metadata = src_base.join(component).symlink_metadata()?;
        if !src_metadata.is_dir() {
            return Err(FsError::Errno(nix::errno::Errno::ENOTDIR));
        }

        match fs::create_dir(&dst_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }

        fs::set_permissions(&dst_dir, src_metadata.permissions())?;

        if let Err(e) = chown(
            &dst_dir,
            Some(Uid::from_raw(src_metadata.uid())),
            Some(Gid::from_raw(src_metadata.gid())),
        ) {
            tracing::debug!("Could not copy ownership to {:?}: {}", dst_dir, e);
        }

        let atime = FileTime::from_last_access_time(&src_metadata);
        let mtime = FileTime::from_last_modification_time(&src_metadata);
        if let Err(e) = set_symlink_file_times(&dst_dir, atime, mtime) {
            tracing::debug!("Could not copy timestamps to {:?}: {}", dst_dir, e);
        }

        tracing::trace!("Cloned {:?} onto {:?}", component, dst_base);
    }

    Ok(())
}

/// [`clone_path`] with root credentials, so directories the caller could not
/// create themselves still get their owner copied.
pub fn clone_path_as_root(
    src_base: &Path,
    dst_base: &Path,
    relative_path: &Path,
) -> Result<(), FsError> {
    let _root = UgidGuard::root();
    clone_path(src_base, dst_base, relative_path)
}

pub fn link(from: &Path, to: &Path) -> Result<(), FsError> {
    fs::hard_link(from, to).map_err(FsError::from)
}

pub fn symlink(target: &Path, linkpath: &Path) -> Result<(), FsError> {
    std::os::unix::fs::symlink(target, linkpath).map_err(FsError::from)
}

pub fn rmdir(path: &Path) -> Result<(), FsError> {
    fs::remove_dir(path).map_err(FsError::from)
}

pub fn unlink(path: &Path) -> Result<(), FsError> {
    fs::remove_file(path).map_err(FsError::from)
}

pub fn mkdir(path: &Path, mode: u32) -> Result<(), FsError> {
    nix::unistd::mkdir(path, Mode::from_bits_truncate(mode as _)).map_err(FsError::from)
}
