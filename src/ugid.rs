//! Per-thread credential scoping.
//!
//! Branch operations run with the filesystem uid/gid of the requesting
//! user so the kernel applies that user's permissions and ownership on the
//! underlying branches. Linux keeps fsuid/fsgid per thread, so a guard only
//! affects the thread that created it.

use nix::unistd::{Gid, Uid};

/// Switches the thread's filesystem credentials until dropped.
///
/// Only effective when the process runs as root; otherwise (and off Linux)
/// the guard does nothing and the process credentials apply.
pub struct UgidGuard {
    previous: Option<(Uid, Gid)>,
}

impl UgidGuard {
    pub fn set(uid: u32, gid: u32) -> Self {
        Self {
            previous: switch(Uid::from_raw(uid), Gid::from_raw(gid)),
        }
    }

    pub fn root() -> Self {
        Self::set(0, 0)
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn switch(uid: Uid, gid: Gid) -> Option<(Uid, Gid)> {
    use nix::unistd::{geteuid, setfsgid, setfsuid};

    if !geteuid().is_root() {
        return None;
    }
    let old_gid = setfsgid(gid);
    let old_uid = setfsuid(uid);
    tracing::trace!("fsuid {} -> {}, fsgid {} -> {}", old_uid, uid, old_gid, gid);
    Some((old_uid, old_gid))
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn restore(uid: Uid, gid: Gid) {
    nix::unistd::setfsuid(uid);
    nix::unistd::setfsgid(gid);
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn switch(_uid: Uid, _gid: Gid) -> Option<(Uid, Gid)> {
    None
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn restore(_uid: Uid, _gid: Gid) {}

impl Drop for UgidGuard {
    fn drop(&mut self) {
        if let Some((uid, gid)) = self.previous.take() {
            restore(uid, gid);
        }
    }
}
