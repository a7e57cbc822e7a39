use std::path::Path;

use crate::branch::{Branch, Branches};
use crate::config::Func;
use crate::error::FsError;
use crate::executor::{execute, AggregationLaw};
use crate::fs_utils::{self, dirname};
use crate::ops::{first, RequestContext, UnionFs};
use crate::policy::Policy;
use crate::ugid::UgidGuard;

impl UnionFs {
    /// Hard link `from` to `to` on every branch the link policy selects.
    pub fn link(&self, ctx: &RequestContext, from: &Path, to: &Path) -> Result<(), FsError> {
        let _span = tracing::info_span!("link", ?from, ?to).entered();
        let config = self.config.read();
        let _ugid = UgidGuard::set(ctx.uid, ctx.gid);

        let search = config.func.get(Func::Getattr);
        let action = config.func.get(Func::Link);
        let create = config.func.get(Func::Create);

        if create.is_path_preserving() && !config.ignorepponrename {
            link_preserve_path(&config.branches, search, action, create, from, to)
        } else {
            link_create_path(&config.branches, search, action, from, to)
        }
    }
}

/// Links in place on each branch holding `from`. A missing parent for `to`
/// is only cloned onto a branch the create policy would have chosen.
fn link_preserve_path(
    branches: &Branches,
    search: Policy,
    action: Policy,
    create: Policy,
    from: &Path,
    to: &Path,
) -> Result<(), FsError> {
    let targets = action.action(branches, from)?;

    execute(AggregationLaw::AnySucceeds, &targets, |branch| {
        let from_full = branch.full_path(from);
        let to_full = branch.full_path(to);

        match fs_utils::link(&from_full, &to_full) {
            Err(e) if e.is_not_found() => {
                clone_path_if_would_create(branches, search, create, branch, to)?;
                fs_utils::link(&from_full, &to_full)
            }
            result => result,
        }
    })
}

fn clone_path_if_would_create(
    branches: &Branches,
    search: Policy,
    create: Policy,
    branch: &Branch,
    to: &Path,
) -> Result<(), FsError> {
    let dir = dirname(to);

    let placement = create.create(branches, &dir)?;
    if first(&placement)?.path != branch.path {
        tracing::debug!(
            "{:?} would be created on {:?}, not {:?}",
            dir,
            placement[0].path,
            branch.path
        );
        return Err(FsError::CrossDevice);
    }

    let sources = search.search(branches, &dir)?;
    fs_utils::clone_path_as_root(&first(&sources)?.path, &branch.path, &dir)
}

/// Links on each branch holding `from`, first cloning the parent of `to`
/// from the branch the search policy finds it on.
fn link_create_path(
    branches: &Branches,
    search: Policy,
    action: Policy,
    from: &Path,
    to: &Path,
) -> Result<(), FsError> {
    let targets = action.action(branches, from)?;
    let dir = dirname(to);
    let sources = search.search(branches, &dir)?;
    let source = first(&sources)?;

    execute(AggregationLaw::AnySucceeds, &targets, |branch| {
        fs_utils::clone_path_as_root(&source.path, &branch.path, &dir)?;
        fs_utils::link(&branch.full_path(from), &branch.full_path(to))
    })
}
