use std::path::Path;

use crate::config::Func;
use crate::error::FsError;
use crate::executor::{execute, AggregationLaw};
use crate::fs_utils::{self, dirname};
use crate::ops::{first, RequestContext, UnionFs};
use crate::ugid::UgidGuard;

impl UnionFs {
    /// Create `linkpath` pointing at `target` on every branch the symlink
    /// policy selects for its parent directory.
    pub fn symlink(
        &self,
        ctx: &RequestContext,
        target: &Path,
        linkpath: &Path,
    ) -> Result<(), FsError> {
        let _span = tracing::info_span!("symlink", ?target, ?linkpath).entered();
        let config = self.config.read();
        let _ugid = UgidGuard::set(ctx.uid, ctx.gid);

        let dir = dirname(linkpath);
        let sources = config.func.get(Func::Getattr).search(&config.branches, &dir)?;
        let source = first(&sources)?;
        let targets = config.func.get(Func::Symlink).create(&config.branches, &dir)?;

        execute(AggregationLaw::AnySucceeds, &targets, |branch| {
            fs_utils::clone_path_as_root(&source.path, &branch.path, &dir)?;
            fs_utils::symlink(target, &branch.full_path(linkpath))
        })
    }
}
