use std::path::Path;

use crate::config::Func;
use crate::error::FsError;
use crate::executor::{execute, AggregationLaw};
use crate::fs_utils::{self, dirname};
use crate::ops::{first, RequestContext, UnionFs};
use crate::ugid::UgidGuard;

impl UnionFs {
    pub fn mkdir(&self, ctx: &RequestContext, path: &Path, mode: u32) -> Result<(), FsError> {
        let _span = tracing::info_span!("mkdir", ?path, mode).entered();
        let config = self.config.read();
        let _ugid = UgidGuard::set(ctx.uid, ctx.gid);

        let dir = dirname(path);
        let sources = config.func.get(Func::Getattr).search(&config.branches, &dir)?;
        let source = first(&sources)?;
        let targets = config.func.get(Func::Mkdir).create(&config.branches, &dir)?;

        execute(AggregationLaw::AnySucceeds, &targets, |branch| {
            fs_utils::clone_path_as_root(&source.path, &branch.path, &dir)?;
            fs_utils::mkdir(&branch.full_path(path), mode)
        })
    }
}
