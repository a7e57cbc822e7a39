use std::path::Path;

use crate::config::Func;
use crate::error::FsError;
use crate::executor::{execute, AggregationLaw};
use crate::fs_utils;
use crate::ops::{RequestContext, UnionFs};
use crate::ugid::UgidGuard;

impl UnionFs {
    pub fn unlink(&self, ctx: &RequestContext, path: &Path) -> Result<(), FsError> {
        let _span = tracing::info_span!("unlink", ?path).entered();
        let config = self.config.read();
        let _ugid = UgidGuard::set(ctx.uid, ctx.gid);

        let targets = config.func.get(Func::Unlink).action(&config.branches, path)?;

        execute(AggregationLaw::AllMustSucceed, &targets, |branch| {
            fs_utils::unlink(&branch.full_path(path))
        })
    }
}
