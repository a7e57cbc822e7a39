pub mod action;
pub mod create;
pub mod error;
pub mod read_only;
pub mod search;
pub mod traits;
pub mod utils;

pub use traits::{ActionPolicy, CreatePolicy, SearchPolicy};

use crate::branch::{Branch, Branches};
use crate::error::FsError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use action::{
    ExistingPathAllActionPolicy, ExistingPathFirstFoundActionPolicy,
    ExistingPathSpaceActionPolicy, NewestActionPolicy, RandomActionPolicy,
};
use create::{
    AllCreatePolicy, ExistingPathAllCreatePolicy, ExistingPathFirstFoundCreatePolicy,
    ExistingPathRandomCreatePolicy, ExistingPathSpaceCreatePolicy, FirstFoundCreatePolicy,
    MostSharedPathCreatePolicy, NewestCreatePolicy,
    ProportionalFillRandomDistributionCreatePolicy, RandomCreatePolicy, SpaceCreatePolicy,
};
use read_only::ReadOnlyPolicy;
use search::{
    AllSearchPolicy, ExistingPathSpaceSearchPolicy, FirstFoundSearchPolicy, NewestSearchPolicy,
    RandomSearchPolicy,
};
use utils::SpaceMetric;

static EPLFS_SEARCH: ExistingPathSpaceSearchPolicy = ExistingPathSpaceSearchPolicy {
    metric: SpaceMetric::LeastFree,
};
static EPMFS_SEARCH: ExistingPathSpaceSearchPolicy = ExistingPathSpaceSearchPolicy {
    metric: SpaceMetric::MostFree,
};
static EPLFS_ACTION: ExistingPathSpaceActionPolicy = ExistingPathSpaceActionPolicy {
    metric: SpaceMetric::LeastFree,
};
static EPMFS_ACTION: ExistingPathSpaceActionPolicy = ExistingPathSpaceActionPolicy {
    metric: SpaceMetric::MostFree,
};
static EPLFS_CREATE: ExistingPathSpaceCreatePolicy = ExistingPathSpaceCreatePolicy {
    metric: SpaceMetric::LeastFree,
};
static EPLUS_CREATE: ExistingPathSpaceCreatePolicy = ExistingPathSpaceCreatePolicy {
    metric: SpaceMetric::LeastUsed,
};
static EPMFS_CREATE: ExistingPathSpaceCreatePolicy = ExistingPathSpaceCreatePolicy {
    metric: SpaceMetric::MostFree,
};
static LFS_CREATE: SpaceCreatePolicy = SpaceCreatePolicy::least_free();
static LUS_CREATE: SpaceCreatePolicy = SpaceCreatePolicy::least_used();
static MFS_CREATE: SpaceCreatePolicy = SpaceCreatePolicy::most_free();
static MSPLFS_CREATE: MostSharedPathCreatePolicy = MostSharedPathCreatePolicy {
    metric: SpaceMetric::LeastFree,
};
static MSPLUS_CREATE: MostSharedPathCreatePolicy = MostSharedPathCreatePolicy {
    metric: SpaceMetric::LeastUsed,
};
static MSPMFS_CREATE: MostSharedPathCreatePolicy = MostSharedPathCreatePolicy {
    metric: SpaceMetric::MostFree,
};

/// Every branch-selection policy, by its short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    All,
    EpAll,
    EpFf,
    EpLfs,
    EpLus,
    EpMfs,
    EpRand,
    Erofs,
    Ff,
    Lfs,
    Lus,
    Mfs,
    MspLfs,
    MspLus,
    MspMfs,
    Newest,
    Pfrd,
    Rand,
}

impl Policy {
    pub const ALL: [Policy; 18] = [
        Policy::All,
        Policy::EpAll,
        Policy::EpFf,
        Policy::EpLfs,
        Policy::EpLus,
        Policy::EpMfs,
        Policy::EpRand,
        Policy::Erofs,
        Policy::Ff,
        Policy::Lfs,
        Policy::Lus,
        Policy::Mfs,
        Policy::MspLfs,
        Policy::MspLus,
        Policy::MspMfs,
        Policy::Newest,
        Policy::Pfrd,
        Policy::Rand,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::All => "all",
            Policy::EpAll => "epall",
            Policy::EpFf => "epff",
            Policy::EpLfs => "eplfs",
            Policy::EpLus => "eplus",
            Policy::EpMfs => "epmfs",
            Policy::EpRand => "eprand",
            Policy::Erofs => "erofs",
            Policy::Ff => "ff",
            Policy::Lfs => "lfs",
            Policy::Lus => "lus",
            Policy::Mfs => "mfs",
            Policy::MspLfs => "msplfs",
            Policy::MspLus => "msplus",
            Policy::MspMfs => "mspmfs",
            Policy::Newest => "newest",
            Policy::Pfrd => "pfrd",
            Policy::Rand => "rand",
        }
    }

    /// Path-preserving policies only place new entries where the parent
    /// directory already exists.
    pub fn is_path_preserving(&self) -> bool {
        matches!(
            self,
            Policy::EpAll
                | Policy::EpFf
                | Policy::EpLfs
                | Policy::EpLus
                | Policy::EpMfs
                | Policy::EpRand
                | Policy::MspLfs
                | Policy::MspLus
                | Policy::MspMfs
        )
    }

    pub fn search_policy(&self) -> &'static dyn SearchPolicy {
        match self {
            Policy::All | Policy::EpFf | Policy::Ff => &FirstFoundSearchPolicy,
            Policy::EpAll | Policy::EpLus | Policy::Lus | Policy::MspLus => &AllSearchPolicy,
            Policy::EpLfs | Policy::Lfs | Policy::MspLfs => &EPLFS_SEARCH,
            Policy::EpMfs | Policy::Mfs | Policy::MspMfs => &EPMFS_SEARCH,
            Policy::EpRand | Policy::Pfrd | Policy::Rand => &RandomSearchPolicy,
            Policy::Erofs => &ReadOnlyPolicy,
            Policy::Newest => &NewestSearchPolicy,
        }
    }

    pub fn action_policy(&self) -> &'static dyn ActionPolicy {
        match self {
            Policy::All | Policy::EpAll | Policy::EpLus | Policy::Lus | Policy::MspLus => {
                &ExistingPathAllActionPolicy
            }
            Policy::EpFf | Policy::Ff => &ExistingPathFirstFoundActionPolicy,
            Policy::EpLfs | Policy::Lfs | Policy::MspLfs => &EPLFS_ACTION,
            Policy::EpMfs | Policy::Mfs | Policy::MspMfs => &EPMFS_ACTION,
            Policy::EpRand | Policy::Pfrd | Policy::Rand => &RandomActionPolicy,
            Policy::Erofs => &ReadOnlyPolicy,
            Policy::Newest => &NewestActionPolicy,
        }
    }

    pub fn create_policy(&self) -> &'static dyn CreatePolicy {
        match self {
            Policy::All => &AllCreatePolicy,
            Policy::EpAll => &ExistingPathAllCreatePolicy,
            Policy::EpFf => &ExistingPathFirstFoundCreatePolicy,
            Policy::EpLfs => &EPLFS_CREATE,
            Policy::EpLus => &EPLUS_CREATE,
            Policy::EpMfs => &EPMFS_CREATE,
            Policy::EpRand => &ExistingPathRandomCreatePolicy,
            Policy::Erofs => &ReadOnlyPolicy,
            Policy::Ff => &FirstFoundCreatePolicy,
            Policy::Lfs => &LFS_CREATE,
            Policy::Lus => &LUS_CREATE,
            Policy::Mfs => &MFS_CREATE,
            Policy::MspLfs => &MSPLFS_CREATE,
            Policy::MspLus => &MSPLUS_CREATE,
            Policy::MspMfs => &MSPMFS_CREATE,
            Policy::Newest => &NewestCreatePolicy,
            Policy::Pfrd => &ProportionalFillRandomDistributionCreatePolicy,
            Policy::Rand => &RandomCreatePolicy,
        }
    }

    /// Branches holding `path`, for read and lookup operations.
    pub fn search(&self, branches: &Branches, path: &Path) -> Result<Vec<Arc<Branch>>, FsError> {
        branches.for_each_read(|list| self.search_policy().search(list, path))
    }

    /// Branches that should receive a new entry under the directory `path`.
    pub fn create(&self, branches: &Branches, path: &Path) -> Result<Vec<Arc<Branch>>, FsError> {
        branches.for_each_read(|list| self.create_policy().create(list, path))
    }

    /// Branches whose copy of `path` should be modified.
    pub fn action(&self, branches: &Branches, path: &Path) -> Result<Vec<Arc<Branch>>, FsError> {
        branches.for_each_read(|list| self.action_policy().action(list, path))
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown policy '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
