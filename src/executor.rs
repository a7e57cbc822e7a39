//! Runs one primitive against every selected branch and folds the
//! per-branch outcomes into a single result.

use std::sync::Arc;

use crate::branch::Branch;
use crate::error::FsError;

/// How per-branch outcomes combine into the operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationLaw {
    /// One success is enough. Otherwise the last failure is reported.
    AnySucceeds,
    /// The first failure is reported. Later attempts still run.
    AllMustSucceed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregate {
    Pending,
    Success,
    Failed(FsError),
}

impl AggregationLaw {
    fn start(&self) -> Aggregate {
        match self {
            AggregationLaw::AnySucceeds => Aggregate::Pending,
            AggregationLaw::AllMustSucceed => Aggregate::Success,
        }
    }

    fn step(&self, acc: Aggregate, outcome: Result<(), FsError>) -> Aggregate {
        match (self, acc, outcome) {
            (AggregationLaw::AnySucceeds, Aggregate::Success, _) => Aggregate::Success,
            (AggregationLaw::AnySucceeds, _, Ok(())) => Aggregate::Success,
            (AggregationLaw::AnySucceeds, _, Err(e)) => Aggregate::Failed(e),
            (AggregationLaw::AllMustSucceed, Aggregate::Success, Err(e)) => Aggregate::Failed(e),
            (AggregationLaw::AllMustSucceed, acc, _) => acc,
        }
    }
}

/// Fold an ordered sequence of outcomes through `law`.
///
/// An empty sequence under [`AggregationLaw::AnySucceeds`] never decided
/// anything and yields [`FsError::NoTargets`].
pub fn fold<I>(law: AggregationLaw, outcomes: I) -> Result<(), FsError>
where
    I: IntoIterator<Item = Result<(), FsError>>,
{
    let acc = outcomes
        .into_iter()
        .fold(law.start(), |acc, outcome| law.step(acc, outcome));
    match acc {
        Aggregate::Success => Ok(()),
        Aggregate::Failed(e) => Err(e),
        Aggregate::Pending => Err(FsError::NoTargets),
    }
}

/// Apply `op` to every target in order and fold the outcomes through `law`.
///
/// Every target is attempted regardless of earlier outcomes.
pub fn execute<F>(law: AggregationLaw, targets: &[Arc<Branch>], mut op: F) -> Result<(), FsError>
where
    F: FnMut(&Branch) -> Result<(), FsError>,
{
    if targets.is_empty() {
        tracing::error!("Policy returned no target branches");
        return Err(FsError::NoTargets);
    }

    let outcomes: Vec<Result<(), FsError>> = targets
        .iter()
        .map(|branch| {
            let outcome = op(branch);
            if let Err(e) = &outcome {
                tracing::debug!("Operation failed on branch {:?}: {}", branch.path, e);
            }
            outcome
        })
        .collect();

    fold(law, outcomes)
}
