//! resolve::resolver
//!
//! Orchestrates commit-range resolution and pagination into the final list
//! of pull request records for a release.

use std::collections::{BTreeSet, HashSet};

use super::commit_range::CommitRangeResolver;
use super::paginator::PullRequestPaginator;
use crate::forge::{Forge, ForgeError, RawPullRequest};

/// Which pull requests a resolution should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Only pull requests whose merge commits lie between the two refs
    #[default]
    MergedBetween,
    /// Every pull request in the repository, in any state
    AllPullRequests,
}

impl ResolveMode {
    /// Map the `--all-prs` flag to a mode.
    pub fn from_all_prs(all_prs: bool) -> Self {
        if all_prs {
            ResolveMode::AllPullRequests
        } else {
            ResolveMode::MergedBetween
        }
    }
}

/// Resolves the pull requests that make up a release.
pub struct PullRequestResolver<'a> {
    forge: &'a dyn Forge,
}

impl<'a> PullRequestResolver<'a> {
    /// Create a resolver over the given forge.
    pub fn new(forge: &'a dyn Forge) -> Self {
        Self { forge }
    }

    /// Resolve pull requests between `base` and `head`.
    ///
    /// In [`ResolveMode::MergedBetween`] the merge commits in the range give
    /// both the target set and the pagination floor (its lowest number), and
    /// only targeted records are kept. When the range holds no merge commits
    /// the result is empty and no pull requests are fetched at all.
    ///
    /// In [`ResolveMode::AllPullRequests`] the refs are ignored and every
    /// record is returned, walking back to the first pull request.
    ///
    /// Records come back in listing order, newest number first. Callers may
    /// re-sort. A number listed twice (pages shift when pull requests are
    /// opened mid-walk) is kept once, at its first position.
    ///
    /// # Errors
    ///
    /// Any forge error aborts the resolution.
    pub async fn resolve(
        &self,
        mode: ResolveMode,
        base: &str,
        head: &str,
    ) -> Result<Vec<RawPullRequest>, ForgeError> {
        let targets = match mode {
            ResolveMode::AllPullRequests => None,
            ResolveMode::MergedBetween => {
                let numbers = CommitRangeResolver::new(self.forge)
                    .resolve_merged_prs(base, head)
                    .await?;
                if numbers.is_empty() {
                    tracing::warn!(
                        "no merged pull requests between {} and {}; skipping pull request listing",
                        base,
                        head
                    );
                    return Ok(Vec::new());
                }
                Some(numbers)
            }
        };

        let floor = floor_for(targets.as_ref());
        let records = PullRequestPaginator::new(self.forge)
            .fetch_until_floor(floor)
            .await?;

        let records = dedup_by_number(records);
        Ok(match targets {
            Some(targets) => filter_to_targets(records, &targets),
            None => records,
        })
    }
}

/// Drop repeated numbers, keeping the first occurrence.
fn dedup_by_number(records: Vec<RawPullRequest>) -> Vec<RawPullRequest> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|pr| seen.insert(pr.number))
        .collect()
}

/// Lowest number pagination must reach: the smallest target, else 1.
fn floor_for(targets: Option<&BTreeSet<u64>>) -> u64 {
    targets.and_then(|t| t.first().copied()).unwrap_or(1)
}

/// Keep only records whose number is a target, preserving order.
fn filter_to_targets(records: Vec<RawPullRequest>, targets: &BTreeSet<u64>) -> Vec<RawPullRequest> {
    let kept: Vec<RawPullRequest> = records
        .into_iter()
        .filter(|pr| targets.contains(&pr.number))
        .collect();

    if kept.len() < targets.len() {
        tracing::debug!(
            "{} of {} merged pull requests were not found in the listing",
            targets.len() - kept.len(),
            targets.len()
        );
    }

    kept
}
