//! resolve::commit_range
//!
//! Derives the set of pull requests merged between two refs from the merge
//! commits in that range.

use std::collections::BTreeSet;

use super::merge_commit::parse_merge_commit;
use crate::forge::{Forge, ForgeError};

/// Resolves merged pull request numbers from a commit range.
pub struct CommitRangeResolver<'a> {
    forge: &'a dyn Forge,
}

impl<'a> CommitRangeResolver<'a> {
    /// Create a resolver over the given forge.
    pub fn new(forge: &'a dyn Forge) -> Self {
        Self { forge }
    }

    /// Collect the numbers of pull requests merged between `base` and `head`.
    ///
    /// Fetches the range in a single comparison request and keeps every
    /// number found in a merge commit message. Direct commits contribute
    /// nothing. The set is ordered, so its first element is the lowest
    /// merged number.
    ///
    /// # Errors
    ///
    /// Propagates the forge error when the comparison fails or its payload
    /// has no commit list.
    pub async fn resolve_merged_prs(
        &self,
        base: &str,
        head: &str,
    ) -> Result<BTreeSet<u64>, ForgeError> {
        let commits = self.forge.compare_commits(base, head).await?;
        let total = commits.len();

        let numbers: BTreeSet<u64> = commits
            .iter()
            .filter_map(|commit| parse_merge_commit(commit.message()))
            .collect();

        tracing::info!(
            forge = self.forge.name(),
            "found {} merged pull requests in {} commits between {} and {}",
            numbers.len(),
            total,
            base,
            head
        );

        Ok(numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::mock::{FailOn, MockForge, MockOperation};

    #[tokio::test]
    async fn collects_merge_commits_and_skips_plain_ones() {
        let forge = MockForge::new().with_commit_messages([
            "Merge pull request #7 from alice/feature",
            "Fix typo",
            "Merge pull request #3 from bob/bugfix",
            "Bump version",
            "Merge pull request #19 from carol/docs",
        ]);

        let numbers = CommitRangeResolver::new(&forge)
            .resolve_merged_prs("v1.0.0", "develop")
            .await
            .unwrap();

        assert_eq!(numbers, BTreeSet::from([3, 7, 19]));
        assert_eq!(numbers.first(), Some(&3));
    }

    #[tokio::test]
    async fn duplicate_numbers_collapse() {
        let forge = MockForge::new().with_commit_messages([
            "Merge pull request #4 from a/b",
            "Merge pull request #4 from a/b",
        ]);

        let numbers = CommitRangeResolver::new(&forge)
            .resolve_merged_prs("v1", "v2")
            .await
            .unwrap();

        assert_eq!(numbers, BTreeSet::from([4]));
    }

    #[tokio::test]
    async fn empty_range_yields_empty_set() {
        let forge = MockForge::new().with_commit_messages(["Initial commit"]);

        let numbers = CommitRangeResolver::new(&forge)
            .resolve_merged_prs("v1", "v2")
            .await
            .unwrap();

        assert!(numbers.is_empty());
    }

    #[tokio::test]
    async fn passes_refs_through_in_one_request() {
        let forge = MockForge::new();

        CommitRangeResolver::new(&forge)
            .resolve_merged_prs("v0.9", "main")
            .await
            .unwrap();

        assert_eq!(
            forge.operations(),
            vec![MockOperation::CompareCommits {
                base: "v0.9".into(),
                head: "main".into()
            }]
        );
    }

    #[tokio::test]
    async fn propagates_malformed_response() {
        let forge = MockForge::new();
        forge.fail_on(FailOn::CompareCommits(ForgeError::MalformedResponse(
            "compare response has no `commits` field".into(),
        )));

        let err = CommitRangeResolver::new(&forge)
            .resolve_merged_prs("v1", "v2")
            .await
            .unwrap_err();

        assert!(matches!(err, ForgeError::MalformedResponse(_)));
    }
}
