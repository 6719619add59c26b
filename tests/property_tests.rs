//! Property-based tests for the resolution engine.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use sawyer::forge::mock::MockForge;
use sawyer::forge::RawPullRequest;
use sawyer::resolve::{parse_merge_commit, PullRequestPaginator, PullRequestResolver, ResolveMode};

/// Strategy for source branch text after " from ".
fn source_branch() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./-]{0,40}(\n\n[ -~]{0,60})?"
}

/// Strategy for a descending, duplicate-free PR history split into pages.
fn paged_history() -> impl Strategy<Value = Vec<Vec<u64>>> {
    (prop::collection::btree_set(1u64..500, 1..60), 1usize..8).prop_map(|(numbers, page_size)| {
        let descending: Vec<u64> = numbers.into_iter().rev().collect();
        descending.chunks(page_size).map(<[u64]>::to_vec).collect()
    })
}

fn numbers(records: &[RawPullRequest]) -> Vec<u64> {
    records.iter().map(|pr| pr.number).collect()
}

proptest! {
    /// Every well-formed merge message yields its number.
    #[test]
    fn merge_message_yields_number(n in 1u64..=u64::MAX, source in source_branch()) {
        let message = format!("Merge pull request #{} from {}", n, source);
        prop_assert_eq!(parse_merge_commit(&message), Some(n));
    }

    /// Messages that do not start with the exact prefix never match.
    #[test]
    fn unprefixed_message_never_matches(prefix in "[ -~]{1,10}", n in 1u64..10_000) {
        let message = format!("{}Merge pull request #{} from x/y", prefix, n);
        prop_assert_eq!(parse_merge_commit(&message), None);
    }

    /// Lowercasing the message always breaks the match.
    #[test]
    fn lowercase_never_matches(n in 1u64..10_000, source in source_branch()) {
        let message = format!("Merge pull request #{} from {}", n, source).to_lowercase();
        prop_assert_eq!(parse_merge_commit(&message), None);
    }

    /// Pagination returns whole pages, stops at the first page reaching the
    /// floor, and never loses a record at or above the floor.
    #[test]
    fn pagination_covers_everything_above_floor(pages in paged_history(), floor in 1u64..500) {
        let forge = MockForge::new().with_pages(pages.clone());
        let records = tokio_test::block_on(
            PullRequestPaginator::new(&forge).fetch_until_floor(floor)
        ).unwrap();
        let fetched = numbers(&records);

        let stop_page = pages.iter().position(|page| page.iter().any(|&n| n <= floor));
        let expected: Vec<u64> = match stop_page {
            Some(index) => pages[..=index].concat(),
            None => pages.concat(),
        };
        prop_assert_eq!(&fetched, &expected);

        for n in pages.concat().into_iter().filter(|&n| n >= floor) {
            prop_assert!(fetched.contains(&n));
        }
    }

    /// Resolving a single targeted number matches all-PRs mode filtered
    /// locally to that number.
    #[test]
    fn targeted_matches_filtered_all_prs(
        pages in paged_history(),
        pick in any::<prop::sample::Index>(),
    ) {
        let all_numbers = pages.concat();
        let target = all_numbers[pick.index(all_numbers.len())];

        let forge = MockForge::new()
            .with_commit_messages([format!("Merge pull request #{} from a/b", target)])
            .with_pages(pages);
        let resolver = PullRequestResolver::new(&forge);

        let targeted = tokio_test::block_on(
            resolver.resolve(ResolveMode::MergedBetween, "v1", "v2")
        ).unwrap();
        let all = tokio_test::block_on(
            resolver.resolve(ResolveMode::AllPullRequests, "v1", "v2")
        ).unwrap();
        let filtered: Vec<RawPullRequest> =
            all.into_iter().filter(|pr| pr.number == target).collect();

        prop_assert_eq!(numbers(&targeted), vec![target]);
        prop_assert_eq!(targeted, filtered);
    }

    /// The resolved set is exactly the merged numbers present in the listing.
    #[test]
    fn resolution_keeps_exactly_the_targets(
        pages in paged_history(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
    ) {
        let all_numbers = pages.concat();
        let targets: BTreeSet<u64> = picks
            .iter()
            .map(|pick| all_numbers[pick.index(all_numbers.len())])
            .collect();
        let messages: Vec<String> = targets
            .iter()
            .map(|n| format!("Merge pull request #{} from a/b", n))
            .collect();

        let forge = MockForge::new().with_commit_messages(messages).with_pages(pages);
        let records = tokio_test::block_on(
            PullRequestResolver::new(&forge).resolve(ResolveMode::MergedBetween, "v1", "v2")
        ).unwrap();

        let resolved: BTreeSet<u64> = numbers(&records).into_iter().collect();
        prop_assert_eq!(resolved, targets);
    }
}
