//! resolve::paginator
//!
//! Walks the pull request listing newest-first until it has reached a
//! floor number.
//!
//! # Stop rule
//!
//! Each page is appended in full. While appending, any item numbered at or
//! below the floor marks the walk as finished, but the rest of that page is
//! still kept. The walk ends on the first empty page, or after the first
//! page that reached the floor, whichever comes first.

use crate::forge::{Forge, ForgeError, RawPullRequest};

/// Sequential, newest-first pull request pagination.
pub struct PullRequestPaginator<'a> {
    forge: &'a dyn Forge,
}

impl<'a> PullRequestPaginator<'a> {
    /// Create a paginator over the given forge.
    pub fn new(forge: &'a dyn Forge) -> Self {
        Self { forge }
    }

    /// Fetch pages until one is empty or one contains a number `<= floor`.
    ///
    /// Records are returned in the order the forge served them. A floor of
    /// `1` walks the entire history.
    ///
    /// # Errors
    ///
    /// Any page error aborts the walk and is returned as-is; nothing
    /// accumulated so far is returned. Authentication failures are never
    /// retried.
    pub async fn fetch_until_floor(&self, floor: u64) -> Result<Vec<RawPullRequest>, ForgeError> {
        let mut accumulated = Vec::new();
        let mut page: u32 = 1;

        loop {
            let items = self.forge.list_pulls_page(page).await?;
            if items.is_empty() {
                break;
            }

            let mut reached_floor = false;
            for item in items {
                reached_floor |= item.number <= floor;
                accumulated.push(item);
            }

            tracing::info!(
                forge = self.forge.name(),
                "got {} pull requests",
                accumulated.len()
            );

            if reached_floor {
                break;
            }

            page = page.checked_add(1).ok_or_else(|| {
                ForgeError::MalformedResponse("pull request listing never ended".into())
            })?;
        }

        Ok(accumulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::mock::{FailOn, MockForge};

    fn numbers(records: &[RawPullRequest]) -> Vec<u64> {
        records.iter().map(|pr| pr.number).collect()
    }

    #[tokio::test]
    async fn stops_after_page_reaching_floor_and_keeps_whole_page() {
        let forge = MockForge::new().with_pages(vec![
            vec![15, 14, 13],
            vec![12, 11, 10, 9],
            vec![8, 7, 6],
        ]);

        let records = PullRequestPaginator::new(&forge)
            .fetch_until_floor(10)
            .await
            .unwrap();

        assert_eq!(numbers(&records), vec![15, 14, 13, 12, 11, 10, 9]);
        assert_eq!(forge.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_first_page_returns_nothing() {
        let forge = MockForge::new();

        let records = PullRequestPaginator::new(&forge)
            .fetch_until_floor(10)
            .await
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(forge.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn floor_of_one_walks_until_empty_page() {
        let forge = MockForge::new().with_pages(vec![vec![6, 5, 4], vec![3, 2]]);

        let records = PullRequestPaginator::new(&forge)
            .fetch_until_floor(1)
            .await
            .unwrap();

        assert_eq!(numbers(&records), vec![6, 5, 4, 3, 2]);
        assert_eq!(forge.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn floor_on_first_item_stops_after_first_page() {
        let forge = MockForge::new().with_pages(vec![vec![5, 4], vec![3]]);

        let records = PullRequestPaginator::new(&forge)
            .fetch_until_floor(20)
            .await
            .unwrap();

        assert_eq!(numbers(&records), vec![5, 4]);
        assert_eq!(forge.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn out_of_order_item_still_triggers_stop() {
        // Listing order is only roughly by number; any low item counts.
        let forge = MockForge::new().with_pages(vec![vec![30, 2, 29], vec![28]]);

        let records = PullRequestPaginator::new(&forge)
            .fetch_until_floor(10)
            .await
            .unwrap();

        assert_eq!(numbers(&records), vec![30, 2, 29]);
    }

    #[tokio::test]
    async fn auth_failure_aborts_without_retry() {
        let forge = MockForge::new().with_pages(vec![vec![9, 8], vec![7, 6], vec![5]]);
        forge.fail_on(FailOn::ListPullsPage(
            2,
            ForgeError::AuthFailed("Bad credentials".into()),
        ));

        let err = PullRequestPaginator::new(&forge)
            .fetch_until_floor(1)
            .await
            .unwrap_err();

        assert!(matches!(err, ForgeError::AuthFailed(_)));
        assert_eq!(forge.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn calls_do_not_share_accumulators() {
        let forge = MockForge::new().with_pages(vec![vec![3, 2, 1]]);
        let paginator = PullRequestPaginator::new(&forge);

        let first = paginator.fetch_until_floor(1).await.unwrap();
        let second = paginator.fetch_until_floor(1).await.unwrap();

        assert_eq!(numbers(&first), vec![3, 2, 1]);
        assert_eq!(numbers(&second), vec![3, 2, 1]);
    }
}
