//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge serves a scripted commit range and a scripted sequence of
//! pull request pages. Pages past the end of the script are empty, matching
//! how the real listing endpoint signals the end of data. Every call is
//! recorded so tests can assert on exactly which requests were made.
//!
//! # Example
//!
//! ```
//! use sawyer::forge::mock::MockForge;
//! use sawyer::forge::Forge;
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new().with_pages(vec![vec![3, 2], vec![1]]);
//!
//! let page = forge.list_pulls_page(1).await.unwrap();
//! assert_eq!(page.len(), 2);
//! assert!(forge.list_pulls_page(3).await.unwrap().is_empty());
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{CommitRecord, Forge, ForgeError, RawPullRequest};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    /// Commits returned by `compare_commits`.
    commits: Vec<CommitRecord>,
    /// Pull request pages, index 0 is page 1.
    pages: Vec<Vec<RawPullRequest>>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail compare_commits with the given error.
    CompareCommits(ForgeError),
    /// Fail list_pulls_page for the given page with the given error.
    ListPullsPage(u32, ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CompareCommits { base: String, head: String },
    ListPullsPage { page: u32 },
}

impl MockForge {
    /// Create an empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the commit range from bare messages.
    pub fn with_commit_messages<I, S>(self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().commits = messages.into_iter().map(CommitRecord::from_message).collect();
        self
    }

    /// Script pull request pages from bare numbers.
    pub fn with_pages(self, pages: Vec<Vec<u64>>) -> Self {
        let pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|number| {
                        RawPullRequest::new(number).with_field("title", format!("PR {}", number))
                    })
                    .collect()
            })
            .collect();
        self.with_raw_pages(pages)
    }

    /// Script pull request pages from full records.
    pub fn with_raw_pages(self, pages: Vec<Vec<RawPullRequest>>) -> Self {
        self.lock().pages = pages;
        self
    }

    /// Make an operation fail.
    pub fn fail_on(&self, fail_on: FailOn) {
        self.lock().fail_on = Some(fail_on);
    }

    /// Operations recorded so far, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Pages requested so far, in call order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::ListPullsPage { page } => Some(page),
                MockOperation::CompareCommits { .. } => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockForgeInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn compare_commits(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitRecord>, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::CompareCommits {
            base: base.to_string(),
            head: head.to_string(),
        });

        if let Some(FailOn::CompareCommits(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner.commits.clone())
    }

    async fn list_pulls_page(&self, page: u32) -> Result<Vec<RawPullRequest>, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::ListPullsPage { page });

        if let Some(FailOn::ListPullsPage(failing, err)) = &inner.fail_on {
            if *failing == page {
                return Err(err.clone());
            }
        }

        let index = page.saturating_sub(1) as usize;
        Ok(inner.pages.get(index).cloned().unwrap_or_default())
    }
}
