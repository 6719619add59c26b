//! changelog
//!
//! Turns resolved pull requests into changelog text.
//!
//! # Design
//!
//! Rendering is a pure function of a [`ChangelogContext`]. The context is
//! serialized into a `minijinja` template; the built-in template produces a
//! Markdown section, and a user template can replace it. Templates see the
//! typed convenience fields of each [`PullRequestEntry`] plus the complete
//! forge record under `raw`.
//!
//! # Example
//!
//! ```
//! use sawyer::changelog::{render_changelog, ChangelogContext};
//! use sawyer::forge::RawPullRequest;
//!
//! let context = ChangelogContext::new(
//!     "octocat",
//!     "hello-world",
//!     "v1.0.0",
//!     "v1.1.0",
//!     vec![RawPullRequest::new(42).with_field("title", "Add feature")],
//! );
//! let text = render_changelog(&context, None).unwrap();
//! assert!(text.contains("Add feature (#42)"));
//! ```

mod template;

pub use template::{load_template, render_changelog, DEFAULT_TEMPLATE};

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::forge::RawPullRequest;

/// Errors from changelog rendering.
#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("failed to read template '{path}': {source}")]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render changelog: {0}")]
    Template(String),
}

/// One pull request as seen by templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestEntry {
    /// PR number
    pub number: u64,
    /// PR title (empty if the forge sent none)
    pub title: String,
    /// Web URL
    pub url: Option<String>,
    /// Author login
    pub author: Option<String>,
    /// Label names
    pub labels: Vec<String>,
    /// Forge state (`open` / `closed`)
    pub state: Option<String>,
    /// Merge timestamp as sent by the forge
    pub merged_at: Option<String>,
    /// The full forge record
    pub raw: RawPullRequest,
}

impl From<RawPullRequest> for PullRequestEntry {
    fn from(raw: RawPullRequest) -> Self {
        let text = |key: &str| raw.str_field(key).map(str::to_string);

        let author = raw
            .fields
            .get("user")
            .and_then(|user| user.get("login"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let labels = raw
            .fields
            .get("labels")
            .and_then(Value::as_array)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|label| label.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            number: raw.number,
            title: text("title").unwrap_or_default(),
            url: text("html_url"),
            author,
            labels,
            state: text("state"),
            merged_at: text("merged_at"),
            raw,
        }
    }
}

/// Everything a changelog template can see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangelogContext {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Tag the changelog starts from
    pub previous_tag: String,
    /// Tag the changelog is for
    pub current_tag: String,
    /// Resolved pull requests, in resolution order
    pub pull_requests: Vec<PullRequestEntry>,
}

impl ChangelogContext {
    /// Build a context from resolved records.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        previous_tag: impl Into<String>,
        current_tag: impl Into<String>,
        records: Vec<RawPullRequest>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            previous_tag: previous_tag.into(),
            current_tag: current_tag.into(),
            pull_requests: records.into_iter().map(PullRequestEntry::from).collect(),
        }
    }
}
