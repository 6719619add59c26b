//! forge::traits
//!
//! Forge trait definition and the record types it returns.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! Callers await each request before issuing the next, so pagination stays
//! strictly sequential.
//!
//! Records are deliberately schema-light. Only the fields the resolution
//! engine reads are typed (`number` on pull requests, `commit.message` on
//! commits); every other field of a pull request is kept verbatim in a
//! field bag and handed to the changelog renderer untouched.
//!
//! # Example
//!
//! ```ignore
//! use sawyer::forge::{Forge, ForgeError};
//!
//! async fn first_page(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     for pr in forge.list_pulls_page(1).await? {
//!         println!("#{}", pr.number);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from forge operations.
///
/// None of these are retried. Any error aborts the resolution that
/// triggered it.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Credentials were rejected (401) or lack permissions (403).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A commit as returned by the compare endpoint.
///
/// Only the message is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitRecord {
    /// Nested git commit data
    pub commit: CommitDetail,
}

/// The git-level part of a [`CommitRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitDetail {
    /// Full commit message
    pub message: String,
}

impl CommitRecord {
    /// Build a record from a bare message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            commit: CommitDetail {
                message: message.into(),
            },
        }
    }

    /// The commit message.
    pub fn message(&self) -> &str {
        &self.commit.message
    }
}

/// A pull request as returned by the listing endpoint.
///
/// `number` is validated when the page is decoded. All other fields are
/// carried in `fields` without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPullRequest {
    /// PR number
    pub number: u64,
    /// Every other field of the forge payload
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawPullRequest {
    /// Build a record with only a number.
    pub fn new(number: u64) -> Self {
        Self {
            number,
            fields: Map::new(),
        }
    }

    /// Attach an extra field (builder style, mostly for tests).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a string field by key.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// The Forge trait for interacting with remote hosting services.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. `AuthFailed` is fatal and
/// must never be retried by implementations.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// List the commits introduced between `base` and `head`.
    ///
    /// Issues a single comparison request; the result is in the forge's
    /// order.
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if the payload has no commit list
    /// - `NotFound` if either ref does not exist
    async fn compare_commits(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitRecord>, ForgeError>;

    /// Fetch one page of pull requests in any state, newest number first.
    ///
    /// Pages are 1-based. An empty vector means there is no more data.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if the credentials are rejected
    /// - `MalformedResponse` if an item has no numeric `number`
    async fn list_pulls_page(&self, page: u32) -> Result<Vec<RawPullRequest>, ForgeError>;
}
