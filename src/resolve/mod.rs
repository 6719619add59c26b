//! resolve
//!
//! The pull request resolution engine.
//!
//! # Pipeline
//!
//! 1. [`parse_merge_commit`] turns one commit message into a PR number
//! 2. [`CommitRangeResolver`] applies it to every commit between two refs
//! 3. [`PullRequestPaginator`] walks the listing newest-first down to a floor
//! 4. [`PullRequestResolver`] ties the three together and filters the result
//!
//! Every resolution owns its own accumulator and target set; nothing is
//! cached between calls.
//!
//! # Example
//!
//! ```ignore
//! use sawyer::resolve::{PullRequestResolver, ResolveMode};
//!
//! let prs = PullRequestResolver::new(&forge)
//!     .resolve(ResolveMode::MergedBetween, "v1.2.0", "develop")
//!     .await?;
//! ```

mod commit_range;
mod merge_commit;
mod paginator;
mod resolver;

pub use commit_range::CommitRangeResolver;
pub use merge_commit::parse_merge_commit;
pub use paginator::PullRequestPaginator;
pub use resolver::{PullRequestResolver, ResolveMode};
