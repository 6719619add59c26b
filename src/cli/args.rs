//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Usage
//!
//! ```text
//! sawyer [OPTIONS] <REPO> <PREVIOUS_TAG> <CURRENT_TAG>
//! ```

use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::forge::github::parse_github_url;

/// Sawyer - changelogs from the pull requests merged since the last release
#[derive(Parser, Debug)]
#[command(name = "sawyer")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Pull requests merged into develop since v1.2.0
    sawyer octocat/hello-world v1.2.0 v1.3.0

    # Compare against a different head ref
    sawyer octocat/hello-world v1.2.0 v1.3.0 --head main

    # Every pull request ever opened, regardless of the tags
    sawyer octocat/hello-world v1.2.0 v1.3.0 --all-prs")]
pub struct Cli {
    /// Repository as owner/name (a github.com URL also works)
    pub repo: RepoSlug,

    /// Tag of the previous release (start of the range)
    pub previous_tag: String,

    /// Tag of the release being described
    pub current_tag: String,

    /// Ref the range ends at [default: develop]
    #[arg(long)]
    pub head: Option<String>,

    /// Include every pull request instead of those merged in the range
    #[arg(long)]
    pub all_prs: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, conflicts_with = "quiet")]
    pub debug: bool,

    /// GitHub login (sends the token with basic auth)
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// GitHub token (prompted for when omitted)
    #[arg(short = 't', long)]
    pub token: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Render with this minijinja template instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Errors from parsing a repository argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoSlugError {
    #[error("expected owner/name, got '{0}'")]
    InvalidFormat(String),
}

/// A repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((owner, name)) = parse_github_url(s) {
            return Ok(Self { owner, name });
        }

        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RepoSlugError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
