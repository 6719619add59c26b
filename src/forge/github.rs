//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Design
//!
//! Two endpoints are used:
//! - `GET /repos/{owner}/{repo}/compare/{base}...{head}` for the commit range
//! - `GET /repos/{owner}/{repo}/pulls` for the paginated pull request listing
//!
//! # Authentication
//!
//! With a username the token is sent as HTTP basic auth password, which is
//! how personal access tokens were historically paired with a login.
//! Without one it is sent as a bearer token. A 401 maps to
//! `ForgeError::AuthFailed` and is never retried.
//!
//! # Example
//!
//! ```ignore
//! use sawyer::forge::github::{Credentials, GitHubForge};
//! use sawyer::forge::Forge;
//!
//! let forge = GitHubForge::new(Credentials::token("ghp_xxx"), "octocat", "hello-world");
//! let page = forge.list_pulls_page(1).await?;
//! ```

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::traits::{CommitRecord, Forge, ForgeError, RawPullRequest};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "sawyer-changelog";

/// GitHub REST API version header value.
const API_VERSION: &str = "2022-11-28";

/// Pull requests requested per page (GitHub's max).
const PER_PAGE: u32 = 100;

/// Credentials sent with every request.
#[derive(Clone)]
pub struct Credentials {
    /// Login name; selects basic auth when present
    pub user: Option<String>,
    /// Personal access token or password
    pub token: String,
}

impl Credentials {
    /// Token-only credentials (bearer auth).
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            user: None,
            token: token.into(),
        }
    }

    /// User and token credentials (basic auth).
    pub fn basic(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            token: token.into(),
        }
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.user {
            Some(user) => request.basic_auth(user, Some(&self.token)),
            None => request.bearer_auth(&self.token),
        }
    }
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// GitHub forge implementation.
#[derive(Debug)]
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Credentials for every request
    credentials: Credentials,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

impl GitHubForge {
    /// Create a GitHub forge against `api.github.com`.
    pub fn new(
        credentials: Credentials,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self::with_api_base(credentials, owner, repo, DEFAULT_API_BASE)
    }

    /// Create a GitHub forge with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise (`https://github.example.com/api/v3`)
    /// or for pointing at a local mock server. A trailing slash is ignored.
    pub fn with_api_base(
        credentials: Credentials,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            credentials,
            owner: owner.into(),
            repo: repo.into(),
            api_base,
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Start an authenticated GET request with the common headers.
    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header("X-GitHub-Api-Version", API_VERSION);
        self.credentials.apply(request)
    }

    /// Send a request, mapping transport failures.
    async fn send(request: RequestBuilder) -> Result<Response, ForgeError> {
        request
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ForgeError::MalformedResponse(format!("failed to decode body: {}", e))
            })
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        let required_scopes = response
            .headers()
            .get("X-Accepted-OAuth-Scopes")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Try to get error message from body
        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                ForgeError::AuthFailed(format!("Invalid credentials: {}", message))
            }
            StatusCode::FORBIDDEN => {
                let mut err_msg = format!("Permission denied: {}", message);
                if let Some(scopes) = required_scopes.filter(|s| !s.is_empty()) {
                    err_msg.push_str(&format!(" [required scopes: {}]", scopes));
                }
                ForgeError::AuthFailed(err_msg)
            }
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn compare_commits(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitRecord>, ForgeError> {
        let url = self.repo_url(&format!(
            "compare/{}...{}",
            encode_ref(base),
            encode_ref(head)
        ));
        tracing::debug!(%url, "comparing commits");

        let response = Self::send(self.get(&url)).await?;
        let body: Value = self.handle_response(response).await?;

        commits_from_compare(body)
    }

    async fn list_pulls_page(&self, page: u32) -> Result<Vec<RawPullRequest>, ForgeError> {
        let url = self.repo_url("pulls");
        tracing::debug!(%url, page, "listing pull requests");

        let request = self.get(&url).query(&[
            ("state", "all".to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ]);

        let response = Self::send(request).await?;
        self.handle_response(response).await
    }
}

// --------------------------------------------------------------------------
// API Response Types
// --------------------------------------------------------------------------

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// Characters left as-is in a ref embedded in a URL path. Everything else,
/// notably `#`, `%`, `?` and spaces, is percent-encoded.
const REF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a git ref for use in a URL path.
fn encode_ref(git_ref: &str) -> String {
    utf8_percent_encode(git_ref, REF_ENCODE_SET).to_string()
}

/// Pull the commit list out of a compare payload.
fn commits_from_compare(mut body: Value) -> Result<Vec<CommitRecord>, ForgeError> {
    let commits = body.get_mut("commits").map(Value::take).ok_or_else(|| {
        ForgeError::MalformedResponse("compare response has no `commits` field".into())
    })?;

    serde_json::from_value(commits)
        .map_err(|e| ForgeError::MalformedResponse(format!("invalid commit list: {}", e)))
}

// --------------------------------------------------------------------------
// URL Parsing
// --------------------------------------------------------------------------

/// Parse a GitHub remote URL to extract owner and repo.
///
/// Supports both SSH and HTTPS formats:
/// - `git@github.com:owner/repo.git`
/// - `https://github.com/owner/repo.git`
/// - `https://github.com/owner/repo`
///
/// # Example
///
/// ```
/// use sawyer::forge::github::parse_github_url;
///
/// let (owner, repo) = parse_github_url("git@github.com:octocat/hello-world.git").unwrap();
/// assert_eq!(owner, "octocat");
/// assert_eq!(repo, "hello-world");
/// ```
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let rest = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("https://github.com/"))
        .or_else(|| url.strip_prefix("http://github.com/"))?;
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    let (owner, repo) = rest.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}
