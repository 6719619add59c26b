//! changelog command - Render the changelog for a release
//!
//! # Example
//!
//! ```bash
//! # Prompts for the token
//! sawyer octocat/hello-world v1.2.0 v1.3.0 > CHANGES.md
//!
//! # Non-interactive
//! sawyer -u octocat -t ghp_xxxx octocat/hello-world v1.2.0 v1.3.0 --head main
//! ```

use crate::changelog::{load_template, render_changelog, ChangelogContext};
use crate::cli::Cli;
use crate::config::Config;
use crate::forge::github::{Credentials, GitHubForge};
use crate::resolve::{PullRequestResolver, ResolveMode};
use crate::ui::{output, prompts};
use anyhow::{bail, Context as _, Result};

/// Resolve the release's pull requests and print the rendered changelog.
///
/// CLI flags take precedence over the config file.
pub fn changelog(cli: &Cli, config: &Config) -> Result<()> {
    // Read the template before touching the network so a typo fails fast.
    let template = match cli.template.as_ref().or(config.template.as_ref()) {
        Some(path) => Some(load_template(path)?),
        None => None,
    };

    let token = get_token(cli.token.as_deref())?;
    let credentials = match cli.user.as_ref().or(config.user.as_ref()) {
        Some(user) => Credentials::basic(user, token),
        None => Credentials::token(token),
    };

    let api_base = cli.api_base.as_deref().unwrap_or_else(|| config.api_base());
    let head = cli.head.as_deref().unwrap_or_else(|| config.head());
    let mode = ResolveMode::from_all_prs(cli.all_prs);

    let forge =
        GitHubForge::with_api_base(credentials, &cli.repo.owner, &cli.repo.name, api_base);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let records = rt
        .block_on(PullRequestResolver::new(&forge).resolve(mode, &cli.previous_tag, head))
        .with_context(|| {
            format!(
                "Failed to resolve pull requests for {} ({}...{})",
                cli.repo, cli.previous_tag, head
            )
        })?;

    let context = ChangelogContext::new(
        &cli.repo.owner,
        &cli.repo.name,
        &cli.previous_tag,
        &cli.current_tag,
        records,
    );
    let text = render_changelog(&context, template.as_deref())?;
    output::changelog(&text);

    Ok(())
}

/// Use the `--token` value, or prompt for one with masked input.
fn get_token(token_arg: Option<&str>) -> Result<String> {
    if let Some(t) = token_arg {
        if t.is_empty() {
            bail!("Token cannot be empty.");
        }
        return Ok(t.to_string());
    }

    match prompts::password("GitHub token: ", prompts::is_interactive()) {
        Ok(token) => Ok(token),
        Err(prompts::PromptError::NotInteractive) => {
            bail!("Token required. Use --token <TOKEN> or run interactively.")
        }
        Err(e) => Err(e).context("Failed to read token"),
    }
}
