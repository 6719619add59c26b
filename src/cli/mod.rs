//! cli
//!
//! Command-line interface layer for Sawyer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Install the log subscriber
//! - Load configuration and hand off to the changelog command
//!
//! The CLI layer is thin. Resolution lives in [`crate::resolve`] and
//! rendering in [`crate::changelog`].

pub mod args;
pub mod commands;

pub use args::{Cli, RepoSlug};

use crate::config::Config;
use crate::ui::output::Verbosity;
use anyhow::{Context as _, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(Verbosity::from_flags(cli.quiet, cli.debug));

    let config = Config::load().context("Failed to load configuration")?;

    commands::changelog::changelog(&cli, &config)
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the flags.
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity == Verbosity::Debug)
        .without_time()
        .try_init();
}
