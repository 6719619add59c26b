//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown when stdin is a terminal. Otherwise the caller
//! gets `PromptError::NotInteractive` and must ask for the value another way.
//!
//! This holds even with a controlling terminal: `rpassword` would read from
//! `/dev/tty`, but a run with piped stdin (`echo x | sawyer ...`) must pass
//! `--token` instead.

use std::io::{self, IsTerminal, Write};
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input cannot be empty")]
    Empty,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Whether stdin is attached to a terminal.
///
/// Having a controlling terminal is not enough; see the module docs.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Prompt for masked input (e.g., passwords, tokens).
///
/// The prompt goes to stderr so stdout stays clean; the input is not echoed.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let mut stderr = io::stderr();
    write!(stderr, "{}", message).map_err(|e| PromptError::IoError(e.to_string()))?;
    stderr
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    let value = rpassword::read_password().map_err(|e| PromptError::IoError(e.to_string()))?;
    if value.is_empty() {
        return Err(PromptError::Empty);
    }
    Ok(value)
}
