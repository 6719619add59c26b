//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Masked token prompt
//! - [`output`] - Verbosity and output helpers

pub mod output;
pub mod prompts;
