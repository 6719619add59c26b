//! cli::commands
//!
//! Command handlers.

pub mod changelog;
