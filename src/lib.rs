//! Sawyer - changelogs from merged pull requests
//!
//! Sawyer works out which pull requests were merged between two release
//! points of a GitHub repository and renders them as a changelog.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, wires everything up)
//! - [`resolve`] - The pull request resolution engine
//! - [`forge`] - Abstraction for the remote forge (GitHub REST API)
//! - [`changelog`] - Template rendering of resolved pull requests
//! - [`config`] - Optional configuration file
//! - [`ui`] - User interaction utilities
//!
//! # Resolution
//!
//! Pull requests merged with GitHub's merge button leave a commit titled
//! `Merge pull request #N from ...`. Sawyer compares the previous tag with
//! the head ref, collects those numbers, then pages through the pull request
//! listing newest-first only as far back as the lowest of them.

pub mod changelog;
pub mod cli;
pub mod config;
pub mod forge;
pub mod resolve;
pub mod ui;
