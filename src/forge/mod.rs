//! forge
//!
//! Abstraction for the remote forge hosting the repository.
//!
//! # Architecture
//!
//! The `Forge` trait is the transport seam of the resolution engine. The
//! engine only ever asks for two things: the commits between two refs, and
//! one page of pull requests. Everything about URLs, headers, credentials
//! and status-code mapping lives behind the trait.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait, record types and `ForgeError`
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
