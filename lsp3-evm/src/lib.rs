#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM chain access for LUKSO Universal Profile resolution.
//!
//! This crate performs the I/O half of LSP3 resolution on top of the types in
//! [`lsp3`]: it reads the `LSP3Profile` value from an account's ERC725Y store
//! over JSON-RPC, fetches the metadata document it points at, and turns the
//! result into a [`lsp3::ResolvedProfile`].
//!
//! # Architecture
//!
//! - [`resolver`] - One-shot, best-effort profile resolution
//! - [`watcher`] - Latest-only resolution state for interactive consumers
//! - [`account`] - Chain id, balance and block height of an account
//! - [`fetch`] - HTTP retrieval of metadata documents
//! - [`contract`] - ERC725Y interface bindings
//! - [`error`] - Error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Tracing instrumentation of RPC reads and fetches
//!
//! # Example
//!
//! ```no_run
//! use lsp3::ResolverConfig;
//! use lsp3_evm::ProfileResolver;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = ProfileResolver::new(ResolverConfig::default())?;
//! let profile = resolver
//!     .resolve("0x0000000000000000000000000000000000000001", 42)
//!     .await;
//! println!("{:?} ({})", profile.display_name, profile.status);
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod contract;
pub mod error;
pub mod fetch;
pub mod resolver;
pub mod watcher;

#[cfg(test)]
mod test_support;

pub use account::AccountOverview;
pub use error::{AccountError, ResolveError, ResolverBuildError};
pub use fetch::MetadataFetcher;
pub use resolver::ProfileResolver;
pub use watcher::{ProfileState, ProfileWatcher};
