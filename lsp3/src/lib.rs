#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for resolving LUKSO Universal Profiles.
//!
//! This crate holds everything about LSP3 profile resolution that does not
//! touch the network: address and chain identification, resolver
//! configuration, decoding of the on-chain `LSP3Profile` pointer, the
//! profile document model, and the fallback identicon. Chain access and HTTP
//! fetching live in `lsp3-evm`.
//!
//! # Overview
//!
//! A Universal Profile stores a pointer under the `LSP3Profile` ERC725Y data
//! key. The pointer is usually a VerifiableURI (a content hash plus a URL,
//! often `ipfs://`). The URL points at a JSON document carrying the display
//! name and profile images. Resolution never fails outright: every failure
//! collapses into an empty [`profile::ResolvedProfile`] with a
//! [`profile::ResolutionStatus`] describing what went wrong.
//!
//! # Modules
//!
//! - [`chain`] - Chain ids and strict address parsing
//! - [`config`] - Immutable resolver configuration
//! - [`format`] - Display helpers (short addresses, token units)
//! - [`identicon`] - Deterministic blockie avatars
//! - [`ipfs`] - `ipfs://` to HTTP gateway rewriting
//! - [`networks`] - Registry of known networks
//! - [`pointer`] - Decoding of the raw on-chain `LSP3Profile` value
//! - [`profile`] - LSP3 document model and resolution results
//! - [`sequence`] - Latest-request tracking for consumers
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod chain;
pub mod config;
pub mod format;
pub mod identicon;
pub mod ipfs;
pub mod networks;
pub mod pointer;
pub mod profile;
pub mod sequence;

pub use chain::{AddressFormatError, ChainId, parse_address};
pub use config::ResolverConfig;
pub use profile::{ResolutionStatus, ResolvedProfile};
