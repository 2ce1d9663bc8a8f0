//! Error types for chain access and profile resolution.

use alloy_primitives::Address;
use alloy_transport::TransportError;
use lsp3::pointer::PointerDecodeError;
use lsp3::profile::ResolutionStatus;
use reqwest::StatusCode;

/// Failures inside a single resolution.
///
/// These never escape [`ProfileResolver::resolve`](crate::ProfileResolver::resolve);
/// they are mapped to a [`ResolutionStatus`] and logged.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The ERC725Y `getData` call failed.
    #[error("on-chain read failed: {0}")]
    ChainRead(#[from] alloy_contract::Error),
    /// The address has no ERC725Y contract behind it.
    #[error("no ERC725Y contract at {0}")]
    NoContract(Address),
    /// The account stores no profile pointer.
    #[error("no profile pointer stored")]
    NotFound,
    /// The on-chain value could not be decoded.
    #[error(transparent)]
    Pointer(#[from] PointerDecodeError),
    /// HTTP transport error.
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        /// Fetch target.
        url: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Non-success HTTP status.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus {
        /// Fetch target.
        url: String,
        /// The HTTP status code.
        status: StatusCode,
    },
    /// The document body is not valid JSON.
    #[error("invalid profile document: {0}")]
    Json(#[from] serde_json::Error),
    /// The document does not hash to the on-chain commitment.
    #[error("content hash mismatch for {0}")]
    HashMismatch(String),
}

impl ResolveError {
    /// Maps the failure to the status reported to consumers.
    #[must_use]
    pub const fn status(&self) -> ResolutionStatus {
        match self {
            Self::ChainRead(_) => ResolutionStatus::ChainReadError,
            Self::NoContract(_) | Self::NotFound => ResolutionStatus::NotFound,
            Self::Http { .. } | Self::HttpStatus { .. } => ResolutionStatus::FetchError,
            Self::Pointer(_) | Self::Json(_) => ResolutionStatus::ParseError,
            Self::HashMismatch(_) => ResolutionStatus::HashMismatch,
        }
    }
}

/// Errors building a resolver.
#[derive(Debug, thiserror::Error)]
pub enum ResolverBuildError {
    /// The configured RPC URL does not parse.
    #[error("invalid RPC URL {url:?}: {source}")]
    RpcUrl {
        /// The configured value.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors querying account information.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// RPC transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
