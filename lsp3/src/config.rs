//! Resolver configuration.
//!
//! Everything the resolver would otherwise hard-code (supported chain, RPC
//! endpoint, IPFS gateway, schema key) is carried by [`ResolverConfig`] and
//! handed to the resolver at construction.

use std::time::Duration;

use alloy_primitives::{B256, b256};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::networks::LUKSO_MAINNET;

/// ERC725Y data key of the `LSP3Profile` singleton (`keccak256("LSP3Profile")`).
pub const LSP3_PROFILE_KEY: B256 =
    b256!("5ef83ad9559033e6e941db7d7c495acdce616347d28e90c7ce47cbfcfcad3bc5");

/// Default public RPC endpoint for LUKSO mainnet.
pub const DEFAULT_RPC_URL: &str = "https://rpc.lukso.sigmacore.io";

/// Default IPFS gateway host.
pub const DEFAULT_IPFS_GATEWAY: &str = "api.universalprofile.cloud";

/// Immutable configuration for profile resolution.
///
/// # Example
///
/// ```rust
/// use lsp3::config::ResolverConfig;
///
/// let config = ResolverConfig::default().with_ipfs_gateway("ipfs.io");
/// assert_eq!(config.supported_chain, 42);
/// assert_eq!(config.gateway_base(), "https://ipfs.io/ipfs/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// The only chain on which profile resolution is attempted.
    pub supported_chain: ChainId,

    /// JSON-RPC endpoint of the supported chain.
    pub rpc_url: String,

    /// Gateway host used to rewrite `ipfs://` references.
    ///
    /// A bare host (`ipfs.io`) gets `https://` prepended; a value that
    /// already carries a scheme is used as given.
    pub ipfs_gateway: String,

    /// ERC725Y data key holding the profile pointer.
    pub profile_key: B256,

    /// Per-request timeout for metadata fetches. `None` keeps the transport default.
    #[serde(with = "opt_secs", skip_serializing_if = "Option::is_none")]
    pub fetch_timeout: Option<Duration>,

    /// Check the VerifiableURI hash against the fetched document.
    pub verify_content_hash: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            supported_chain: LUKSO_MAINNET,
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_owned(),
            profile_key: LSP3_PROFILE_KEY,
            fetch_timeout: None,
            verify_content_hash: false,
        }
    }
}

impl ResolverConfig {
    /// Sets the supported chain.
    #[must_use]
    pub const fn with_supported_chain(mut self, chain: ChainId) -> Self {
        self.supported_chain = chain;
        self
    }

    /// Sets the RPC endpoint.
    #[must_use]
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Sets the IPFS gateway host.
    #[must_use]
    pub fn with_ipfs_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.ipfs_gateway = gateway.into();
        self
    }

    /// Sets the per-request fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Enables or disables content hash verification.
    #[must_use]
    pub const fn with_hash_verification(mut self, enabled: bool) -> Self {
        self.verify_content_hash = enabled;
        self
    }

    /// Returns the gateway prefix that content identifiers are appended to,
    /// always ending in `/ipfs/`.
    #[must_use]
    pub fn gateway_base(&self) -> String {
        let gateway = self.ipfs_gateway.trim_end_matches('/');
        let gateway = gateway.strip_suffix("/ipfs").unwrap_or(gateway);
        if gateway.contains("://") {
            format!("{gateway}/ipfs/")
        } else {
            format!("https://{gateway}/ipfs/")
        }
    }
}

mod opt_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<f64>::deserialize(d)?;
        secs.map(|s| Duration::try_from_secs_f64(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
