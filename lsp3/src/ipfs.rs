//! Rewriting of decentralized-storage references to gateway URLs.

use crate::config::ResolverConfig;

/// URL scheme prefix of IPFS content references.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Returns the content identifier (with any sub-path) of an `ipfs://` reference.
#[must_use]
pub fn content_id(reference: &str) -> Option<&str> {
    reference.strip_prefix(IPFS_SCHEME)
}

/// Rewrites `ipfs://<cid>` to `<gateway_base><cid>`; anything else is returned unchanged.
///
/// `gateway_base` is expected to end in `/ipfs/`, see [`ResolverConfig::gateway_base`].
#[must_use]
pub fn to_gateway_url(reference: &str, gateway_base: &str) -> String {
    content_id(reference).map_or_else(|| reference.to_owned(), |cid| format!("{gateway_base}{cid}"))
}

/// Normalizes a reference with the gateway configured in `config`.
#[must_use]
pub fn normalize(reference: &str, config: &ResolverConfig) -> String {
    to_gateway_url(reference, &config.gateway_base())
}
