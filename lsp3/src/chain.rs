//! Chain and address primitives.
//!
//! Provides the EIP-155 chain id type used throughout the workspace and the
//! strict address parser that gates every resolution.

use std::sync::LazyLock;

use alloy_primitives::Address;
use regex::Regex;

/// An EIP-155 chain ID (e.g., 42 for LUKSO, 1 for Ethereum).
pub type ChainId = u64;

/// Formats a chain ID as a CAIP-2 identifier.
///
/// Example: `caip2(42)` returns `"eip155:42"`.
#[must_use]
pub fn caip2(chain_id: ChainId) -> String {
    format!("eip155:{chain_id}")
}

/// Parses a CAIP-2 identifier into an EIP-155 chain ID.
///
/// Returns `None` if the input is not a valid `eip155:` prefixed string.
#[must_use]
pub fn parse_caip2(caip: &str) -> Option<ChainId> {
    caip.strip_prefix("eip155:").and_then(|s| s.parse().ok())
}

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^0x[0-9a-fA-F]{40}$").expect("static regex is valid"));

/// Error returned when a string is not a well-formed account address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressFormatError {
    /// Not `0x` followed by exactly 40 hex digits.
    #[error("invalid address format: {0:?}")]
    Format(String),
    /// Mixed-case input whose EIP-55 checksum does not match.
    #[error("invalid address checksum: {0}")]
    Checksum(String),
}

/// Parses a `0x`-prefixed hex address.
///
/// All-lowercase and all-uppercase inputs are accepted as-is. Mixed-case
/// input is treated as EIP-55 checksummed and must verify.
///
/// # Errors
///
/// Returns [`AddressFormatError`] if the input is malformed or carries a bad
/// checksum.
pub fn parse_address(input: &str) -> Result<Address, AddressFormatError> {
    if !ADDRESS_RE.is_match(input) {
        return Err(AddressFormatError::Format(input.to_owned()));
    }
    let digits = &input[2..];
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(input, None)
            .map_err(|_| AddressFormatError::Checksum(input.to_owned()));
    }
    input
        .parse()
        .map_err(|_| AddressFormatError::Format(input.to_owned()))
}

/// Returns `true` if `input` is a well-formed address.
#[must_use]
pub fn is_address(input: &str) -> bool {
    parse_address(input).is_ok()
}
