//! Subcommand implementations.
//!
//! Each command returns the text to print; `main` owns stdout.

use std::fmt::Write as _;

use lsp3::chain::{AddressFormatError, ChainId, parse_address};
use lsp3::format::short_address;
use lsp3::identicon::{Avatar, Identicon, IdenticonOptions};
use lsp3::networks::KNOWN_NETWORKS;
use lsp3::profile::ResolvedProfile;
use lsp3_evm::{AccountError, AccountOverview, ProfileResolver, ResolverBuildError};

use crate::config::{CliConfig, ConfigError};

/// Errors surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Bad configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The resolver could not be constructed.
    #[error(transparent)]
    Build(#[from] ResolverBuildError),
    /// The address argument is malformed.
    #[error(transparent)]
    Address(#[from] AddressFormatError),
    /// Account query failed.
    #[error(transparent)]
    Account(#[from] AccountError),
    /// JSON output failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn resolver(config: &CliConfig) -> Result<ProfileResolver, CommandError> {
    Ok(ProfileResolver::new(config.resolver_config()?)?)
}

/// Resolves and renders the profile of `address` on `chain`.
///
/// # Errors
///
/// Returns [`CommandError`] on configuration or serialization failure.
/// Resolution failures are reported through the profile status.
pub async fn profile(config: &CliConfig, address: &str, chain: ChainId, json: bool) -> Result<String, CommandError> {
    let profile = resolver(config)?.resolve(address, chain).await;
    if json {
        return Ok(serde_json::to_string_pretty(&profile)?);
    }
    Ok(render_profile(&profile))
}

/// Queries and renders the account overview of `address`.
///
/// # Errors
///
/// Returns [`CommandError`] if the address is malformed or any RPC call fails.
pub async fn account(config: &CliConfig, address: &str, json: bool) -> Result<String, CommandError> {
    let parsed = parse_address(address)?;
    let resolver = resolver(config)?;
    let overview = AccountOverview::fetch(resolver.provider(), parsed).await?;
    if json {
        return Ok(serde_json::to_string_pretty(&overview)?);
    }
    Ok(render_account(&overview))
}

/// Picks the avatar for `address`: the profile image URL, the configured
/// fallback image, or an SVG blockie.
///
/// With `offline` set no lookup is made and the blockie is always rendered.
///
/// # Errors
///
/// Returns [`CommandError`] on configuration failure.
pub async fn avatar(
    config: &CliConfig,
    address: &str,
    chain: ChainId,
    scale: usize,
    offline: bool,
) -> Result<String, CommandError> {
    if offline {
        return Ok(identicon(config, address).to_svg(scale));
    }
    let profile = resolver(config)?.resolve(address, chain).await;
    Ok(
        match Avatar::choose(address, Some(&profile), config.fallback_avatar.as_deref()) {
            Avatar::Image(url) => url,
            Avatar::Identicon(_) => identicon(config, address).to_svg(scale),
        },
    )
}

fn identicon(config: &CliConfig, address: &str) -> Identicon {
    let options = IdenticonOptions {
        size: config.identicon_size,
        ..IdenticonOptions::default()
    };
    Identicon::with_options(address, &options)
}

/// Renders a profile as human-readable text.
#[must_use]
pub fn render_profile(profile: &ResolvedProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Address: {}", profile.address);
    let _ = writeln!(
        out,
        "Name:    {}",
        profile
            .display_name
            .clone()
            .unwrap_or_else(|| short_address(&profile.address))
    );
    let _ = writeln!(out, "Avatar:  {}", profile.avatar_url.as_deref().unwrap_or("-"));
    let _ = write!(out, "Status:  {}", profile.status);
    out
}

/// Renders an account overview as human-readable text.
#[must_use]
pub fn render_account(overview: &AccountOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Address: {}", overview.address);
    let _ = writeln!(out, "Network: {} ({})", overview.network_name, overview.chain_id);
    let _ = writeln!(out, "Balance: {} {}", overview.formatted_balance, overview.symbol);
    let _ = write!(out, "Block:   {}", overview.block_number);
    if let Some(url) = &overview.explorer_url {
        let _ = write!(out, "\nExplorer: {url}");
    }
    out
}

/// Lists the known networks, one per line.
#[must_use]
pub fn render_networks() -> String {
    KNOWN_NETWORKS
        .iter()
        .map(|n| {
            format!(
                "{:>10}  {:<18} {:<4} {}{}",
                n.chain_id,
                n.name,
                n.currency.symbol,
                n.rpc_url,
                if n.testnet { "  (testnet)" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
