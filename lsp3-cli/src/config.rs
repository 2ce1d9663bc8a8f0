//! CLI configuration.
//!
//! Loaded from a TOML file. String values may reference environment
//! variables with `$VAR` or `${VAR}`; unresolved references are kept as-is.
//!
//! # Example Configuration
//!
//! ```toml
//! supported_chain = 42
//! rpc_url = "$LUKSO_RPC"
//! ipfs_gateway = "api.universalprofile.cloud"
//! fetch_timeout_secs = 10
//! verify_content_hash = true
//! identicon_size = 9
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to the configuration file (default: `lsp3.toml`)
//! - `LSP3_RPC_URL` - Overrides `rpc_url`
//! - `LSP3_IPFS_GATEWAY` - Overrides `ipfs_gateway`

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use lsp3::chain::ChainId;
use lsp3::config::ResolverConfig;
use lsp3::identicon::DEFAULT_SIZE;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "lsp3.toml";

/// Overrides `rpc_url`.
pub const RPC_URL_ENV: &str = "LSP3_RPC_URL";

/// Overrides `ipfs_gateway`.
pub const IPFS_GATEWAY_ENV: &str = "LSP3_IPFS_GATEWAY";

static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("static regex is valid")
});

/// Errors loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`CliConfig`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// `fetch_timeout_secs` is negative, NaN or too large.
    #[error("invalid fetch_timeout_secs: {0}")]
    Timeout(f64),
}

/// Settings for the `lsp3` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// The one chain on which profiles are resolved.
    pub supported_chain: ChainId,
    /// JSON-RPC endpoint of that chain.
    pub rpc_url: String,
    /// IPFS gateway host or base URL.
    pub ipfs_gateway: String,
    /// Per-request timeout for metadata fetches, in seconds.
    pub fetch_timeout_secs: Option<f64>,
    /// Check VerifiableURI content hashes.
    pub verify_content_hash: bool,
    /// Image shown when an account has no profile image.
    pub fallback_avatar: Option<String>,
    /// Identicon grid size.
    pub identicon_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        let resolver = ResolverConfig::default();
        Self {
            supported_chain: resolver.supported_chain,
            rpc_url: resolver.rpc_url,
            ipfs_gateway: resolver.ipfs_gateway,
            fetch_timeout_secs: None,
            verify_content_hash: resolver.verify_content_hash,
            fallback_avatar: None,
            identicon_size: DEFAULT_SIZE,
        }
    }
}

impl CliConfig {
    /// Loads `path`, expanding and overriding from the process environment.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            String::new()
        };
        Self::parse(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML `content`, resolving variables through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML.
    pub fn parse(content: &str, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(content, &env);
        let mut config: Self = toml::from_str(&expanded)?;
        if let Some(rpc_url) = env(RPC_URL_ENV) {
            config.rpc_url = rpc_url;
        }
        if let Some(gateway) = env(IPFS_GATEWAY_ENV) {
            config.ipfs_gateway = gateway;
        }
        Ok(config)
    }

    /// Builds the resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Timeout`] if `fetch_timeout_secs` is not a
    /// valid duration.
    pub fn resolver_config(&self) -> Result<ResolverConfig, ConfigError> {
        let mut config = ResolverConfig::default()
            .with_supported_chain(self.supported_chain)
            .with_rpc_url(self.rpc_url.clone())
            .with_ipfs_gateway(self.ipfs_gateway.clone())
            .with_hash_verification(self.verify_content_hash);
        if let Some(secs) = self.fetch_timeout_secs {
            let timeout = Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::Timeout(secs))?;
            config = config.with_fetch_timeout(timeout);
        }
        Ok(config)
    }
}

fn expand_env_vars(input: &str, env: &impl Fn(&str) -> Option<String>) -> String {
    ENV_REF
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            env(name).unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}
