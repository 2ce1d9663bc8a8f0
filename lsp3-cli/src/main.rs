//! `lsp3` command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a Universal Profile on LUKSO mainnet
//! lsp3 profile 0x0000000000000000000000000000000000000001
//!
//! # Balance and block height through the configured RPC
//! lsp3 account 0x0000000000000000000000000000000000000001 --json
//!
//! # Avatar URL, or an SVG blockie when there is none
//! lsp3 avatar 0x0000000000000000000000000000000000000001 > avatar.svg
//!
//! # Configure logging level
//! RUST_LOG=debug lsp3 profile 0x0000000000000000000000000000000000000001
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to TOML configuration file (default: `lsp3.toml`)
//! - `LSP3_RPC_URL` - Override the JSON-RPC endpoint
//! - `LSP3_IPFS_GATEWAY` - Override the IPFS gateway
//! - `RUST_LOG` - Log level filter (default: `warn`)

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lsp3::chain::ChainId;
use lsp3::networks::LUKSO_MAINNET;
use tracing_subscriber::EnvFilter;

use lsp3_cli::commands;
use lsp3_cli::config::{CliConfig, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(name = "lsp3", version, about = "LUKSO Universal Profile lookups")]
struct Cli {
    /// Configuration file.
    #[arg(long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the LSP3 profile of an address.
    Profile {
        address: String,
        /// Chain the address is looked up on.
        #[arg(long, default_value_t = LUKSO_MAINNET)]
        chain: ChainId,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show network, balance and block height for an address.
    Account {
        address: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the avatar URL, or an SVG blockie if there is none.
    Avatar {
        address: String,
        /// Chain the address is looked up on.
        #[arg(long, default_value_t = LUKSO_MAINNET)]
        chain: ChainId,
        /// Pixels per blockie cell.
        #[arg(long, default_value_t = 8)]
        scale: usize,
        /// Skip the profile lookup and always render the blockie.
        #[arg(long)]
        offline: bool,
    },
    /// List the known networks.
    Networks,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("lsp3 failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load(&cli.config)?;
    tracing::debug!(
        chain = config.supported_chain,
        rpc_url = %config.rpc_url,
        gateway = %config.ipfs_gateway,
        "Loaded configuration"
    );

    let output = match cli.command {
        Command::Profile { address, chain, json } => commands::profile(&config, &address, chain, json).await?,
        Command::Account { address, json } => commands::account(&config, &address, json).await?,
        Command::Avatar {
            address,
            chain,
            scale,
            offline,
        } => commands::avatar(&config, &address, chain, scale, offline).await?,
        Command::Networks => commands::render_networks(),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
