//! Known network definitions.
//!
//! Static metadata for the networks the toolkit knows how to label: display
//! name, native currency, block explorer and a default public RPC endpoint.
//! Unknown chain ids are still usable everywhere; they just render as
//! `Chain <id>` and have no explorer link.

use crate::chain::ChainId;

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET: ChainId = 1;

/// Sepolia (testnet) chain ID.
pub const SEPOLIA: ChainId = 11_155_111;

/// LUKSO Mainnet chain ID.
pub const LUKSO_MAINNET: ChainId = 42;

/// Native currency of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
    /// Currency name (e.g., "LYX").
    pub name: &'static str,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Number of decimals of the smallest unit.
    pub decimals: u8,
}

/// A known network definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    /// EIP-155 chain ID.
    pub chain_id: ChainId,
    /// Human-readable network name (e.g., "LUKSO Mainnet").
    pub name: &'static str,
    /// Native currency.
    pub currency: NativeCurrency,
    /// Block explorer base URL, without trailing slash.
    pub explorer_url: &'static str,
    /// Default public JSON-RPC endpoint.
    pub rpc_url: &'static str,
    /// Whether this is a test network.
    pub testnet: bool,
}

const ETHER: NativeCurrency = NativeCurrency {
    name: "Ether",
    symbol: "ETH",
    decimals: 18,
};

/// Well-known networks.
pub static KNOWN_NETWORKS: &[NetworkInfo] = &[
    NetworkInfo {
        chain_id: ETHEREUM_MAINNET,
        name: "Ethereum Mainnet",
        currency: ETHER,
        explorer_url: "https://etherscan.io",
        rpc_url: "https://eth.merkle.io",
        testnet: false,
    },
    NetworkInfo {
        chain_id: SEPOLIA,
        name: "Sepolia Testnet",
        currency: NativeCurrency {
            name: "Sepolia Ether",
            symbol: "ETH",
            decimals: 18,
        },
        explorer_url: "https://sepolia.etherscan.io",
        rpc_url: "https://sepolia.drpc.org",
        testnet: true,
    },
    NetworkInfo {
        chain_id: LUKSO_MAINNET,
        name: "LUKSO Mainnet",
        currency: NativeCurrency {
            name: "LYX",
            symbol: "LYX",
            decimals: 18,
        },
        explorer_url: "https://explorer.execution.mainnet.lukso.network",
        rpc_url: "https://rpc.lukso.sigmacore.io",
        testnet: false,
    },
];

/// Looks up a known network by chain ID.
#[must_use]
pub fn network_by_chain_id(chain_id: ChainId) -> Option<&'static NetworkInfo> {
    KNOWN_NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

/// Returns the display name of a chain, or `Chain <id>` if unknown.
#[must_use]
pub fn chain_name(chain_id: ChainId) -> String {
    network_by_chain_id(chain_id).map_or_else(|| format!("Chain {chain_id}"), |n| n.name.to_owned())
}

/// Returns the block explorer page for `address` on a known chain.
#[must_use]
pub fn explorer_address_url(chain_id: ChainId, address: &str) -> Option<String> {
    network_by_chain_id(chain_id).map(|n| format!("{}/address/{address}", n.explorer_url))
}
