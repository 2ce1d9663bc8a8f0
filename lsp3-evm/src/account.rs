//! Connected-account summary.

use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use lsp3::chain::ChainId;
use lsp3::format::format_units;
use lsp3::networks::{chain_name, explorer_address_url, network_by_chain_id};
use serde::Serialize;

use crate::error::AccountError;

/// Fractional digits shown for native balances.
pub const BALANCE_PRECISION: usize = 4;

/// Chain, balance and block height as seen by the connected provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    /// Checksummed account address.
    pub address: String,
    /// Chain the provider is connected to.
    pub chain_id: ChainId,
    /// Display name of that chain.
    pub network_name: String,
    /// Native balance in base units.
    pub balance: U256,
    /// Native balance in whole units, rounded to [`BALANCE_PRECISION`] digits.
    pub formatted_balance: String,
    /// Native currency symbol.
    pub symbol: String,
    /// Latest block number.
    pub block_number: u64,
    /// Block explorer page for the address, if the chain is known.
    pub explorer_url: Option<String>,
}

impl AccountOverview {
    /// Queries chain id, balance and block number for `address`.
    ///
    /// Unknown chains fall back to an 18-decimal `ETH` currency.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Transport`] if any RPC call fails.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "lsp3.account", skip(provider), err)
    )]
    pub async fn fetch<P: Provider>(provider: &P, address: Address) -> Result<Self, AccountError> {
        let chain_id = provider.get_chain_id().await?;
        let balance = provider.get_balance(address).await?;
        let block_number = provider.get_block_number().await?;

        let (symbol, decimals) = network_by_chain_id(chain_id)
            .map_or(("ETH", 18), |n| (n.currency.symbol, n.currency.decimals));
        let address = address.to_string();
        Ok(Self {
            network_name: chain_name(chain_id),
            explorer_url: explorer_address_url(chain_id, &address),
            formatted_balance: format_units(balance, decimals, BALANCE_PRECISION),
            symbol: symbol.to_owned(),
            address,
            chain_id,
            balance,
            block_number,
        })
    }
}
