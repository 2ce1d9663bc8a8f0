//! Solidity interface definitions for on-chain interactions.
//!
//! Only the ERC725Y read surface is needed to locate profile metadata.

use alloy_sol_types::sol;

sol! {
    /// ERC725Y generic key-value store, read side.
    ///
    /// Universal Profiles implement ERC725Y; LSP3 metadata lives under the
    /// `LSP3Profile` data key.
    ///
    /// Reference: <https://github.com/ERC725Alliance/ERC725/blob/develop/docs/ERC-725.md>
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC725Y {
        function getData(bytes32 dataKey) external view returns (bytes memory dataValue);
    }
}
