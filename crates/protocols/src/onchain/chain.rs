/// Deployment details for a supported chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Human-readable chain name.
    pub name: &'static str,
    /// NonfungiblePositionManager contract address.
    pub position_manager: &'static str,
    /// Public RPC endpoint used when none is configured.
    pub default_rpc_url: &'static str,
}

/// Chains with a known PancakeSwap V3 deployment.
pub const KNOWN_CHAINS: &[ChainConfig] = &[
    ChainConfig {
        chain_id: 56,
        name: "BNB Chain",
        position_manager: "0x46a15b0b27311cedf172ab29e4f4766fbe7f4364",
        default_rpc_url: "https://binance.llamarpc.com/",
    },
    ChainConfig {
        chain_id: 1,
        name: "Ethereum",
        position_manager: "0x46a15b0b27311cedf172ab29e4f4766fbe7f4364",
        default_rpc_url: "https://eth.llamarpc.com/",
    },
];

impl ChainConfig {
    /// Looks up a known chain by id.
    pub fn lookup(chain_id: u64) -> Option<&'static ChainConfig> {
        KNOWN_CHAINS.iter().find(|c| c.chain_id == chain_id)
    }
}
