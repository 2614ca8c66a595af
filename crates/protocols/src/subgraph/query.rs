use clmm_monitor_domain::WalletAddress;

/// Builds the positions query for `wallet`.
///
/// The wallet is embedded verbatim; [`WalletAddress`] only ever holds
/// `0x` plus hex digits.
pub fn positions_query(wallet: &WalletAddress, first: u32) -> String {
    format!(
        "{{ positions(where:{{account:\"{wallet}\"}} first:{first} orderBy:id \
         orderDirection:asc subgraphError:allow)\
         {{id liquidity tickLower{{index}} tickUpper{{index}} \
         pool{{id tick token0{{symbol decimals}} token1{{symbol decimals}}}}}} }}"
    )
}
