use super::abi::{self, AbiArg, Words};
use super::chain::ChainConfig;
use crate::rpc::{JsonRpcClient, RpcConfig};
use crate::{PositionSource, SourceError};
use async_trait::async_trait;
use clmm_monitor_domain::{Position, TickRange, TokenHolding, WalletAddress};
use primitive_types::U256;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration for the on-chain source.
#[derive(Debug, Clone)]
pub struct OnChainConfig {
    /// EIP-155 chain id the RPC endpoint must serve.
    pub chain_id: u64,
    /// RPC endpoint.
    pub rpc: RpcConfig,
    /// Position manager override; required for chains not in
    /// [`KNOWN_CHAINS`](super::chain::KNOWN_CHAINS).
    pub position_manager: Option<String>,
    /// Report positions whose liquidity is zero.
    pub include_empty: bool,
    /// Inspect at most this many position NFTs per fetch.
    pub limit: Option<usize>,
}

impl Default for OnChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 56,
            rpc: RpcConfig::default(),
            position_manager: None,
            include_empty: false,
            limit: None,
        }
    }
}

/// Fields of `positions(tokenId)` the monitor uses.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawPosition {
    token0: String,
    token1: String,
    fee: u32,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
}

impl RawPosition {
    fn decode(data: &[u8]) -> Result<Self, SourceError> {
        // nonce, operator, token0, token1, fee, tickLower, tickUpper, liquidity, ...
        let words = Words::new(data);
        Ok(Self {
            token0: words.address(2)?,
            token1: words.address(3)?,
            fee: u32::try_from(words.uint64(4)?)
                .map_err(|_| SourceError::Malformed("fee overflows uint24".to_string()))?,
            tick_lower: words.int32(5)?,
            tick_upper: words.int32(6)?,
            liquidity: words.uint128(7)?,
        })
    }
}

#[derive(Debug, Clone)]
struct TokenMeta {
    symbol: String,
    decimals: u8,
}

type PoolKey = (String, String, u32);

/// Position source that reads the position manager directly.
pub struct OnChainSource {
    rpc: JsonRpcClient,
    chain_id: u64,
    position_manager: String,
    factory: String,
    include_empty: bool,
    limit: Option<usize>,
    tokens: RwLock<HashMap<String, TokenMeta>>,
    pools: RwLock<HashMap<PoolKey, String>>,
}

impl OnChainSource {
    /// Connects to the RPC endpoint and resolves the contracts to inspect.
    ///
    /// # Errors
    /// Fails when the chain is unknown and no position manager is given,
    /// when the endpoint is unreachable or serves another chain, or when the
    /// factory address cannot be read.
    pub async fn connect(config: OnChainConfig) -> Result<Self, SourceError> {
        let position_manager = match &config.position_manager {
            Some(address) => WalletAddress::parse(address)
                .map_err(|e| SourceError::Init(e.to_string()))?
                .to_string(),
            None => ChainConfig::lookup(config.chain_id)
                .ok_or_else(|| {
                    SourceError::Init(format!(
                        "no known position manager for chain {}",
                        config.chain_id
                    ))
                })?
                .position_manager
                .to_string(),
        };

        let rpc = JsonRpcClient::new(&config.rpc)?;
        let actual = rpc.chain_id().await?;
        if actual != config.chain_id {
            return Err(SourceError::ChainMismatch {
                expected: config.chain_id,
                actual,
            });
        }

        let data = rpc
            .eth_call(&position_manager, &abi::encode_call(abi::FACTORY, &[])?)
            .await?;
        let factory = Words::new(&data).address(0)?;

        info!(
            chain_id = config.chain_id,
            position_manager = %position_manager,
            factory = %factory,
            "Connected on-chain position source"
        );

        Ok(Self {
            rpc,
            chain_id: config.chain_id,
            position_manager,
            factory,
            include_empty: config.include_empty,
            limit: config.limit,
            tokens: RwLock::new(HashMap::new()),
            pools: RwLock::new(HashMap::new()),
        })
    }

    /// Chain id this source reads from.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn call(&self, to: &str, selector: [u8; 4], args: &[AbiArg<'_>]) -> Result<Vec<u8>, SourceError> {
        let data = abi::encode_call(selector, args)?;
        self.rpc.eth_call(to, &data).await
    }

    async fn position_count(&self, owner: &str) -> Result<usize, SourceError> {
        let data = self
            .call(&self.position_manager, abi::BALANCE_OF, &[AbiArg::Address(owner)])
            .await?;
        let balance = usize::try_from(Words::new(&data).uint64(0)?)
            .map_err(|_| SourceError::Malformed("position count too large".to_string()))?;
        Ok(self.limit.map_or(balance, |limit| balance.min(limit)))
    }

    async fn token_id(&self, owner: &str, index: usize) -> Result<U256, SourceError> {
        let data = self
            .call(
                &self.position_manager,
                abi::TOKEN_OF_OWNER_BY_INDEX,
                &[AbiArg::Address(owner), AbiArg::Uint(U256::from(index as u64))],
            )
            .await?;
        Words::new(&data).uint(0)
    }

    async fn read_position(&self, token_id: U256) -> Result<RawPosition, SourceError> {
        let data = self
            .call(&self.position_manager, abi::POSITIONS, &[AbiArg::Uint(token_id)])
            .await?;
        RawPosition::decode(&data)
    }

    async fn pool_address(&self, raw: &RawPosition) -> Result<String, SourceError> {
        let key = (raw.token0.clone(), raw.token1.clone(), raw.fee);
        if let Some(pool) = self.pools.read().await.get(&key) {
            return Ok(pool.clone());
        }

        let data = self
            .call(
                &self.factory,
                abi::GET_POOL,
                &[
                    AbiArg::Address(&raw.token0),
                    AbiArg::Address(&raw.token1),
                    AbiArg::Uint(U256::from(raw.fee)),
                ],
            )
            .await?;
        let pool = Words::new(&data).address(0)?;
        if pool.trim_start_matches("0x").bytes().all(|b| b == b'0') {
            return Err(SourceError::Malformed(format!(
                "no pool for {}/{} fee {}",
                raw.token0, raw.token1, raw.fee
            )));
        }

        self.pools.write().await.insert(key, pool.clone());
        Ok(pool)
    }

    async fn current_tick(&self, pool: &str) -> Result<i32, SourceError> {
        // sqrtPriceX96, tick, ...
        let data = self.call(pool, abi::SLOT0, &[]).await?;
        Words::new(&data).int32(1)
    }

    async fn token_meta(&self, token: &str) -> Result<TokenMeta, SourceError> {
        let symbol_data = self.call(token, abi::SYMBOL, &[]).await?;
        let decimals_data = self.call(token, abi::DECIMALS, &[]).await?;
        let decimals = u8::try_from(Words::new(&decimals_data).uint64(0)?)
            .map_err(|_| SourceError::Malformed(format!("{token}: decimals overflow uint8")))?;
        Ok(TokenMeta {
            symbol: abi::decode_string(&symbol_data)?,
            decimals,
        })
    }

    /// Token metadata is display-only: a token that does not answer
    /// `symbol()`/`decimals()` is shown by its short address.
    async fn holding(&self, token: &str) -> TokenHolding {
        if let Some(meta) = self.tokens.read().await.get(token) {
            return TokenHolding::new(meta.symbol.clone()).with_decimals(meta.decimals);
        }

        match self.token_meta(token).await {
            Ok(meta) => {
                let holding = TokenHolding::new(meta.symbol.clone()).with_decimals(meta.decimals);
                self.tokens.write().await.insert(token.to_string(), meta);
                holding
            }
            Err(e) => {
                warn!(token = %token, error = %e, "Failed to read token metadata");
                TokenHolding::new(short_address(token))
            }
        }
    }
}

fn short_address(address: &str) -> String {
    address.chars().take(10).collect()
}

#[async_trait]
impl PositionSource for OnChainSource {
    fn name(&self) -> &'static str {
        "onchain"
    }

    async fn fetch_positions(&self, wallet: &WalletAddress) -> Result<Vec<Position>, SourceError> {
        let owner = wallet.as_str();
        let count = self.position_count(owner).await?;
        let mut positions = Vec::with_capacity(count);

        for index in 0..count {
            let token_id = self.token_id(owner, index).await?;
            let raw = self.read_position(token_id).await?;

            if raw.liquidity == 0 && !self.include_empty {
                debug!(token_id = %token_id, "Skipping empty position");
                continue;
            }

            let pool = self.pool_address(&raw).await?;
            let tick = self.current_tick(&pool).await?;
            let token0 = self.holding(&raw.token0).await;
            let token1 = self.holding(&raw.token1).await;

            positions.push(
                Position::new(
                    token_id.to_string(),
                    pool,
                    TickRange::new(raw.tick_lower, raw.tick_upper),
                    tick,
                    raw.liquidity,
                )
                .with_fee_tier(raw.fee)
                .with_tokens(token0, token1)
                .with_underlying_amounts(),
            );
        }

        debug!(wallet = %wallet, count = positions.len(), "Fetched positions on-chain");
        Ok(positions)
    }
}
