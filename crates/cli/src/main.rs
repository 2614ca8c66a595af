//! Command Line Interface for the CLMM range monitor.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clmm_monitor_domain::math::price_tick::tick_to_price;
use clmm_monitor_domain::{Position, WalletAddress};
use clmm_monitor_execution::prelude::*;
use clmm_monitor_protocols::prelude::*;
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clmm-monitor")]
#[command(about = "Range monitor for concentrated-liquidity LP positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll positions forever and alert on range changes
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between polling cycles
        #[arg(long, env = "CHECK_INTERVAL", default_value_t = 300)]
        interval: u64,

        /// Telegram bot token
        #[arg(long, env = "TG_BOT_TOKEN", hide_env_values = true)]
        tg_bot_token: Option<String>,

        /// Telegram chat id
        #[arg(long, env = "TG_CHAT_ID")]
        tg_chat_id: Option<String>,

        /// Telegram topic id inside the chat
        #[arg(long, env = "TG_THREAD_ID")]
        tg_thread_id: Option<i64>,

        /// Send a heartbeat after every cycle
        #[arg(long, env = "ENABLE_HEARTBEAT")]
        enable_heartbeat: bool,

        /// Heartbeat collector endpoint
        #[arg(long, env = "HEARTBEAT_URL", default_value = "http://localhost:3000/heartbeat")]
        heartbeat_url: String,

        /// Service display name reported in heartbeats
        #[arg(long, env = "SERVICE_NAME", default_value = "CLMM LP Monitor")]
        service_name: String,

        /// Service identifier reported in heartbeats
        #[arg(long, env = "SERVICE_ID", default_value = "lp-monitor")]
        service_id: String,
    },
    /// Fetch positions once and print them
    Positions {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceKind {
    /// Indexed subgraph query
    Subgraph,
    /// Direct contract reads over JSON-RPC
    Onchain,
}

#[derive(Args)]
struct SourceArgs {
    /// Wallet to monitor (0x-prefixed, 40 hex digits)
    #[arg(long, env = "WALLET_ADDRESS")]
    wallet: String,

    /// Where positions are read from
    #[arg(long, env = "POSITION_SOURCE", value_enum, default_value = "subgraph")]
    source: SourceKind,

    /// Subgraph GraphQL endpoint
    #[arg(long, env = "SUBGRAPH_URL")]
    subgraph_url: Option<String>,

    /// Subgraph gateway API key
    #[arg(long, env = "SUBGRAPH_API_KEY", hide_env_values = true)]
    subgraph_api_key: Option<String>,

    /// EIP-155 chain id for on-chain reads
    #[arg(long, env = "CHAIN_ID", default_value_t = 56)]
    chain_id: u64,

    /// JSON-RPC endpoint; defaults to the chain's public endpoint
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Position manager contract override
    #[arg(long, env = "POSITION_MANAGER")]
    position_manager: Option<String>,

    /// Include positions with zero liquidity (on-chain only)
    #[arg(long)]
    include_empty: bool,

    /// Inspect at most this many position NFTs (on-chain only)
    #[arg(long)]
    limit: Option<usize>,

    /// Source request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 20)]
    timeout: u64,
}

impl SourceArgs {
    fn wallet(&self) -> Result<WalletAddress> {
        WalletAddress::parse(&self.wallet).context("invalid WALLET_ADDRESS")
    }

    async fn build(&self) -> Result<Arc<dyn PositionSource>> {
        let timeout = Duration::from_secs(self.timeout);

        match self.source {
            SourceKind::Subgraph => {
                let mut config = SubgraphConfig {
                    api_key: self.subgraph_api_key.clone().filter(|k| !k.is_empty()),
                    timeout,
                    ..SubgraphConfig::default()
                };
                if let Some(url) = &self.subgraph_url {
                    config.url = url.clone();
                }
                if config.api_key.is_none() {
                    info!("No subgraph API key set, sending unauthenticated queries");
                }
                let source = SubgraphSource::new(config).context("failed to build subgraph client")?;
                Ok(Arc::new(source))
            }
            SourceKind::Onchain => {
                let url = match (&self.rpc_url, ChainConfig::lookup(self.chain_id)) {
                    (Some(url), _) => url.clone(),
                    (None, Some(chain)) => chain.default_rpc_url.to_string(),
                    (None, None) => anyhow::bail!(
                        "chain {} has no default RPC endpoint, set RPC_URL",
                        self.chain_id
                    ),
                };
                let config = OnChainConfig {
                    chain_id: self.chain_id,
                    rpc: RpcConfig { url, timeout },
                    position_manager: self.position_manager.clone(),
                    include_empty: self.include_empty,
                    limit: self.limit,
                };
                let source = OnChainSource::connect(config)
                    .await
                    .context("failed to connect on-chain source")?;
                Ok(Arc::new(source))
            }
        }
    }
}

fn print_position(position: &Position) {
    println!(
        "{} {} | Token #{}",
        position.classify().emoji(),
        position.classify(),
        position.id
    );
    println!("  Pool:      {}", position.pool_id);
    if let Some(pair) = position.pair_label() {
        println!("  Pair:      {pair}");
    }
    if let Some(fee) = position.fee_tier {
        println!("  Fee tier:  {fee}");
    }
    println!(
        "  Tick:      {} in {}",
        position.tick_current, position.range
    );
    if let (Ok(lower), Ok(upper)) = (
        tick_to_price(position.tick_lower()),
        tick_to_price(position.tick_upper()),
    ) {
        println!(
            "  Raw price: {} .. {}",
            lower.round_dp(8).normalize(),
            upper.round_dp(8).normalize()
        );
    }
    println!("  Liquidity: {}", position.liquidity);
    if let (Some(token0), Some(token1)) = (&position.token0, &position.token1)
        && token0.amount.is_some()
        && token1.amount.is_some()
    {
        println!("  Holdings:  {token0} + {token1}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            source,
            interval,
            tg_bot_token,
            tg_chat_id,
            tg_thread_id,
            enable_heartbeat,
            heartbeat_url,
            service_name,
            service_id,
        } => {
            let wallet = source.wallet()?;
            let position_source = source.build().await?;

            let notifier = TelegramNotifier::new(TelegramConfig {
                bot_token: tg_bot_token,
                ..TelegramConfig::default()
            })
            .context("failed to build Telegram client")?;

            let mut config =
                MonitorConfig::new(wallet.clone()).with_poll_interval(Duration::from_secs(interval));
            if let Some(chat_id) = tg_chat_id.filter(|c| !c.trim().is_empty()) {
                let mut target = DeliveryTarget::new(chat_id);
                if let Some(thread_id) = tg_thread_id {
                    target = target.with_thread(thread_id);
                }
                config = config.with_target(target);
            } else {
                info!("TG_CHAT_ID not set, transition alerts will only be logged");
            }

            let mut monitor = PositionMonitor::new(config, position_source, Arc::new(notifier));

            if enable_heartbeat {
                let heartbeat = HttpHeartbeat::new(
                    HeartbeatConfig {
                        url: heartbeat_url,
                        service_name,
                        service_id,
                        interval: Duration::from_secs(interval),
                        ..HeartbeatConfig::default()
                    },
                    wallet,
                )
                .context("failed to build heartbeat client")?;
                monitor = monitor.with_heartbeat(Arc::new(heartbeat));
            }

            monitor.start().await;
        }
        Commands::Positions { source } => {
            let wallet = source.wallet()?;
            let position_source = source.build().await?;

            println!("🔍 Fetching positions for {wallet} via {}...", position_source.name());
            let positions = position_source
                .fetch_positions(&wallet)
                .await
                .context("position fetch failed")?;

            if positions.is_empty() {
                println!("No positions found");
            }
            for position in &positions {
                print_position(position);
                println!();
            }
            println!("✅ {} position(s)", positions.len());
        }
    }

    Ok(())
}
