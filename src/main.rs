use anyhow::Result;
use clap::{Parser, Subcommand};

use xfiswap::app::{self, AppCfg};
use xfiswap::config::Config;
use xfiswap::shared::types::Direction;

#[derive(Parser, Debug)]
#[command(version, about = "Swap client for the CrossFi testnet DEX")]
struct Args {
    /// RPC endpoint URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Expected chain id; the client refuses to run against any other network
    #[arg(long)]
    chain_id: Option<u64>,

    /// DEX contract address
    #[arg(long)]
    contract: Option<String>,

    /// Path to a hex-encoded private key file (required for swaps)
    #[arg(long)]
    key: Option<String>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive swap form (default)
    Session,

    /// Fetch a single quote
    Quote {
        /// Input amount as a decimal string
        amount: String,

        /// Swap direction: native-to-token or token-to-native
        #[arg(long, default_value = "native-to-token")]
        direction: String,
    },

    /// Submit a swap and wait for confirmation
    Swap {
        /// Input amount as a decimal string
        amount: String,

        /// Swap direction: native-to-token or token-to-native
        #[arg(long, default_value = "native-to-token")]
        direction: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Load base configuration from file if provided
    let base_config = if let Some(config_path) = &args.config {
        Some(Config::from_file(config_path)?)
    } else {
        None
    };

    // Priority: CLI args > Config file > Defaults
    let mut app_cfg = match base_config {
        Some(cfg) => AppCfg::from_config(cfg),
        None => AppCfg::default(),
    };

    if let Some(rpc_url) = args.rpc_url {
        app_cfg.rpc_url = rpc_url;
    }
    if let Some(chain_id) = args.chain_id {
        app_cfg.chain_id = chain_id;
    }
    if let Some(contract) = args.contract {
        app_cfg.contract_address = contract;
    }
    if let Some(key) = args.key {
        app_cfg.key_path = Some(key);
    }

    match args.command {
        None | Some(Command::Session) => app::run_session(app_cfg).await,
        Some(Command::Quote { amount, direction }) => {
            let direction = parse_direction(&direction)?;
            app::run_quote(app_cfg, direction, &amount).await
        }
        Some(Command::Swap { amount, direction }) => {
            let direction = parse_direction(&direction)?;
            app::run_swap(app_cfg, direction, &amount).await
        }
    }
}

fn parse_direction(text: &str) -> Result<Direction> {
    text.parse().map_err(|e: String| anyhow::anyhow!(e))
}
