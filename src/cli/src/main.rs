//! Interactive single-key wallet for Bitcoin Cash token authorities.

use anyhow::{Context, Result};
use bch_cli::commands::init_seed;
use bch_cli::config::{default_server, WalletConfig};
use bch_cli::{menu, HttpFetcher, Prompt, Session, Wallet};
use bch_core::Network;
use bch_network::ElectrumProvider;
use colored::Colorize;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "bch-wallet", about = "Single-key Bitcoin Cash wallet for token authorities")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the wallet file
    #[structopt(short, long, parse(from_os_str))]
    wallet: Option<PathBuf>,

    /// Electrum server to connect to, as host:port
    #[structopt(short, long)]
    server: Option<String>,

    /// Network to operate on (mainnet, chipnet, testnet, regtest)
    #[structopt(short, long)]
    network: Option<Network>,

    /// Create a new wallet file and exit
    #[structopt(long)]
    init_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opt = Opt::from_args();

    let mut config = match &opt.config {
        Some(path) => WalletConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => WalletConfig::default(),
    };
    if let Some(network) = opt.network {
        if network != config.network && opt.config.is_none() {
            config.electrum_server = default_server(network).to_string();
        }
        config.network = network;
    }
    if let Some(server) = opt.server {
        config.electrum_server = server;
    }
    debug!("Using configuration {:?}", config);

    let wallet_file = match opt.wallet {
        Some(path) => path,
        None => {
            let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            dir.push("bch-wallet");
            dir.push("wallet.json");
            dir
        }
    };

    if opt.init_seed {
        let wallet = init_seed::run(&wallet_file)?;
        let keys = wallet.keys(config.network)?;
        println!("{} {}", "Seed initialized:".green(), wallet_file.display());
        println!("{} {}", "Address:".green(), keys.address());
        println!("{} {}", "Token address:".green(), keys.token_address());
        return Ok(());
    }

    let wallet = Wallet::load(&wallet_file).with_context(|| {
        format!(
            "Failed to load wallet from {} (run with --init-seed to create one)",
            wallet_file.display()
        )
    })?;
    let keys = wallet.keys(config.network)?;
    info!("Wallet address: {}", keys.address());
    info!("Token address: {}", keys.token_address());
    println!("{} {}", "Wallet address:".green(), keys.address());
    println!("{} {}", "Token address:".green(), keys.token_address());

    let provider =
        ElectrumProvider::new(config.electrum_server.clone(), config.client_name.clone());
    let fetcher = HttpFetcher::new();
    let mut session = Session::new(keys, &provider, &fetcher, Prompt::stdio());

    if let Err(e) = menu::run(&mut session).await {
        error!("An unhandled error was thrown: {}", e);
        error!("{:?}", e);
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }

    Ok(())
}
