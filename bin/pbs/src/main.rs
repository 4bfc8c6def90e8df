mod cmd;
mod config;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use pbs_rs::Network;
use std::future::Future;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Default, Debug, Clone, ValueEnum)]
pub enum NetworkArg {
    #[default]
    Mainnet,
    Sepolia,
    Holesky,
}

// NOTE: define this mapping so only this crate needs the `clap` dependency
// while still being able to use the `clap::ValueEnum` machinery
impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => Self::Mainnet,
            NetworkArg::Sepolia => Self::Sepolia,
            NetworkArg::Holesky => Self::Holesky,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(author, version, about = "auction relay connecting builders to proposers", long_about = None)]
struct Cli {
    #[clap(long, value_enum, value_name = "NETWORK")]
    network: Option<NetworkArg>,
    #[clap(long, value_name = "FILE")]
    network_config: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Relay(cmd::relay::Command),
    Config(cmd::config::Command),
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_task_until_signal(task: impl Future<Output = Result<()>>) -> Result<()> {
    tokio::select! {
        task = task => task,
        _ = signal::ctrl_c() => {
            tracing::info!("shutting down...");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let network = if let Some(network) = cli.network {
        network.into()
    } else if let Some(network_config) = cli.network_config {
        // use custom config if provided
        Network::Custom(network_config)
    } else {
        // default to `mainnet` if no network configuration is provided
        Network::default()
    };

    setup_logging();

    tracing::info!("configured for {network}");

    match cli.command {
        Commands::Relay(cmd) => run_task_until_signal(cmd.execute(network)).await,
        Commands::Config(cmd) => run_task_until_signal(cmd.execute(network)).await,
    }
}
