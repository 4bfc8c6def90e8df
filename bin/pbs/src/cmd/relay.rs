use crate::config::Config;
use clap::Args;
use pbs_relay_rs::Service;
use pbs_rs::Network;
use tracing::info;

#[derive(Debug, Args)]
#[clap(about = "🏗 connecting builders to proposers")]
pub struct Command {
    #[clap(env)]
    config_file: String,
}

impl Command {
    pub async fn execute(self, network: Network) -> eyre::Result<()> {
        let config = Config::from_toml_file(&self.config_file)?;

        if let Some(config) = config.relay {
            info!("starting relay for `{network}`");
            let service = Service::from(network, config).spawn().await?;
            Ok(service.await?)
        } else {
            Err(eyre::eyre!("missing relay config from file provided"))
        }
    }
}
