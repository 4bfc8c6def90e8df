use beacon_api_client::mainnet::Client;
use ethereum_consensus::{
    networks::typical_genesis_time,
    state_transition::{Context, Error},
};
use tracing::warn;

/// Selects the chain the relay serves; determines fork versions, genesis
/// details and the signing domains derived from them.
#[derive(Default, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    #[default]
    Mainnet,
    Sepolia,
    Holesky,
    Custom(String),
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Sepolia => write!(f, "sepolia"),
            Self::Holesky => write!(f, "holesky"),
            Self::Custom(config) => write!(f, "custom network with config at `{config}`"),
        }
    }
}

impl TryFrom<&Network> for Context {
    type Error = Error;

    fn try_from(network: &Network) -> Result<Self, Self::Error> {
        match network {
            Network::Mainnet => Ok(Context::for_mainnet()),
            Network::Sepolia => Ok(Context::for_sepolia()),
            Network::Holesky => Ok(Context::for_holesky()),
            Network::Custom(config) => Context::try_from_file(config),
        }
    }
}

/// Resolve the genesis time for `context`, falling back to a consensus node
/// query and finally a network-typical guess.
pub async fn get_genesis_time(context: &Context, beacon_node: Option<&Client>) -> u64 {
    match context.genesis_time() {
        Ok(genesis_time) => genesis_time,
        Err(_) => {
            if let Some(client) = beacon_node {
                if let Ok(details) = client.get_genesis_details().await {
                    return details.genesis_time
                }
            }
            warn!("could not load genesis time from context or consensus node; using best guess");
            typical_genesis_time(context)
        }
    }
}
