use crate::{bulletin::BulletinBoard, clock::SlotClock, relay::Relay, signer::RelaySigner};
use backoff::ExponentialBackoff;
use beacon_api_client::{mainnet::Client, Error as ApiError, ProposerDuty};
use ethereum_consensus::{
    crypto::SecretKey,
    primitives::Epoch,
    serde::try_bytes_from_hex_str,
    state_transition::Context,
};
use futures::future::join_all;
use pbs_rs::{blinded_block_relayer::Server, get_genesis_time, Network, ValidatorRegistry};
use serde::Deserialize;
use std::{net::Ipv4Addr, sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

// development key, not usable on any public network
const DEFAULT_SECRET_KEY: &str =
    "0x0101010101010101010101010101010101010101010101010101010101010101";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: Ipv4Addr,
    pub port: u16,
    pub beacon_node_url: String,
    pub public_url: Option<String>,
    pub secret_key: String,
    pub bid_timeout_secs: u64,
    pub lookahead_slots: u64,
    pub cutoff_offset_ms: u64,
    pub open_relay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED,
            port: 28545,
            beacon_node_url: "http://127.0.0.1:5052".into(),
            public_url: None,
            secret_key: DEFAULT_SECRET_KEY.into(),
            bid_timeout_secs: 45,
            lookahead_slots: 2,
            cutoff_offset_ms: 4000,
            open_relay: false,
        }
    }
}

pub struct Service {
    network: Network,
    config: Config,
}

async fn fetch_duties(client: &Client, epoch: Epoch) -> Result<Vec<ProposerDuty>, ApiError> {
    let backoff = ExponentialBackoff {
        max_elapsed_time: Some(Duration::from_secs(8)),
        ..Default::default()
    };
    backoff::future::retry(backoff, || async move {
        client
            .get_proposer_duties(epoch)
            .await
            .map(|(_, duties)| duties)
            .map_err(backoff::Error::transient)
    })
    .await
}

async fn load_duties_for_epoch_and_next(client: &Client, relay: &Relay, epoch: Epoch) {
    for epoch in [epoch, epoch + 1] {
        match fetch_duties(client, epoch).await {
            Ok(duties) => relay.on_proposer_duties(&duties),
            Err(err) => warn!(%err, epoch, "could not load proposer duties"),
        }
    }
}

impl Service {
    pub fn from(network: Network, config: Config) -> Self {
        Self { network, config }
    }

    /// Configures the service and launches all tasks.
    pub async fn spawn(self) -> eyre::Result<JoinHandle<()>> {
        let Self { network, config } = self;

        let context = Arc::new(Context::try_from(&network)?);
        let beacon_node = Client::new(Url::parse(&config.beacon_node_url)?);
        let genesis_time = get_genesis_time(&context, Some(&beacon_node)).await;
        let genesis_validators_root = match beacon_node.get_genesis_details().await {
            Ok(details) => Some(details.genesis_validators_root),
            Err(err) => {
                warn!(%err, "could not load genesis validators root; using the default root in the proposer domain");
                None
            }
        };

        let clock = Arc::new(SlotClock::new(
            genesis_time,
            context.seconds_per_slot,
            Duration::from_millis(config.cutoff_offset_ms),
        ));

        let secret_key_bytes = try_bytes_from_hex_str(&config.secret_key)?;
        let secret_key = SecretKey::try_from(secret_key_bytes.as_ref())?;
        let signer = RelaySigner::new(secret_key, context.clone(), genesis_validators_root);

        let relay = Relay::new(
            signer,
            ValidatorRegistry::default(),
            BulletinBoard::default(),
            clock.clone(),
            context.clone(),
            Duration::from_secs(config.bid_timeout_secs),
            config.lookahead_slots,
            config.open_relay,
        );

        info!(
            public_key = %relay.public_key(),
            url = config.public_url.as_deref().unwrap_or("-"),
            "relay initialized for `{network}`",
        );

        let slots_per_epoch = context.slots_per_epoch;
        let current_epoch = clock.current_slot() / slots_per_epoch;
        load_duties_for_epoch_and_next(&beacon_node, &relay, current_epoch).await;

        let api_server = Server::new(config.host, config.port, relay.clone());
        let server_task = api_server.spawn();

        let timer_relay = relay.clone();
        let timer_clock = clock.clone();
        let timer_task = tokio::spawn(async move {
            loop {
                let (slot, wait) = timer_clock.duration_until_next_cutoff();
                tokio::time::sleep(wait).await;
                timer_relay.on_slot(slot);
            }
        });

        let duties_relay = relay;
        let duties_clock = clock;
        let duties_task = tokio::spawn(async move {
            let epoch_duration = Duration::from_secs(slots_per_epoch * context.seconds_per_slot);
            loop {
                tokio::time::sleep(epoch_duration).await;
                let epoch = duties_clock.current_slot() / slots_per_epoch;
                load_duties_for_epoch_and_next(&beacon_node, &duties_relay, epoch).await;
            }
        });

        Ok(tokio::spawn(async move {
            let tasks = vec![server_task, timer_task, duties_task];
            join_all(tasks).await;
        }))
    }
}
