use ethereum_consensus::primitives::{BlsPublicKey, Hash32, Slot, U256};
use tokio::sync::broadcast;
use tracing::debug;

// Plenty for a slow external bridge; events are droppable by contract.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Auction lifecycle events published out-of-band. External bridges (MQTT,
/// reporters) attach through `subscribe`.
#[derive(Debug, Clone)]
pub enum RelayEvent {
    BidReceived { slot: Slot, builder_public_key: BlsPublicKey, bid_id: Hash32, value: U256 },
    NewTopBid { slot: Slot, builder_public_key: BlsPublicKey, bid_id: Hash32, value: U256 },
    HeaderServed { slot: Slot, block_hash: Hash32 },
    PayloadDelivered { slot: Slot, block_hash: Hash32, builder_public_key: BlsPublicKey },
    SlotFrozen { slot: Slot },
}

/// Best-effort, at-most-once, non-blocking fan-out of `RelayEvent`s.
#[derive(Debug, Clone)]
pub struct BulletinBoard {
    sender: broadcast::Sender<RelayEvent>,
}

impl Default for BulletinBoard {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl BulletinBoard {
    /// Publish `event` to any attached subscribers. A failed publish never
    /// reaches the caller; the auction data plane does not depend on it.
    pub fn publish(&self, event: RelayEvent) {
        if let Err(err) = self.sender.send(event) {
            debug!(%err, "no bulletin subscribers for event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RelayEvent> {
        self.sender.subscribe()
    }
}
