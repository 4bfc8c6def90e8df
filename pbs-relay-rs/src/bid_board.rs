use crate::{clock::SlotClock, store::TtlStore};
use ethereum_consensus::{
    primitives::{BlsPublicKey, BlsSignature, Hash32, Slot, U256},
    Fork,
};
use parking_lot::Mutex;
use pbs_rs::types::{
    data_api::DeliveredPayloadTrace, AuctionRequest, BidReceipt, BidTrace, ExecutionPayload,
    SignedBidSubmission,
};
use std::{cmp::Ordering, collections::HashMap, sync::Arc, time::Duration};

const BUILDER_BID_KEY: &str = "builder-bid";
const BUILDER_BID_TIME_KEY: &str = "builder-bid-time";
const BUILDER_BID_VALUE_KEY: &str = "builder-bid-value";
const BUILDER_HIGHEST_BID_KEY: &str = "builder-highest-bid";
const BUILDER_BID_PAYLOAD_KEY: &str = "builder-bid-payload";
const SLOT_PAYLOAD_DELIVERED_KEY: &str = "slot-proposer-payload-delivered";

fn auction_key(auction: &AuctionRequest) -> String {
    format!("{}:{}:{}", auction.slot, auction.parent_hash, auction.proposer_public_key)
}

/// A bid at rest: the trace and builder signature, with the payload withheld
/// under its own key.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StoredBid {
    message: BidTrace,
    version: Fork,
    signature: BlsSignature,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted { receipt: BidReceipt, new_top_bid: bool },
    Duplicate { receipt: BidReceipt },
}

#[derive(Debug)]
pub enum MarkOutcome {
    Delivered,
    AlreadyDelivered,
}

/// Shared store of per-auction bids with an atomically maintained
/// highest-bid entry per `(slot, parent hash, proposer)` key.
pub struct BidBoard {
    store: TtlStore,
    auction_locks: Mutex<HashMap<AuctionRequest, Arc<Mutex<()>>>>,
    clock: Arc<SlotClock>,
    bid_timeout: Duration,
}

impl BidBoard {
    pub fn new(clock: Arc<SlotClock>, bid_timeout: Duration) -> Self {
        Self {
            store: Default::default(),
            auction_locks: Default::default(),
            clock,
            bid_timeout,
        }
    }

    fn entry_expiry(&self, slot: Slot) -> u64 {
        (self.clock.slot_end(slot) + self.bid_timeout.as_secs()) * 1000
    }

    // highest-bid and delivered entries must outlive any in-flight reveal,
    // so they linger for another full timeout beyond the per-builder entries
    fn pinned_entry_expiry(&self, slot: Slot) -> u64 {
        (self.clock.slot_end(slot) + 2 * self.bid_timeout.as_secs()) * 1000
    }

    fn auction_lock(&self, auction: &AuctionRequest) -> Arc<Mutex<()>> {
        let mut locks = self.auction_locks.lock();
        locks.entry(auction.clone()).or_default().clone()
    }

    /// Record `submission` and refresh the auction's highest-bid entry.
    ///
    /// Per-builder writes are independent; only the read-all/compare/write
    /// cycle against the highest-bid entry runs under the per-auction mutex.
    /// Staleness is the caller's concern, this only orders admitted bids.
    pub fn submit(&self, submission: &SignedBidSubmission, received_at: u64) -> SubmitOutcome {
        let trace = &submission.message;
        let auction = trace.auction_request();
        let key = auction_key(&auction);
        let builder = &trace.builder_public_key;
        let expires_at = self.entry_expiry(trace.slot);

        let bid_key = format!("{BUILDER_BID_KEY}:{key}:{builder}");
        let time_key = format!("{BUILDER_BID_TIME_KEY}:{key}:{builder}");
        let value_key = format!("{BUILDER_BID_VALUE_KEY}:{key}:{builder}");

        if let Some(existing) = self.read_bid(&bid_key, received_at) {
            let existing_time = self
                .store
                .get(&time_key, received_at)
                .and_then(|encoding| encoding.parse::<u64>().ok())
                .unwrap_or(u64::MAX);
            if existing.message.block_hash == trace.block_hash &&
                existing.message.value == trace.value &&
                existing_time <= received_at
            {
                let receipt = self
                    .highest(&auction, received_at)
                    .unwrap_or_else(|| receipt_for(trace));
                return SubmitOutcome::Duplicate { receipt }
            }
        }

        let stored = StoredBid {
            message: trace.clone(),
            version: submission.execution_payload.version(),
            signature: submission.signature.clone(),
        };
        let bid_id = trace.bid_id();
        self.store.set(
            &bid_key,
            serde_json::to_string(&stored).expect("bid serializes"),
            expires_at,
        );
        self.store.set(&time_key, received_at.to_string(), expires_at);
        self.store.set(&value_key, trace.value.to_string(), expires_at);
        self.store.set(
            &format!("{BUILDER_BID_PAYLOAD_KEY}:{bid_id}"),
            serde_json::to_string(&submission.execution_payload).expect("payload serializes"),
            expires_at,
        );

        let lock = self.auction_lock(&auction);
        let _guard = lock.lock();
        let previous = self.highest(&auction, received_at);
        let receipt = self
            .compute_highest(&auction, received_at)
            .unwrap_or_else(|| receipt_for(trace));
        self.store.set(
            &format!("{BUILDER_HIGHEST_BID_KEY}:{key}"),
            serde_json::to_string(&receipt).expect("receipt serializes"),
            self.pinned_entry_expiry(trace.slot),
        );
        let new_top_bid = previous
            .map(|previous| previous.bid_id != receipt.bid_id)
            .unwrap_or(true);
        SubmitOutcome::Accepted { receipt, new_top_bid }
    }

    fn read_bid(&self, bid_key: &str, now: u64) -> Option<StoredBid> {
        let encoding = self.store.get(bid_key, now)?;
        serde_json::from_str(&encoding).ok()
    }

    fn highest(&self, auction: &AuctionRequest, now: u64) -> Option<BidReceipt> {
        let key = format!("{BUILDER_HIGHEST_BID_KEY}:{}", auction_key(auction));
        let encoding = self.store.get(&key, now)?;
        serde_json::from_str(&encoding).ok()
    }

    fn compute_highest(&self, auction: &AuctionRequest, now: u64) -> Option<BidReceipt> {
        let key = auction_key(auction);
        let prefix = format!("{BUILDER_BID_KEY}:{key}:");
        let mut best: Option<(U256, u64, StoredBid)> = None;
        for (_, encoding) in self.store.scan_prefix(&prefix, now) {
            let Ok(stored) = serde_json::from_str::<StoredBid>(&encoding) else { continue };
            let builder = &stored.message.builder_public_key;
            let time_key = format!("{BUILDER_BID_TIME_KEY}:{key}:{builder}");
            let time = self
                .store
                .get(&time_key, now)
                .and_then(|encoding| encoding.parse::<u64>().ok())
                .unwrap_or(u64::MAX);
            let replace = match &best {
                Some((value, best_time, incumbent)) => outranks(
                    (stored.message.value, time, builder),
                    (*value, *best_time, &incumbent.message.builder_public_key),
                ),
                None => true,
            };
            if replace {
                best = Some((stored.message.value, time, stored));
            }
        }
        best.map(|(_, _, stored)| receipt_for(&stored.message))
    }

    /// Resolve the current winner to its full bid trace.
    pub fn highest_bid(&self, auction: &AuctionRequest) -> Option<(BidReceipt, BidTrace, Fork)> {
        let now = self.clock.unix_millis();
        let receipt = self.highest(auction, now)?;
        let key = auction_key(auction);
        let bid_key =
            format!("{BUILDER_BID_KEY}:{key}:{}", receipt.highest_bid_builder_public_key);
        let stored = self.read_bid(&bid_key, now)?;
        Some((receipt, stored.message, stored.version))
    }

    /// The withheld execution payload for a previously admitted bid.
    pub fn get_payload(&self, bid_id: &Hash32) -> Option<ExecutionPayload> {
        let now = self.clock.unix_millis();
        let encoding = self.store.get(&format!("{BUILDER_BID_PAYLOAD_KEY}:{bid_id}"), now)?;
        serde_json::from_str(&encoding).ok()
    }

    /// Atomic set-if-absent on the slot's delivered singleton; the sole
    /// enforcement of at-most-one delivery per slot.
    pub fn mark_delivered(&self, slot: Slot, record: &DeliveredPayloadTrace) -> MarkOutcome {
        let now = self.clock.unix_millis();
        let key = format!("{SLOT_PAYLOAD_DELIVERED_KEY}:{slot}");
        let encoding = serde_json::to_string(record).expect("record serializes");
        if self.store.set_if_absent(&key, encoding, self.pinned_entry_expiry(slot), now) {
            MarkOutcome::Delivered
        } else {
            MarkOutcome::AlreadyDelivered
        }
    }

    pub fn delivered_record(&self, slot: Slot) -> Option<DeliveredPayloadTrace> {
        let now = self.clock.unix_millis();
        let encoding = self.store.get(&format!("{SLOT_PAYLOAD_DELIVERED_KEY}:{slot}"), now)?;
        serde_json::from_str(&encoding).ok()
    }

    pub fn purge_expired(&self) {
        let now = self.clock.unix_millis();
        self.store.purge_expired(now);
        let mut locks = self.auction_locks.lock();
        locks.retain(|auction, _| self.pinned_entry_expiry(auction.slot) > now);
    }
}

fn receipt_for(trace: &BidTrace) -> BidReceipt {
    BidReceipt {
        bid_id: trace.bid_id(),
        highest_bid_value: trace.value,
        highest_bid_builder_public_key: trace.builder_public_key.clone(),
    }
}

// Total deterministic bid order: highest value wins, earliest submission
// breaks value ties, lowest builder key breaks exact ties.
fn outranks(
    challenger: (U256, u64, &BlsPublicKey),
    incumbent: (U256, u64, &BlsPublicKey),
) -> bool {
    match challenger.0.cmp(&incumbent.0) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match challenger.1.cmp(&incumbent.1) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => challenger.2 < incumbent.2,
        },
    }
}
