use ethereum_consensus::primitives::{BlsPublicKey, Hash32, Slot};

/// Identifies a single unique auction: one proposal opportunity for one
/// proposer building on one parent block.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionRequest {
    #[serde(with = "crate::serde::as_str")]
    pub slot: Slot,
    pub parent_hash: Hash32,
    #[serde(rename = "proposer_pubkey")]
    pub proposer_public_key: BlsPublicKey,
}

impl std::fmt::Display for AuctionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot;
        let parent_hash = &self.parent_hash;
        let proposer = &self.proposer_public_key;
        write!(f, "slot {slot}, parent hash {parent_hash} and proposer {proposer}")
    }
}
