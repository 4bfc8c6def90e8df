use crate::{
    signing::verify_signed_builder_message,
    types::{AuctionRequest, ExecutionPayload},
};
use ethereum_consensus::{
    primitives::{BlsPublicKey, BlsSignature, ExecutionAddress, Hash32, Slot, U256},
    ssz::prelude::*,
    state_transition::Context,
    Error,
};
use sha2::{Digest, Sha256};

#[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidTrace {
    #[serde(with = "crate::serde::as_str")]
    pub slot: Slot,
    pub parent_hash: Hash32,
    pub block_hash: Hash32,
    #[serde(rename = "builder_pubkey")]
    pub builder_public_key: BlsPublicKey,
    #[serde(rename = "proposer_pubkey")]
    pub proposer_public_key: BlsPublicKey,
    pub proposer_fee_recipient: ExecutionAddress,
    #[serde(with = "crate::serde::as_str")]
    pub gas_limit: u64,
    #[serde(with = "crate::serde::as_str")]
    pub gas_used: u64,
    #[serde(with = "crate::serde::as_str")]
    pub value: U256,
}

impl BidTrace {
    /// Derived bid identity, stable across retries of the same block from the
    /// same builder.
    pub fn bid_id(&self) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update(self.slot.to_le_bytes());
        hasher.update(self.parent_hash.as_ref());
        hasher.update(self.block_hash.as_ref());
        hasher.update(self.builder_public_key.as_ref());
        let digest = hasher.finalize();
        Hash32::try_from(digest.as_ref()).expect("digest is 32 bytes")
    }

    pub fn auction_request(&self) -> AuctionRequest {
        AuctionRequest {
            slot: self.slot,
            parent_hash: self.parent_hash.clone(),
            proposer_public_key: self.proposer_public_key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedBidSubmission {
    pub message: BidTrace,
    pub execution_payload: ExecutionPayload,
    pub signature: BlsSignature,
}

impl SignedBidSubmission {
    /// Verify the builder's signature over the bid trace under the builder
    /// domain.
    pub fn verify_signature(&mut self, context: &Context) -> Result<(), Error> {
        let public_key = self.message.builder_public_key.clone();
        verify_signed_builder_message(&mut self.message, &self.signature, &public_key, context)
    }
}

/// Returned to the builder on a successful submission so it can observe the
/// current top of book.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidReceipt {
    pub bid_id: Hash32,
    #[serde(with = "crate::serde::as_str")]
    pub highest_bid_value: U256,
    #[serde(rename = "highest_bid_builder")]
    pub highest_bid_builder_public_key: BlsPublicKey,
}

pub mod data_api {
    use super::*;

    /// One row of the builder-submissions record.
    #[derive(Debug, Clone)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SubmissionTrace {
        #[serde(flatten)]
        pub trace: BidTrace,
        #[serde(with = "crate::serde::as_str")]
        pub submitted_at: u64,
    }

    /// One row of the delivered-payloads record; at most one exists per slot.
    #[derive(Debug, Clone)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DeliveredPayloadTrace {
        #[serde(with = "crate::serde::as_str")]
        pub slot: Slot,
        pub parent_hash: Hash32,
        pub block_hash: Hash32,
        #[serde(rename = "builder_pubkey")]
        pub builder_public_key: BlsPublicKey,
        #[serde(rename = "proposer_pubkey")]
        pub proposer_public_key: BlsPublicKey,
        pub bid_id: Hash32,
        #[serde(with = "crate::serde::as_str")]
        pub value: U256,
        #[serde(with = "crate::serde::as_str")]
        pub delivered_at: u64,
    }
}
