#[cfg(feature = "api")]
mod api;

#[cfg(feature = "api")]
pub use {api::client::Client, api::server::Server};

use crate::{
    error::Error,
    types::{
        data_api::{DeliveredPayloadTrace, SubmissionTrace},
        BidReceipt, ProposerSchedule, SignedBidSubmission, SignedValidatorRegistration,
    },
};
use async_trait::async_trait;
use ethereum_consensus::primitives::{BlsPublicKey, Bytes32, Slot};

/// The builder-facing surface of the relay: the proposer schedule builders
/// target and the bid submission entry point.
#[async_trait]
pub trait BlindedBlockRelayer {
    async fn get_proposal_schedule(&self) -> Result<Vec<ProposerSchedule>, Error>;

    async fn submit_bid(
        &self,
        signed_submission: &mut SignedBidSubmission,
    ) -> Result<BidReceipt, Error>;
}

#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct DeliveredPayloadFilter {
    pub slot: Option<Slot>,
    pub block_hash: Option<Bytes32>,
    #[serde(rename = "proposer_pubkey")]
    pub proposer_public_key: Option<BlsPublicKey>,
    #[serde(rename = "builder_pubkey")]
    pub builder_public_key: Option<BlsPublicKey>,
}

#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct BlockSubmissionFilter {
    pub slot: Option<Slot>,
    pub block_hash: Option<Bytes32>,
    #[serde(rename = "builder_pubkey")]
    pub builder_public_key: Option<BlsPublicKey>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct ValidatorRegistrationQuery {
    #[serde(rename = "pubkey")]
    pub public_key: BlsPublicKey,
}

/// Read-only access to the relay's audit records.
#[async_trait]
pub trait BlindedBlockDataProvider {
    async fn get_delivered_payloads(
        &self,
        filters: &DeliveredPayloadFilter,
    ) -> Result<Vec<DeliveredPayloadTrace>, Error>;

    async fn get_block_submissions(
        &self,
        filters: &BlockSubmissionFilter,
    ) -> Result<Vec<SubmissionTrace>, Error>;

    async fn fetch_validator_registration(
        &self,
        public_key: &BlsPublicKey,
    ) -> Result<SignedValidatorRegistration, Error>;
}
