#[cfg(feature = "api")]
pub(crate) mod api;

use crate::{
    error::Error,
    types::{
        AuctionRequest, ExecutionPayload, SignedBlindedBeaconBlock, SignedBuilderBid,
        SignedValidatorRegistration,
    },
};
use async_trait::async_trait;
use beacon_api_client::VersionedValue;
#[cfg(feature = "api")]
pub use {api::client::Client, api::server::Server};

/// The proposer-facing surface of the relay: registration intake, the header
/// request (commit) and the payload reveal.
#[async_trait]
pub trait BlindedBlockProvider {
    async fn register_validators(
        &self,
        registrations: &mut [SignedValidatorRegistration],
    ) -> Result<(), Error>;

    async fn fetch_best_bid(
        &self,
        auction_request: &AuctionRequest,
    ) -> Result<VersionedValue<SignedBuilderBid>, Error>;

    async fn open_bid(
        &self,
        signed_block: &mut SignedBlindedBeaconBlock,
    ) -> Result<ExecutionPayload, Error>;
}
