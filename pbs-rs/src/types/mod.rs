mod auction_request;
pub mod blinded_block;
mod block_submission;
pub mod builder_bid;
mod execution_payload;
mod proposer_schedule;

pub use auction_request::*;
pub use blinded_block::SignedBlindedBeaconBlock;
pub use block_submission::*;
pub use builder_bid::SignedBuilderBid;
pub use ethereum_consensus::builder::SignedValidatorRegistration;
pub use execution_payload::*;
pub use proposer_schedule::*;
