use crate::types::AuctionRequest;
use beacon_api_client::Error as ApiError;
use ethereum_consensus::{
    primitives::{BlsPublicKey, Hash32, Slot, ValidatorIndex},
    Error as ConsensusError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bid is for slot {bid} but the admissible window is [{current}, {horizon}]")]
    StaleSlot { bid: Slot, current: Slot, horizon: Slot },
    #[error("no proposer is scheduled for slot {0}")]
    UnknownProposer(Slot),
    #[error("slot {slot} belongs to proposer {expected} but the bid names {provided}")]
    ProposerMismatch { slot: Slot, expected: BlsPublicKey, provided: BlsPublicKey },
    #[error("invalid signature")]
    InvalidSignature,
    #[error("payload for slot {0} has already been delivered")]
    AlreadyDelivered(Slot),
    #[error("signed block does not match the winning bid for its slot")]
    UnknownBlock,
    #[error("no bid prepared for request {0}")]
    NoBidPrepared(AuctionRequest),
    #[error("bid trace declares gas limit of {0} but execution payload has {1}")]
    InvalidGasLimit(u64, u64),
    #[error("bid trace declares gas usage of {0} but execution payload uses {1}")]
    InvalidGasUsed(u64, u64),
    #[error("bid trace declares parent hash of {0} but execution payload has {1}")]
    InvalidParentHash(Hash32, Hash32),
    #[error("bid trace declares block hash of {0} but execution payload has {1}")]
    InvalidBlockHash(Hash32, Hash32),
    #[error("validator with public key {0} is not currently registered")]
    ValidatorNotRegistered(BlsPublicKey),
    #[error("validator with index {0} was not found in consensus")]
    UnknownValidatorIndex(ValidatorIndex),
    #[error("bid store is unavailable")]
    StoreUnavailable,
    #[error("audit log is unavailable")]
    AuditUnavailable,
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("validator registration errors: {0:?}")]
    RegistrationErrors(Vec<crate::validator_registry::Error>),
    #[error(transparent)]
    ValidatorRegistry(#[from] crate::validator_registry::Error),
    #[error(transparent)]
    Consensus(#[from] ConsensusError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[cfg(feature = "api")]
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
}

#[cfg(feature = "api")]
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[cfg(feature = "api")]
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let code = match self {
            Self::NoBidPrepared(..) => StatusCode::NO_CONTENT,
            Self::StoreUnavailable | Self::AuditUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvariantViolation(..) | Self::Api(..) | Self::Hyper(..) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        (code, Json(beacon_api_client::ApiError::ErrorMessage { code, message })).into_response()
    }
}
