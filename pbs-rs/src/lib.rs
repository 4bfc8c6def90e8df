pub mod blinded_block_provider;
pub mod blinded_block_relayer;
mod error;
mod network;
#[cfg(feature = "serde")]
pub mod serde;
pub mod signing;
pub mod types;
mod validator_registry;

pub use blinded_block_provider::BlindedBlockProvider;
pub use blinded_block_relayer::{BlindedBlockDataProvider, BlindedBlockRelayer};

pub use error::Error;
pub use network::*;
pub use validator_registry::ValidatorRegistry;
