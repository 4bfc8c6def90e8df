mod audit;
mod bid_board;
mod bulletin;
mod clock;
mod relay;
mod service;
mod signer;
mod store;

pub use bid_board::{BidBoard, MarkOutcome, SubmitOutcome};
pub use bulletin::{BulletinBoard, RelayEvent};
pub use clock::SlotClock;
pub use relay::Relay;
pub use service::{Config, Service};
pub use signer::RelaySigner;
