use crate::{
    signing::{compute_builder_signing_root, sign_builder_message, verify_signature},
    types::BidTrace,
};
use ethereum_consensus::{
    crypto::SecretKey, primitives::BlsSignature, ssz::prelude::*, state_transition::Context, Error,
};
use std::fmt;

/// The winning bid trace countersigned by the relay, served to the proposer
/// in place of the execution payload.
#[derive(Debug, Default, Clone, SimpleSerialize, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedBuilderBid {
    pub message: BidTrace,
    pub signature: BlsSignature,
}

impl SignedBuilderBid {
    pub fn new(
        mut message: BidTrace,
        secret_key: &SecretKey,
        context: &Context,
    ) -> Result<Self, Error> {
        let signature = sign_builder_message(&mut message, secret_key, context)?;
        Ok(Self { message, signature })
    }

    pub fn verify_signature(
        &mut self,
        public_key: &ethereum_consensus::primitives::BlsPublicKey,
        context: &Context,
    ) -> Result<(), Error> {
        let signing_root = compute_builder_signing_root(&mut self.message, context)?;
        verify_signature(public_key, signing_root.as_ref(), &self.signature)
    }
}

impl fmt::Display for SignedBuilderBid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let block_hash = &self.message.block_hash;
        let value = self.message.value;
        write!(f, "block hash {block_hash} and value {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_consensus::primitives::U256;
    use rand::prelude::*;

    #[test]
    fn test_relay_countersignature_round_trip() {
        let mut rng = thread_rng();
        let key = SecretKey::random(&mut rng).unwrap();
        let public_key = key.public_key();
        let context = Context::for_holesky();

        let trace = BidTrace { slot: 42, value: U256::from(1000u64), ..Default::default() };
        let mut signed_bid = SignedBuilderBid::new(trace, &key, &context).unwrap();
        signed_bid.verify_signature(&public_key, &context).expect("is valid signature");

        // tampering with the trace invalidates the countersignature
        signed_bid.message.value = U256::from(1001u64);
        assert!(signed_bid.verify_signature(&public_key, &context).is_err());
    }
}
