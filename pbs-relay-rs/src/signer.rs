use ethereum_consensus::{
    crypto::SecretKey,
    primitives::{BlsPublicKey, Root},
    state_transition::Context,
    Error,
};
use pbs_rs::types::{BidTrace, SignedBidSubmission, SignedBlindedBeaconBlock, SignedBuilderBid};
use std::sync::Arc;

/// Holds the relay signing key and performs every signature operation in the
/// exchange. Domains are derived from the configured network's fork schedule
/// and genesis validators root; the secret key never leaves this type.
pub struct RelaySigner {
    secret_key: SecretKey,
    public_key: BlsPublicKey,
    context: Arc<Context>,
    genesis_validators_root: Option<Root>,
}

impl RelaySigner {
    pub fn new(
        secret_key: SecretKey,
        context: Arc<Context>,
        genesis_validators_root: Option<Root>,
    ) -> Self {
        let public_key = secret_key.public_key();
        Self { secret_key, public_key, context, genesis_validators_root }
    }

    pub fn public_key(&self) -> &BlsPublicKey {
        &self.public_key
    }

    /// Countersign the winning bid trace under the builder domain.
    pub fn sign_bid(&self, trace: BidTrace) -> Result<SignedBuilderBid, Error> {
        SignedBuilderBid::new(trace, &self.secret_key, &self.context)
    }

    /// Check the builder's signature over its bid trace under the builder
    /// domain.
    pub fn verify_bid_submission(&self, submission: &mut SignedBidSubmission) -> Result<(), Error> {
        submission.verify_signature(&self.context)
    }

    /// Check the proposer's signature over a blinded block under the
    /// beacon-proposer domain for the block's slot.
    pub fn verify_blinded_block(
        &self,
        signed_block: &mut SignedBlindedBeaconBlock,
        proposer_public_key: &BlsPublicKey,
    ) -> Result<(), Error> {
        signed_block.verify_signature(
            proposer_public_key,
            &self.context,
            self.genesis_validators_root,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_consensus::primitives::U256;
    use pbs_rs::types::{blinded_block, ExecutionPayload};
    use rand::prelude::*;

    fn test_signer(rng: &mut impl Rng) -> RelaySigner {
        let secret_key = SecretKey::random(rng).unwrap();
        let context = Arc::new(Context::for_holesky());
        RelaySigner::new(secret_key, context, None)
    }

    #[test]
    fn test_bid_submission_verification() {
        let mut rng = thread_rng();
        let signer = test_signer(&mut rng);
        let builder_key = SecretKey::random(&mut rng).unwrap();

        let mut trace = BidTrace {
            slot: 42,
            builder_public_key: builder_key.public_key(),
            value: U256::from(100u64),
            ..Default::default()
        };
        let signature = pbs_rs::signing::sign_builder_message(
            &mut trace,
            &builder_key,
            &Context::for_holesky(),
        )
        .unwrap();
        let mut submission = SignedBidSubmission {
            message: trace,
            execution_payload: ExecutionPayload::Capella(Default::default()),
            signature,
        };
        signer.verify_bid_submission(&mut submission).expect("is valid signature");

        // signatures from another key do not verify
        submission.message.builder_public_key = SecretKey::random(&mut rng).unwrap().public_key();
        assert!(signer.verify_bid_submission(&mut submission).is_err());
    }

    #[test]
    fn test_blinded_block_domain_separation() {
        let mut rng = thread_rng();
        let signer = test_signer(&mut rng);
        let proposer_key = SecretKey::random(&mut rng).unwrap();
        let context = Context::for_holesky();
        // a slot comfortably inside the capella schedule
        let slot = context.capella_fork_epoch * context.slots_per_epoch + 42;

        let mut block = blinded_block::capella::BlindedBeaconBlock {
            slot,
            proposer_index: 7,
            ..Default::default()
        };
        let fork_version = context.capella_fork_version;
        let domain = ethereum_consensus::phase0::mainnet::compute_domain(
            ethereum_consensus::domains::DomainType::BeaconProposer,
            Some(fork_version),
            None,
            &context,
        )
        .unwrap();
        let signature =
            ethereum_consensus::signing::sign_with_domain(&mut block, &proposer_key, domain)
                .unwrap();
        let mut signed_block = SignedBlindedBeaconBlock::Capella(
            blinded_block::capella::SignedBlindedBeaconBlock { message: block, signature },
        );
        signer
            .verify_blinded_block(&mut signed_block, &proposer_key.public_key())
            .expect("is valid signature");

        // the same message signed under the builder domain must not verify
        let mut block = blinded_block::capella::BlindedBeaconBlock {
            slot,
            proposer_index: 7,
            ..Default::default()
        };
        let signature =
            pbs_rs::signing::sign_builder_message(&mut block, &proposer_key, &context).unwrap();
        let mut wrong_domain = SignedBlindedBeaconBlock::Capella(
            blinded_block::capella::SignedBlindedBeaconBlock { message: block, signature },
        );
        assert!(signer.verify_blinded_block(&mut wrong_domain, &proposer_key.public_key()).is_err());
    }
}
