use crate::{
    audit::AuditLog,
    bid_board::{BidBoard, MarkOutcome, SubmitOutcome},
    bulletin::{BulletinBoard, RelayEvent},
    clock::SlotClock,
    signer::RelaySigner,
};
use async_trait::async_trait;
use beacon_api_client::{ProposerDuty, VersionedValue};
use ethereum_consensus::{
    primitives::{BlsPublicKey, Slot},
    state_transition::Context,
};
use pbs_rs::{
    blinded_block_relayer::{BlockSubmissionFilter, DeliveredPayloadFilter},
    types::{
        data_api::{DeliveredPayloadTrace, SubmissionTrace},
        AuctionRequest, BidReceipt, ExecutionPayload, ProposerSchedule, SignedBidSubmission,
        SignedBlindedBeaconBlock, SignedBuilderBid, SignedValidatorRegistration,
    },
    BlindedBlockDataProvider, BlindedBlockProvider, BlindedBlockRelayer, Error, ValidatorRegistry,
};
use std::{ops::Deref, sync::Arc, time::Duration};
use tracing::{info, warn};

/// The auction engine and reveal protocol, shared across request tasks.
#[derive(Clone)]
pub struct Relay(Arc<Inner>);

impl Deref for Relay {
    type Target = Inner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct Inner {
    signer: RelaySigner,
    registry: ValidatorRegistry,
    board: BidBoard,
    bulletin: BulletinBoard,
    auditor: AuditLog,
    clock: Arc<SlotClock>,
    context: Arc<Context>,
    lookahead_slots: Slot,
    open_relay: bool,
}

impl Relay {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        signer: RelaySigner,
        registry: ValidatorRegistry,
        bulletin: BulletinBoard,
        clock: Arc<SlotClock>,
        context: Arc<Context>,
        bid_timeout: Duration,
        lookahead_slots: Slot,
        open_relay: bool,
    ) -> Self {
        let board = BidBoard::new(clock.clone(), bid_timeout);
        let inner = Inner {
            signer,
            registry,
            board,
            bulletin,
            auditor: Default::default(),
            clock,
            context,
            lookahead_slots,
            open_relay,
        };
        Self(Arc::new(inner))
    }

    pub fn public_key(&self) -> &BlsPublicKey {
        self.signer.public_key()
    }

    pub fn bid_board(&self) -> &BidBoard {
        &self.board
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RelayEvent> {
        self.bulletin.subscribe()
    }

    pub fn on_proposer_duties(&self, duties: &[ProposerDuty]) {
        self.registry.on_proposer_duties(duties);
    }

    /// Housekeeping at each slot cutoff: announce the freeze, reconcile any
    /// delivery the audit log missed, evict expired auctions.
    pub fn on_slot(&self, slot: Slot) {
        self.bulletin.publish(RelayEvent::SlotFrozen { slot });
        for slot in slot.saturating_sub(2)..=slot {
            if self.auditor.has_delivery_for(slot) {
                continue
            }
            if let Some(record) = self.board.delivered_record(slot) {
                if self.auditor.record_delivery(record).is_ok() {
                    info!(slot, "reconciled delivered payload into the audit log");
                }
            }
        }
        self.board.purge_expired();
        self.registry.prune_slots_before(slot.saturating_sub(1));
    }

    // The admissible submission window: no slot in the past, none past the
    // lookahead horizon, and the current slot only until its cutoff.
    fn validate_bid_slot(&self, slot: Slot) -> Result<(), Error> {
        let current = self.clock.current_slot();
        let horizon = current + self.lookahead_slots;
        if slot < current || slot > horizon {
            return Err(Error::StaleSlot { bid: slot, current, horizon })
        }
        if slot == current && self.clock.past_cutoff(slot) {
            return Err(Error::StaleSlot { bid: slot, current, horizon })
        }
        Ok(())
    }

    // The expected proposer always comes from the registry view; a mismatched
    // submission field is rejected, never adopted. Open relays only waive the
    // membership requirement for slots with no known duty.
    fn validate_proposer(&self, slot: Slot, proposer: &BlsPublicKey) -> Result<(), Error> {
        match self.registry.expected_proposer(slot) {
            Some(expected) => {
                if &expected != proposer {
                    return Err(Error::ProposerMismatch {
                        slot,
                        expected,
                        provided: proposer.clone(),
                    })
                }
                Ok(())
            }
            None if self.open_relay => Ok(()),
            None => Err(Error::UnknownProposer(slot)),
        }
    }

    fn validate_submission(&self, submission: &mut SignedBidSubmission) -> Result<(), Error> {
        self.validate_bid_slot(submission.message.slot)?;
        self.validate_proposer(submission.message.slot, &submission.message.proposer_public_key)?;

        if let Err(err) = self.signer.verify_bid_submission(submission) {
            warn!(
                %err,
                slot = submission.message.slot,
                builder = %submission.message.builder_public_key,
                "rejected bid submission with invalid signature",
            );
            return Err(Error::InvalidSignature)
        }

        let trace = &submission.message;
        let payload = &submission.execution_payload;
        if trace.gas_limit != payload.gas_limit() {
            return Err(Error::InvalidGasLimit(trace.gas_limit, payload.gas_limit()))
        }
        if trace.gas_used != payload.gas_used() {
            return Err(Error::InvalidGasUsed(trace.gas_used, payload.gas_used()))
        }
        if &trace.parent_hash != payload.parent_hash() {
            return Err(Error::InvalidParentHash(
                trace.parent_hash.clone(),
                payload.parent_hash().clone(),
            ))
        }
        if &trace.block_hash != payload.block_hash() {
            return Err(Error::InvalidBlockHash(
                trace.block_hash.clone(),
                payload.block_hash().clone(),
            ))
        }
        Ok(())
    }
}

#[async_trait]
impl BlindedBlockRelayer for Relay {
    async fn get_proposal_schedule(&self) -> Result<Vec<ProposerSchedule>, Error> {
        Ok(self.registry.proposer_schedules())
    }

    async fn submit_bid(
        &self,
        signed_submission: &mut SignedBidSubmission,
    ) -> Result<BidReceipt, Error> {
        self.validate_submission(signed_submission)?;

        let received_at = self.clock.unix_millis();
        let trace = signed_submission.message.clone();
        match self.board.submit(signed_submission, received_at) {
            SubmitOutcome::Accepted { receipt, new_top_bid } => {
                self.auditor.record_submission(SubmissionTrace {
                    trace: trace.clone(),
                    submitted_at: received_at,
                });
                self.bulletin.publish(RelayEvent::BidReceived {
                    slot: trace.slot,
                    builder_public_key: trace.builder_public_key.clone(),
                    bid_id: trace.bid_id(),
                    value: trace.value,
                });
                if new_top_bid {
                    self.bulletin.publish(RelayEvent::NewTopBid {
                        slot: trace.slot,
                        builder_public_key: receipt.highest_bid_builder_public_key.clone(),
                        bid_id: receipt.bid_id.clone(),
                        value: receipt.highest_bid_value,
                    });
                }
                Ok(receipt)
            }
            // a replay of a recorded bid leaves the auction untouched
            SubmitOutcome::Duplicate { receipt } => Ok(receipt),
        }
    }
}

#[async_trait]
impl BlindedBlockProvider for Relay {
    async fn register_validators(
        &self,
        registrations: &mut [SignedValidatorRegistration],
    ) -> Result<(), Error> {
        let current_timestamp = self.clock.unix_secs();
        self.registry
            .process_registrations(registrations, current_timestamp, &self.context)
            .map_err(Error::RegistrationErrors)
    }

    async fn fetch_best_bid(
        &self,
        auction_request: &AuctionRequest,
    ) -> Result<VersionedValue<SignedBuilderBid>, Error> {
        let current = self.clock.current_slot();
        // a small grace window on either side absorbs clock skew
        if auction_request.slot < current.saturating_sub(1) ||
            auction_request.slot > current + 1
        {
            return Err(Error::StaleSlot {
                bid: auction_request.slot,
                current,
                horizon: current + 1,
            })
        }

        let (_, trace, version) = self
            .board
            .highest_bid(auction_request)
            .ok_or_else(|| Error::NoBidPrepared(auction_request.clone()))?;

        let block_hash = trace.block_hash.clone();
        let signed_bid = self.signer.sign_bid(trace)?;
        self.bulletin
            .publish(RelayEvent::HeaderServed { slot: auction_request.slot, block_hash });
        Ok(VersionedValue { version, data: signed_bid, meta: Default::default() })
    }

    async fn open_bid(
        &self,
        signed_block: &mut SignedBlindedBeaconBlock,
    ) -> Result<ExecutionPayload, Error> {
        let slot = signed_block.slot();
        let proposer_index = signed_block.proposer_index();
        let block_hash = signed_block.block_hash().clone();

        let proposer_public_key = match self.registry.proposer_duty(slot) {
            Some((validator_index, public_key)) => {
                if validator_index != proposer_index {
                    return Err(Error::UnknownValidatorIndex(proposer_index))
                }
                public_key
            }
            None => self
                .registry
                .get_public_key(proposer_index)
                .map_err(|_| Error::UnknownProposer(slot))?,
        };

        self.signer
            .verify_blinded_block(signed_block, &proposer_public_key)
            .map_err(|_| Error::InvalidSignature)?;

        let auction_request = AuctionRequest {
            slot,
            parent_hash: signed_block.parent_hash().clone(),
            proposer_public_key,
        };
        let (receipt, trace, _) =
            self.board.highest_bid(&auction_request).ok_or(Error::UnknownBlock)?;
        if trace.block_hash != block_hash {
            return Err(Error::UnknownBlock)
        }

        let record = DeliveredPayloadTrace {
            slot,
            parent_hash: trace.parent_hash.clone(),
            block_hash: block_hash.clone(),
            builder_public_key: trace.builder_public_key.clone(),
            proposer_public_key: trace.proposer_public_key.clone(),
            bid_id: receipt.bid_id.clone(),
            value: trace.value,
            delivered_at: self.clock.unix_millis(),
        };

        // the store singleton is the authoritative delivery marker; nothing
        // below this point may suspend before the payload is handed back
        if let MarkOutcome::AlreadyDelivered = self.board.mark_delivered(slot, &record) {
            return Err(Error::AlreadyDelivered(slot))
        }

        let payload = self.board.get_payload(&receipt.bid_id).ok_or_else(|| {
            Error::InvariantViolation(format!("payload missing for winning bid at slot {slot}"))
        })?;

        if let Err(err) = self.auditor.record_delivery(record) {
            warn!(%err, slot, "audit insert failed after delivery; queued for reconciliation");
        }
        self.bulletin.publish(RelayEvent::PayloadDelivered {
            slot,
            block_hash,
            builder_public_key: trace.builder_public_key.clone(),
        });
        Ok(payload)
    }
}

#[async_trait]
impl BlindedBlockDataProvider for Relay {
    async fn get_delivered_payloads(
        &self,
        filters: &DeliveredPayloadFilter,
    ) -> Result<Vec<DeliveredPayloadTrace>, Error> {
        Ok(self.auditor.delivered_payloads(filters))
    }

    async fn get_block_submissions(
        &self,
        filters: &BlockSubmissionFilter,
    ) -> Result<Vec<SubmissionTrace>, Error> {
        Ok(self.auditor.block_submissions(filters))
    }

    async fn fetch_validator_registration(
        &self,
        public_key: &BlsPublicKey,
    ) -> Result<SignedValidatorRegistration, Error> {
        self.registry
            .get_signed_registration(public_key)
            .ok_or_else(|| Error::ValidatorNotRegistered(public_key.clone()))
    }
}
