use ethereum_consensus::primitives::Slot;
use parking_lot::RwLock;
use pbs_rs::{
    blinded_block_relayer::{BlockSubmissionFilter, DeliveredPayloadFilter},
    types::data_api::{DeliveredPayloadTrace, SubmissionTrace},
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a payload was already recorded as delivered for slot {0}")]
    DuplicateSlot(Slot),
}

#[derive(Default)]
struct State {
    // insert-only, unique on slot
    delivered: BTreeMap<Slot, DeliveredPayloadTrace>,
    submissions: Vec<SubmissionTrace>,
}

/// Durable record of admitted submissions and delivered payloads.
///
/// The delivered singleton in the bid store stays authoritative: a failed
/// insert here is surfaced for reconciliation, never unwound.
#[derive(Default)]
pub struct AuditLog {
    state: RwLock<State>,
}

impl AuditLog {
    pub fn record_submission(&self, submission: SubmissionTrace) {
        let mut state = self.state.write();
        state.submissions.push(submission);
    }

    pub fn record_delivery(&self, record: DeliveredPayloadTrace) -> Result<(), Error> {
        let mut state = self.state.write();
        let slot = record.slot;
        if state.delivered.contains_key(&slot) {
            return Err(Error::DuplicateSlot(slot))
        }
        state.delivered.insert(slot, record);
        Ok(())
    }

    pub fn has_delivery_for(&self, slot: Slot) -> bool {
        let state = self.state.read();
        state.delivered.contains_key(&slot)
    }

    pub fn block_submissions(&self, filters: &BlockSubmissionFilter) -> Vec<SubmissionTrace> {
        let state = self.state.read();
        state
            .submissions
            .iter()
            .filter(|submission| {
                let trace = &submission.trace;
                filters.slot.map(|slot| trace.slot == slot).unwrap_or(true) &&
                    filters
                        .block_hash
                        .as_ref()
                        .map(|hash| &trace.block_hash == hash)
                        .unwrap_or(true) &&
                    filters
                        .builder_public_key
                        .as_ref()
                        .map(|key| &trace.builder_public_key == key)
                        .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    pub fn delivered_payloads(&self, filters: &DeliveredPayloadFilter) -> Vec<DeliveredPayloadTrace> {
        let state = self.state.read();
        state
            .delivered
            .values()
            .filter(|record| {
                filters.slot.map(|slot| record.slot == slot).unwrap_or(true) &&
                    filters
                        .block_hash
                        .as_ref()
                        .map(|hash| &record.block_hash == hash)
                        .unwrap_or(true) &&
                    filters
                        .proposer_public_key
                        .as_ref()
                        .map(|key| &record.proposer_public_key == key)
                        .unwrap_or(true) &&
                    filters
                        .builder_public_key
                        .as_ref()
                        .map(|key| &record.builder_public_key == key)
                        .unwrap_or(true)
            })
            .cloned()
            .collect()
    }
}
