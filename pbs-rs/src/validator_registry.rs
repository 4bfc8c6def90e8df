use crate::{
    signing::{compute_builder_signing_root, verify_signature},
    types::{ProposerSchedule, SignedValidatorRegistration},
};
use beacon_api_client::ProposerDuty;
use ethereum_consensus::{
    builder::ValidatorRegistration,
    primitives::{BlsPublicKey, Slot, ValidatorIndex},
    state_transition::Context,
    Error as ConsensusError,
};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::{cmp::Ordering, collections::HashMap};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum Error {
    #[error("local time is {1} but registration has timestamp from future: {0:?}")]
    FutureRegistration(ValidatorRegistration, u64),
    #[error("validator has registration from timestamp {1}; outdated registration: {0:?}")]
    OutdatedRegistration(ValidatorRegistration, u64),
    #[error("missing knowledge of pubkey in proposer schedule")]
    UnknownPubkey,
    #[error("missing knowledge of index in proposer schedule")]
    UnknownIndex,
    #[error("{0}")]
    Consensus(#[from] ConsensusError),
}

fn validate_registration_is_not_from_future(
    message: &ValidatorRegistration,
    current_timestamp: u64,
) -> Result<(), Error> {
    let timestamp = message.timestamp;
    if timestamp > current_timestamp + 10 {
        Err(Error::FutureRegistration(message.clone(), current_timestamp))
    } else {
        Ok(())
    }
}

fn determine_registration_status(
    timestamp: u64,
    latest_timestamp: u64,
) -> ValidatorRegistrationStatus {
    match timestamp.cmp(&latest_timestamp) {
        Ordering::Less => ValidatorRegistrationStatus::Outdated,
        Ordering::Equal => ValidatorRegistrationStatus::Existing,
        Ordering::Greater => ValidatorRegistrationStatus::New,
    }
}

enum ValidatorRegistrationStatus {
    New,
    Existing,
    Outdated,
}

#[derive(Default, Debug)]
struct State {
    // data from registered validators
    validator_preferences: HashMap<BlsPublicKey, SignedValidatorRegistration>,
    // data from consensus: who proposes each upcoming slot
    proposer_schedule: HashMap<Slot, (ValidatorIndex, BlsPublicKey)>,
    pubkeys_by_index: HashMap<ValidatorIndex, BlsPublicKey>,
}

/// Point-in-time view of registered proposers and their slot assignments.
/// Writes arrive from the registration API and the consensus duty feed; all
/// reads are snapshots of the latest accepted data.
#[derive(Default)]
pub struct ValidatorRegistry {
    state: RwLock<State>,
}

impl ValidatorRegistry {
    pub fn on_proposer_duties(&self, duties: &[ProposerDuty]) {
        let mut state = self.state.write();
        for duty in duties {
            let public_key = duty.public_key.clone();
            state.pubkeys_by_index.insert(duty.validator_index, public_key.clone());
            state.proposer_schedule.insert(duty.slot, (duty.validator_index, public_key));
        }
    }

    /// The proposer consensus expects for `slot`, if a duty has been loaded.
    /// This view is authoritative: submissions never establish the proposer.
    pub fn expected_proposer(&self, slot: Slot) -> Option<BlsPublicKey> {
        self.proposer_duty(slot).map(|(_, public_key)| public_key)
    }

    pub fn proposer_duty(&self, slot: Slot) -> Option<(ValidatorIndex, BlsPublicKey)> {
        let state = self.state.read();
        state
            .proposer_schedule
            .get(&slot)
            .map(|(validator_index, public_key)| (*validator_index, public_key.clone()))
    }

    pub fn get_public_key(&self, index: ValidatorIndex) -> Result<BlsPublicKey, Error> {
        let state = self.state.read();
        state.pubkeys_by_index.get(&index).cloned().ok_or(Error::UnknownIndex)
    }

    pub fn get_signed_registration(
        &self,
        public_key: &BlsPublicKey,
    ) -> Option<SignedValidatorRegistration> {
        let state = self.state.read();
        state.validator_preferences.get(public_key).cloned()
    }

    /// Upcoming slots whose proposer has registered, joined with the stored
    /// registration entry.
    pub fn proposer_schedules(&self) -> Vec<ProposerSchedule> {
        let state = self.state.read();
        let mut schedules = state
            .proposer_schedule
            .iter()
            .filter_map(|(&slot, (validator_index, public_key))| {
                state.validator_preferences.get(public_key).map(|entry| ProposerSchedule {
                    slot,
                    validator_index: *validator_index,
                    entry: entry.clone(),
                })
            })
            .collect::<Vec<_>>();
        schedules.sort_by_key(|schedule| schedule.slot);
        schedules
    }

    pub fn prune_slots_before(&self, slot: Slot) {
        let mut state = self.state.write();
        state.proposer_schedule.retain(|&scheduled, _| scheduled >= slot);
    }

    fn process_registration<'a>(
        &'a self,
        registration: &'a mut SignedValidatorRegistration,
        current_timestamp: u64,
        context: &Context,
    ) -> Result<Option<&'a mut SignedValidatorRegistration>, Error> {
        let latest_timestamp = {
            let state = self.state.read();
            state
                .validator_preferences
                .get(&registration.message.public_key)
                .map(|r| r.message.timestamp)
        };
        let message = &mut registration.message;

        validate_registration_is_not_from_future(message, current_timestamp)?;

        let registration_status = if let Some(latest_timestamp) = latest_timestamp {
            let status = determine_registration_status(message.timestamp, latest_timestamp);
            if matches!(status, ValidatorRegistrationStatus::Outdated) {
                return Err(Error::OutdatedRegistration(message.clone(), latest_timestamp))
            }
            status
        } else {
            ValidatorRegistrationStatus::New
        };

        let signing_root = compute_builder_signing_root(message, context)?;
        let public_key = &message.public_key;
        verify_signature(public_key, signing_root.as_ref(), &registration.signature)?;

        let update = if matches!(registration_status, ValidatorRegistrationStatus::New) {
            trace!(%public_key, "processed new registration");
            Some(registration)
        } else {
            None
        };
        Ok(update)
    }

    pub fn process_registrations(
        &self,
        registrations: &mut [SignedValidatorRegistration],
        current_timestamp: u64,
        context: &Context,
    ) -> Result<(), Vec<Error>> {
        let (updates, errs): (Vec<_>, Vec<_>) = registrations
            .par_iter_mut()
            .map(|registration| self.process_registration(registration, current_timestamp, context))
            .partition(|result| result.is_ok());
        let mut state = self.state.write();
        for update in updates {
            if let Some(signed_registration) = update.expect("validated successfully") {
                let public_key = signed_registration.message.public_key.clone();
                state.validator_preferences.insert(public_key, signed_registration.clone());
            }
        }

        if errs.is_empty() {
            Ok(())
        } else {
            Err(errs.into_iter().map(|err| err.expect_err("validation failed")).collect())
        }
    }
}
