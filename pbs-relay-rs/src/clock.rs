use ethereum_consensus::primitives::Slot;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Maps wall-clock time to slot indices and positions within a slot.
///
/// The cutoff is the slot's first visible on-chain moment: slot start plus a
/// small attestation-deadline offset. Past it no further submissions for the
/// slot are admitted.
#[derive(Debug, Clone)]
pub struct SlotClock {
    genesis_time: u64,
    seconds_per_slot: u64,
    cutoff_offset: Duration,
}

impl SlotClock {
    pub fn new(genesis_time: u64, seconds_per_slot: u64, cutoff_offset: Duration) -> Self {
        Self { genesis_time, seconds_per_slot, cutoff_offset }
    }

    pub fn unix_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("wall clock is past the unix epoch")
            .as_secs()
    }

    pub fn unix_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("wall clock is past the unix epoch")
            .as_millis() as u64
    }

    pub fn slot_at(&self, timestamp: u64) -> Slot {
        if timestamp < self.genesis_time {
            return 0
        }
        (timestamp - self.genesis_time) / self.seconds_per_slot
    }

    pub fn current_slot(&self) -> Slot {
        self.slot_at(self.unix_secs())
    }

    pub fn slot_start(&self, slot: Slot) -> u64 {
        self.genesis_time + slot * self.seconds_per_slot
    }

    pub fn slot_end(&self, slot: Slot) -> u64 {
        self.slot_start(slot) + self.seconds_per_slot
    }

    /// The cutoff moment for `slot`, in unix milliseconds.
    pub fn cutoff(&self, slot: Slot) -> u64 {
        self.slot_start(slot) * 1000 + self.cutoff_offset.as_millis() as u64
    }

    pub fn is_past_cutoff(&self, slot: Slot, now_millis: u64) -> bool {
        now_millis >= self.cutoff(slot)
    }

    pub fn past_cutoff(&self, slot: Slot) -> bool {
        self.is_past_cutoff(slot, self.unix_millis())
    }

    /// Duration until the cutoff of the next slot that has not reached its
    /// cutoff yet; drives the freeze timer.
    pub fn duration_until_next_cutoff(&self) -> (Slot, Duration) {
        let now = self.unix_millis();
        let mut slot = self.slot_at(now / 1000);
        if self.is_past_cutoff(slot, now) {
            slot += 1;
        }
        (slot, Duration::from_millis(self.cutoff(slot).saturating_sub(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_clock() -> SlotClock {
        SlotClock::new(1000, 12, Duration::from_millis(4000))
    }

    #[test]
    fn test_slot_arithmetic() {
        let clock = test_clock();
        assert_eq!(clock.slot_at(999), 0);
        assert_eq!(clock.slot_at(1000), 0);
        assert_eq!(clock.slot_at(1011), 0);
        assert_eq!(clock.slot_at(1012), 1);
        assert_eq!(clock.slot_start(42), 1504);
        assert_eq!(clock.slot_end(42), 1516);
    }

    #[test]
    fn test_cutoff_boundary() {
        let clock = test_clock();
        let cutoff = clock.cutoff(42);
        assert_eq!(cutoff, 1_504_000 + 4000);
        assert!(!clock.is_past_cutoff(42, cutoff - 1));
        // exactly at the cutoff counts as frozen
        assert!(clock.is_past_cutoff(42, cutoff));
        assert!(clock.is_past_cutoff(42, cutoff + 1));
    }
}
