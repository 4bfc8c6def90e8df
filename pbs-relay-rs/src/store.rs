use parking_lot::Mutex;
use std::collections::HashMap;

/// The shared bid-store seam: a string keyed value store with per-key expiry,
/// atomic set-if-absent and prefix scans. Key shapes follow the namespaces in
/// `bid_board`, so an out-of-process driver can back the same layout.
#[derive(Debug, Default)]
pub(crate) struct TtlStore {
    entries: Mutex<HashMap<String, Entry>>,
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    // unix millis; entries are treated as absent once reached
    expires_at: u64,
}

impl TtlStore {
    pub fn set(&self, key: &str, value: String, expires_at: u64) {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), Entry { value, expires_at });
    }

    pub fn get(&self, key: &str, now: u64) -> Option<String> {
        let entries = self.entries.lock();
        entries.get(key).filter(|entry| entry.expires_at > now).map(|entry| entry.value.clone())
    }

    /// Atomic set-if-absent. Returns `true` if this call installed the value.
    pub fn set_if_absent(&self, key: &str, value: String, expires_at: u64, now: u64) -> bool {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => false,
            _ => {
                entries.insert(key.to_string(), Entry { value, expires_at });
                true
            }
        }
    }

    pub fn scan_prefix(&self, prefix: &str, now: u64) -> Vec<(String, String)> {
        let entries = self.entries.lock();
        entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && entry.expires_at > now)
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    pub fn purge_expired(&self, now: u64) {
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.expires_at > now);
    }
}
