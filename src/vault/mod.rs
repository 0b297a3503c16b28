//! Vault Module
//!
//! Client-side view of the remote vault: auth state, the cached record
//! list, and which secrets are revealed.

pub mod search;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::api::CredentialRecord;

/// Vault state as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// Status not fetched yet, or the status call failed
    Unknown,
    /// Backend has no master password yet
    Uninitialized,
    /// Initialized, but the client view is locked
    Locked,
    /// Initialized and showing records
    Ready,
}

/// Session cache
pub struct Session {
    state: VaultState,
    records: Vec<CredentialRecord>,
    revealed: HashSet<String>,
    last_activity: Instant,
    last_sync: Option<DateTime<Local>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: VaultState::Unknown,
            records: Vec::new(),
            revealed: HashSet::new(),
            last_activity: Instant::now(),
            last_sync: None,
        }
    }

    pub fn state(&self) -> VaultState {
        self.state
    }

    pub fn set_state(&mut self, state: VaultState) {
        self.state = state;
    }

    pub fn is_ready(&self) -> bool {
        self.state == VaultState::Ready
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn last_sync(&self) -> Option<DateTime<Local>> {
        self.last_sync
    }

    /// Replace the cache with a fresh listing.
    ///
    /// Revealed flags for ids that are gone are dropped.
    pub fn replace_records(&mut self, records: Vec<CredentialRecord>) {
        self.revealed.retain(|id| records.iter().any(|r| &r.id == id));
        self.records = records;
        self.last_sync = Some(Local::now());
    }

    /// Swap in a single refreshed record, keyed by id.
    pub fn update_record(&mut self, record: CredentialRecord) {
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
        }
    }

    pub fn remove_record(&mut self, id: &str) -> bool {
        self.revealed.remove(id);
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// Flip the revealed flag; returns the new value.
    pub fn toggle_revealed(&mut self, id: &str) -> bool {
        if self.revealed.remove(id) {
            false
        } else {
            self.revealed.insert(id.to_string());
            true
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Drop everything fetched from the backend.
    pub fn clear(&mut self) {
        self.records.clear();
        self.revealed.clear();
        self.last_sync = None;
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn should_auto_lock(&self, timeout: Duration) -> bool {
        self.is_ready() && !timeout.is_zero() && self.last_activity.elapsed() >= timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CredentialRecord {
        CredentialRecord {
            id: id.to_string(),
            title: format!("title-{id}"),
            username: "user".to_string(),
            password: "pw".to_string(),
            url: None,
            notes: None,
        }
    }

    #[test]
    fn test_toggle_revealed() {
        let mut session = Session::new();
        session.replace_records(vec![record("a")]);

        assert!(!session.is_revealed("a"));
        assert!(session.toggle_revealed("a"));
        assert!(session.is_revealed("a"));
        assert!(!session.toggle_revealed("a"));
        assert!(!session.is_revealed("a"));
    }

    #[test]
    fn test_remove_clears_revealed() {
        let mut session = Session::new();
        session.replace_records(vec![record("a"), record("b")]);
        session.toggle_revealed("a");

        assert!(session.remove_record("a"));
        assert!(!session.is_revealed("a"));
        assert!(session.record("a").is_none());
        assert!(!session.remove_record("a"));
    }

    #[test]
    fn test_replace_prunes_stale_revealed() {
        let mut session = Session::new();
        session.replace_records(vec![record("a"), record("b")]);
        session.toggle_revealed("a");
        session.toggle_revealed("b");

        session.replace_records(vec![record("b")]);
        assert_eq!(session.revealed_count(), 1);
        assert!(session.is_revealed("b"));
        assert!(session.last_sync().is_some());
    }

    #[test]
    fn test_update_record_by_id() {
        let mut session = Session::new();
        session.replace_records(vec![record("a")]);

        let mut fresh = record("a");
        fresh.title = "Renamed".to_string();
        session.update_record(fresh);
        assert_eq!(session.record("a").unwrap().title, "Renamed");

        session.update_record(record("zzz"));
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_auto_lock_only_when_ready() {
        let mut session = Session::new();
        assert!(!session.should_auto_lock(Duration::from_nanos(1)));

        session.set_state(VaultState::Ready);
        std::thread::sleep(Duration::from_millis(2));
        assert!(session.should_auto_lock(Duration::from_millis(1)));
        assert!(!session.should_auto_lock(Duration::ZERO));
    }
}
