use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use warden_util::FastDashMap;

use crate::types::PeerIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeerState {
    /// Never investigated.
    #[default]
    Unknown,
    /// A content listing request is in flight.
    InvestigationRequested,
    /// Investigated and found without private shares.
    Cleared,
    /// Exposes private shares. Terminal with respect to investigation.
    Flagged,
}

/// Per-peer moderation state.
///
/// Mutated only while holding the record lock, so eligibility checks
/// and their state transitions are atomic per identity.
#[derive(Debug, Default)]
pub struct PeerRecord {
    pub state: PeerState,
    /// Unix seconds of the last listing request.
    pub last_requested_at: Option<u32>,
    /// Set once the ban notification has been delivered.
    pub notified_once: bool,
    /// Whether routine log lines are emitted for this peer.
    pub verbose_logging: bool,
}

impl PeerRecord {
    pub fn pre_seeded(state: PeerState) -> Self {
        Self {
            state,
            last_requested_at: None,
            notified_once: state == PeerState::Flagged,
            verbose_logging: false,
        }
    }

    /// Checks whether a fresh listing request should be issued and, if
    /// so, consumes the eligibility by moving the record into
    /// [`PeerState::InvestigationRequested`].
    ///
    /// Eligible: never investigated, a request that silently never
    /// completed, or a `Cleared` verdict older than `cooldown` (sharing
    /// posture can change over time). A `Cleared` record without a
    /// request timestamp was pre-seeded and stays cleared.
    pub fn begin_investigation(&mut self, now: u32, cooldown: Duration) -> bool {
        let cooldown_elapsed = |at: u32| now.saturating_sub(at) as u64 >= cooldown.as_secs();

        let eligible = match self.state {
            PeerState::Unknown => true,
            PeerState::InvestigationRequested => {
                self.last_requested_at.is_none_or(cooldown_elapsed)
            }
            PeerState::Cleared => self.last_requested_at.is_some_and(cooldown_elapsed),
            PeerState::Flagged => false,
        };

        if eligible {
            self.state = PeerState::InvestigationRequested;
            self.last_requested_at = Some(now);
        }
        eligible
    }
}

/// All known peer records, keyed by identity.
///
/// Records are created lazily on first contact and live for the
/// lifetime of the engine. The map shards independently per identity;
/// exclusive access to a single record goes through its own mutex.
#[derive(Default)]
pub struct PeerRecordStore {
    records: FastDashMap<PeerIdentity, Arc<Mutex<PeerRecord>>>,
}

impl PeerRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, peer: &PeerIdentity) -> Arc<Mutex<PeerRecord>> {
        use dashmap::mapref::entry::Entry;

        match self.records.entry(peer.clone()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let record = Arc::new(Mutex::new(PeerRecord::default()));
                entry.insert(record.clone());
                record
            }
        }
    }

    pub fn seed(&self, peer: PeerIdentity, state: PeerState) {
        self.records
            .insert(peer, Arc::new(Mutex::new(PeerRecord::pre_seeded(state))));
    }

    pub fn state_of(&self, peer: &PeerIdentity) -> PeerState {
        self.records
            .get(peer)
            .map(|item| item.value().lock().state)
            .unwrap_or_default()
    }

    /// Peers with a listing request still in flight.
    pub fn pending_investigations(&self) -> Vec<PeerIdentity> {
        self.records
            .iter()
            .filter(|item| item.value().lock().state == PeerState::InvestigationRequested)
            .map(|item| item.key().clone())
            .collect()
    }
}
