use warden_util::time::now_sec;

use crate::collab::{Collaborators, Verdict};
use crate::config::ModerationConfig;
use crate::enforce::MessageNotifier;
use crate::event::{PeerEvent, PeerSignal, StatsSource, TriggerReason};
use crate::record::{PeerRecordStore, PeerState};
use crate::types::PeerIdentity;

/// Owner tag for presence watches registered by the engine.
pub const WATCH_CONTEXT: &str = "moderation";

/// The per-peer moderation state machine.
///
/// Driven entirely by host callbacks through [`ModerationEngine::handle`];
/// never blocks and never surfaces errors; anomalies are logged and
/// degrade to "do nothing" or "retry later". Callbacks for different
/// peers may be delivered concurrently; each record is locked for the
/// duration of the callback that touches it.
pub struct ModerationEngine {
    config: ModerationConfig,
    records: PeerRecordStore,
    pub(crate) notifier: MessageNotifier,
    pub(crate) collab: Collaborators,
}

impl ModerationEngine {
    pub fn new(
        config: ModerationConfig,
        local_identity: PeerIdentity,
        collab: Collaborators,
    ) -> Self {
        let records = PeerRecordStore::new();
        records.seed(local_identity, PeerState::Cleared);

        let notifier = MessageNotifier::new(&config);
        if notifier.is_enabled() && notifier.is_blank() && notifier.disable() {
            tracing::warn!("message is empty, disabling message sending");
        }

        let engine = Self {
            config,
            records,
            notifier,
            collab,
        };

        let pre_banned = engine
            .config
            .pre_banned
            .iter()
            .map(|name| PeerIdentity::from(name.as_str()))
            .chain(engine.collab.ban_registry.snapshot());

        for peer in pre_banned {
            engine.records.seed(peer.clone(), PeerState::Flagged);

            if !engine.collab.filter.is_blocked(&peer) {
                tracing::info!(peer = %peer, "pre-banned peer wasn't blocked");
                engine.collab.filter.block(&peer);
            }
        }

        engine
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    pub fn peer_state(&self, peer: &PeerIdentity) -> PeerState {
        self.records.state_of(peer)
    }

    /// Entry point for all host callbacks.
    pub fn handle(&self, event: PeerEvent) {
        match event.signal.classify() {
            Some(TriggerReason::DistributedSearch) if !self.config.check_distributed_search => {}
            Some(reason) => self.process_trigger(&event.peer, reason),
            None => {
                let PeerSignal::StatsUpdated { source } = event.signal else {
                    return;
                };
                if source == StatsSource::Peer {
                    self.apply_listing(&event.peer);
                }
            }
        }
    }

    /// Investigation scheduler: decides whether `reason` warrants a
    /// fresh content listing request for `peer`.
    fn process_trigger(&self, peer: &PeerIdentity, reason: TriggerReason) {
        let record = self.records.get_or_create(peer);
        let mut record = record.lock();

        let routine_logs = self.config.verbose || reason != TriggerReason::DistributedSearch;
        if routine_logs {
            record.verbose_logging = true;
        }

        if record.state == PeerState::Flagged {
            if reason.is_download_attempt() {
                tracing::info!(peer = %peer, %reason, "flagged peer tried to download");
                self.enforce(peer, &mut record);
            }
            return;
        }

        let was_cleared = record.state == PeerState::Cleared;

        if record.begin_investigation(now_sec(), self.config.share_request_cooldown) {
            if routine_logs {
                tracing::debug!(peer = %peer, %reason, "requesting content listing");
            }

            self.collab.presence.watch(peer, WATCH_CONTEXT);
            self.collab.browser.request_listing(peer);
        } else if !was_cleared && routine_logs {
            tracing::debug!(peer = %peer, %reason, "content listing already requested");
        }
    }

    /// Verdict evaluator: consumes the buffered listing for `peer`.
    ///
    /// An incomplete listing leaves the record untouched (and the watch
    /// in place); the cooldown rule covers the retry.
    fn apply_listing(&self, peer: &PeerIdentity) {
        let Some(listing) = self.collab.browser.listing(peer) else {
            tracing::debug!(peer = %peer, "stats updated without a buffered listing");
            return;
        };

        let verdict = match listing.verdict() {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::info!(peer = %peer, "{e}");
                return;
            }
        };

        let record = self.records.get_or_create(peer);
        let mut record = record.lock();

        // A flagged record never leaves that state; an unsolicited
        // listing arriving later must not downgrade it while the peer
        // stays in the ban registry and network filter.
        if record.state == PeerState::Flagged {
            self.collab.presence.unwatch(peer, WATCH_CONTEXT);
            self.collab.browser.clear(peer);
            return;
        }

        match verdict {
            Verdict::Cleared => {
                record.state = PeerState::Cleared;

                if record.verbose_logging {
                    tracing::debug!(peer = %peer, "peer has no private shares");
                }
            }
            Verdict::Flagged => {
                tracing::info!(
                    peer = %peer,
                    private_folders = listing.private_folders.len(),
                    "peer has private shares",
                );
                record.state = PeerState::Flagged;

                if let Some(audit) = &self.collab.audit {
                    audit.flagged(peer, &listing);
                }

                self.enforce(peer, &mut record);
            }
        }

        self.collab.presence.unwatch(peer, WATCH_CONTEXT);
        self.collab.browser.clear(peer);
    }

    /// Releases watches and buffered listings for every peer whose
    /// investigation is still in flight.
    pub fn shutdown(&self) {
        for peer in self.records.pending_investigations() {
            self.collab.presence.unwatch(&peer, WATCH_CONTEXT);
            self.collab.browser.clear(&peer);
        }
    }
}
