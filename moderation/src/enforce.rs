use std::sync::atomic::{AtomicBool, Ordering};

use crate::collab::TransferStatus;
use crate::config::ModerationConfig;
use crate::engine::ModerationEngine;
use crate::record::PeerRecord;
use crate::types::PeerIdentity;

/// One-shot messaging cell.
///
/// Owns the `send_message` switch at runtime: the flag is flipped off
/// through [`MessageNotifier::disable`] exactly once (blank message),
/// everything else only reads it.
pub(crate) struct MessageNotifier {
    enabled: AtomicBool,
    show_ui: bool,
    message: String,
}

impl MessageNotifier {
    pub fn new(config: &ModerationConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.send_message),
            show_ui: config.open_private_chat,
            message: config.message.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Returns `true` only for the call that actually disabled it.
    pub fn disable(&self) -> bool {
        self.enabled.swap(false, Ordering::AcqRel)
    }

    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }

    pub fn show_ui(&self) -> bool {
        self.show_ui
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines().map(str::trim_end)
    }
}

impl ModerationEngine {
    /// Applies the ban side effects for `peer`. Safe to call multiple
    /// times: re-blocking, zero matching transfers and an already-sent
    /// notification are each checked and short-circuited.
    pub(crate) fn enforce(&self, peer: &PeerIdentity, record: &mut PeerRecord) {
        if !self.collab.ban_registry.contains(peer) {
            self.collab.ban_registry.append(peer);
        }

        if self.collab.filter.is_blocked(peer) {
            if record.verbose_logging {
                tracing::debug!(peer = %peer, "peer is already banned");
            }
        } else {
            self.collab.filter.block(peer);
            tracing::info!(peer = %peer, "banned peer");
        }

        let mut aborted = 0usize;
        for queue in self.collab.uploads.iter() {
            for transfer in queue.transfers_for(peer) {
                queue.abort(&transfer, TransferStatus::Cancelled);
                aborted += 1;
            }
        }

        if aborted != 0 {
            tracing::info!(peer = %peer, aborted, "aborted transfers");
        }

        self.notify_once(peer, record);
    }

    fn notify_once(&self, peer: &PeerIdentity, record: &mut PeerRecord) {
        if record.notified_once || !self.notifier.is_enabled() {
            return;
        }

        if self.notifier.is_blank() {
            if self.notifier.disable() {
                tracing::warn!("message is empty, disabling message sending");
            }
            return;
        }

        record.notified_once = true;

        for line in self.notifier.lines() {
            self.collab
                .messenger
                .send_private(peer, line, self.notifier.show_ui(), false);
        }
    }
}
