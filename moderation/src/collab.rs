use std::sync::Arc;

use serde::Serialize;

use crate::types::PeerIdentity;

/// Registers interest in a peer's presence so listing callbacks for it
/// are delivered to us.
pub trait PresenceDirectory: Send + Sync {
    fn watch(&self, peer: &PeerIdentity, context: &str);
    fn unwatch(&self, peer: &PeerIdentity, context: &str);
}

/// Requests a peer's shared-content listing and buffers the result
/// until it is consumed.
pub trait ContentBrowser: Send + Sync {
    /// Fire-and-forget; completion arrives as a stats-updated event.
    fn request_listing(&self, peer: &PeerIdentity);

    /// The buffered listing for `peer`, if any arrived.
    fn listing(&self, peer: &PeerIdentity) -> Option<ContentListing>;

    /// Discards the buffered listing data for `peer`.
    fn clear(&self, peer: &PeerIdentity);
}

/// The client's network-level block list.
pub trait NetworkFilter: Send + Sync {
    fn is_blocked(&self, peer: &PeerIdentity) -> bool;
    fn block(&self, peer: &PeerIdentity);
}

/// The persisted, append-only set of banned identities.
pub trait BanRegistry: Send + Sync {
    fn contains(&self, peer: &PeerIdentity) -> bool;
    fn append(&self, peer: &PeerIdentity);
    fn snapshot(&self) -> Vec<PeerIdentity>;
}

/// One of the client's upload queues.
pub trait TransferQueue: Send + Sync {
    fn transfers_for(&self, peer: &PeerIdentity) -> Vec<Transfer>;
    fn abort(&self, transfer: &Transfer, status: TransferStatus);
}

/// Outbound private chat.
pub trait Messenger: Send + Sync {
    fn send_private(&self, peer: &PeerIdentity, line: &str, show_ui: bool, switch_focus: bool);
}

/// Optional sink for per-peer listing snapshots taken when a peer is
/// flagged; persistence format is the sink's concern.
pub trait AuditSink: Send + Sync {
    fn flagged(&self, peer: &PeerIdentity, listing: &ContentListing);
}

/// A peer's shared-content summary as delivered by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentListing {
    /// Absent until the full listing has been received.
    pub folder_count: Option<u64>,
    /// Absent until the full listing has been received.
    pub file_count: Option<u64>,
    pub total_bytes: u64,
    pub public_folders: Vec<String>,
    pub private_folders: Vec<String>,
}

impl ContentListing {
    pub fn verdict(&self) -> Result<Verdict, IncompleteListing> {
        if self.folder_count.is_none() || self.file_count.is_none() {
            return Err(IncompleteListing);
        }

        Ok(if self.private_folders.is_empty() {
            Verdict::Cleared
        } else {
            Verdict::Flagged
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Cleared,
    Flagged,
}

#[derive(Debug, thiserror::Error)]
#[error("content listing is incomplete")]
pub struct IncompleteListing;

/// An outbound transfer owned by one of the upload queues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub peer: PeerIdentity,
    pub remote_path: String,
    pub local_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Cancelled,
    Finished,
    Failed,
}

/// The three independent upload queues of the client.
#[derive(Clone)]
pub struct TransferQueues {
    pub queued: Arc<dyn TransferQueue>,
    pub active: Arc<dyn TransferQueue>,
    pub failed: Arc<dyn TransferQueue>,
}

impl TransferQueues {
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<dyn TransferQueue>> {
        [&self.queued, &self.active, &self.failed].into_iter()
    }
}

/// Everything the engine calls out to.
#[derive(Clone)]
pub struct Collaborators {
    pub presence: Arc<dyn PresenceDirectory>,
    pub browser: Arc<dyn ContentBrowser>,
    pub filter: Arc<dyn NetworkFilter>,
    pub ban_registry: Arc<dyn BanRegistry>,
    pub uploads: TransferQueues,
    pub messenger: Arc<dyn Messenger>,
    pub audit: Option<Arc<dyn AuditSink>>,
}
