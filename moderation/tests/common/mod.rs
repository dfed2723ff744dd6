use std::sync::Arc;

use parking_lot::Mutex;
use warden_util::FastHashMap;
use warden_moderation::{
    AuditSink, BanRegistry, Collaborators, ContentBrowser, ContentListing, Messenger,
    ModerationConfig, ModerationEngine, NetworkFilter, PeerEvent, PeerIdentity, PeerSignal,
    PresenceDirectory, StatsSource, Transfer, TransferQueue, TransferQueues, TransferStatus,
};

pub const LOCAL_IDENTITY: &str = "me";

#[derive(Default)]
pub struct MockPresence {
    pub watched: Mutex<Vec<(PeerIdentity, String)>>,
    pub unwatched: Mutex<Vec<(PeerIdentity, String)>>,
}

impl PresenceDirectory for MockPresence {
    fn watch(&self, peer: &PeerIdentity, context: &str) {
        self.watched.lock().push((peer.clone(), context.to_owned()));
    }

    fn unwatch(&self, peer: &PeerIdentity, context: &str) {
        self.unwatched
            .lock()
            .push((peer.clone(), context.to_owned()));
    }
}

#[derive(Default)]
pub struct MockBrowser {
    pub requests: Mutex<Vec<PeerIdentity>>,
    pub listings: Mutex<FastHashMap<String, ContentListing>>,
    pub cleared: Mutex<Vec<PeerIdentity>>,
}

impl ContentBrowser for MockBrowser {
    fn request_listing(&self, peer: &PeerIdentity) {
        self.requests.lock().push(peer.clone());
    }

    fn listing(&self, peer: &PeerIdentity) -> Option<ContentListing> {
        self.listings.lock().get(peer.as_str()).cloned()
    }

    fn clear(&self, peer: &PeerIdentity) {
        self.listings.lock().remove(peer.as_str());
        self.cleared.lock().push(peer.clone());
    }
}

#[derive(Default)]
pub struct MockFilter {
    pub blocked: Mutex<Vec<PeerIdentity>>,
    pub block_calls: Mutex<Vec<PeerIdentity>>,
}

impl NetworkFilter for MockFilter {
    fn is_blocked(&self, peer: &PeerIdentity) -> bool {
        self.blocked.lock().contains(peer)
    }

    fn block(&self, peer: &PeerIdentity) {
        self.blocked.lock().push(peer.clone());
        self.block_calls.lock().push(peer.clone());
    }
}

#[derive(Default)]
pub struct MockRegistry {
    pub entries: Mutex<Vec<PeerIdentity>>,
}

impl BanRegistry for MockRegistry {
    fn contains(&self, peer: &PeerIdentity) -> bool {
        self.entries.lock().contains(peer)
    }

    fn append(&self, peer: &PeerIdentity) {
        self.entries.lock().push(peer.clone());
    }

    fn snapshot(&self) -> Vec<PeerIdentity> {
        self.entries.lock().clone()
    }
}

#[derive(Default)]
pub struct MockQueue {
    pub transfers: Mutex<Vec<Transfer>>,
    pub aborted: Mutex<Vec<(Transfer, TransferStatus)>>,
}

impl TransferQueue for MockQueue {
    fn transfers_for(&self, peer: &PeerIdentity) -> Vec<Transfer> {
        self.transfers
            .lock()
            .iter()
            .filter(|transfer| transfer.peer == *peer)
            .cloned()
            .collect()
    }

    fn abort(&self, transfer: &Transfer, status: TransferStatus) {
        self.transfers.lock().retain(|item| item != transfer);
        self.aborted.lock().push((transfer.clone(), status));
    }
}

#[derive(Default)]
pub struct MockMessenger {
    pub sent: Mutex<Vec<SentMessage>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub peer: PeerIdentity,
    pub line: String,
    pub show_ui: bool,
    pub switch_focus: bool,
}

impl Messenger for MockMessenger {
    fn send_private(&self, peer: &PeerIdentity, line: &str, show_ui: bool, switch_focus: bool) {
        self.sent.lock().push(SentMessage {
            peer: peer.clone(),
            line: line.to_owned(),
            show_ui,
            switch_focus,
        });
    }
}

#[derive(Default)]
pub struct MockAudit {
    pub snapshots: Mutex<Vec<(PeerIdentity, ContentListing)>>,
}

impl AuditSink for MockAudit {
    fn flagged(&self, peer: &PeerIdentity, listing: &ContentListing) {
        self.snapshots.lock().push((peer.clone(), listing.clone()));
    }
}

pub struct Harness {
    pub presence: Arc<MockPresence>,
    pub browser: Arc<MockBrowser>,
    pub filter: Arc<MockFilter>,
    pub registry: Arc<MockRegistry>,
    pub queued: Arc<MockQueue>,
    pub active: Arc<MockQueue>,
    pub failed: Arc<MockQueue>,
    pub messenger: Arc<MockMessenger>,
    pub audit: Arc<MockAudit>,
    pub engine: ModerationEngine,
}

impl Harness {
    pub fn new(config: ModerationConfig) -> Self {
        Self::with_filter(config, MockFilter::default())
    }

    pub fn with_filter(config: ModerationConfig, filter: MockFilter) -> Self {
        let presence = Arc::new(MockPresence::default());
        let browser = Arc::new(MockBrowser::default());
        let filter = Arc::new(filter);
        let registry = Arc::new(MockRegistry::default());
        let queued = Arc::new(MockQueue::default());
        let active = Arc::new(MockQueue::default());
        let failed = Arc::new(MockQueue::default());
        let messenger = Arc::new(MockMessenger::default());
        let audit = Arc::new(MockAudit::default());

        let collab = Collaborators {
            presence: presence.clone(),
            browser: browser.clone(),
            filter: filter.clone(),
            ban_registry: registry.clone(),
            uploads: TransferQueues {
                queued: queued.clone(),
                active: active.clone(),
                failed: failed.clone(),
            },
            messenger: messenger.clone(),
            audit: Some(audit.clone()),
        };

        let engine = ModerationEngine::new(config, PeerIdentity::from(LOCAL_IDENTITY), collab);

        Self {
            presence,
            browser,
            filter,
            registry,
            queued,
            active,
            failed,
            messenger,
            audit,
            engine,
        }
    }

    pub fn search_hit(&self, peer: &str) {
        self.engine.handle(PeerEvent::new(peer, PeerSignal::SearchResult {
            term: "test".to_owned(),
            token: 1,
        }));
    }

    pub fn distributed_search(&self, peer: &str) {
        self.engine
            .handle(PeerEvent::new(peer, PeerSignal::DistributedSearch {
                term: "test".to_owned(),
                token: 1,
            }));
    }

    pub fn private_message(&self, peer: &str) {
        self.engine.handle(PeerEvent::new(peer, PeerSignal::PrivateMessage {
            text: "hello".to_owned(),
        }));
    }

    pub fn upload_queued(&self, peer: &str) {
        self.engine.handle(PeerEvent::new(peer, PeerSignal::UploadQueued {
            remote_path: "@music/song.flac".to_owned(),
            local_path: "/srv/music/song.flac".to_owned(),
        }));
    }

    pub fn deliver_listing(&self, peer: &str, listing: ContentListing) {
        self.browser
            .listings
            .lock()
            .insert(peer.to_owned(), listing);
        self.engine.handle(PeerEvent::new(peer, PeerSignal::StatsUpdated {
            source: StatsSource::Peer,
        }));
    }

    pub fn listing_requests(&self, peer: &str) -> usize {
        self.browser
            .requests
            .lock()
            .iter()
            .filter(|item| item.as_str() == peer)
            .count()
    }

    pub fn block_calls(&self, peer: &str) -> usize {
        self.filter
            .block_calls
            .lock()
            .iter()
            .filter(|item| item.as_str() == peer)
            .count()
    }
}

pub fn complete_listing(private_folders: &[&str]) -> ContentListing {
    ContentListing {
        folder_count: Some(10),
        file_count: Some(100),
        total_bytes: 1 << 30,
        public_folders: vec!["music".to_owned()],
        private_folders: private_folders.iter().map(|s| (*s).to_owned()).collect(),
    }
}

pub fn transfer_to(peer: &str, remote_path: &str) -> Transfer {
    Transfer {
        peer: PeerIdentity::from(peer),
        remote_path: remote_path.to_owned(),
        local_path: format!("/srv{remote_path}"),
    }
}
