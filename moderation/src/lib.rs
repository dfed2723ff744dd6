pub use collab::{
    AuditSink, BanRegistry, Collaborators, ContentBrowser, ContentListing, IncompleteListing,
    Messenger, NetworkFilter, PresenceDirectory, Transfer, TransferQueue, TransferQueues,
    TransferStatus, Verdict,
};
pub use config::ModerationConfig;
pub use engine::{ModerationEngine, WATCH_CONTEXT};
pub use event::{PeerEvent, PeerSignal, StatsSource, TriggerReason};
pub use record::{PeerRecord, PeerState};
pub use types::PeerIdentity;

mod collab;
mod config;
mod enforce;
mod engine;
mod event;
mod record;
mod types;
