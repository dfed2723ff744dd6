use crate::types::PeerIdentity;

/// An inbound signal about a remote peer, delivered by the host client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerEvent {
    pub peer: PeerIdentity,
    pub signal: PeerSignal,
}

impl PeerEvent {
    pub fn new<T: Into<PeerIdentity>>(peer: T, signal: PeerSignal) -> Self {
        Self {
            peer: peer.into(),
            signal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerSignal {
    /// The peer answered one of our searches.
    SearchResult { term: String, token: u32 },
    /// The peer's search request reached us through the distributed network.
    DistributedSearch { term: String, token: u32 },
    /// The peer sent us a private chat message.
    PrivateMessage { text: String },
    /// The peer queued a download from our share.
    UploadQueued {
        remote_path: String,
        local_path: String,
    },
    /// An upload to the peer started.
    UploadStarted {
        remote_path: String,
        local_path: String,
    },
    /// The peer's statistics (and buffered content listing) were updated.
    StatsUpdated { source: StatsSource },
}

impl PeerSignal {
    /// Maps the signal to an investigation trigger.
    ///
    /// `StatsUpdated` is not a trigger; it is the completion signal for
    /// an in-flight listing request and is routed to the verdict path.
    pub fn classify(&self) -> Option<TriggerReason> {
        Some(match self {
            Self::SearchResult { .. } => TriggerReason::Search,
            Self::DistributedSearch { .. } => TriggerReason::DistributedSearch,
            Self::PrivateMessage { .. } => TriggerReason::PrivateChat,
            Self::UploadQueued { .. } => TriggerReason::UploadQueued,
            Self::UploadStarted { .. } => TriggerReason::UploadStarted,
            Self::StatsUpdated { .. } => return None,
        })
    }
}

/// Where a statistics update originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    /// Received over a direct peer connection.
    Peer,
    /// Relayed by the server; carries no listing data.
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    Search,
    DistributedSearch,
    PrivateChat,
    UploadQueued,
    UploadStarted,
}

impl TriggerReason {
    pub fn is_download_attempt(self) -> bool {
        matches!(self, Self::UploadQueued | Self::UploadStarted)
    }
}

impl std::fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::DistributedSearch => "distributed search",
            Self::PrivateChat => "private chat",
            Self::UploadQueued => "upload queued",
            Self::UploadStarted => "upload started",
        })
    }
}
