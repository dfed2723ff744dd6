use std::time::Duration;

use serde::{Deserialize, Serialize};
use warden_util::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Emit routine log lines for every trigger, not only first contact.
    ///
    /// Default: `false`.
    pub verbose: bool,

    /// Investigate peers seen through distributed search events.
    ///
    /// Default: `false`.
    pub check_distributed_search: bool,

    /// Send a one-time private message after banning a peer.
    ///
    /// Default: `false`.
    pub send_message: bool,

    /// Open a chat tab when sending private messages.
    ///
    /// Default: `true`.
    pub open_private_chat: bool,

    /// Notification text; each line is sent as a separate message.
    /// An empty or whitespace-only text disables message sending.
    pub message: String,

    /// Identities treated as already flagged at startup.
    ///
    /// Default: empty.
    pub pre_banned: Vec<String>,

    /// Minimal wait before re-requesting a content listing for a peer
    /// whose previous request never completed.
    ///
    /// Default: 30 seconds.
    #[serde(with = "serde_helpers::humantime")]
    pub share_request_cooldown: Duration,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            check_distributed_search: false,
            send_message: false,
            open_private_chat: true,
            message: "Hey! I wanted to share my thoughts on private shares. \
                While they can seem convenient, they often limit the community aspect of sharing \
                and discovering new music. Private shares can create exclusivity, making it harder \
                for others to access and enjoy the content. \
                Let's keep the spirit of sharing alive by keeping our collections open!"
                .to_owned(),
            pre_banned: Vec::new(),
            share_request_cooldown: Duration::from_secs(30),
        }
    }
}
