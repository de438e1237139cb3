//! Client and connection configuration.

use serde::{Deserialize, Serialize};

/// Default client version string, answered to VERSION requests.
pub const VERSION_DEFAULT: &str = concat!("ircling ", env!("CARGO_PKG_VERSION"));

/// Configuration for an [`IrcClient`](crate::client::IrcClient).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Nickname to register with. Required before connecting.
    pub nickname: Option<String>,
    /// Channels to create local state for at startup.
    pub channels: Vec<String>,
    /// Rejoin a channel automatically when the client itself is kicked.
    pub auto_rejoin: bool,
    /// Version string answered to VERSION requests.
    /// Defaults to [`VERSION_DEFAULT`] when unset.
    pub version: Option<String>,
    /// Connection-level options.
    pub connection: ConnectionOptions,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            nickname: None,
            channels: Vec::new(),
            auto_rejoin: false,
            version: None,
            connection: ConnectionOptions::default(),
        }
    }
}

/// Configuration for an [`IrcConnection`](crate::connection::IrcConnection).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionOptions {
    /// Milliseconds to wait between outbound lines. Zero disables the
    /// flood-protection queue and writes go straight to the transport.
    ///
    /// The interval itself is enforced by the embedder's timer, which calls
    /// [`tick`](crate::connection::IrcConnection::tick) at this period.
    pub flood_protection_delay_ms: u64,
}

impl ConnectionOptions {
    /// Whether outbound writes should be queued.
    pub fn flood_protected(&self) -> bool {
        self.flood_protection_delay_ms > 0
    }
}
