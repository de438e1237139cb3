//! Transport seam and outbound write path.
//!
//! The core is sans-IO: all bytes enter through
//! [`IrcClient::dispatch`](crate::client::IrcClient::dispatch) and leave
//! through a [`Transport`] supplied by the embedder. The connection wraps
//! the transport with the optional flood-protection FIFO.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::options::ConnectionOptions;

/// Collaborator surface for the underlying stream.
///
/// Implementations own TCP/DNS, the reactor, and reconnection; the core
/// only writes complete lines and asks whether the stream is open.
pub trait Transport {
    /// Open the underlying stream.
    fn open(&mut self) -> Result<()>;
    /// Close the underlying stream.
    fn close(&mut self) -> Result<()>;
    /// Whether the stream is currently open.
    fn is_connected(&self) -> bool;
    /// Write one terminated line to the stream.
    fn write(&mut self, line: &str) -> Result<()>;
}

/// Outbound write path: terminator normalization plus the optional
/// flood-protection queue.
///
/// When flood protection is enabled, writes are appended to a FIFO that the
/// embedder drains one line per timer tick via [`tick`](Self::tick). The
/// queue is unbounded; backpressure is out of scope.
pub struct IrcConnection {
    transport: Box<dyn Transport>,
    options: ConnectionOptions,
    queue: VecDeque<String>,
}

/// Serializable view of the connection for diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct ConnectionSnapshot {
    /// Whether the transport reports an open stream.
    pub connected: bool,
    /// Whether outbound writes are queued.
    pub flood_protected: bool,
    /// Number of queued outbound lines.
    pub queued: usize,
}

impl IrcConnection {
    /// Wrap a transport with the given options.
    pub fn new(transport: Box<dyn Transport>, options: ConnectionOptions) -> Self {
        Self {
            transport,
            options,
            queue: VecDeque::new(),
        }
    }

    /// Open the transport. No-op when already connected.
    pub fn open(&mut self) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }
        self.transport.open()
    }

    /// Close the transport. Queued lines are kept; they drain once a new
    /// stream is open.
    pub fn close(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }
        self.transport.close()
    }

    /// Whether the transport reports an open stream.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Send one protocol line.
    ///
    /// The terminator is normalized to `\r\n`. Fails with
    /// [`ClientError::NotConnected`] when the stream is closed. With flood
    /// protection enabled the line is queued instead of written.
    pub fn write(&mut self, line: &str) -> Result<()> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }

        let mut line = line.trim_end_matches(['\r', '\n']).to_owned();
        line.push_str("\r\n");

        if self.options.flood_protected() {
            trace!(queued = self.queue.len() + 1, "queueing outbound line");
            self.queue.push_back(line);
            Ok(())
        } else {
            self.transport.write(&line)
        }
    }

    /// Drain at most one queued line to the transport.
    ///
    /// Called by the embedder's periodic timer at the configured flood
    /// delay. Returns whether a line was written.
    pub fn tick(&mut self) -> Result<bool> {
        let Some(line) = self.queue.pop_front() else {
            return Ok(false);
        };

        debug!(remaining = self.queue.len(), "draining flood queue");
        self.transport.write(&line)?;
        Ok(true)
    }

    /// Number of queued outbound lines.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Serializable view for diagnostics.
    pub fn snapshot(&self) -> ConnectionSnapshot {
        ConnectionSnapshot {
            connected: self.is_connected(),
            flood_protected: self.options.flood_protected(),
            queued: self.queue.len(),
        }
    }
}

impl std::fmt::Debug for IrcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrcConnection")
            .field("connected", &self.is_connected())
            .field("options", &self.options)
            .field("queued", &self.queue.len())
            .finish()
    }
}
