//! Error types for the IRC client core.
//!
//! This module defines the error taxonomy for message parsing failures,
//! channel state violations, and connection misuse.

use thiserror::Error;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors raised by the client core.
///
/// Structural parse failures are raised to the caller of
/// [`dispatch`](crate::client::IrcClient::dispatch) rather than being
/// silently degraded; see the crate docs for the error policy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// A channel-bearing message did not contain a usable channel name.
    #[error("cannot parse channel name from: {line}")]
    ParseChannelName {
        /// The raw line the channel name was expected in.
        line: String,
    },

    /// A message did not match its mandatory structural pattern.
    #[error("cannot parse {command} message: {line}")]
    ParseMessage {
        /// The command whose pattern failed to match.
        command: &'static str,
        /// The raw line that failed to match.
        line: String,
    },

    /// An unknown channel mode letter was passed to the state tracker.
    #[error("invalid mode letter: {letter}")]
    InvalidMode {
        /// The rejected mode letter.
        letter: char,
    },

    /// A channel name was empty or a bare `#`.
    #[error("invalid channel name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A write was attempted without an open transport.
    #[error("no open connection was found to write commands to")]
    NotConnected,

    /// The client was asked to connect before a nickname was set.
    #[error("a nickname must be set before connecting to an IRC server")]
    NickRequired,

    /// I/O error surfaced by the transport collaborator.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::InvalidMode { letter: 'x' };
        assert_eq!(format!("{err}"), "invalid mode letter: x");

        let err = ClientError::ParseMessage {
            command: "PART",
            line: "PART".to_string(),
        };
        assert_eq!(format!("{err}"), "cannot parse PART message: PART");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
