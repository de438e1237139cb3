//! Server-originated payloads: PING, VERSION, 001, 372, and the numeric
//! console fallthrough.

use std::sync::OnceLock;

use regex::Regex;

use super::Events;
use crate::event::{names, Event, EventArg};
use crate::message::types::RawMessage;

/// `:server 001 ...` welcome shape: origin, target nick, welcome text.
fn welcome_mask() -> &'static Regex {
    static MASK: OnceLock<Regex> = OnceLock::new();
    MASK.get_or_init(|| Regex::new(r"^:(.*)\s\S+\s(.*)\s:(.*)$").expect("static pattern"))
}

/// Welcome text tail carrying `nick!~user@host`.
fn hostmask_mask() -> &'static Regex {
    static MASK: OnceLock<Regex> = OnceLock::new();
    MASK.get_or_init(|| Regex::new(r"^(.*)\s(.*)!~(.*)$").expect("static pattern"))
}

/// A server keepalive.
#[derive(Clone, Debug, PartialEq)]
pub struct Ping {
    /// The token to echo back in the PONG reply.
    pub token: String,
}

impl Ping {
    /// Extract the keepalive token.
    pub fn parse(raw: &RawMessage) -> Self {
        Self {
            token: raw.payload_or_empty().to_owned(),
        }
    }

    /// `ping [token]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(names::PING, vec![EventArg::text(&self.token)]));
        events
    }
}

/// A VERSION request; carries no fields, the client answers with its
/// configured version string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Version;

impl Version {
    /// `version []`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(names::VERSION, vec![]));
        events
    }
}

/// The numeric 001 registration confirmation.
///
/// Fields the masks fail to match stay empty rather than failing the
/// whole message.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Welcome {
    /// The confirming server.
    pub server: String,
    /// The nickname the server registered.
    pub user: String,
    /// The welcome text.
    pub message: String,
    /// The `user@host` part of the registered mask, when announced.
    pub hostmask: String,
}

impl Welcome {
    /// Extract registration details from the raw 001 line.
    pub fn parse(line: &str) -> Self {
        let mut welcome = Self::default();

        if let Some(outer) = welcome_mask().captures(line.trim()) {
            welcome.server = outer[1].to_owned();
            welcome.user = outer[2].to_owned();
            welcome.message = outer[3].to_owned();

            // Some networks end the welcome text with the full client mask;
            // refine user/message from it when present.
            if let Some(inner) = hostmask_mask().captures(&outer[3]) {
                welcome.message = inner[1].to_owned();
                welcome.user = inner[2].to_owned();
                welcome.hostmask = inner[3].to_owned();
            }
        }

        welcome
    }

    /// `registered [server, user, message, hostmask]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::REGISTERED,
            vec![
                EventArg::text(&self.server),
                EventArg::text(&self.user),
                EventArg::text(&self.message),
                EventArg::text(&self.hostmask),
            ],
        ));
        events
    }
}

/// One line of the message of the day (numeric 372).
#[derive(Clone, Debug, PartialEq)]
pub struct Motd {
    /// The line text.
    pub text: String,
}

impl Motd {
    /// Extract the message-of-the-day line.
    pub fn parse(raw: &RawMessage) -> Self {
        Self {
            text: raw.payload_or_empty().to_owned(),
        }
    }

    /// `motd [text]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(names::MOTD, vec![EventArg::text(&self.text)]));
        events
    }
}

/// Free-form numeric server output that no dedicated kind claims.
#[derive(Clone, Debug, PartialEq)]
pub struct Console {
    /// The addressed nickname, from the middle parameters.
    pub user: String,
    /// The console text.
    pub message: String,
}

impl Console {
    /// Extract addressee and text.
    pub fn parse(raw: &RawMessage) -> Self {
        Self {
            user: raw.suffix_or_empty().trim().to_owned(),
            message: raw.payload_or_empty().trim().to_owned(),
        }
    }

    /// `console [user, message]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::CONSOLE,
            vec![EventArg::text(&self.user), EventArg::text(&self.message)],
        ));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse_line;

    #[test]
    fn test_ping_token() {
        let ping = Ping::parse(&parse_line("PING :0123456"));
        assert_eq!(ping.token, "0123456");
        assert_eq!(ping.events()[0].name(), "ping");
    }

    #[test]
    fn test_ping_without_payload_keeps_empty_token() {
        let ping = Ping::parse(&parse_line("PING"));
        assert_eq!(ping.token, "");
    }

    #[test]
    fn test_welcome_with_hostmask() {
        let line = ":irc.example.net 001 IrcBot :Welcome to the network IrcBot!~bot@host.example.net";
        let welcome = Welcome::parse(line);
        assert_eq!(welcome.server, "irc.example.net");
        assert_eq!(welcome.user, "IrcBot");
        assert_eq!(welcome.message, "Welcome to the network");
        assert_eq!(welcome.hostmask, "bot@host.example.net");
    }

    #[test]
    fn test_welcome_without_hostmask_keeps_outer_fields() {
        let line = ":irc.example.net 001 IrcBot :Welcome to the network";
        let welcome = Welcome::parse(line);
        assert_eq!(welcome.server, "irc.example.net");
        assert_eq!(welcome.user, "IrcBot");
        assert_eq!(welcome.message, "Welcome to the network");
        assert_eq!(welcome.hostmask, "");
    }

    #[test]
    fn test_welcome_unmatched_line_stays_empty() {
        let welcome = Welcome::parse("001");
        assert_eq!(welcome, Welcome::default());
        assert_eq!(welcome.events()[0].name(), "registered");
    }

    #[test]
    fn test_motd_line() {
        let motd = Motd::parse(&parse_line(":srv 372 IrcBot :- Be excellent to each other"));
        assert_eq!(motd.text, "- Be excellent to each other");
        assert_eq!(motd.events()[0].name(), "motd");
    }

    #[test]
    fn test_console_numeric() {
        let console = Console::parse(&parse_line(":srv 422 IrcBot :MOTD File is missing"));
        assert_eq!(console.user, "IrcBot");
        assert_eq!(console.message, "MOTD File is missing");
        assert_eq!(console.events()[0].name(), "console");
    }

    #[test]
    fn test_version_event() {
        let events = Version.events();
        assert_eq!(events[0].name(), "version");
        assert!(events[0].args().is_empty());
    }
}
