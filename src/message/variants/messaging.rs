//! Messaging payloads: PRIVMSG, NOTICE, CTCP, DCC.

use super::Events;
use crate::channel::IrcChannel;
use crate::error::{ClientError, Result};
use crate::event::{names, Event, EventArg};
use crate::message::types::RawMessage;

/// A channel or private message.
#[derive(Clone, Debug, PartialEq)]
pub struct Privmsg {
    /// The sending nickname, from the source prefix.
    pub user: String,
    /// The channel or nickname the message was sent to.
    pub target: String,
    /// The message body, kept verbatim.
    pub text: String,
    /// Present when the target is a channel.
    pub channel: Option<IrcChannel>,
}

impl Privmsg {
    /// Extract sender, target, and body.
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let target = raw.suffix_or_empty().to_owned();

        let channel = if target.starts_with('#') {
            Some(
                IrcChannel::new(&target).map_err(|_| ClientError::ParseChannelName {
                    line: line.to_owned(),
                })?,
            )
        } else {
            None
        };

        Ok(Self {
            user: raw.source_nick().to_owned(),
            target,
            text: raw.payload_or_empty().to_owned(),
            channel,
        })
    }

    /// Channel targets publish `message [user, channel, text]` and
    /// `message#channel [user, channel, text]`; everything else publishes
    /// `privmsg [user, target, text]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();

        match &self.channel {
            Some(channel) => {
                let args = vec![
                    EventArg::text(&self.user),
                    EventArg::Channel(channel.clone()),
                    EventArg::text(&self.text),
                ];
                events.push(Event::new(names::MESSAGE, args.clone()));
                events.push(Event::new(
                    format!("{}{}", names::MESSAGE, channel.name()),
                    args,
                ));
            }
            None => {
                events.push(Event::new(
                    names::PRIVMSG,
                    vec![
                        EventArg::text(&self.user),
                        EventArg::text(&self.target),
                        EventArg::text(&self.text),
                    ],
                ));
            }
        }

        events
    }
}

/// A server or user notice.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    /// The combined notice text: middles and trailing joined and trimmed.
    pub message: String,
}

impl Notice {
    /// Extract the notice text.
    pub fn parse(raw: &RawMessage) -> Self {
        let message = format!("{} {}", raw.suffix_or_empty(), raw.payload_or_empty());
        Self {
            message: message.trim().to_owned(),
        }
    }

    /// `notice [message]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::NOTICE,
            vec![EventArg::text(&self.message)],
        ));
        events
    }
}

/// A client-to-client protocol request; only basic action/argument
/// extraction is performed.
#[derive(Clone, Debug, PartialEq)]
pub struct Ctcp {
    /// The CTCP action name, e.g. `ACTION` or `VERSION`.
    pub action: String,
    /// Whitespace-separated arguments following the action.
    pub args: Vec<String>,
    /// The trailing payload of the carrying line.
    pub command: String,
}

impl Ctcp {
    /// Extract action and arguments from the line's token positions.
    /// Missing positions default to empty values.
    pub fn parse(raw: &RawMessage, line: &str) -> Self {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.peek().is_some_and(|t| t.starts_with(':')) {
            tokens.next();
        }
        // Skip the CTCP verb itself.
        tokens.next();

        let action = tokens.next().unwrap_or("").to_owned();
        let args = tokens.map(str::to_owned).collect();

        Self {
            action,
            args,
            command: raw.payload_or_empty().to_owned(),
        }
    }

    /// `ctcp [action, args, command]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::CTCP,
            vec![
                EventArg::text(&self.action),
                EventArg::List(self.args.clone()),
                EventArg::text(&self.command),
            ],
        ));
        events
    }
}

/// A direct client-to-client offer; only metadata is extracted.
#[derive(Clone, Debug, PartialEq)]
pub struct Dcc {
    /// The DCC subcommand, e.g. `SEND`.
    pub action: String,
    /// Offered file name.
    pub filename: String,
    /// Sender address.
    pub ip: String,
    /// Sender port.
    pub port: String,
    /// Offered file size.
    pub file_size: String,
}

impl Dcc {
    /// Extract positional metadata from the line's token positions.
    /// Missing positions default to empty strings.
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.peek().is_some_and(|t| t.starts_with(':')) {
            tokens.next();
        }
        // Skip the DCC verb itself.
        tokens.next();

        let mut next = || tokens.next().unwrap_or("").to_owned();
        Self {
            action: next(),
            filename: next(),
            ip: next(),
            port: next(),
            file_size: next(),
        }
    }

    /// `dcc [filename, ip, port, file size]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::DCC,
            vec![
                EventArg::text(&self.filename),
                EventArg::text(&self.ip),
                EventArg::text(&self.port),
                EventArg::text(&self.file_size),
            ],
        ));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse_line;

    #[test]
    fn test_privmsg_channel_target() {
        let line = ":nick!user@host PRIVMSG #channel :Hello World!";
        let msg = Privmsg::parse(&parse_line(line), line).unwrap();
        assert_eq!(msg.user, "nick");
        assert_eq!(msg.target, "#channel");
        assert_eq!(msg.text, "Hello World!");
        assert!(msg.channel.is_some());

        let events = msg.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "message");
        assert_eq!(events[1].name(), "message#channel");
    }

    #[test]
    fn test_privmsg_user_target() {
        let line = ":nick!user@host PRIVMSG Bot :psst";
        let msg = Privmsg::parse(&parse_line(line), line).unwrap();
        assert!(msg.channel.is_none());

        let events = msg.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "privmsg");
        assert_eq!(
            events[0].args(),
            &[
                EventArg::text("nick"),
                EventArg::text("Bot"),
                EventArg::text("psst")
            ]
        );
    }

    #[test]
    fn test_privmsg_body_not_trimmed_internally() {
        let line = ":n!u@h PRIVMSG #c :a  b";
        let msg = Privmsg::parse(&parse_line(line), line).unwrap();
        assert_eq!(msg.text, "a  b");
    }

    #[test]
    fn test_notice_joins_suffix_and_payload() {
        let line = ":srv NOTICE Bot :server going down";
        let notice = Notice::parse(&parse_line(line));
        assert_eq!(notice.message, "Bot server going down");
    }

    #[test]
    fn test_ctcp_extraction() {
        let line = "CTCP ACTION waves hello";
        let ctcp = Ctcp::parse(&parse_line(line), line);
        assert_eq!(ctcp.action, "ACTION");
        assert_eq!(ctcp.args, ["waves", "hello"]);
    }

    #[test]
    fn test_ctcp_with_source_prefix() {
        let line = ":nick!u@h CTCP VERSION";
        let ctcp = Ctcp::parse(&parse_line(line), line);
        assert_eq!(ctcp.action, "VERSION");
        assert!(ctcp.args.is_empty());
    }

    #[test]
    fn test_dcc_metadata() {
        let line = "DCC SEND file.tar 3232235777 2000 1024";
        let dcc = Dcc::parse(line);
        assert_eq!(dcc.action, "SEND");
        assert_eq!(dcc.filename, "file.tar");
        assert_eq!(dcc.ip, "3232235777");
        assert_eq!(dcc.port, "2000");
        assert_eq!(dcc.file_size, "1024");
    }

    #[test]
    fn test_dcc_missing_positions_default_empty() {
        let dcc = Dcc::parse("DCC SEND");
        assert_eq!(dcc.action, "SEND");
        assert_eq!(dcc.filename, "");
        assert_eq!(dcc.file_size, "");
    }
}
