//! Channel-affecting messages: JOIN, PART, KICK, MODE, TOPIC, NAMES, INVITE.

use std::sync::OnceLock;

use regex::Regex;

use super::Events;
use crate::channel::IrcChannel;
use crate::error::{ClientError, Result};
use crate::event::{names, Event, EventArg};
use crate::message::types::RawMessage;

/// Fixed structural pattern for PART lines: nick, userhost, channel, reason.
fn part_mask() -> &'static Regex {
    static MASK: OnceLock<Regex> = OnceLock::new();
    MASK.get_or_init(|| {
        Regex::new(r"(?i)^:(\S+)!(\S+@\S+)\sPART\s(\S+)\s?(.*)$").expect("static pattern")
    })
}

/// A user joined a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Join {
    /// The joining nickname, from the source prefix.
    pub user: String,
    /// The joined channel.
    pub channel: IrcChannel,
}

impl Join {
    /// Extract the joining user and channel.
    ///
    /// The channel name is the trailing payload; an empty or bare-`#` name
    /// fails with [`ClientError::ParseChannelName`].
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let channel =
            IrcChannel::new(raw.payload_or_empty()).map_err(|_| ClientError::ParseChannelName {
                line: line.to_owned(),
            })?;

        Ok(Self {
            user: raw.source_nick().to_owned(),
            channel,
        })
    }

    /// `join [user, channel name]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::JOIN,
            vec![
                EventArg::text(&self.user),
                EventArg::text(self.channel.name()),
            ],
        ));
        events
    }
}

/// A user left a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    /// The parting nickname.
    pub user: String,
    /// The `user@host` of the parting user.
    pub userhost: String,
    /// The channel being left.
    pub channel: IrcChannel,
    /// Part reason, empty when none was given.
    pub reason: String,
}

impl Part {
    /// Match the fixed PART pattern against the raw line.
    ///
    /// A mismatch fails with [`ClientError::ParseMessage`]; an unusable
    /// channel name with [`ClientError::ParseChannelName`].
    pub fn parse(line: &str) -> Result<Self> {
        let captures = part_mask()
            .captures(line.trim())
            .ok_or_else(|| ClientError::ParseMessage {
                command: "PART",
                line: line.to_owned(),
            })?;

        let channel =
            IrcChannel::new(&captures[3]).map_err(|_| ClientError::ParseChannelName {
                line: line.to_owned(),
            })?;

        let reason = captures[4].trim_start_matches(':').trim().to_owned();

        Ok(Self {
            user: captures[1].to_owned(),
            userhost: captures[2].to_owned(),
            channel,
            reason,
        })
    }

    /// `part [user, channel, reason]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::PART,
            vec![
                EventArg::text(&self.user),
                EventArg::Channel(self.channel.clone()),
                EventArg::text(&self.reason),
            ],
        ));
        events
    }
}

/// A user was kicked from a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Kick {
    /// The channel the kick happened in.
    pub channel: IrcChannel,
    /// The kicked nickname, empty when absent.
    pub kicked: String,
    /// The kicking nickname, from the source prefix.
    pub kicker: String,
    /// The kick message, empty when none was given.
    pub message: String,
}

impl Kick {
    /// Extract kicker, target channel, and kicked user.
    ///
    /// The middle parameters split into `[channel, kicked user]`; missing
    /// positions default to empty strings.
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let mut parts = raw.suffix_or_empty().split(' ');
        let target = parts.next().unwrap_or("");
        let kicked = parts.next().unwrap_or("");

        let channel = IrcChannel::new(target).map_err(|_| ClientError::ParseChannelName {
            line: line.to_owned(),
        })?;

        Ok(Self {
            channel,
            kicked: kicked.to_owned(),
            kicker: raw.source_nick().to_owned(),
            message: raw.payload_or_empty().to_owned(),
        })
    }

    /// `kick [channel, kicked, kicker, message]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::KICK,
            vec![
                EventArg::Channel(self.channel.clone()),
                EventArg::text(&self.kicked),
                EventArg::text(&self.kicker),
                EventArg::text(&self.message),
            ],
        ));
        events
    }
}

/// A user- or channel-mode change.
#[derive(Clone, Debug, PartialEq)]
pub struct Mode {
    /// The affected channel; absent for user-mode changes.
    pub channel: Option<IrcChannel>,
    /// The affected nickname.
    pub nick: String,
    /// The 2-character change code, e.g. `+o` or `-v`.
    pub mode: String,
}

impl Mode {
    /// Extract the change code and target.
    ///
    /// A middle section starting with `#` makes this a channel-mode
    /// message: it splits into `[channel, mode, nick]`, with absent
    /// positions defaulting to the trailing payload. Anything else is a
    /// user-mode change with no channel.
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let suffix = raw.suffix_or_empty();
        let payload = raw.payload_or_empty();

        if suffix.starts_with('#') {
            let mut parts = suffix.split(' ');
            let target = parts.next().unwrap_or("");
            let mode = parts.next().unwrap_or(payload);
            let nick = parts.next().unwrap_or(payload);

            let channel = IrcChannel::new(target).map_err(|_| ClientError::ParseChannelName {
                line: line.to_owned(),
            })?;

            Ok(Self {
                channel: Some(channel),
                nick: nick.to_owned(),
                mode: mode.to_owned(),
            })
        } else {
            Ok(Self {
                channel: None,
                nick: suffix.to_owned(),
                mode: payload.to_owned(),
            })
        }
    }

    /// The change direction and letter, when the code is well-formed.
    ///
    /// Codes outside `{+,-}` × one letter are not applied to state; they
    /// degrade to event-only messages by design.
    pub fn change(&self) -> Option<(char, char)> {
        let mut chars = self.mode.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(sign @ ('+' | '-')), Some(letter), None) => Some((sign, letter)),
            _ => None,
        }
    }

    /// `mode [channel or none, nick, mode]`.
    pub fn events(&self) -> Events {
        let channel = match &self.channel {
            Some(channel) => EventArg::Channel(channel.clone()),
            None => EventArg::None,
        };

        let mut events = Events::new();
        events.push(Event::new(
            names::MODE,
            vec![channel, EventArg::text(&self.nick), EventArg::text(&self.mode)],
        ));
        events
    }
}

/// A topic change or numeric 332 topic announcement.
#[derive(Clone, Debug, PartialEq)]
pub struct Topic {
    /// The channel whose topic changed.
    pub channel: IrcChannel,
    /// The new topic, trimmed.
    pub topic: String,
}

impl Topic {
    /// Extract the channel (first `#` token in the middles) and topic.
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let channel = first_channel_token(raw.suffix_or_empty(), line)?;

        Ok(Self {
            channel,
            topic: raw.payload_or_empty().trim().to_owned(),
        })
    }

    /// `topic [channel, topic]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::TOPIC,
            vec![
                EventArg::Channel(self.channel.clone()),
                EventArg::text(&self.topic),
            ],
        ));
        events
    }
}

/// A numeric 353 NAMES reply.
#[derive(Clone, Debug, PartialEq)]
pub struct NameReply {
    /// The channel the reply describes.
    pub channel: IrcChannel,
    /// Nicks as listed, including `+`/`@` prefixes.
    pub names: Vec<String>,
}

impl NameReply {
    /// Extract the channel (first `#` token in the middles) and nick list.
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let channel = first_channel_token(raw.suffix_or_empty(), line)?;

        let names = raw
            .payload_or_empty()
            .split_whitespace()
            .map(str::to_owned)
            .collect();

        Ok(Self { channel, names })
    }

    /// `names [channel, nicks]` plus `names#channel [nicks]`; nothing when
    /// the reply carried no nicks.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        if self.names.is_empty() {
            return events;
        }

        events.push(Event::new(
            names::NAMES,
            vec![
                EventArg::Channel(self.channel.clone()),
                EventArg::List(self.names.clone()),
            ],
        ));
        events.push(Event::new(
            format!("{}{}", names::NAMES, self.channel.name()),
            vec![EventArg::List(self.names.clone())],
        ));
        events
    }
}

/// An invitation to a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Invite {
    /// The channel invited to, from the trailing payload.
    pub channel: IrcChannel,
    /// The inviting nickname.
    pub user: String,
}

impl Invite {
    /// Extract the inviting user and channel. No state is mutated for
    /// invitations; the channel is a detached value.
    pub fn parse(raw: &RawMessage, line: &str) -> Result<Self> {
        let channel =
            IrcChannel::new(raw.payload_or_empty()).map_err(|_| ClientError::ParseChannelName {
                line: line.to_owned(),
            })?;

        Ok(Self {
            channel,
            user: raw.source_nick().to_owned(),
        })
    }

    /// `invite [channel, user]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::INVITE,
            vec![
                EventArg::Channel(self.channel.clone()),
                EventArg::text(&self.user),
            ],
        ));
        events
    }
}

/// Locate the first `#`-prefixed token in the middle parameters.
fn first_channel_token(suffix: &str, line: &str) -> Result<IrcChannel> {
    suffix
        .split_whitespace()
        .find(|token| token.starts_with('#'))
        .ok_or_else(|| ClientError::ParseChannelName {
            line: line.to_owned(),
        })
        .and_then(|token| {
            IrcChannel::new(token).map_err(|_| ClientError::ParseChannelName {
                line: line.to_owned(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse_line;

    fn raw(line: &str) -> RawMessage {
        parse_line(line)
    }

    #[test]
    fn test_join_extraction() {
        let line = ":nick!user@host JOIN :#channel";
        let join = Join::parse(&raw(line), line).unwrap();
        assert_eq!(join.user, "nick");
        assert_eq!(join.channel.name(), "#channel");
    }

    #[test]
    fn test_join_rejects_missing_channel() {
        let line = ":nick!user@host JOIN :";
        assert!(matches!(
            Join::parse(&raw(line), line),
            Err(ClientError::ParseChannelName { .. })
        ));

        let line = ":nick!user@host JOIN :#";
        assert!(matches!(
            Join::parse(&raw(line), line),
            Err(ClientError::ParseChannelName { .. })
        ));
    }

    #[test]
    fn test_part_pattern() {
        let line = ":nick!~user@host PART #channel :goodbye all";
        let part = Part::parse(line).unwrap();
        assert_eq!(part.user, "nick");
        assert_eq!(part.userhost, "~user@host");
        assert_eq!(part.channel.name(), "#channel");
        assert_eq!(part.reason, "goodbye all");
    }

    #[test]
    fn test_part_without_reason() {
        let part = Part::parse(":nick!u@h PART #channel").unwrap();
        assert_eq!(part.reason, "");
    }

    #[test]
    fn test_part_mismatch_raises() {
        assert!(matches!(
            Part::parse("PART #channel"),
            Err(ClientError::ParseMessage { command: "PART", .. })
        ));
    }

    #[test]
    fn test_kick_extraction() {
        let line = ":nick!u@h KICK #channel user :Get out!";
        let kick = Kick::parse(&raw(line), line).unwrap();
        assert_eq!(kick.channel.name(), "#channel");
        assert_eq!(kick.kicked, "user");
        assert_eq!(kick.kicker, "nick");
        assert_eq!(kick.message, "Get out!");
    }

    #[test]
    fn test_channel_mode_extraction() {
        let line = ":op!u@h MODE #channel +o nick";
        let mode = Mode::parse(&raw(line), line).unwrap();
        assert_eq!(mode.channel.as_ref().unwrap().name(), "#channel");
        assert_eq!(mode.mode, "+o");
        assert_eq!(mode.nick, "nick");
        assert_eq!(mode.change(), Some(('+', 'o')));
    }

    #[test]
    fn test_channel_mode_defaults_from_payload() {
        let line = ":op!u@h MODE #channel :nick";
        let mode = Mode::parse(&raw(line), line).unwrap();
        assert_eq!(mode.mode, "nick");
        assert_eq!(mode.nick, "nick");
        assert_eq!(mode.change(), None);
    }

    #[test]
    fn test_user_mode_has_no_channel() {
        let line = ":nick MODE nick :+i";
        let mode = Mode::parse(&raw(line), line).unwrap();
        assert!(mode.channel.is_none());
        assert_eq!(mode.nick, "nick");
        assert_eq!(mode.mode, "+i");
        assert_eq!(mode.change(), Some(('+', 'i')));
    }

    #[test]
    fn test_topic_numeric_form() {
        let line = ":srv 332 Bot #channel :The newest topic!";
        let topic = Topic::parse(&raw(line), line).unwrap();
        assert_eq!(topic.channel.name(), "#channel");
        assert_eq!(topic.topic, "The newest topic!");
    }

    #[test]
    fn test_name_reply_extraction() {
        let line = ":srv 353 Bot = #channel :Bot @Op +Voice";
        let reply = NameReply::parse(&raw(line), line).unwrap();
        assert_eq!(reply.channel.name(), "#channel");
        assert_eq!(reply.names, ["Bot", "@Op", "+Voice"]);
    }

    #[test]
    fn test_name_reply_without_channel_raises() {
        let line = ":srv 353 Bot = :Bot";
        assert!(matches!(
            NameReply::parse(&raw(line), line),
            Err(ClientError::ParseChannelName { .. })
        ));
    }

    #[test]
    fn test_name_reply_empty_list_publishes_nothing() {
        let line = ":srv 353 Bot = #channel :";
        let reply = NameReply::parse(&raw(line), line).unwrap();
        assert!(reply.events().is_empty());
    }

    #[test]
    fn test_invite_extraction() {
        let line = ":friend!u@h INVITE Bot :#hideout";
        let invite = Invite::parse(&raw(line), line).unwrap();
        assert_eq!(invite.user, "friend");
        assert_eq!(invite.channel.name(), "#hideout");
    }
}
