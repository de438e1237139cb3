//! The closed typed-message set.
//!
//! One struct per message kind carries that kind's extracted fields and
//! synthesizes its events. Side effects live in the client orchestrator,
//! which applies each message exactly once per dispatch; construction and
//! event synthesis here are pure.

pub mod channel;
pub mod messaging;
pub mod server;
pub mod user;

use smallvec::SmallVec;

use crate::channel::IrcChannel;
use crate::error::Result;
use crate::event::Event;
use crate::message::types::{classify, Kind, RawMessage};

pub use channel::{Invite, Join, Kick, Mode, NameReply, Part, Topic};
pub use messaging::{Ctcp, Dcc, Notice, Privmsg};
pub use server::{Console, Motd, Ping, Version, Welcome};
pub use user::{Nick, Quit};

/// Per-message event list; no message publishes more than two events.
pub type Events = SmallVec<[Event; 2]>;

/// A message that carries no extraction, side effect, or events.
#[derive(Clone, Debug, PartialEq)]
pub struct Generic {
    /// The raw line as received.
    pub line: String,
}

/// One parsed IRC message, classified by command.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum TypedMessage {
    /// Server keepalive.
    Ping(Ping),
    /// Channel or private message.
    Privmsg(Privmsg),
    /// Server or user notice.
    Notice(Notice),
    /// Channel join.
    Join(Join),
    /// Channel part.
    Part(Part),
    /// Network quit.
    Quit(Quit),
    /// Channel kick.
    Kick(Kick),
    /// User or channel mode change.
    Mode(Mode),
    /// Nickname change.
    Nick(Nick),
    /// Topic change or announcement.
    Topic(Topic),
    /// NAMES reply.
    NameReply(NameReply),
    /// Message-of-the-day line.
    Motd(Motd),
    /// Registration confirmation.
    Welcome(Welcome),
    /// VERSION request.
    Version(Version),
    /// Client-to-client protocol request.
    Ctcp(Ctcp),
    /// Direct client-to-client offer.
    Dcc(Dcc),
    /// Channel invitation.
    Invite(Invite),
    /// Free-form numeric server output.
    Console(Console),
    /// Anything the core does not model.
    Generic(Generic),
}

impl TypedMessage {
    /// Classify and construct a typed message from raw parts.
    ///
    /// `line` is the original raw line; a few kinds match fixed structural
    /// patterns against it. Structural failures raise typed errors to the
    /// caller.
    pub fn from_raw(raw: &RawMessage, line: &str) -> Result<Self> {
        Ok(match classify(&raw.command) {
            Kind::Ping => Self::Ping(Ping::parse(raw)),
            Kind::Privmsg => Self::Privmsg(Privmsg::parse(raw, line)?),
            Kind::Notice => Self::Notice(Notice::parse(raw)),
            Kind::Join => Self::Join(Join::parse(raw, line)?),
            Kind::Part => Self::Part(Part::parse(line)?),
            Kind::Quit => Self::Quit(Quit::parse(raw)),
            Kind::Kick => Self::Kick(Kick::parse(raw, line)?),
            Kind::Mode => Self::Mode(Mode::parse(raw, line)?),
            Kind::Nick => Self::Nick(Nick::parse(raw)),
            Kind::Topic => Self::Topic(Topic::parse(raw, line)?),
            Kind::NameReply => Self::NameReply(NameReply::parse(raw, line)?),
            Kind::Motd => Self::Motd(Motd::parse(raw)),
            Kind::Welcome => Self::Welcome(Welcome::parse(line)),
            Kind::Version => Self::Version(Version),
            Kind::Ctcp => Self::Ctcp(Ctcp::parse(raw, line)),
            Kind::Dcc => Self::Dcc(Dcc::parse(line)),
            Kind::Invite => Self::Invite(Invite::parse(raw, line)?),
            Kind::Console => Self::Console(Console::parse(raw)),
            Kind::Generic => Self::Generic(Generic {
                line: line.to_owned(),
            }),
        })
    }

    /// The channel name this message references, if any.
    ///
    /// Used by the orchestrator to resolve the back-reference against its
    /// registry by exact name; the lookup never creates channels.
    pub fn channel_name(&self) -> Option<&str> {
        match self {
            Self::Join(m) => Some(m.channel.name()),
            Self::Part(m) => Some(m.channel.name()),
            Self::Kick(m) => Some(m.channel.name()),
            Self::Topic(m) => Some(m.channel.name()),
            Self::NameReply(m) => Some(m.channel.name()),
            Self::Invite(m) => Some(m.channel.name()),
            Self::Privmsg(m) => m.channel.as_ref().map(IrcChannel::name),
            Self::Mode(m) => m.channel.as_ref().map(IrcChannel::name),
            _ => None,
        }
    }

    /// Replace the channel back-reference with a registry snapshot.
    pub fn set_channel(&mut self, channel: IrcChannel) {
        match self {
            Self::Join(m) => m.channel = channel,
            Self::Part(m) => m.channel = channel,
            Self::Kick(m) => m.channel = channel,
            Self::Topic(m) => m.channel = channel,
            Self::NameReply(m) => m.channel = channel,
            Self::Invite(m) => m.channel = channel,
            Self::Privmsg(m) => m.channel = Some(channel),
            Self::Mode(m) => m.channel = Some(channel),
            _ => {}
        }
    }

    /// The events this message publishes, in order.
    pub fn events(&self) -> Events {
        match self {
            Self::Ping(m) => m.events(),
            Self::Privmsg(m) => m.events(),
            Self::Notice(m) => m.events(),
            Self::Join(m) => m.events(),
            Self::Part(m) => m.events(),
            Self::Quit(m) => m.events(),
            Self::Kick(m) => m.events(),
            Self::Mode(m) => m.events(),
            Self::Nick(m) => m.events(),
            Self::Topic(m) => m.events(),
            Self::NameReply(m) => m.events(),
            Self::Motd(m) => m.events(),
            Self::Welcome(m) => m.events(),
            Self::Version(m) => m.events(),
            Self::Ctcp(m) => m.events(),
            Self::Dcc(m) => m.events(),
            Self::Invite(m) => m.events(),
            Self::Console(m) => m.events(),
            Self::Generic(_) => Events::new(),
        }
    }
}
