//! The client orchestrator.
//!
//! [`IrcClient`] owns the connection, the handler registry, and the channel
//! registry. Inbound lines enter through [`dispatch`](IrcClient::dispatch):
//! each line is split, classified, applied to local state exactly once, and
//! republished as named events. Protocol replies the core owes the server
//! (PONG, VERSION, registration) are written back through the connection.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::channel::{ChannelSnapshot, IrcChannel, ModeFlag};
use crate::connection::{ConnectionSnapshot, IrcConnection, Transport};
use crate::error::{ClientError, Result};
use crate::event::{Event, Handlers};
use crate::message::variants::TypedMessage;
use crate::message::{parse_line, split_lines};
use crate::options::{ClientOptions, VERSION_DEFAULT};

/// A sans-IO IRC client core.
///
/// The embedder owns the socket and the timers: it feeds received data into
/// [`dispatch_all`](Self::dispatch_all) and, when flood protection is
/// enabled, calls [`tick`](Self::tick) at the configured period.
pub struct IrcClient {
    connection: IrcConnection,
    handlers: Handlers,
    channels: HashMap<String, IrcChannel>,
    options: ClientOptions,
    /// One-shot registration latch; reset on connect.
    registered: bool,
}

/// Serializable view of the whole client for diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct ClientSnapshot {
    /// The configured nickname.
    pub nickname: Option<String>,
    /// The version string answered to VERSION requests.
    pub version: String,
    /// Whether the registration commands have been sent.
    pub registered: bool,
    /// Connection diagnostics.
    pub connection: ConnectionSnapshot,
    /// Tracked channels, keyed by normalized name.
    pub channels: BTreeMap<String, ChannelSnapshot>,
    /// When this snapshot was taken.
    pub generated_at: DateTime<Utc>,
}

impl IrcClient {
    /// Create a client over the given transport.
    ///
    /// Channels named in the options get local state immediately; invalid
    /// names are skipped with a warning rather than failing construction.
    pub fn new(transport: Box<dyn Transport>, options: ClientOptions) -> Self {
        let mut channels = HashMap::new();
        for name in &options.channels {
            match IrcChannel::new(name) {
                Ok(channel) => {
                    channels.insert(channel.name().to_owned(), channel);
                }
                Err(error) => warn!(name = %name, %error, "skipping configured channel"),
            }
        }

        Self {
            connection: IrcConnection::new(transport, options.connection.clone()),
            handlers: Handlers::new(),
            channels,
            options,
            registered: false,
        }
    }

    /// Open the connection.
    ///
    /// Fails with [`ClientError::NickRequired`] when no nickname is set.
    /// Re-arms the registration latch: the USER/NICK pair is sent when the
    /// first data after connecting is dispatched.
    pub fn connect(&mut self) -> Result<()> {
        if self.options.nickname.is_none() {
            return Err(ClientError::NickRequired);
        }

        self.registered = false;
        self.connection.open()
    }

    /// Close the connection.
    pub fn disconnect(&mut self) -> Result<()> {
        self.connection.close()
    }

    /// Whether the transport reports an open stream.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Register a callback for a named event.
    pub fn on(&mut self, event: impl Into<String>, callback: impl FnMut(&Event) + 'static) {
        self.handlers.add(event, callback);
    }

    /// Register a callback for all events.
    pub fn on_global(&mut self, callback: impl FnMut(&Event) + 'static) {
        self.handlers.add_global(callback);
    }

    /// Send one raw protocol line.
    pub fn send(&mut self, command: &str) -> Result<()> {
        self.connection.write(command)
    }

    /// Send a PRIVMSG to a channel or nickname.
    ///
    /// The message is split on newlines and each non-empty trimmed line is
    /// sent as its own PRIVMSG, preserving order.
    pub fn say(&mut self, target: &str, message: &str) -> Result<()> {
        for line in message.split('\n') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.send(&format!("PRIVMSG {target} :{line}"))?;
        }
        Ok(())
    }

    /// Join a channel: send JOIN and create local state for it.
    pub fn join(&mut self, name: &str) -> Result<()> {
        let name = IrcChannel::normalize(name)?;
        self.send(&format!("JOIN {name}"))?;
        self.channel_mut(&name)?;
        Ok(())
    }

    /// Leave a channel. Local state is kept until the server confirms the
    /// part; unknown channels are a no-op.
    pub fn part(&mut self, name: &str) -> Result<()> {
        let name = IrcChannel::normalize(name)?;
        if self.channels.contains_key(&name) {
            self.send(&format!("PART {name}"))?;
        }
        Ok(())
    }

    /// The tracked channel for `name`, if any. Never creates state.
    pub fn channel(&self, name: &str) -> Option<&IrcChannel> {
        let name = IrcChannel::normalize(name).ok()?;
        self.channels.get(&name)
    }

    /// The tracked channel for `name`, created when missing.
    pub fn channel_mut(&mut self, name: &str) -> Result<&mut IrcChannel> {
        let channel = IrcChannel::new(name)?;
        Ok(self
            .channels
            .entry(channel.name().to_owned())
            .or_insert(channel))
    }

    /// All tracked channels, keyed by normalized name.
    pub fn channels(&self) -> &HashMap<String, IrcChannel> {
        &self.channels
    }

    /// The configured nickname.
    pub fn nickname(&self) -> Option<&str> {
        self.options.nickname.as_deref()
    }

    /// Set the nickname. When connected and the name actually changes, a
    /// NICK command announces it to the server.
    pub fn set_nickname(&mut self, nickname: impl Into<String>) -> Result<()> {
        let nickname = nickname.into();

        if self.is_connected() && self.options.nickname.as_deref() != Some(nickname.as_str()) {
            self.send(&format!("NICK :{nickname}"))?;
        }

        self.options.nickname = Some(nickname);
        Ok(())
    }

    /// The version string answered to VERSION requests.
    pub fn version(&self) -> &str {
        self.options.version.as_deref().unwrap_or(VERSION_DEFAULT)
    }

    /// Override the version string.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.options.version = Some(version.into());
    }

    /// Whether the registration commands have been sent.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Drain at most one flood-queued line; see
    /// [`IrcConnection::tick`](crate::connection::IrcConnection::tick).
    pub fn tick(&mut self) -> Result<bool> {
        self.connection.tick()
    }

    /// Dispatch a block of received data, line by line, in arrival order.
    pub fn dispatch_all(&mut self, data: &str) -> Result<()> {
        for line in split_lines(data) {
            self.dispatch(line)?;
        }
        Ok(())
    }

    /// Dispatch one received line.
    ///
    /// The first dispatch after connecting sends the USER/NICK registration
    /// pair before anything else. The line is then parsed, classified, and
    /// applied to local state exactly once; channel-bearing messages get
    /// their back-reference replaced by the registry's current state before
    /// the message's events are published.
    pub fn dispatch(&mut self, line: &str) -> Result<()> {
        if !self.registered {
            self.register()?;
        }

        let raw = parse_line(line);
        let mut message = TypedMessage::from_raw(&raw, line)?;
        debug!(command = %raw.command, "dispatching");

        self.apply(&message)?;

        if let Some(name) = message.channel_name() {
            if let Some(channel) = self.channels.get(name) {
                let channel = channel.clone();
                message.set_channel(channel);
            }
        }

        for event in message.events() {
            self.handlers.invoke(&event);
        }

        Ok(())
    }

    /// One-shot USER/NICK registration, fired on the first dispatch.
    fn register(&mut self) -> Result<()> {
        let nickname = self
            .options
            .nickname
            .clone()
            .ok_or(ClientError::NickRequired)?;

        debug!(nickname = %nickname, "registering");
        self.send(&format!("USER {nickname} * * :{nickname}"))?;
        self.send(&format!("NICK {nickname}"))?;
        self.registered = true;
        Ok(())
    }

    /// Apply a message's side effects to connection and channel state.
    fn apply(&mut self, message: &TypedMessage) -> Result<()> {
        match message {
            TypedMessage::Ping(ping) => {
                let reply = format!("PONG :{}", ping.token);
                self.send(&reply)?;
            }
            TypedMessage::Version(_) => {
                let reply = format!("VERSION {}", self.version());
                self.send(&reply)?;
            }
            TypedMessage::Join(join) => {
                self.channel_mut(join.channel.name())?.add_user(&join.user);
            }
            TypedMessage::Part(part) => {
                if let Some(channel) = self.channels.get_mut(part.channel.name()) {
                    channel.remove_user(&part.user);
                }
            }
            TypedMessage::Kick(kick) => {
                if kick.kicked.is_empty() {
                    return Ok(());
                }

                let own = self.options.nickname.as_deref() == Some(kick.kicked.as_str());
                if own && self.options.auto_rejoin {
                    self.join(kick.channel.name())?;
                } else if let Some(channel) = self.channels.get_mut(kick.channel.name()) {
                    channel.remove_user(&kick.kicked);
                }
            }
            TypedMessage::Quit(quit) => {
                for channel in self.channels.values_mut() {
                    channel.remove_user(&quit.user);
                }
            }
            TypedMessage::Mode(mode) => {
                // Malformed change codes and unknown letters degrade to
                // event-only messages; state is untouched.
                if let (Some(target), Some((sign, letter))) = (&mode.channel, mode.change()) {
                    if ModeFlag::from_char(letter).is_ok() {
                        let channel = self.channel_mut(target.name())?;
                        if sign == '+' {
                            channel.add_mode(&mode.nick, letter)?;
                        } else {
                            channel.remove_mode(&mode.nick, letter)?;
                        }
                    }
                }
            }
            TypedMessage::NameReply(reply) => {
                self.channel_mut(reply.channel.name())?
                    .add_users(&reply.names);
            }
            TypedMessage::Topic(topic) => {
                self.channel_mut(topic.channel.name())?
                    .set_topic(topic.topic.clone());
            }
            _ => {}
        }

        Ok(())
    }

    /// Serializable view for diagnostics.
    pub fn snapshot(&self) -> ClientSnapshot {
        ClientSnapshot {
            nickname: self.options.nickname.clone(),
            version: self.version().to_owned(),
            registered: self.registered,
            connection: self.connection.snapshot(),
            channels: self
                .channels
                .iter()
                .map(|(name, channel)| (name.clone(), channel.snapshot()))
                .collect(),
            generated_at: Utc::now(),
        }
    }

    /// The snapshot as a JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

impl std::fmt::Debug for IrcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrcClient")
            .field("nickname", &self.options.nickname)
            .field("registered", &self.registered)
            .field("channels", &self.channels.len())
            .field("connection", &self.connection)
            .finish()
    }
}
