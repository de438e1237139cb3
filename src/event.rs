//! Named events and the handler registry.
//!
//! Every dispatched message is republished as zero or more named events.
//! Handlers are registered for an exact event name or globally (for all
//! events) and are invoked synchronously, in registration order, with
//! global handlers running first.

use std::collections::HashMap;

use crate::channel::IrcChannel;

/// Event name constants published by the client core.
pub mod names {
    /// PING received; args: `[token]`.
    pub const PING: &str = "ping";
    /// Channel message; args: `[user, channel, text]`. Also published as
    /// `message#channel`.
    pub const MESSAGE: &str = "message";
    /// Private message to the client; args: `[user, target, text]`.
    pub const PRIVMSG: &str = "privmsg";
    /// A user joined a channel; args: `[user, channel name]`.
    pub const JOIN: &str = "join";
    /// A user left a channel; args: `[user, channel, reason]`.
    pub const PART: &str = "part";
    /// A user quit the network; args: `[user, reason]`.
    pub const QUIT: &str = "quit";
    /// A user was kicked; args: `[channel, user, kicker, message]`.
    pub const KICK: &str = "kick";
    /// A mode change; args: `[channel or none, nick, mode]`.
    pub const MODE: &str = "mode";
    /// A nickname change; args: `[old, new]`.
    pub const NICK: &str = "nick";
    /// Channel topic set or announced; args: `[channel, topic]`.
    pub const TOPIC: &str = "topic";
    /// NAMES reply; args: `[channel, nicks]`. Also published as
    /// `names#channel` with args `[nicks]`.
    pub const NAMES: &str = "names";
    /// Server or user notice; args: `[message]`.
    pub const NOTICE: &str = "notice";
    /// Channel invitation; args: `[channel, user]`.
    pub const INVITE: &str = "invite";
    /// Free-form numeric server output; args: `[user, message]`.
    pub const CONSOLE: &str = "console";
    /// A line of the message of the day; args: `[text]`.
    pub const MOTD: &str = "motd";
    /// Registration completed (numeric 001); args:
    /// `[server, user, message, hostmask]`.
    pub const REGISTERED: &str = "registered";
    /// VERSION request answered; args: `[]`.
    pub const VERSION: &str = "version";
    /// CTCP request; args: `[action, args, command]`.
    pub const CTCP: &str = "ctcp";
    /// DCC offer metadata; args: `[filename, ip, port, file size]`.
    pub const DCC: &str = "dcc";
}

/// Key under which global handlers are stored.
const WILDCARD: &str = "*";

/// A single positional event argument.
#[derive(Clone, Debug, PartialEq)]
pub enum EventArg {
    /// A text value. Missing fields surface as an empty string.
    Text(String),
    /// A list of nicknames.
    List(Vec<String>),
    /// A channel snapshot, resolved by name against the client registry
    /// where possible.
    Channel(IrcChannel),
    /// An absent value (for example the channel of a user-mode change).
    None,
}

impl EventArg {
    /// Convenience constructor for text arguments.
    pub fn text(value: impl Into<String>) -> Self {
        EventArg::Text(value.into())
    }
}

/// A named event with its ordered argument list.
///
/// Events are created per dispatched message, consumed immediately by
/// [`Handlers::invoke`], and never retained.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    name: String,
    args: Vec<EventArg>,
}

impl Event {
    /// Create a new event.
    pub fn new(name: impl Into<String>, args: Vec<EventArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The positional arguments.
    pub fn args(&self) -> &[EventArg] {
        &self.args
    }
}

/// Callback invoked with a dispatched event.
pub type Callback = Box<dyn FnMut(&Event)>;

/// Append-only name-to-callback multimap with wildcard support.
///
/// There is no removal API; handlers live as long as the registry.
#[derive(Default)]
pub struct Handlers {
    handlers: HashMap<String, Vec<Callback>>,
}

impl Handlers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a named event.
    pub fn add(&mut self, event: impl Into<String>, callback: impl FnMut(&Event) + 'static) {
        self.handlers
            .entry(event.into())
            .or_default()
            .push(Box::new(callback));
    }

    /// Register a callback for all events.
    pub fn add_global(&mut self, callback: impl FnMut(&Event) + 'static) {
        self.add(WILDCARD, callback);
    }

    /// Invoke all handlers registered for `event`.
    ///
    /// Global handlers run first, then exact-name handlers, preserving
    /// registration order within each group. Handlers run synchronously
    /// and are not isolated from each other: a panicking handler aborts
    /// delivery to the remaining handlers.
    pub fn invoke(&mut self, event: &Event) {
        // Two separate lookups: the wildcard bucket and the exact bucket
        // may alias when the event is literally named "*".
        if event.name() != WILDCARD {
            if let Some(global) = self.handlers.get_mut(WILDCARD) {
                for handler in global.iter_mut() {
                    handler(event);
                }
            }
        }

        if let Some(exact) = self.handlers.get_mut(event.name()) {
            for handler in exact.iter_mut() {
                handler(event);
            }
        }
    }

    /// Names for which at least one handler is registered.
    pub fn event_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("Handlers").field("handlers", &counts).finish()
    }
}
