//! User lifecycle messages: NICK and QUIT.

use super::Events;
use crate::event::{names, Event, EventArg};
use crate::message::types::RawMessage;

/// A nickname change.
#[derive(Clone, Debug, PartialEq)]
pub struct Nick {
    /// The nickname before the change, from the source prefix.
    pub old: String,
    /// The nickname after the change.
    pub new: String,
}

impl Nick {
    /// Extract old and new nicknames. Servers send the new nickname as
    /// either the trailing or a middle parameter.
    pub fn parse(raw: &RawMessage) -> Self {
        let new = match raw.payload.as_deref() {
            Some(payload) if !payload.is_empty() => payload,
            _ => raw.suffix_or_empty(),
        };

        Self {
            old: raw.source_nick().to_owned(),
            new: new.to_owned(),
        }
    }

    /// `nick [old, new]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::NICK,
            vec![EventArg::text(&self.old), EventArg::text(&self.new)],
        ));
        events
    }
}

/// A network quit.
#[derive(Clone, Debug, PartialEq)]
pub struct Quit {
    /// The quitting nickname, from the source prefix.
    pub user: String,
    /// The quit reason, possibly empty.
    pub reason: String,
}

impl Quit {
    /// Extract the quitting user and reason.
    pub fn parse(raw: &RawMessage) -> Self {
        Self {
            user: raw.source_nick().to_owned(),
            reason: raw.payload_or_empty().to_owned(),
        }
    }

    /// `quit [user, reason]`.
    pub fn events(&self) -> Events {
        let mut events = Events::new();
        events.push(Event::new(
            names::QUIT,
            vec![EventArg::text(&self.user), EventArg::text(&self.reason)],
        ));
        events
    }
}
