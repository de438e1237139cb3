//! Per-channel membership and mode state.
//!
//! A channel tracks its insertion-ordered member list and four independent
//! per-nick mode sets: operator, voice, away, and ban. The ban set is
//! deliberately decoupled from the others; removing a user from the channel
//! never removes their ban entry.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{ClientError, Result};

/// A per-nick channel mode flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeFlag {
    /// `o` - channel operator.
    Oper,
    /// `v` - voice.
    Voice,
    /// `a` - marked away.
    Away,
    /// `b` - banned.
    Ban,
}

impl ModeFlag {
    /// Parse a mode letter into its typed representation.
    ///
    /// Returns [`ClientError::InvalidMode`] for any letter outside
    /// `{o, v, a, b}`.
    pub fn from_char(letter: char) -> Result<Self> {
        match letter {
            'o' => Ok(Self::Oper),
            'v' => Ok(Self::Voice),
            'a' => Ok(Self::Away),
            'b' => Ok(Self::Ban),
            _ => Err(ClientError::InvalidMode { letter }),
        }
    }

    /// The protocol letter for this flag.
    pub fn as_char(&self) -> char {
        match self {
            Self::Oper => 'o',
            Self::Voice => 'v',
            Self::Away => 'a',
            Self::Ban => 'b',
        }
    }
}

/// State of a single IRC channel as seen by the client.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct IrcChannel {
    name: String,
    topic: Option<String>,
    /// Members in the order they were first seen.
    users: Vec<String>,
    ops: HashSet<String>,
    voiced: HashSet<String>,
    away: HashSet<String>,
    banned: HashSet<String>,
}

/// Serializable view of a channel for diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct ChannelSnapshot {
    /// Normalized channel name.
    pub name: String,
    /// Current topic, if one was announced.
    pub topic: Option<String>,
    /// Members in insertion order.
    pub users: Vec<String>,
    /// Nicks holding operator status.
    pub ops: Vec<String>,
    /// Nicks holding voice.
    pub voiced: Vec<String>,
    /// Nicks marked away.
    pub away: Vec<String>,
    /// Nicks with a ban entry.
    pub banned: Vec<String>,
}

impl IrcChannel {
    /// Create a channel with a normalized name.
    ///
    /// Normalization trims whitespace, unwraps the `...#PART: <name>` shape
    /// seen in malformed part notifications, and prepends `#` when missing.
    /// Normalization is idempotent. An empty name or a bare `#` fails with
    /// [`ClientError::InvalidName`].
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Self::normalize(name)?,
            ..Self::default()
        })
    }

    /// Normalize a channel name without building a channel.
    pub fn normalize(name: &str) -> Result<String> {
        let name = strip_part_marker(name.trim()).trim();

        if name.is_empty() || name == "#" {
            return Err(ClientError::InvalidName {
                name: name.to_owned(),
            });
        }

        // A second pass yields the same identity: the marker is gone and
        // the prefix is only added when absent.
        if name.starts_with('#') {
            Ok(name.to_owned())
        } else {
            Ok(format!("#{name}"))
        }
    }

    /// The normalized channel name, including the leading `#`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current topic, if known.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Set the channel topic.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = Some(topic.into());
    }

    /// Members in the order they were first seen.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Whether `nick` is currently a member.
    pub fn has_user(&self, nick: &str) -> bool {
        self.users.iter().any(|u| u == nick)
    }

    /// Add a user to the channel.
    ///
    /// A single leading `+` or `@` is stripped and promotes the nick into
    /// the voice or operator set. Insertion is idempotent and matches nicks
    /// case-sensitively.
    pub fn add_user(&mut self, nick: &str) {
        let nick = match nick.strip_prefix('@') {
            Some(rest) => {
                self.ops.insert(rest.to_owned());
                rest
            }
            None => match nick.strip_prefix('+') {
                Some(rest) => {
                    self.voiced.insert(rest.to_owned());
                    rest
                }
                None => nick,
            },
        };

        if nick.is_empty() {
            return;
        }

        if !self.has_user(nick) {
            self.users.push(nick.to_owned());
        }
    }

    /// Bulk-add users, applying the same prefix promotion as [`add_user`].
    ///
    /// [`add_user`]: IrcChannel::add_user
    pub fn add_users<I, S>(&mut self, nicks: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for nick in nicks {
            self.add_user(nick.as_ref());
        }
    }

    /// Remove a user from the member list and the op, voice, and away sets.
    ///
    /// The ban set is untouched; a ban outlives the presence of its target.
    pub fn remove_user(&mut self, nick: &str) {
        self.users.retain(|u| u != nick);
        self.ops.remove(nick);
        self.voiced.remove(nick);
        self.away.remove(nick);
    }

    /// Insert `nick` into the set for `letter`.
    ///
    /// Idempotent. Unknown letters fail with [`ClientError::InvalidMode`]
    /// and leave every set unchanged.
    pub fn add_mode(&mut self, nick: &str, letter: char) -> Result<()> {
        let flag = ModeFlag::from_char(letter)?;
        self.mode_set_mut(flag).insert(nick.to_owned());
        Ok(())
    }

    /// Remove `nick` from the set for `letter`.
    ///
    /// Idempotent. Unknown letters fail with [`ClientError::InvalidMode`]
    /// and leave every set unchanged.
    pub fn remove_mode(&mut self, nick: &str, letter: char) -> Result<()> {
        let flag = ModeFlag::from_char(letter)?;
        self.mode_set_mut(flag).remove(nick);
        Ok(())
    }

    /// Whether `nick` is in the set for `flag`.
    pub fn has_mode(&self, nick: &str, flag: ModeFlag) -> bool {
        self.mode_set(flag).contains(nick)
    }

    /// Nicks holding operator status.
    pub fn ops(&self) -> &HashSet<String> {
        &self.ops
    }

    /// Nicks holding voice.
    pub fn voiced(&self) -> &HashSet<String> {
        &self.voiced
    }

    /// Nicks marked away.
    pub fn away(&self) -> &HashSet<String> {
        &self.away
    }

    /// Nicks with a ban entry.
    pub fn banned(&self) -> &HashSet<String> {
        &self.banned
    }

    /// Serializable view for diagnostics.
    pub fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            name: self.name.clone(),
            topic: self.topic.clone(),
            users: self.users.clone(),
            ops: sorted(&self.ops),
            voiced: sorted(&self.voiced),
            away: sorted(&self.away),
            banned: sorted(&self.banned),
        }
    }

    fn mode_set(&self, flag: ModeFlag) -> &HashSet<String> {
        match flag {
            ModeFlag::Oper => &self.ops,
            ModeFlag::Voice => &self.voiced,
            ModeFlag::Away => &self.away,
            ModeFlag::Ban => &self.banned,
        }
    }

    fn mode_set_mut(&mut self, flag: ModeFlag) -> &mut HashSet<String> {
        match flag {
            ModeFlag::Oper => &mut self.ops,
            ModeFlag::Voice => &mut self.voiced,
            ModeFlag::Away => &mut self.away,
            ModeFlag::Ban => &mut self.banned,
        }
    }
}

/// Unwrap the channel name out of a `...#PART: <name>` marker.
///
/// Some servers relay parts as `user-name parted #PART: channel-name`;
/// everything after the marker is the real name.
fn strip_part_marker(name: &str) -> &str {
    match name.find("#PART:") {
        Some(idx) => name[idx + "#PART:".len()..].trim_start(),
        None => name,
    }
}

fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = set.iter().cloned().collect();
    items.sort();
    items
}
