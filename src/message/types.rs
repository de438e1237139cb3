//! Raw message parts and command classification.

/// Structural parts of one raw IRC line.
///
/// `source` is present only when the line began with `:`. `command` is
/// empty only for malformed input, which classifies as [`Kind::Generic`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RawMessage {
    /// The `:nick!user@host` or server origin, without the leading `:`.
    pub source: Option<String>,
    /// The verb or 3-digit numeric reply code.
    pub command: String,
    /// Trimmed middle parameters, everything between command and trailing.
    pub suffix: Option<String>,
    /// The trailing free-text parameter, kept verbatim.
    pub payload: Option<String>,
}

impl RawMessage {
    /// The nickname part of `source`: the text before the first `!`.
    pub fn source_nick(&self) -> &str {
        let source = self.source.as_deref().unwrap_or("");
        source.split('!').next().unwrap_or("")
    }

    /// The middle parameters, defaulting to an empty string.
    pub fn suffix_or_empty(&self) -> &str {
        self.suffix.as_deref().unwrap_or("")
    }

    /// The trailing payload, defaulting to an empty string.
    pub fn payload_or_empty(&self) -> &str {
        self.payload.as_deref().unwrap_or("")
    }
}

/// The closed set of message kinds the core understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Server keepalive.
    Ping,
    /// Channel or private message.
    Privmsg,
    /// Server or user notice.
    Notice,
    /// Channel join.
    Join,
    /// Channel part.
    Part,
    /// Network quit.
    Quit,
    /// Channel kick.
    Kick,
    /// User or channel mode change.
    Mode,
    /// Nickname change.
    Nick,
    /// Topic change or numeric 332 announcement.
    Topic,
    /// Numeric 353 NAMES reply.
    NameReply,
    /// Numeric 372 message-of-the-day line.
    Motd,
    /// Numeric 001 registration confirmation.
    Welcome,
    /// VERSION request.
    Version,
    /// Client-to-client protocol request.
    Ctcp,
    /// Direct client-to-client offer.
    Dcc,
    /// Channel invitation.
    Invite,
    /// Any other 3-digit numeric: free-form server console text.
    Console,
    /// Everything else.
    Generic,
}

/// Map a command to its message kind.
///
/// Literal verbs and the dedicated numerics map to their own kinds; any
/// other exactly-3-digit numeric is console output; the rest is generic.
pub fn classify(command: &str) -> Kind {
    match command {
        "PING" => Kind::Ping,
        "PRIVMSG" => Kind::Privmsg,
        "NOTICE" => Kind::Notice,
        "JOIN" => Kind::Join,
        "PART" => Kind::Part,
        "QUIT" => Kind::Quit,
        "KICK" => Kind::Kick,
        "MODE" => Kind::Mode,
        "NICK" => Kind::Nick,
        "INVITE" => Kind::Invite,
        "VERSION" => Kind::Version,
        "CTCP" => Kind::Ctcp,
        "DCC" => Kind::Dcc,
        "TOPIC" | "332" => Kind::Topic,
        "001" => Kind::Welcome,
        "353" => Kind::NameReply,
        "372" => Kind::Motd,
        other if other.len() == 3 && other.bytes().all(|b| b.is_ascii_digit()) => Kind::Console,
        _ => Kind::Generic,
    }
}
