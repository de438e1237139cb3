//! Nom-based raw line splitter.
//!
//! IRC lines as this core consumes them have the loose shape
//!
//! ```text
//! [':' source SP] command SP [middle] [':' trailing]
//! ```
//!
//! Unlike a strict RFC parser, everything between the command and the first
//! `:` is kept as one trimmed `suffix` string and the trailing part is kept
//! verbatim. Splitting is total: a line without a command yields a
//! [`RawMessage`] with an empty command rather than an error.

use nom::{
    bytes::complete::take_while1, character::complete::char, sequence::preceded, IResult,
};

use super::types::RawMessage;

/// Parse the `:source` prefix (without the leading `:`).
fn parse_source(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command token.
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c| c != ' ')(input)
}

/// Split one raw line into its structural parts.
pub fn parse_line(line: &str) -> RawMessage {
    let line = line.trim();

    let (rest, source) = match parse_source(line) {
        Ok((rest, source)) => (rest, Some(source)),
        Err(_) => (line, None),
    };

    let rest = rest.trim_start();
    let (rest, command) = match parse_command(rest) {
        Ok((rest, command)) => (rest, command),
        Err(_) => ("", ""),
    };

    // One separator space; the remainder is kept verbatim so that trailing
    // payloads survive untrimmed.
    let rest = rest.strip_prefix(' ').unwrap_or(rest);

    let (suffix, payload) = match rest.split_once(':') {
        Some((before, after)) => (before.trim(), Some(after)),
        None => (rest.trim(), None),
    };

    RawMessage {
        source: source.map(str::to_owned),
        command: command.to_owned(),
        suffix: if suffix.is_empty() {
            None
        } else {
            Some(suffix.to_owned())
        },
        payload: payload.map(str::to_owned),
    }
}

/// Split stream data into non-empty lines, preserving arrival order.
///
/// Accepts `\r\n` and bare `\n` terminators.
pub fn split_lines(data: &str) -> impl Iterator<Item = &str> {
    data.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
}
