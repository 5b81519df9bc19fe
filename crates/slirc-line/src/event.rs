//! Inbound line parsing.
//!
//! Lines are split on single spaces. The parser only recognizes the source
//! and verb positions; everything after the verb is kept as raw fields, so a
//! trailing `:multi word text` parameter arrives as several fields with the
//! leading `:` still attached. Handlers rebuild such text with
//! [`InboundEvent::trailing`].
//!
//! ```text
//! PING :token                      -> verb "PING", args ["token"]
//! :nick!user@host VERB a b :c d    -> source "nick!user@host", verb "VERB", args ["a", "b", ":c", "d"]
//! ERROR :Closing link              -> no source, verb "ERROR", args [":Closing", "link"]
//! ```

use crate::error::{ProtocolError, Result};

/// Marker preceding the source field of a line.
pub const SOURCE_MARKER: char = ':';

/// One parsed inbound line.
///
/// Created per line, consumed by the dispatcher, then dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundEvent {
    /// Source identity without the leading marker (`nick!user@host` or a server name).
    pub source: Option<String>,
    /// Command verb or three-digit numeric.
    pub verb: String,
    /// Raw positional fields following the verb.
    pub args: Vec<String>,
}

impl InboundEvent {
    /// Parse a raw line (line terminator optional).
    pub fn parse(raw: &str) -> Result<Self> {
        let line = raw.trim_end_matches(['\r', '\n']);
        let mut fields = line.split(' ');

        let first = match fields.next() {
            Some(f) if !f.is_empty() => f,
            _ => return Err(ProtocolError::MalformedLine(line.to_string())),
        };

        if first == "PING" {
            // Liveness check: the echo token is the only argument.
            let token = fields.next().unwrap_or("").trim_start_matches(SOURCE_MARKER);
            return Ok(Self {
                source: None,
                verb: first.to_string(),
                args: vec![token.to_string()],
            });
        }

        let (source, verb) = match first.strip_prefix(SOURCE_MARKER) {
            Some(source) => match fields.next() {
                Some(verb) if !verb.is_empty() => (Some(source.to_string()), verb),
                _ => return Err(ProtocolError::MalformedLine(line.to_string())),
            },
            None => (None, first),
        };

        Ok(Self {
            source,
            verb: verb.to_string(),
            args: fields.map(str::to_string).collect(),
        })
    }

    /// Get the raw field at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Get the field at `index` with any leading `:` removed.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.arg(index).map(|a| a.trim_start_matches(SOURCE_MARKER))
    }

    /// Rebuild multi-word text from field `from` onwards.
    ///
    /// Fields are re-joined with single spaces and a single leading `:` is
    /// removed. Returns an empty string when `from` is past the end.
    pub fn trailing(&self, from: usize) -> String {
        let joined = self.args.get(from..).unwrap_or_default().join(" ");
        match joined.strip_prefix(SOURCE_MARKER) {
            Some(rest) => rest.to_string(),
            None => joined,
        }
    }

    /// The bare nickname of the source, if the line has one.
    pub fn source_nick(&self) -> Option<&str> {
        self.source.as_deref().map(extract_nick)
    }

    /// Whether the verb is a three-digit numeric reply.
    pub fn is_numeric(&self) -> bool {
        self.verb.len() == 3 && self.verb.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Reduce a source identity to its bare nickname.
///
/// Strips a leading source marker, then keeps everything before the first
/// `!`. Total over any input: a token without `!` is returned whole.
///
/// ```
/// use slirc_line::extract_nick;
///
/// assert_eq!(extract_nick(":alice!~a@host"), "alice");
/// assert_eq!(extract_nick("irc.example.net"), "irc.example.net");
/// ```
pub fn extract_nick(identity: &str) -> &str {
    let identity = identity.strip_prefix(SOURCE_MARKER).unwrap_or(identity);
    match identity.split_once('!') {
        Some((nick, _)) => nick,
        None => identity,
    }
}
