//! CTCP framing helpers.
//!
//! CTCP payloads travel inside PRIVMSG/NOTICE text, delimited by `\x01`.
//!
//! # Reference
//! - CTCP specification: <https://modern.ircdocs.horse/ctcp.html>

/// The CTCP delimiter character (`\x01`).
pub const CTCP_DELIM: char = '\x01';

/// Frame `text` as a CTCP ACTION (`/me`) payload.
///
/// ```
/// assert_eq!(slirc_line::ctcp::action("waves"), "\x01ACTION waves\x01");
/// ```
pub fn action(text: &str) -> String {
    format!("{CTCP_DELIM}ACTION {text}{CTCP_DELIM}")
}

/// Whether a message body is a CTCP payload rather than plain text.
pub fn is_ctcp(body: &str) -> bool {
    body.starts_with(CTCP_DELIM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_framing() {
        assert_eq!(action("dances around"), "\x01ACTION dances around\x01");
    }

    #[test]
    fn test_is_ctcp() {
        assert!(is_ctcp("\x01VERSION\x01"));
        assert!(!is_ctcp("VERSION"));
    }
}
