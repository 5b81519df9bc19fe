//! Outbound protocol lines.
//!
//! Each [`Outbound`] value formats to exactly one protocol line, without the
//! terminator (the codec appends it).
//!
//! ```
//! use slirc_line::{ChannelName, Outbound};
//!
//! assert_eq!(Outbound::Pong("abc123".into()).to_string(), "PONG abc123");
//! assert_eq!(
//!     Outbound::notice("alice", "hi").to_string(),
//!     "NOTICE alice :hi"
//! );
//! assert_eq!(
//!     Outbound::Join(ChannelName::canonicalize("rust")).to_string(),
//!     "JOIN #rust"
//! );
//! ```

use std::fmt;

use crate::chan::ChannelName;
use crate::ctcp;

/// A single line to send to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    /// `PONG <token>`
    Pong(String),
    /// `NICK <nick>`
    Nick(String),
    /// `USER <username> 0 * :<realname>`
    User {
        /// Ident / username.
        username: String,
        /// Real name / GECOS.
        realname: String,
    },
    /// `JOIN <channel>`
    Join(ChannelName),
    /// `PART <channel>`
    Part(ChannelName),
    /// `NAMES <channel>`
    Names(ChannelName),
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nick.
        target: String,
        /// Message body.
        text: String,
    },
    /// `NOTICE <target> :<text>`
    Notice {
        /// Channel or nick.
        target: String,
        /// Message body.
        text: String,
    },
    /// `QUIT :<message>`
    Quit(String),
    /// Passed through verbatim.
    Raw(String),
}

impl Outbound {
    /// Build a PRIVMSG line.
    pub fn privmsg(target: impl fmt::Display, text: impl Into<String>) -> Self {
        Self::Privmsg {
            target: target.to_string(),
            text: text.into(),
        }
    }

    /// Build a NOTICE line.
    pub fn notice(target: impl fmt::Display, text: impl Into<String>) -> Self {
        Self::Notice {
            target: target.to_string(),
            text: text.into(),
        }
    }

    /// Build a CTCP ACTION sent as PRIVMSG.
    pub fn action(target: impl fmt::Display, text: &str) -> Self {
        Self::privmsg(target, ctcp::action(text))
    }

    /// The verb this line will carry on the wire.
    pub fn verb(&self) -> &str {
        match self {
            Self::Pong(_) => "PONG",
            Self::Nick(_) => "NICK",
            Self::User { .. } => "USER",
            Self::Join(_) => "JOIN",
            Self::Part(_) => "PART",
            Self::Names(_) => "NAMES",
            Self::Privmsg { .. } => "PRIVMSG",
            Self::Notice { .. } => "NOTICE",
            Self::Quit(_) => "QUIT",
            Self::Raw(raw) => raw.split(' ').next().unwrap_or(""),
        }
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pong(token) => write!(f, "PONG {token}"),
            Self::Nick(nick) => write!(f, "NICK {nick}"),
            Self::User { username, realname } => write!(f, "USER {username} 0 * :{realname}"),
            Self::Join(channel) => write!(f, "JOIN {channel}"),
            Self::Part(channel) => write!(f, "PART {channel}"),
            Self::Names(channel) => write!(f, "NAMES {channel}"),
            Self::Privmsg { target, text } => write!(f, "PRIVMSG {target} :{text}"),
            Self::Notice { target, text } => write!(f, "NOTICE {target} :{text}"),
            Self::Quit(message) => write!(f, "QUIT :{message}"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}
