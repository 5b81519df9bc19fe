//! # slirc-line
//!
//! The line-oriented wire layer used by `slircbot`.
//!
//! ## Features
//!
//! - Newline-terminated line codec for tokio (`LineCodec`)
//! - Whitespace-split inbound parsing with `PING` special-casing ([`InboundEvent`])
//! - Identity reduction to bare nicknames ([`extract_nick`])
//! - Canonical channel names ([`ChannelName`])
//! - One-line-per-call outbound formatting ([`Outbound`])
//!
//! Nothing in this crate performs I/O or holds session state.
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_line::{ChannelName, InboundEvent, Outbound};
//!
//! let event = InboundEvent::parse(":alice!~a@host PRIVMSG #rust :hello there").unwrap();
//! assert_eq!(event.verb, "PRIVMSG");
//! assert_eq!(event.source_nick(), Some("alice"));
//! assert_eq!(event.trailing(1), "hello there");
//!
//! let reply = Outbound::privmsg(ChannelName::canonicalize("rust"), "hi alice");
//! assert_eq!(reply.to_string(), "PRIVMSG #rust :hi alice");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod ctcp;
pub mod error;
pub mod event;
#[cfg(feature = "tokio")]
pub mod line;
pub mod numeric;
pub mod outbound;

pub use self::chan::{is_channel, ChannelName, CHANNEL_SIGIL};
pub use self::error::{ProtocolError, Result};
pub use self::event::{extract_nick, InboundEvent};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::outbound::Outbound;
