//! Channel membership handlers.

mod join;
mod kick;
mod names;

pub use join::{JoinHandler, PartHandler};
pub use kick::{KickHandler, ModeHandler};
pub use names::{EndOfNamesHandler, NamesReplyHandler};
