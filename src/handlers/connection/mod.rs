//! Connection and registration handlers.
//!
//! Handles PING, ERROR, NICK, QUIT and the registration numerics.

mod ping;
mod quit;
mod welcome;

pub use ping::{ErrorHandler, PingHandler};
pub use quit::{FORCED_QUIT_MESSAGE, NickHandler, QuitHandler};
pub use welcome::{EndOfMotdHandler, NickInUseHandler, WelcomeHandler};
