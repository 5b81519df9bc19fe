//! Integration test common infrastructure.
//!
//! Provides a fake IRC server for the bot to connect to and a helper that
//! spawns the bot binary against it.

pub mod bot;
pub mod server;

#[allow(unused_imports)]
pub use bot::TestBot;
#[allow(unused_imports)]
pub use server::{BotLink, TestServer};
