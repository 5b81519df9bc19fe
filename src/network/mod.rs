//! Network module.
//!
//! Contains the line Transport, the per-session Connection loop, and the
//! reconnecting Client that ties them together.

mod client;
mod connection;
mod transport;

pub use client::Client;
pub use connection::Connection;
pub use transport::Transport;
