//! IRC event handlers.
//!
//! This module contains the Handler trait and the verb-keyed registry that
//! routes each parsed inbound line to its handler. Handlers run one at a
//! time against the exclusively borrowed session; anything they send is
//! queued in the session outbox and flushed by the connection loop.

mod channel;
mod connection;
mod core;
mod messaging;

pub use self::core::{Context, Handler, Registry};
