//! Event handler registry and dispatch.
//!
//! The `Registry` maps verbs to handlers and keeps per-verb usage counts.
//! Verbs without a handler are ignored.

use super::context::{Context, Handler};
use crate::error::HandlerResult;
use crate::handlers::{
    channel::{EndOfNamesHandler, JoinHandler, KickHandler, ModeHandler, NamesReplyHandler, PartHandler},
    connection::{
        EndOfMotdHandler, ErrorHandler, NickHandler, NickInUseHandler, PingHandler, QuitHandler,
        WelcomeHandler,
    },
    messaging::PrivmsgHandler,
};
use crate::telemetry::event_span;
use slirc_line::InboundEvent;
use slirc_line::numeric::{
    ERR_NICKNAMEINUSE, ERR_NOMOTD, RPL_ENDOFMOTD, RPL_ENDOFNAMES, RPL_NAMREPLY, RPL_WELCOME,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Registry of event handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Events seen per verb.
    event_counts: HashMap<&'static str, AtomicU64>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection and registration
        handlers.insert("PING", Box::new(PingHandler));
        handlers.insert(RPL_WELCOME, Box::new(WelcomeHandler));
        handlers.insert(RPL_ENDOFMOTD, Box::new(EndOfMotdHandler));
        handlers.insert(ERR_NOMOTD, Box::new(EndOfMotdHandler));
        handlers.insert(ERR_NICKNAMEINUSE, Box::new(NickInUseHandler));
        handlers.insert("NICK", Box::new(NickHandler));
        handlers.insert("QUIT", Box::new(QuitHandler));
        handlers.insert("ERROR", Box::new(ErrorHandler));

        // Channel membership
        handlers.insert(RPL_NAMREPLY, Box::new(NamesReplyHandler));
        handlers.insert(RPL_ENDOFNAMES, Box::new(EndOfNamesHandler));
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PART", Box::new(PartHandler));
        handlers.insert("MODE", Box::new(ModeHandler));
        handlers.insert("KICK", Box::new(KickHandler));

        // Messaging
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));

        let event_counts = handlers
            .keys()
            .map(|&verb| (verb, AtomicU64::new(0)))
            .collect();

        Self {
            handlers,
            event_counts,
        }
    }

    /// Per-verb event counts, most frequent first. Unused verbs are omitted.
    pub fn event_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .event_counts
            .iter()
            .map(|(verb, count)| (*verb, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch an event to the handler for its verb.
    pub fn dispatch(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        let verb = event.verb.to_ascii_uppercase();
        let Some(handler) = self.handlers.get(verb.as_str()) else {
            trace!(verb = %verb, "No handler for verb");
            return Ok(());
        };

        if let Some(counter) = self.event_counts.get(verb.as_str()) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let _enter = event_span(event).entered();
        let result = handler.handle(ctx, event);
        if let Err(ref e) = result {
            debug!(verb = %verb, error = %e, code = e.error_code(), "Event handler error");
        }
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
