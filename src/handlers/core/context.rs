//! Handler context and trait.

use crate::commands::CommandDispatcher;
use crate::error::HandlerResult;
use crate::quotes::QuoteProvider;
use crate::state::Session;
use slirc_line::InboundEvent;

/// Everything a handler may touch while reacting to one event.
pub struct Context<'a> {
    /// Session state, exclusively borrowed for the event.
    pub session: &'a mut Session,
    /// Quote collaborator.
    pub quotes: &'a dyn QuoteProvider,
    /// Bot-command sub-dispatcher for chat messages.
    pub commands: &'a CommandDispatcher,
}

impl Context<'_> {
    /// Whether `nick` is the bot itself.
    pub fn is_self(&self, nick: &str) -> bool {
        nick == self.session.nick()
    }
}

/// Reaction to one inbound verb.
pub trait Handler: Send + Sync {
    /// React to `event`, queueing any replies on the session.
    ///
    /// Errors are logged by the registry; only fatal ones end the session.
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult;
}
