//! PING and ERROR handlers.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use slirc_line::{InboundEvent, Outbound};
use tracing::warn;

/// Handler for PING. Answered before anything else in the outbox is flushed.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // PING <token>
        let token = event.param(0).unwrap_or("");
        ctx.session.send(Outbound::Pong(token.to_string()));
        Ok(())
    }
}

/// Handler for ERROR, sent by the server right before it closes the link.
pub struct ErrorHandler;

impl Handler for ErrorHandler {
    fn handle(&self, _ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        warn!(reason = %event.trailing(0), "Server closed link");
        Ok(())
    }
}
