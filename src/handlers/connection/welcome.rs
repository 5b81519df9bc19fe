//! Registration replies: welcome, end of greeting, nick in use.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use slirc_line::InboundEvent;
use tracing::{info, warn};

/// Handler for 001. Registration is complete; queued channels are joined.
pub struct WelcomeHandler;

impl Handler for WelcomeHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :server 001 <nick> :Welcome ...
        ctx.session.complete_registration(event.param(0));
        ctx.session.drain_join_queue();
        Ok(())
    }
}

/// Handler for 376 and 422. Starts the background quote load.
pub struct EndOfMotdHandler;

impl Handler for EndOfMotdHandler {
    fn handle(&self, ctx: &mut Context<'_>, _event: &InboundEvent) -> HandlerResult {
        ctx.quotes.load_all();
        Ok(())
    }
}

/// Handler for 433. Picks the next candidate nick and retries.
///
/// Only registration is renegotiated. Once the server has welcomed us the
/// nick it knows us by stands, so a later 433 (an operator's raw `NICK`, say)
/// is logged and otherwise ignored.
pub struct NickInUseHandler;

impl Handler for NickInUseHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :server 433 <current|*> <attempted> :Nickname is already in use
        let attempted = event
            .param(1)
            .map_or_else(|| ctx.session.nick().to_string(), str::to_string);
        if ctx.session.is_registered() {
            warn!(nick = %attempted, current = %ctx.session.nick(), "Nick change refused");
            return Ok(());
        }
        let Some(candidate) = ctx.session.next_collision_nick() else {
            warn!(nick = %attempted, "No nick left to try");
            return Err(HandlerError::NickRetriesExhausted {
                attempts: ctx.session.max_nick_retries(),
            });
        };
        info!(taken = %attempted, nick = %candidate, "Nick in use, retrying");
        ctx.session.change_nick(&candidate);
        Ok(())
    }
}
