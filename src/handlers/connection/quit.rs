//! NICK and QUIT handlers.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use slirc_line::InboundEvent;
use tracing::{debug, info, warn};

/// QUIT message sent when the server quits us without being asked.
pub const FORCED_QUIT_MESSAGE: &str = "Forced quit detected, reconnecting";

/// Handler for NICK changes.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :old!user@host NICK :new
        let old = event.source_nick().ok_or(HandlerError::NeedMoreParams("NICK"))?;
        let new = event
            .param(0)
            .filter(|n| !n.is_empty())
            .ok_or(HandlerError::NeedMoreParams("NICK"))?;

        if ctx.is_self(old) {
            info!(old = %old, new = %new, "Own nick changed");
            ctx.session.adopt_nick(new);
        } else {
            debug!(old = %old, new = %new, "Nick change");
            ctx.session.operators_mut().rename_user(old, new);
        }
        Ok(())
    }
}

/// Handler for QUIT.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        let nick = event.source_nick().ok_or(HandlerError::NeedMoreParams("QUIT"))?;

        if !ctx.is_self(nick) {
            ctx.session.operators_mut().forget_user(nick);
            return Ok(());
        }
        if ctx.session.is_quitting() {
            return Ok(());
        }

        warn!(reason = %event.trailing(0), "Forced quit detected");
        ctx.session.forced_quit(FORCED_QUIT_MESSAGE);
        Ok(())
    }
}
