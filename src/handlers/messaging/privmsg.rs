//! PRIVMSG handler: picks bot commands out of chat.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use slirc_line::{InboundEvent, ctcp, is_channel};
use tracing::trace;

/// Handler for PRIVMSG.
///
/// Channel messages are commands only when the bot is in the channel and the
/// body starts with the command prefix. Messages sent to the bot's own nick
/// are always commands; the prefix is optional there.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :nick!user@host PRIVMSG <target> :<text>
        let user = event.source_nick().ok_or(HandlerError::NeedMoreParams("PRIVMSG"))?;
        let target = event.param(0).ok_or(HandlerError::NeedMoreParams("PRIVMSG"))?;
        let body = event.trailing(1);
        let prefix = ctx.commands.prefix();

        if ctcp::is_ctcp(&body) {
            trace!(from = %user, "Ignoring CTCP request");
            return Ok(());
        }

        let text = if is_channel(target) {
            if !ctx.session.is_joined(target) {
                trace!(channel = %target, "Message for unjoined channel");
                return Ok(());
            }
            match body.strip_prefix(prefix) {
                Some(text) => text,
                None => return Ok(()),
            }
        } else if ctx.is_self(target) {
            body.strip_prefix(prefix).unwrap_or(body.as_str())
        } else {
            return Ok(());
        };

        ctx.commands
            .handle(ctx.session, ctx.quotes, text, target, user);
        Ok(())
    }
}
