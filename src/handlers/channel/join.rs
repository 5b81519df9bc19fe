//! JOIN and PART observed from the server.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use slirc_line::{ChannelName, InboundEvent, Outbound};
use tracing::debug;

/// Handler for JOIN.
///
/// Our own JOIN echo needs nothing: membership was recorded when the JOIN
/// was sent. Anyone else is greeted and told their access level.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :nick!user@host JOIN :#channel
        let nick = event.source_nick().ok_or(HandlerError::NeedMoreParams("JOIN"))?;
        let channel = event.arg(0).ok_or(HandlerError::NeedMoreParams("JOIN"))?;
        if ctx.is_self(nick) {
            return Ok(());
        }

        let channel = ChannelName::canonicalize(channel);
        let level = ctx.session.privilege_of(channel.as_str(), nick);
        debug!(nick = %nick, channel = %channel, level = %level, "User joined");

        ctx.session.send(Outbound::Names(channel.clone()));
        ctx.session
            .send_to_channel(channel.as_str(), &format!("Welcome to {channel}, {nick}!"));
        ctx.session.send_to_nick(
            nick,
            &format!("Your current access level in {channel} is {level}"),
        );
        Ok(())
    }
}

/// Handler for PART.
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :nick!user@host PART #channel [:reason]
        let nick = event.source_nick().ok_or(HandlerError::NeedMoreParams("PART"))?;
        let channel = event.param(0).ok_or(HandlerError::NeedMoreParams("PART"))?;
        if ctx.is_self(nick) {
            return Ok(());
        }
        ctx.session
            .operators_mut()
            .remove_operator(ChannelName::canonicalize(channel).as_str(), nick);
        Ok(())
    }
}
