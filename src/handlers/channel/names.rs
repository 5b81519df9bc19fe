//! Membership-list replies (353, 366).

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use slirc_line::{ChannelName, InboundEvent, is_channel};

/// Handler for 353 (RPL_NAMREPLY).
///
/// `:server 353 <me> <symbol> <channel> :<entry> <entry> ...`
///
/// The channel is the first channel-looking field after our nick, so
/// servers that omit the visibility symbol are handled too.
pub struct NamesReplyHandler;

impl Handler for NamesReplyHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        let position = event
            .args
            .iter()
            .skip(1)
            .position(|a| is_channel(a))
            .map(|p| p + 1)
            .ok_or(HandlerError::NeedMoreParams("353"))?;
        let channel = ChannelName::canonicalize(&event.args[position]);
        let entries = event.args[position + 1..]
            .iter()
            .map(|e| e.trim_start_matches(':'))
            .filter(|e| !e.is_empty());

        ctx.session.names_reply(&channel, entries);
        Ok(())
    }
}

/// Handler for 366 (RPL_ENDOFNAMES).
///
/// `:server 366 <me> <channel> :End of /NAMES list.`
pub struct EndOfNamesHandler;

impl Handler for EndOfNamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        let channel = event.param(1).ok_or(HandlerError::NeedMoreParams("366"))?;
        ctx.session.end_of_names(&ChannelName::canonicalize(channel));
        Ok(())
    }
}
