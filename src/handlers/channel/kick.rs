//! KICK and MODE handlers.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use slirc_line::{ChannelName, InboundEvent, Outbound, is_channel};
use tracing::warn;

/// Handler for KICK. Being kicked triggers an immediate rejoin.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :op!user@host KICK #channel victim :reason
        let channel = event.param(0).ok_or(HandlerError::NeedMoreParams("KICK"))?;
        let victim = event.param(1).ok_or(HandlerError::NeedMoreParams("KICK"))?;
        let channel = ChannelName::canonicalize(channel);

        if !ctx.is_self(victim) {
            ctx.session
                .operators_mut()
                .remove_operator(channel.as_str(), victim);
            return Ok(());
        }

        warn!(
            channel = %channel,
            by = event.source_nick().unwrap_or("?"),
            reason = %event.trailing(2),
            "Kicked from channel, rejoining"
        );
        ctx.session.forget_channel(&channel);
        ctx.session.join(&channel);
        Ok(())
    }
}

/// Handler for MODE.
///
/// Mode deltas are never applied; a change that may touch operator status
/// triggers a full membership-list refresh instead.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, event: &InboundEvent) -> HandlerResult {
        // :op!user@host MODE #channel +o-v nick nick
        let target = event.param(0).ok_or(HandlerError::NeedMoreParams("MODE"))?;
        let modes = event.param(1).ok_or(HandlerError::NeedMoreParams("MODE"))?;
        if !is_channel(target) || !modes.to_lowercase().contains('o') {
            return Ok(());
        }
        ctx.session
            .send(Outbound::Names(ChannelName::canonicalize(target)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;

    #[test]
    fn test_self_kick_rejoins() {
        let mut h = Harness::joined("#chan");
        h.session.operators_mut().set_operators("#chan", ["alice"]);
        h.feed(":alice!a@h KICK #chan Bot :out");
        assert_eq!(h.sent(), vec!["JOIN #chan"]);
        assert!(h.session.is_joined("#chan"));
        // The rejoin starts from an empty operator set.
        assert!(h.session.operators().operators("#chan").unwrap().is_empty());
    }

    #[test]
    fn test_other_kick_drops_op() {
        let mut h = Harness::joined("#chan");
        h.session.operators_mut().set_operators("#chan", ["alice", "bob"]);
        h.feed(":alice!a@h KICK #chan bob :bye");
        assert!(h.sent().is_empty());
        assert!(!h.session.operators().operators("#chan").unwrap().contains("bob"));
    }

    #[test]
    fn test_op_mode_requests_names() {
        let mut h = Harness::joined("#chan");
        h.feed(":alice!a@h MODE #chan +o bob");
        assert_eq!(h.sent(), vec!["NAMES #chan"]);
        h.feed(":alice!a@h MODE #chan -O bob");
        assert_eq!(h.sent(), vec!["NAMES #chan"]);
    }

    #[test]
    fn test_unrelated_modes_ignored() {
        let mut h = Harness::joined("#chan");
        h.feed(":alice!a@h MODE #chan +v bob");
        h.feed(":Bot MODE Bot :+iw");
        h.feed(":alice!a@h MODE #chan");
        assert!(h.sent().is_empty());
    }
}
