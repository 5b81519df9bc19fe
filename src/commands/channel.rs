//! Channel commands: join, part.
//!
//! Both read their channel argument from the untouched token list, so the
//! same syntax works in a channel and in a direct message.

use super::{BotCommand, BotEffect, CommandContext, Invocation};
use crate::state::PrivilegeLevel;
use slirc_line::{ChannelName, is_channel};
use tracing::debug;

/// `join <channel>`
pub struct JoinCommand;

impl BotCommand for JoinCommand {
    fn execute(&self, _ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        match inv.tokens.first() {
            Some(target) => vec![BotEffect::Join(ChannelName::canonicalize(target))],
            None => vec![],
        }
    }
}

/// `part [channel]`
///
/// Without an argument, leaves the invoking channel. Naming a channel
/// requires global privilege.
pub struct PartCommand;

impl BotCommand for PartCommand {
    fn execute(&self, ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        let Some(target) = inv.tokens.first() else {
            return inv.channel.iter().cloned().map(BotEffect::Part).collect();
        };

        if ctx.session.privilege_of(inv.context, inv.user) < PrivilegeLevel::Global {
            debug!(user = %inv.user, target = %target, "Parting another channel needs global privilege");
            return vec![];
        }
        if !is_channel(target) {
            return vec![];
        }
        vec![BotEffect::Part(ChannelName::canonicalize(target))]
    }
}
