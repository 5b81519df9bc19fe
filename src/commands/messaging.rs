//! Message commands: say, act, raw.

use super::{BotCommand, BotEffect, CommandContext, Invocation};

/// `say` / `echo` / `print <text>`
pub struct SayCommand;

impl BotCommand for SayCommand {
    fn execute(&self, _ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        match (&inv.channel, inv.args.is_empty()) {
            (Some(channel), false) => vec![BotEffect::Say {
                channel: channel.clone(),
                text: inv.arg_text(),
            }],
            _ => vec![],
        }
    }
}

/// `act` / `do` / `me` / `em` / `emote <text>`
pub struct ActCommand;

impl BotCommand for ActCommand {
    fn execute(&self, _ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        match (&inv.channel, inv.args.is_empty()) {
            (Some(channel), false) => vec![BotEffect::Act {
                channel: channel.clone(),
                text: inv.arg_text(),
            }],
            _ => vec![],
        }
    }
}

/// `raw` / `irccmd` / `cmd` / `command <line>`
///
/// Sends the line verbatim. The codec still cuts it at the first line
/// ending, so one invocation is at most one protocol line.
pub struct RawCommand;

impl BotCommand for RawCommand {
    fn takes_channel_arg(&self) -> bool {
        false
    }

    fn execute(&self, _ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        if inv.args.is_empty() {
            return vec![];
        }
        vec![BotEffect::Raw(inv.arg_text())]
    }
}
