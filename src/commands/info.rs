//! Static information commands: info, help.

use super::{BotCommand, BotEffect, CommandContext, Invocation};

/// `info` / `about`
pub struct InfoCommand;

impl BotCommand for InfoCommand {
    fn execute(&self, ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        let text = format!(
            "{} {}: an IRC bot. Type {}help for a list of commands.",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            ctx.prefix
        );
        reply(inv, text)
    }
}

/// `help`
pub struct HelpCommand;

impl BotCommand for HelpCommand {
    fn execute(&self, ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        let p = ctx.prefix;
        let text = format!(
            "Commands: {p}say <text>, {p}act <text>, {p}raw <line>, {p}join <channel>, \
             {p}part [channel], {p}quote [name [n]], {p}quit [message], {p}info"
        );
        reply(inv, text)
    }
}

fn reply(inv: &Invocation<'_>, text: String) -> Vec<BotEffect> {
    vec![BotEffect::Reply {
        channel: inv.channel.clone(),
        nick: inv.user.to_string(),
        text,
    }]
}
