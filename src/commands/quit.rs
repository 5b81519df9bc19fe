//! `quit` / `exit [message]`

use super::{BotCommand, BotEffect, CommandContext, Invocation};
use tracing::info;

/// Reply to anyone whose nick suggests another bot.
pub const BOT_REFUSAL: &str = "Bots can't harm me.";

pub struct QuitCommand;

impl BotCommand for QuitCommand {
    fn execute(&self, _ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        if inv.user.to_lowercase().contains("bot") {
            info!(user = %inv.user, "Refusing quit from a bot");
            return inv
                .channel
                .iter()
                .map(|channel| BotEffect::Say {
                    channel: channel.clone(),
                    text: BOT_REFUSAL.to_string(),
                })
                .collect();
        }

        let message = Some(inv.arg_text()).filter(|m| !m.is_empty());
        vec![BotEffect::Quit(message)]
    }
}
