//! Bot command dispatch.
//!
//! Commands arrive as the body of a chat message with the prefix already
//! removed. The dispatcher gates on privilege, tokenizes the text, resolves
//! the target channel and runs the matching [`BotCommand`], then applies the
//! returned [`BotEffect`]s to the session.
//!
//! Denials, unknown names and missing arguments are all silent.

mod channel;
mod effect;
mod info;
mod messaging;
mod quit;
mod quote;

pub use effect::{BotEffect, apply_effects};

use crate::quotes::QuoteProvider;
use crate::state::{PrivilegeLevel, Session};
use slirc_line::{ChannelName, is_channel};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{Level, debug, span};

/// Read-only view handed to commands.
pub struct CommandContext<'a> {
    /// Session as it stood when the command arrived.
    pub session: &'a Session,
    /// Quote lookups.
    pub quotes: &'a dyn QuoteProvider,
    /// Command prefix, for help output.
    pub prefix: char,
}

/// One parsed command invocation.
#[derive(Debug)]
pub struct Invocation<'a> {
    /// Lowercased command name.
    pub name: String,
    /// Nick of the invoker.
    pub user: &'a str,
    /// Where the command was issued: the channel, or the bot's nick for a
    /// direct message. Privilege is resolved against this.
    pub context: &'a str,
    /// Channel the command acts on, if any.
    pub channel: Option<ChannelName>,
    /// Every token after the name, untouched.
    pub tokens: Vec<&'a str>,
    /// Argument tokens after target resolution.
    pub args: Vec<&'a str>,
}

impl Invocation<'_> {
    /// Arguments rejoined with single spaces.
    pub fn arg_text(&self) -> String {
        self.args.join(" ")
    }
}

/// A bot command.
///
/// Commands never touch the session directly. They describe what should
/// happen as a list of [`BotEffect`]s, which the dispatcher applies in order.
pub trait BotCommand: Send + Sync {
    /// Whether a direct message's first argument names the target channel.
    fn takes_channel_arg(&self) -> bool {
        true
    }

    /// Run the command. Privilege has already been checked.
    ///
    /// An empty result means "nothing to do", including for missing arguments.
    fn execute(&self, ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect>;
}

/// Name-keyed command table.
pub struct CommandDispatcher {
    commands: HashMap<&'static str, Arc<dyn BotCommand>>,
    prefix: char,
}

impl CommandDispatcher {
    /// Create a dispatcher with every command registered.
    pub fn new(prefix: char) -> Self {
        let mut dispatcher = Self {
            commands: HashMap::new(),
            prefix,
        };

        dispatcher.register(&["say", "echo", "print"], messaging::SayCommand);
        dispatcher.register(&["act", "do", "me", "em", "emote"], messaging::ActCommand);
        dispatcher.register(&["raw", "irccmd", "cmd", "command"], messaging::RawCommand);
        dispatcher.register(&["join"], channel::JoinCommand);
        dispatcher.register(&["part"], channel::PartCommand);
        dispatcher.register(&["quote", "fact"], quote::QuoteCommand);
        dispatcher.register(&["quit", "exit"], quit::QuitCommand);
        dispatcher.register(&["info", "about"], info::InfoCommand);
        dispatcher.register(&["help"], info::HelpCommand);

        dispatcher
    }

    fn register(&mut self, names: &[&'static str], command: impl BotCommand + 'static) {
        let command: Arc<dyn BotCommand> = Arc::new(command);
        for name in names {
            self.commands.insert(name, Arc::clone(&command));
        }
    }

    /// The configured command prefix.
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Handle one command issued by `user` in `context` (a channel or the
    /// bot's own nick).
    pub fn handle(
        &self,
        session: &mut Session,
        quotes: &dyn QuoteProvider,
        text: &str,
        context: &str,
        user: &str,
    ) {
        let level = session.privilege_of(context, user);
        if level < PrivilegeLevel::ChannelOp {
            debug!(user = %user, context = %context, "Ignoring command from unprivileged user");
            return;
        }

        let mut tokens = text.split(' ').filter(|t| !t.is_empty());
        let Some(name) = tokens.next() else {
            return;
        };
        let name = name.to_lowercase();
        let Some(command) = self.commands.get(name.as_str()) else {
            debug!(command = %name, "Unknown command");
            return;
        };
        let tokens: Vec<&str> = tokens.collect();

        let (channel, args) = if is_channel(context) {
            (Some(ChannelName::canonicalize(context)), tokens.clone())
        } else if command.takes_channel_arg() {
            match tokens.split_first() {
                Some((target, rest)) => (Some(ChannelName::canonicalize(target)), rest.to_vec()),
                None => (None, Vec::new()),
            }
        } else {
            (None, tokens.clone())
        };

        let invocation = Invocation {
            name,
            user,
            context,
            channel,
            tokens,
            args,
        };

        let cmd_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %invocation.name,
            user = %user,
            channel = invocation.channel.as_ref().map(ChannelName::as_str),
        );
        let _enter = cmd_span.enter();

        let effects = {
            let ctx = CommandContext {
                session: &*session,
                quotes,
                prefix: self.prefix,
            };
            command.execute(&ctx, &invocation)
        };
        debug!(level = %level, effects = effects.len(), "Command executed");
        apply_effects(session, effects);
    }
}
