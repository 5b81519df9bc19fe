//! Command effects.
//!
//! Commands decide what should happen; the dispatcher applies the result to
//! the session. Keeping the two apart lets commands be tested without a
//! session and keeps every outbound line flowing through the session's
//! membership checks.

use crate::state::Session;
use slirc_line::ChannelName;
use tracing::debug;

/// Unified effect type returned by all bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEffect {
    /// Message a channel. Dropped if the bot is not in it.
    Say { channel: ChannelName, text: String },

    /// CTCP ACTION to a channel. Dropped if the bot is not in it.
    Act { channel: ChannelName, text: String },

    /// Private notice to a user.
    Notice { nick: String, text: String },

    /// Answer in the channel when joined, otherwise by notice to the user.
    Reply {
        channel: Option<ChannelName>,
        nick: String,
        text: String,
    },

    /// Unvalidated protocol line.
    Raw(String),

    Join(ChannelName),

    Part(ChannelName),

    /// Disconnect, with an optional farewell.
    Quit(Option<String>),
}

/// Apply a list of effects sequentially.
pub fn apply_effects(session: &mut Session, effects: Vec<BotEffect>) {
    for effect in effects {
        apply_effect(session, effect);
    }
}

/// Apply a single effect.
pub fn apply_effect(session: &mut Session, effect: BotEffect) {
    debug!(effect = ?effect, "Applying effect");
    match effect {
        BotEffect::Say { channel, text } => {
            session.send_to_channel(channel.as_str(), &text);
        }
        BotEffect::Act { channel, text } => {
            session.send_action(channel.as_str(), &text);
        }
        BotEffect::Notice { nick, text } => session.send_to_nick(&nick, &text),
        BotEffect::Reply {
            channel,
            nick,
            text,
        } => match channel.filter(|c| session.is_joined(c.as_str())) {
            Some(channel) => {
                session.send_to_channel(channel.as_str(), &text);
            }
            None => session.send_to_nick(&nick, &text),
        },
        BotEffect::Raw(line) => session.send_raw(&line),
        BotEffect::Join(channel) => {
            session.join(&channel);
        }
        BotEffect::Part(channel) => {
            session.part(&channel);
        }
        BotEffect::Quit(message) => session.quit(message.as_deref()),
    }
}
