//! `quote` / `fact [name [n]]`

use super::{BotCommand, BotEffect, CommandContext, Invocation};
use slirc_line::ChannelName;

pub struct QuoteCommand;

impl BotCommand for QuoteCommand {
    fn execute(&self, ctx: &CommandContext<'_>, inv: &Invocation<'_>) -> Vec<BotEffect> {
        let text = match inv.args.as_slice() {
            [] => {
                let loaded = ctx.quotes.list_loaded();
                let text = if loaded.is_empty() {
                    "No quotes loaded.".to_string()
                } else {
                    format!("Loaded quotes: {}", loaded.join(", "))
                };
                return vec![BotEffect::Notice {
                    nick: inv.user.to_string(),
                    text,
                }];
            }
            [name] => match ctx.quotes.random_quote(name) {
                Ok(quote) => quote.to_string(),
                Err(e) => e.to_string(),
            },
            [name, index, ..] => {
                let Ok(index) = index.parse::<usize>() else {
                    return vec![];
                };
                match ctx.quotes.quote_at(name, index) {
                    Ok(quote) => quote.to_string(),
                    Err(e) => e.to_string(),
                }
            }
        };

        to_channel(inv.channel.as_ref(), text)
    }
}

fn to_channel(channel: Option<&ChannelName>, text: String) -> Vec<BotEffect> {
    channel
        .map(|channel| BotEffect::Say {
            channel: channel.clone(),
            text,
        })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::quotes::{Quote, QuoteError, QuoteProvider};

    /// In-memory provider with one list.
    struct Fixed(Vec<&'static str>);

    impl QuoteProvider for Fixed {
        fn load_all(&self) {}

        fn is_loaded(&self, name: &str) -> bool {
            name == "bash"
        }

        fn list_loaded(&self) -> Vec<String> {
            vec!["bash".into()]
        }

        fn random_quote(&self, name: &str) -> Result<Quote, QuoteError> {
            self.quote_at(name, 1)
        }

        fn quote_at(&self, name: &str, index: usize) -> Result<Quote, QuoteError> {
            if !self.is_loaded(name) {
                return Err(QuoteError::NotLoaded(name.into()));
            }
            index
                .checked_sub(1)
                .and_then(|i| self.0.get(i))
                .map(|text| Quote {
                    index,
                    text: text.to_string(),
                })
                .ok_or(QuoteError::IndexOutOfRange {
                    name: name.into(),
                    index,
                })
        }

        fn cancel(&self) {}
    }

    fn run(quotes: &dyn QuoteProvider, text: &str, context: &str, user: &str) -> Vec<String> {
        let mut s = session();
        crate::commands::CommandDispatcher::new('.').handle(&mut s, quotes, text, context, user);
        sent(&mut s)
    }

    #[test]
    fn test_list_is_private() {
        let quotes = Fixed(vec!["one"]);
        assert_eq!(
            run(&quotes, "quote", "#chan", "alice"),
            vec!["NOTICE alice :Loaded quotes: bash"]
        );
        assert_eq!(
            run(&NO_QUOTES, "fact", "#chan", "alice"),
            vec!["NOTICE alice :No quotes loaded."]
        );
    }

    #[test]
    fn test_random_and_indexed() {
        let quotes = Fixed(vec!["one", "two"]);
        assert_eq!(run(&quotes, "quote bash", "#chan", "alice"), vec!["PRIVMSG #chan :1. one"]);
        assert_eq!(run(&quotes, "quote bash 2", "#chan", "alice"), vec!["PRIVMSG #chan :2. two"]);
    }

    #[test]
    fn test_lookup_failures_are_chat_messages() {
        let quotes = Fixed(vec!["one"]);
        assert_eq!(
            run(&quotes, "quote bash 5", "#chan", "alice"),
            vec!["PRIVMSG #chan :The specified quote was not found in the quote list."]
        );
        assert_eq!(
            run(&quotes, "quote bash 0", "#chan", "alice"),
            vec!["PRIVMSG #chan :The specified quote was not found in the quote list."]
        );
        assert_eq!(
            run(&NO_QUOTES, "quote bash", "#chan", "alice"),
            vec!["PRIVMSG #chan :bash quotes not loaded!"]
        );
    }

    #[test]
    fn test_non_numeric_index_is_silent() {
        let quotes = Fixed(vec!["one"]);
        assert!(run(&quotes, "quote bash two", "#chan", "alice").is_empty());
    }

    #[test]
    fn test_direct_message_targets_channel() {
        let quotes = Fixed(vec!["one"]);
        assert_eq!(
            run(&quotes, "quote #chan bash 1", "Bot", "root"),
            vec!["PRIVMSG #chan :1. one"]
        );
    }
}
