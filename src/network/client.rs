//! Client - owns the bot across connections.
//!
//! Each pass of the loop connects, runs one [`Connection`] to completion and
//! decides from its outcome whether to stop or reconnect:
//!
//! | Outcome                         | Action                          |
//! |---------------------------------|---------------------------------|
//! | `Quit`                          | stop                            |
//! | `ForcedQuit`, `Closed`          | reconnect (when enabled)        |
//! | transport / connect exhausted   | reconnect (when enabled)        |
//! | nick exhaustion, unresolvable   | stop with error                 |
//!
//! The first connect is not retried beyond `server.connect_attempts`.

use super::connection::Connection;
use super::transport::Transport;
use crate::commands::CommandDispatcher;
use crate::config::Config;
use crate::error::SessionError;
use crate::handlers::Registry;
use crate::quotes::{NoQuotes, QuoteProvider, QuoteStore};
use crate::state::{Identity, OperatorRegistry, Session, SessionEnd};
use crate::telemetry::session_span;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, warn};

pub struct Client {
    config: Config,
    registry: Registry,
    commands: CommandDispatcher,
    quotes: Arc<dyn QuoteProvider>,
}

impl Client {
    /// Build a client; quotes come from `bot.quotes_dir` when set.
    pub fn new(config: Config) -> Self {
        let quotes: Arc<dyn QuoteProvider> = match &config.bot.quotes_dir {
            Some(dir) => Arc::new(QuoteStore::new(dir)),
            None => Arc::new(NoQuotes),
        };
        Self::with_quotes(config, quotes)
    }

    pub fn with_quotes(config: Config, quotes: Arc<dyn QuoteProvider>) -> Self {
        let commands = CommandDispatcher::new(config.bot.command_prefix);
        Self {
            config,
            registry: Registry::new(),
            commands,
            quotes,
        }
    }

    fn new_session(&self) -> Session {
        let identity = Identity {
            nick: self.config.identity.nick.clone(),
            username: self.config.identity.username().to_string(),
            realname: self.config.identity.realname().to_string(),
        };
        let operators = OperatorRegistry::new(self.config.bot.global_operators());
        let mut session = Session::new(identity, operators, self.config.bot.max_nick_retries);
        for channel in self.config.bot.initial_channels() {
            session.enqueue_join(channel);
        }
        session
    }

    /// Run until the bot quits or a failure cannot be recovered from.
    pub async fn run(&self) -> Result<(), SessionError> {
        let server = &self.config.server;
        let reconnect = &self.config.reconnect;

        let mut session = self.new_session();
        let mut failures: u32 = 0;
        let mut session_id: u32 = 0;

        let result = loop {
            session_id += 1;
            let span = session_span(&server.host, server.port, session_id);
            let outcome = self.run_session(&mut session).instrument(span).await;

            let lost = match outcome {
                Ok(SessionEnd::Quit) => break Ok(()),
                Ok(end) => {
                    warn!(?end, "Session lost");
                    None
                }
                Err(SessionError::Connect(e)) if session_id == 1 => {
                    error!(error = %e, "Initial connect failed");
                    break Err(e.into());
                }
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Session failed");
                    Some(e)
                }
                Err(e) => {
                    error!(error = %e, "Session failed permanently");
                    break Err(e);
                }
            };

            if !reconnect.enabled {
                info!("Reconnect disabled, stopping");
                break lost.map_or(Ok(()), Err);
            }

            if session.is_registered() {
                failures = 0;
            }
            failures += 1;
            if failures > reconnect.max_attempts {
                error!(attempts = reconnect.max_attempts, "Giving up on reconnecting");
                break Err(SessionError::ReconnectExhausted {
                    attempts: reconnect.max_attempts,
                });
            }

            let delay = reconnect.backoff(failures);
            info!(attempt = failures, delay_secs = delay.as_secs(), "Reconnecting");
            tokio::time::sleep(delay).await;
            session.prepare_reconnect();
        };

        self.quotes.cancel();
        for (verb, count) in self.registry.event_stats() {
            debug!(verb, count, "Events handled");
        }
        result
    }

    async fn run_session(&self, session: &mut Session) -> Result<SessionEnd, SessionError> {
        let server = &self.config.server;
        let transport = Transport::connect(&server.host, server.port, server.connect_attempts).await?;
        Connection::new(
            transport,
            session,
            &self.registry,
            &self.commands,
            self.quotes.as_ref(),
        )
        .run()
        .await
    }
}
