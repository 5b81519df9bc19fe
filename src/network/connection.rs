//! Connection - drives one session over one transport.
//!
//! ```text
//! begin_registration ──▶ flush
//!        │
//!        ▼
//!  next_line ──▶ parse ──▶ Registry::dispatch ──▶ flush outbox
//!        ▲                                            │
//!        └──────────── until quitting or EOF ─────────┘
//! ```
//!
//! Lines are handled strictly one at a time. Whatever a handler queued is on
//! the wire before the next line is read.

use super::transport::Transport;
use crate::commands::CommandDispatcher;
use crate::error::SessionError;
use crate::handlers::{Context, Registry};
use crate::quotes::QuoteProvider;
use crate::state::{Session, SessionEnd};
use slirc_line::InboundEvent;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// One connected session.
pub struct Connection<'a, S> {
    transport: Transport<S>,
    session: &'a mut Session,
    registry: &'a Registry,
    commands: &'a CommandDispatcher,
    quotes: &'a dyn QuoteProvider,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        transport: Transport<S>,
        session: &'a mut Session,
        registry: &'a Registry,
        commands: &'a CommandDispatcher,
        quotes: &'a dyn QuoteProvider,
    ) -> Self {
        Self {
            transport,
            session,
            registry,
            commands,
            quotes,
        }
    }

    /// Register, then read until the session quits or the stream ends.
    ///
    /// The transport is closed on every exit path.
    pub async fn run(mut self) -> Result<SessionEnd, SessionError> {
        let outcome = self.read_loop().await;
        self.transport.close().await;
        self.session.mark_terminated();

        let end = outcome?;
        info!(?end, "Session ended");
        Ok(end)
    }

    async fn read_loop(&mut self) -> Result<SessionEnd, SessionError> {
        self.session.begin_registration();
        self.flush().await?;

        while !self.session.is_quitting() {
            let line = match self.transport.next_line().await {
                Some(Ok(line)) => line,
                Some(Err(e)) if e.is_recoverable() => {
                    warn!(error = %e, "Dropping unreadable line");
                    continue;
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    info!("Server closed the connection");
                    self.session.mark_closed();
                    break;
                }
            };
            debug!(target: "slircbot::in", "[IN] {}", line);

            let event = match InboundEvent::parse(&line) {
                Ok(event) => event,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "Dropping malformed line");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let result = {
                let mut ctx = Context {
                    session: &mut *self.session,
                    quotes: self.quotes,
                    commands: self.commands,
                };
                self.registry.dispatch(&mut ctx, &event)
            };

            self.flush().await?;

            if let Err(e) = result
                && e.is_fatal()
            {
                warn!(error = %e, code = e.error_code(), "Fatal handler error");
                return Err(e.into());
            }
        }

        Ok(self.session.end().cloned().unwrap_or(SessionEnd::Closed))
    }

    /// Write everything the session queued, oldest first.
    async fn flush(&mut self) -> Result<(), SessionError> {
        for line in self.session.drain_outbox() {
            self.transport.send_line(&line).await?;
        }
        Ok(())
    }
}
