//! Unified error handling for slircbot.
//!
//! Wire-level failures live in `slirc_line::ProtocolError`; configuration
//! errors live next to the config loader. This module holds the errors of
//! the engine itself: connecting, handling events, and running a session.

use slirc_line::ProtocolError;
use thiserror::Error;

// ============================================================================
// Connect Errors (transport establishment)
// ============================================================================

/// The transport could not be established. Fatal to the engine.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("could not connect to {host}:{port} after {attempts} attempts: {source}")]
    Exhausted {
        host: String,
        port: u16,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("{host}:{port} did not resolve to any address")]
    Resolve { host: String, port: u16 },
}

// ============================================================================
// Handler Errors (event processing)
// ============================================================================

/// Errors raised while reacting to one inbound event.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The line lacked a field the handler needs. The line is dropped.
    #[error("not enough parameters for {0}")]
    NeedMoreParams(&'static str),

    /// Every nick candidate was rejected. Fatal to the session.
    #[error("nick still in use after {attempts} retries")]
    NickRetriesExhausted { attempts: u32 },
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams(_) => "need_more_params",
            Self::NickRetriesExhausted { .. } => "nick_retries_exhausted",
        }
    }

    /// Whether the session must stop because of this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NickRetriesExhausted { .. })
    }
}

/// Result type for event handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Session Errors (read loop)
// ============================================================================

/// Reasons a session stops other than a quit.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("transport error: {0}")]
    Transport(#[from] ProtocolError),

    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("gave up after {attempts} failed reconnect attempts")]
    ReconnectExhausted { attempts: u32 },
}

impl SessionError {
    /// Whether another connection attempt could help.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(ConnectError::Exhausted { .. }) | Self::Transport(_) => true,
            Self::Connect(ConnectError::Resolve { .. })
            | Self::Handler(_)
            | Self::ReconnectExhausted { .. } => false,
        }
    }
}
