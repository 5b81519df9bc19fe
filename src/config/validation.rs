//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must not be 0")]
    InvalidPort,
    #[error("server.connect_attempts must be at least 1")]
    NoConnectAttempts,
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.nick must not contain whitespace, got '{0}'")]
    InvalidNick(String),
    #[error("bot.command_prefix must not be whitespace")]
    InvalidCommandPrefix,
    #[error("bot.max_nick_retries must be at least 1")]
    NoNickRetries,
    #[error("reconnect.max_attempts must be at least 1 when reconnect is enabled")]
    NoReconnectAttempts,
    #[error("reconnect.initial_backoff_secs ({initial}) exceeds max_backoff_secs ({max})")]
    BackoffRange { initial: u64, max: u64 },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Server
    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if config.server.connect_attempts == 0 {
        errors.push(ValidationError::NoConnectAttempts);
    }

    // Identity
    let nick = &config.identity.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if nick.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }

    // Bot
    if config.bot.command_prefix.is_whitespace() {
        errors.push(ValidationError::InvalidCommandPrefix);
    }
    if config.bot.max_nick_retries == 0 {
        errors.push(ValidationError::NoNickRetries);
    }

    // Reconnect
    let reconnect = &config.reconnect;
    if reconnect.enabled && reconnect.max_attempts == 0 {
        errors.push(ValidationError::NoReconnectAttempts);
    }
    if reconnect.initial_backoff_secs > reconnect.max_backoff_secs {
        errors.push(ValidationError::BackoffRange {
            initial: reconnect.initial_backoff_secs,
            max: reconnect.max_backoff_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
