//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default values
//! - [`validation`]: startup checks, reported all at once

mod defaults;
mod types;
mod validation;

pub use types::{BotConfig, Config, ConfigError, IdentityConfig, ReconnectConfig, ServerConfig};
pub use validation::{ValidationError, validate};
