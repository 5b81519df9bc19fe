//! Core configuration types and loading.

use serde::Deserialize;
use slirc_line::ChannelName;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::defaults::*;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bot configuration. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to.
    pub server: ServerConfig,
    /// Registration identity.
    pub identity: IdentityConfig,
    /// Channels, operators and command behavior.
    #[serde(default)]
    pub bot: BotConfig,
    /// Reconnect policy after an unexpected disconnect.
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname or address (e.g., "irc.libera.chat").
    pub host: String,
    /// TCP port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect tries before giving up (default: 5).
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
}

/// Identity sent during registration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Initial nickname.
    pub nick: String,
    /// Username; defaults to the nick.
    #[serde(default)]
    pub username: Option<String>,
    /// Real name; defaults to the nick.
    #[serde(default)]
    pub realname: Option<String>,
}

impl IdentityConfig {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }

    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nick)
    }
}

/// Bot behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Channels queued for joining once registered.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Character that marks a channel message as a command (default: '.').
    #[serde(default = "default_command_prefix")]
    pub command_prefix: char,
    /// Nicks granted global operator privilege everywhere.
    #[serde(default)]
    pub operators: Vec<String>,
    /// Directory of quote files, one quote per line. Quote commands answer
    /// "not loaded" when unset.
    #[serde(default)]
    pub quotes_dir: Option<PathBuf>,
    /// Nick-collision retries before the session fails (default: 10).
    #[serde(default = "default_max_nick_retries")]
    pub max_nick_retries: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            command_prefix: default_command_prefix(),
            operators: Vec::new(),
            quotes_dir: None,
            max_nick_retries: default_max_nick_retries(),
        }
    }
}

impl BotConfig {
    /// Configured channels in canonical form, duplicates removed.
    pub fn initial_channels(&self) -> Vec<ChannelName> {
        let mut channels: Vec<ChannelName> = Vec::with_capacity(self.channels.len());
        for name in &self.channels {
            let channel = ChannelName::canonicalize(name);
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        channels
    }

    /// The global operator allow-list, shared read-only.
    pub fn global_operators(&self) -> Arc<HashSet<String>> {
        Arc::new(self.operators.iter().cloned().collect())
    }
}

/// Reconnect policy.
///
/// Applies to forced quits and dropped connections; a requested quit never
/// reconnects.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    /// Whether to reconnect at all (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Consecutive failed sessions before giving up (default: 5).
    #[serde(default = "default_reconnect_attempts")]
    pub max_attempts: u32,
    /// Delay before the first reconnect, doubled per attempt (default: 2).
    #[serde(default = "default_initial_backoff_secs")]
    pub initial_backoff_secs: u64,
    /// Upper bound for the delay (default: 60).
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: default_reconnect_attempts(),
            initial_backoff_secs: default_initial_backoff_secs(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

impl ReconnectConfig {
    /// Delay before reconnect attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(32);
        let secs = self
            .initial_backoff_secs
            .saturating_mul(1u64 << shift)
            .min(self.max_backoff_secs);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
[server]
host = "irc.example.net"

[identity]
nick = "slircbot"
"##;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::parse(MINIMAL).unwrap();
        assert_eq!(config.server.port, 6667);
        assert_eq!(config.server.connect_attempts, 5);
        assert_eq!(config.identity.username(), "slircbot");
        assert_eq!(config.identity.realname(), "slircbot");
        assert_eq!(config.bot.command_prefix, '.');
        assert_eq!(config.bot.max_nick_retries, 10);
        assert!(config.bot.quotes_dir.is_none());
        assert!(config.reconnect.enabled);
        assert_eq!(config.reconnect.max_attempts, 5);
    }

    #[test]
    fn test_full_config() {
        let toml = r##"
[server]
host = "127.0.0.1"
port = 6697
connect_attempts = 3

[identity]
nick = "Bot"
username = "bot"
realname = "The Bot"

[bot]
channels = ["rust", "#rust", "#bots"]
command_prefix = "!"
operators = ["alice", "bob"]
quotes_dir = "quotes"

[reconnect]
enabled = false
"##;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.identity.realname(), "The Bot");
        assert_eq!(config.bot.command_prefix, '!');
        let channels: Vec<String> = config
            .bot
            .initial_channels()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(channels, vec!["#rust", "#bots"]);
        assert!(config.bot.global_operators().contains("bob"));
        assert!(!config.reconnect.enabled);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let toml = r##"
[server]
host = ""

[identity]
nick = "Bot"
"##;
        assert!(matches!(Config::parse(toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(Config::parse("[server"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, MINIMAL).unwrap();
        assert_eq!(Config::load(&path).unwrap().server.host, "irc.example.net");

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = ReconnectConfig {
            enabled: true,
            max_attempts: 10,
            initial_backoff_secs: 2,
            max_backoff_secs: 60,
        };
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
        assert_eq!(policy.backoff(3), Duration::from_secs(8));
        assert_eq!(policy.backoff(6), Duration::from_secs(60));
        assert_eq!(policy.backoff(100), Duration::from_secs(60));
    }
}
