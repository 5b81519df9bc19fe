//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse by serde.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

/// Connect tries per session, no back-off between them.
pub fn default_connect_attempts() -> u32 {
    5
}

// =============================================================================
// Bot Defaults
// =============================================================================

pub fn default_command_prefix() -> char {
    '.'
}

pub fn default_max_nick_retries() -> u32 {
    10
}

// =============================================================================
// Reconnect Defaults
// =============================================================================

pub fn default_reconnect_attempts() -> u32 {
    5
}

pub fn default_initial_backoff_secs() -> u64 {
    2
}

pub fn default_max_backoff_secs() -> u64 {
    60
}
