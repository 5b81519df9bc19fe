//! Channel name utilities.
//!
//! Channel names are compared exactly after canonicalization. Server-side
//! casemapping is not applied.

use std::borrow::Borrow;
use std::fmt;

/// The sigil every canonical channel name starts with.
pub const CHANNEL_SIGIL: char = '#';

/// Check whether a message target names a channel rather than a nick.
pub fn is_channel(target: &str) -> bool {
    target.starts_with(CHANNEL_SIGIL)
}

/// A canonicalized channel name, always starting with [`CHANNEL_SIGIL`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelName(String);

impl ChannelName {
    /// Canonicalize a user- or server-supplied channel name.
    ///
    /// Prefixes the sigil when it is missing; otherwise returns the name
    /// unchanged. Idempotent.
    ///
    /// ```
    /// use slirc_line::ChannelName;
    ///
    /// assert_eq!(ChannelName::canonicalize("rust").as_str(), "#rust");
    /// assert_eq!(ChannelName::canonicalize("#rust").as_str(), "#rust");
    /// ```
    pub fn canonicalize(name: &str) -> Self {
        let name = name.trim_start_matches(':');
        if is_channel(name) {
            Self(name.to_string())
        } else {
            Self(format!("{CHANNEL_SIGIL}{name}"))
        }
    }

    /// The canonical name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ChannelName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelName {
    fn from(name: &str) -> Self {
        Self::canonicalize(name)
    }
}
