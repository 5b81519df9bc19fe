//! Privilege levels for command gating.

use std::fmt;

/// How much a user may ask of the bot.
///
/// Ordered: `Global > ChannelOp > None`. Any command needs at least
/// `ChannelOp`; actions outside the invoking channel need `Global`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeLevel {
    /// Ordinary user.
    #[default]
    None = 0,
    /// Operator of the channel in question.
    ChannelOp = 1,
    /// Listed in the process-wide operator allow-list.
    Global = 2,
}

impl PrivilegeLevel {
    /// Numeric form shown to users ("access level 1").
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
