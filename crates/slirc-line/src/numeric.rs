//! Numeric reply codes the bot reacts to.
//!
//! Numerics arrive in the verb position as three-digit strings, so they are
//! kept as `&str` constants and matched directly against
//! [`InboundEvent::verb`](crate::InboundEvent).
//!
//! # Reference
//! - RFC 2812 Section 5: Replies

/// `001` - first reply after successful registration.
pub const RPL_WELCOME: &str = "001";
/// `353` - one line of a NAMES membership list.
pub const RPL_NAMREPLY: &str = "353";
/// `366` - end of a NAMES membership list.
pub const RPL_ENDOFNAMES: &str = "366";
/// `376` - end of the message of the day.
pub const RPL_ENDOFMOTD: &str = "376";
/// `422` - no message of the day; also ends the greeting.
pub const ERR_NOMOTD: &str = "422";
/// `433` - requested nickname is already in use.
pub const ERR_NICKNAMEINUSE: &str = "433";

/// Membership-list prefixes that imply channel operator status.
///
/// `@` is the operator prefix; `~` (founder) and `&` (admin) are only ever
/// granted on top of operator status by the servers that use them.
pub const OPERATOR_PREFIXES: &[char] = &['~', '&', '@'];

/// All membership prefixes a NAMES entry may carry.
pub const MEMBER_PREFIXES: &[char] = &['~', '&', '@', '%', '+'];

/// Split a NAMES entry into its prefix run and the bare nick.
///
/// ```
/// use slirc_line::numeric::split_member_prefix;
///
/// assert_eq!(split_member_prefix(":@+alice"), ("@+", "alice"));
/// assert_eq!(split_member_prefix("bob"), ("", "bob"));
/// ```
pub fn split_member_prefix(entry: &str) -> (&str, &str) {
    let entry = entry.trim_start_matches(':');
    let nick = entry.trim_start_matches(MEMBER_PREFIXES);
    (&entry[..entry.len() - nick.len()], nick)
}

/// Whether a NAMES entry carries an operator-level prefix.
pub fn is_operator_entry(entry: &str) -> bool {
    split_member_prefix(entry).0.contains(OPERATOR_PREFIXES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_prefix() {
        assert_eq!(split_member_prefix("@bob"), ("@", "bob"));
        assert_eq!(split_member_prefix(":carol"), ("", "carol"));
        assert_eq!(split_member_prefix("+%dave"), ("+%", "dave"));
        assert_eq!(split_member_prefix(""), ("", ""));
    }

    #[test]
    fn test_operator_entry() {
        assert!(is_operator_entry(":@bob"));
        assert!(is_operator_entry("~founder"));
        assert!(is_operator_entry("+@voiced_op"));
        assert!(!is_operator_entry("+voiced"));
        assert!(!is_operator_entry("%halfop"));
        assert!(!is_operator_entry("carol"));
    }
}
