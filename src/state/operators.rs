//! Per-channel operator tracking.
//!
//! A channel has an entry exactly while the bot is a member of it: the entry
//! is created (empty) on join and removed on part. Operator sets are always
//! re-derived from full membership lists; mode deltas are never applied.

use super::PrivilegeLevel;
use slirc_line::ChannelName;
use slirc_line::numeric::MEMBER_PREFIXES;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Strip source and membership markers from a user token.
pub fn normalize_user(user: &str) -> &str {
    user.trim_start_matches(':').trim_start_matches(MEMBER_PREFIXES)
}

/// Channel operator sets plus the process-wide allow-list.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    global: Arc<HashSet<String>>,
    channels: HashMap<ChannelName, HashSet<String>>,
}

impl OperatorRegistry {
    /// Create a registry backed by the configured global allow-list.
    pub fn new(global: Arc<HashSet<String>>) -> Self {
        Self {
            global,
            channels: HashMap::new(),
        }
    }

    /// Start tracking a channel with an empty operator set, replacing any stale entry.
    pub fn track(&mut self, channel: &ChannelName) {
        self.channels.insert(channel.clone(), HashSet::new());
    }

    /// Stop tracking a channel.
    pub fn untrack(&mut self, channel: &str) {
        self.channels.remove(channel);
    }

    /// Whether a channel currently has an operator entry.
    pub fn is_tracked(&self, channel: &str) -> bool {
        self.channels.contains_key(channel)
    }

    /// Replace a channel's operator set wholesale.
    ///
    /// No-op (returns `false`) when the channel is not tracked.
    pub fn set_operators<I, S>(&mut self, channel: &str, users: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(ops) = self.channels.get_mut(channel) else {
            debug!(channel = %channel, "Ignoring operator list for untracked channel");
            return false;
        };

        info!(channel = %channel, "Resetting ops list");
        ops.clear();
        ops.extend(
            users
                .into_iter()
                .map(|u| normalize_user(u.as_ref()).to_string())
                .filter(|u| !u.is_empty()),
        );
        debug!(channel = %channel, ops = ?ops, "Operator list replaced");
        true
    }

    /// Add one operator. Idempotent; returns `true` if the set changed.
    pub fn add_operator(&mut self, channel: &str, user: &str) -> bool {
        let user = normalize_user(user);
        if user.is_empty() {
            return false;
        }
        match self.channels.get_mut(channel) {
            Some(ops) => {
                let added = ops.insert(user.to_string());
                if added {
                    debug!(channel = %channel, user = %user, "Added to op list");
                }
                added
            }
            None => false,
        }
    }

    /// Remove one operator from a channel.
    pub fn remove_operator(&mut self, channel: &str, user: &str) -> bool {
        self.channels
            .get_mut(channel)
            .is_some_and(|ops| ops.remove(normalize_user(user)))
    }

    /// Remove a user from every channel (they quit the network).
    pub fn forget_user(&mut self, user: &str) {
        let user = normalize_user(user);
        for ops in self.channels.values_mut() {
            ops.remove(user);
        }
    }

    /// Follow a nick change across every channel.
    pub fn rename_user(&mut self, old: &str, new: &str) {
        let (old, new) = (normalize_user(old), normalize_user(new));
        for ops in self.channels.values_mut() {
            if ops.remove(old) {
                ops.insert(new.to_string());
            }
        }
    }

    /// The operator set of a tracked channel.
    pub fn operators(&self, channel: &str) -> Option<&HashSet<String>> {
        self.channels.get(channel)
    }

    /// Whether the user is in the global allow-list.
    pub fn is_global(&self, user: &str) -> bool {
        self.global.contains(user)
    }

    /// Resolve a user's privilege in a channel.
    ///
    /// The allow-list wins regardless of channel membership.
    pub fn privilege_of(&self, channel: &str, user: &str) -> PrivilegeLevel {
        if self.is_global(user) {
            debug!(user = %user, "User found in global ops list");
            return PrivilegeLevel::Global;
        }
        if self
            .channels
            .get(channel)
            .is_some_and(|ops| ops.contains(user))
        {
            debug!(user = %user, channel = %channel, "User is a channel op");
            return PrivilegeLevel::ChannelOp;
        }
        PrivilegeLevel::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(global: &[&str]) -> OperatorRegistry {
        OperatorRegistry::new(Arc::new(global.iter().map(|s| s.to_string()).collect()))
    }

    fn chan(name: &str) -> ChannelName {
        ChannelName::canonicalize(name)
    }

    #[test]
    fn test_set_operators_replaces() {
        let mut reg = registry(&[]);
        reg.track(&chan("#c"));

        assert!(reg.set_operators("#c", ["u1", "u2"]));
        assert!(reg.set_operators("#c", ["u3"]));

        let ops = reg.operators("#c").unwrap();
        assert_eq!(ops.len(), 1);
        assert!(ops.contains("u3"));
    }

    #[test]
    fn test_set_operators_untracked_is_noop() {
        let mut reg = registry(&[]);
        assert!(!reg.set_operators("#nowhere", ["u1"]));
        assert!(reg.operators("#nowhere").is_none());
    }

    #[test]
    fn test_add_operator_idempotent_and_normalized() {
        let mut reg = registry(&[]);
        reg.track(&chan("#c"));

        assert!(reg.add_operator("#c", ":@alice"));
        assert!(!reg.add_operator("#c", "alice"));
        assert!(!reg.add_operator("#c", "@alice"));
        assert_eq!(reg.operators("#c").unwrap().len(), 1);
    }

    #[test]
    fn test_track_resets_stale_entry() {
        let mut reg = registry(&[]);
        reg.track(&chan("#c"));
        reg.add_operator("#c", "alice");
        reg.track(&chan("#c"));
        assert!(reg.operators("#c").unwrap().is_empty());
    }

    #[test]
    fn test_privilege_levels() {
        let mut reg = registry(&["root"]);
        reg.track(&chan("#c"));
        reg.set_operators("#c", ["@alice", "root"]);

        assert_eq!(reg.privilege_of("#c", "alice"), PrivilegeLevel::ChannelOp);
        assert_eq!(reg.privilege_of("#c", "root"), PrivilegeLevel::Global);
        assert_eq!(reg.privilege_of("#c", "carol"), PrivilegeLevel::None);
        assert_eq!(reg.privilege_of("#other", "alice"), PrivilegeLevel::None);
    }

    #[test]
    fn test_global_regardless_of_channel() {
        let reg = registry(&["root"]);
        assert_eq!(reg.privilege_of("#untracked", "root"), PrivilegeLevel::Global);
        assert_eq!(reg.privilege_of("SomeNick", "root"), PrivilegeLevel::Global);
    }

    #[test]
    fn test_forget_and_rename() {
        let mut reg = registry(&[]);
        reg.track(&chan("#a"));
        reg.track(&chan("#b"));
        reg.set_operators("#a", ["alice", "bob"]);
        reg.set_operators("#b", ["alice"]);

        reg.rename_user("alice", "alice_");
        assert!(reg.operators("#a").unwrap().contains("alice_"));
        assert!(reg.operators("#b").unwrap().contains("alice_"));

        reg.forget_user("alice_");
        assert!(!reg.operators("#a").unwrap().contains("alice_"));
        assert!(reg.operators("#b").unwrap().is_empty());

        assert!(reg.remove_operator("#a", "bob"));
        assert!(reg.operators("#a").unwrap().is_empty());
    }
}
