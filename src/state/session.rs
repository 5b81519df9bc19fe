//! Session state for the single server connection.
//!
//! The session is owned by the connection loop and mutated only from event
//! and command handling, one line at a time. Outbound lines are queued in an
//! outbox that the loop flushes to the transport after every inbound line.
//!
//! ## State Machine
//!
//! ```text
//! Disconnected ──begin_registration()──▶ Registering ──001──▶ Operating
//!                                             │                  │
//!                                             └──── quit() ──────┴──▶ Quitting ──▶ Terminated
//! ```

use super::{OperatorRegistry, PrivilegeLevel};
use slirc_line::numeric::is_operator_entry;
use slirc_line::{ChannelName, Outbound};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Separator between a nick and its collision counter (`Bot|2`).
pub const NICK_SUFFIX_SEPARATOR: char = '|';

/// First counter value used on nick collision.
pub const FIRST_NICK_SUFFIX: u32 = 2;

/// Default farewell when a quit carries no message.
pub const DEFAULT_QUIT_MESSAGE: &str = "Quit";

/// Current phase of the connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No handshake sent yet.
    #[default]
    Disconnected,
    /// NICK/USER sent, awaiting welcome (001).
    Registering,
    /// Welcome received; channels joinable.
    Operating,
    /// QUIT sent; the loop stops after flushing.
    Quitting,
    /// Transport closed.
    Terminated,
}

/// Why a session stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The bot quit on request. Terminal.
    Quit,
    /// The server reported our own QUIT without us asking for it.
    ForcedQuit,
    /// The stream ended without any QUIT.
    Closed,
}

/// Registration identity sent in the handshake.
#[derive(Clone, Debug)]
pub struct Identity {
    /// Desired nickname.
    pub nick: String,
    /// Username (ident).
    pub username: String,
    /// Real name / GECOS.
    pub realname: String,
}

/// Per-connection session state.
#[derive(Debug)]
pub struct Session {
    identity: Identity,
    nick: String,
    nick_suffix: u32,
    nick_retries: u32,
    max_nick_retries: u32,
    state: ConnectionState,
    registered: bool,
    quitting: bool,
    end: Option<SessionEnd>,
    joined: HashSet<ChannelName>,
    join_queue: Vec<ChannelName>,
    operators: OperatorRegistry,
    /// Channels with a membership list in progress (353 seen, 366 not yet).
    names_batches: HashSet<ChannelName>,
    outbox: Vec<Outbound>,
}

impl Session {
    /// Create a disconnected session.
    pub fn new(identity: Identity, operators: OperatorRegistry, max_nick_retries: u32) -> Self {
        Self {
            nick: identity.nick.clone(),
            identity,
            nick_suffix: FIRST_NICK_SUFFIX,
            nick_retries: 0,
            max_nick_retries,
            state: ConnectionState::Disconnected,
            registered: false,
            quitting: false,
            end: None,
            joined: HashSet::new(),
            join_queue: Vec::new(),
            operators,
            names_batches: HashSet::new(),
            outbox: Vec::new(),
        }
    }

    /// The nick the bot currently uses.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Current connection phase.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the server has welcomed us on this connection.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Whether a QUIT has been sent.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Why the session ended, once it has.
    pub fn end(&self) -> Option<&SessionEnd> {
        self.end.as_ref()
    }

    /// Operator registry (read-only).
    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    /// Operator registry (mutable).
    pub fn operators_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.operators
    }

    /// Resolve a user's privilege in a channel.
    pub fn privilege_of(&self, channel: &str, user: &str) -> PrivilegeLevel {
        self.operators.privilege_of(channel, user)
    }

    // ------------------------------------------------------------------
    // Outbound
    // ------------------------------------------------------------------

    /// Queue one protocol line. Every send is logged before transmission.
    pub fn send(&mut self, line: Outbound) {
        info!(target: "slircbot::out", verb = line.verb(), "[OUT] {}", line);
        self.outbox.push(line);
    }

    /// Take every queued line, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbox)
    }

    /// Send a PRIVMSG to a channel the bot is in; dropped otherwise.
    pub fn send_to_channel(&mut self, channel: &str, text: &str) -> bool {
        if !self.is_joined(channel) {
            debug!(channel = %channel, "Not in channel, dropping message");
            return false;
        }
        self.send(Outbound::privmsg(channel, text));
        true
    }

    /// Send a CTCP ACTION to a channel the bot is in; dropped otherwise.
    pub fn send_action(&mut self, channel: &str, text: &str) -> bool {
        if !self.is_joined(channel) {
            debug!(channel = %channel, "Not in channel, dropping action");
            return false;
        }
        self.send(Outbound::action(channel, text));
        true
    }

    /// Send a NOTICE to a user.
    pub fn send_to_nick(&mut self, nick: &str, text: &str) {
        self.send(Outbound::notice(nick, text));
    }

    /// Pass a line through unvalidated.
    pub fn send_raw(&mut self, text: &str) {
        self.send(Outbound::Raw(text.to_string()));
    }

    // ------------------------------------------------------------------
    // Registration and nick
    // ------------------------------------------------------------------

    /// Queue the two-line handshake (NICK, USER).
    pub fn begin_registration(&mut self) {
        self.state = ConnectionState::Registering;
        info!(nick = %self.nick, "Sending registration");
        self.send(Outbound::Nick(self.nick.clone()));
        self.send(Outbound::User {
            username: self.identity.username.clone(),
            realname: self.identity.realname.clone(),
        });
    }

    /// Mark registration complete. `nick` is the nick the server confirmed.
    pub fn complete_registration(&mut self, nick: Option<&str>) {
        if let Some(nick) = nick.filter(|n| !n.is_empty() && *n != "*") {
            self.nick = nick.to_string();
        }
        if self.state == ConnectionState::Registering {
            self.state = ConnectionState::Operating;
        }
        self.registered = true;
        info!(nick = %self.nick, "Registered");
    }

    /// Change nick optimistically (no wait for the server's acknowledgement).
    pub fn change_nick(&mut self, new_nick: &str) {
        self.nick = new_nick.to_string();
        self.send(Outbound::Nick(self.nick.clone()));
    }

    /// Adopt a nick the server reports for us without sending anything.
    pub fn adopt_nick(&mut self, nick: &str) {
        self.nick = nick.to_string();
    }

    /// Nick-collision retries allowed per session.
    pub fn max_nick_retries(&self) -> u32 {
        self.max_nick_retries
    }

    /// Derive the next nick after a collision.
    ///
    /// Strips any `|N` suffix from the current nick and appends the next
    /// counter value. Returns `None` once the retry budget is spent.
    pub fn next_collision_nick(&mut self) -> Option<String> {
        if self.nick_retries >= self.max_nick_retries {
            return None;
        }
        self.nick_retries += 1;
        let candidate = format!(
            "{}{}{}",
            base_nick(&self.nick),
            NICK_SUFFIX_SEPARATOR,
            self.nick_suffix
        );
        self.nick_suffix += 1;
        Some(candidate)
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    /// Whether the bot is a member of `channel` (canonical form).
    pub fn is_joined(&self, channel: &str) -> bool {
        self.joined.contains(channel)
    }

    /// Channels currently joined, in no particular order.
    pub fn joined_channels(&self) -> impl Iterator<Item = &ChannelName> {
        self.joined.iter()
    }

    /// Channels waiting for the welcome reply.
    pub fn join_queue(&self) -> &[ChannelName] {
        &self.join_queue
    }

    /// Queue a channel to join once registered. Duplicates are ignored.
    pub fn enqueue_join(&mut self, channel: ChannelName) {
        if !self.join_queue.contains(&channel) {
            info!(channel = %channel, "Added channel to join queue");
            self.join_queue.push(channel);
        }
    }

    /// Join every queued channel in order, then clear the queue.
    pub fn drain_join_queue(&mut self) {
        for channel in std::mem::take(&mut self.join_queue) {
            self.join(&channel);
        }
    }

    /// Join a channel. Returns `false` (and sends nothing) if already a member.
    pub fn join(&mut self, channel: &ChannelName) -> bool {
        if self.joined.contains(channel) {
            warn!(channel = %channel, "Can't join channel, already in that channel");
            return false;
        }
        self.send(Outbound::Join(channel.clone()));
        self.joined.insert(channel.clone());
        self.operators.track(channel);
        info!(channel = %channel, "Joined channel");
        true
    }

    /// Part a channel. No-op if not a member.
    pub fn part(&mut self, channel: &ChannelName) -> bool {
        if !self.joined.contains(channel) {
            return false;
        }
        self.send(Outbound::Part(channel.clone()));
        self.forget_channel(channel);
        info!(channel = %channel, "Parted channel");
        true
    }

    /// Drop local membership without sending anything (we were kicked).
    pub fn forget_channel(&mut self, channel: &ChannelName) -> bool {
        self.names_batches.remove(channel);
        self.operators.untrack(channel.as_str());
        self.joined.remove(channel)
    }

    // ------------------------------------------------------------------
    // Membership lists
    // ------------------------------------------------------------------

    /// Apply one membership-list reply.
    ///
    /// Entries accumulate until [`end_of_names`](Self::end_of_names); after
    /// every reply the channel's operator set is replaced by the operators
    /// seen so far in the batch.
    pub fn names_reply<'a>(
        &mut self,
        channel: &ChannelName,
        entries: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        if !self.operators.is_tracked(channel.as_str()) {
            debug!(channel = %channel, "Membership list for untracked channel");
            return false;
        }
        if self.names_batches.insert(channel.clone()) {
            // First reply of a new batch replaces whatever we knew.
            self.operators.set_operators(channel.as_str(), std::iter::empty::<&str>());
        }
        for entry in entries.into_iter().filter(|e| is_operator_entry(e)) {
            self.operators.add_operator(channel.as_str(), entry);
        }
        true
    }

    /// Close the membership batch for a channel.
    pub fn end_of_names(&mut self, channel: &ChannelName) {
        self.names_batches.remove(channel);
    }

    // ------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------

    /// Quit on request. Terminal for the process.
    pub fn quit(&mut self, message: Option<&str>) {
        let message = message.unwrap_or(DEFAULT_QUIT_MESSAGE);
        info!(message = %message, "Quitting");
        self.send(Outbound::Quit(message.to_string()));
        self.stop(SessionEnd::Quit);
    }

    /// Quit after the server forced us out, asking for a reconnect.
    pub fn forced_quit(&mut self, diagnostic: &str) {
        self.send(Outbound::Quit(diagnostic.to_string()));
        self.stop(SessionEnd::ForcedQuit);
    }

    /// Record that the stream ended underneath us.
    pub fn mark_closed(&mut self) {
        if self.end.is_none() {
            self.end = Some(SessionEnd::Closed);
        }
        self.state = ConnectionState::Terminated;
    }

    /// Record that the transport has been closed after a quit.
    pub fn mark_terminated(&mut self) {
        self.state = ConnectionState::Terminated;
    }

    /// Reset for a fresh connection.
    ///
    /// Channels we were in go back on the join queue ahead of anything still
    /// queued; per-connection state is cleared and the configured nick is
    /// restored.
    pub fn prepare_reconnect(&mut self) {
        let mut channels: Vec<ChannelName> = self.joined_channels().cloned().collect();
        channels.sort();
        self.joined.clear();
        for channel in std::mem::take(&mut self.join_queue) {
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        for channel in &channels {
            self.operators.untrack(channel.as_str());
        }
        self.join_queue = channels;
        self.names_batches.clear();
        self.outbox.clear();

        self.nick = self.identity.nick.clone();
        self.nick_suffix = FIRST_NICK_SUFFIX;
        self.nick_retries = 0;
        self.state = ConnectionState::Disconnected;
        self.registered = false;
        self.quitting = false;
        self.end = None;
        info!(queued = self.join_queue.len(), "Session reset for reconnect");
    }

    fn stop(&mut self, end: SessionEnd) {
        self.quitting = true;
        self.state = ConnectionState::Quitting;
        self.end.get_or_insert(end);
    }
}

/// Strip a trailing `|<digits>` collision suffix.
pub fn base_nick(nick: &str) -> &str {
    match nick.rsplit_once(NICK_SUFFIX_SEPARATOR) {
        Some((base, suffix))
            if !base.is_empty() && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => nick,
    }
}
