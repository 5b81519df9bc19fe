//! Standardized span constructors for IRC observability.

use slirc_line::{InboundEvent, is_channel};
use tracing::{Level, Span, info_span, span};

/// Span for one dispatched inbound event.
pub fn event_span(event: &InboundEvent) -> Span {
    let channel = event
        .args
        .iter()
        .map(|a| a.trim_start_matches(':'))
        .find(|a| is_channel(a));
    span!(
        Level::DEBUG,
        "irc.event",
        verb = %event.verb,
        source_nick = event.source_nick(),
        channel = channel,
    )
}

/// Span for one connection to the server.
pub fn session_span(host: &str, port: u16, session: u32) -> Span {
    info_span!("session", host = %host, port = port, session = session)
}
