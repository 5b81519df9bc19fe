//! Quote provider abstraction.
//!
//! Quotes are named lists of one-line entries. The engine only looks them
//! up; loading happens in the background and readers observe "not loaded"
//! until a list has been published.

use std::fmt;
use thiserror::Error;

pub mod noop;
pub mod store;

pub use noop::NoQuotes;
pub use store::QuoteStore;

/// Lookup failures. `Display` is the text shown to users in chat.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("{0} quotes not loaded!")]
    NotLoaded(String),
    #[error("The specified quote was not found in the quote list.")]
    IndexOutOfRange { name: String, index: usize },
    #[error("{0} has no quotes.")]
    Empty(String),
}

/// One entry of a quote list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// 1-based position in its list.
    pub index: usize,
    pub text: String,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.index, self.text)
    }
}

pub trait QuoteProvider: Send + Sync {
    /// Start loading every list. Returns immediately.
    fn load_all(&self);

    /// Whether the named list has been published.
    fn is_loaded(&self, name: &str) -> bool;

    /// Names of every published list, sorted.
    fn list_loaded(&self) -> Vec<String>;

    /// A uniformly random entry of the named list.
    fn random_quote(&self, name: &str) -> Result<Quote, QuoteError>;

    /// The entry at a 1-based `index` of the named list.
    fn quote_at(&self, name: &str, index: usize) -> Result<Quote, QuoteError>;

    /// Abort any loading still in progress. Published lists stay available.
    fn cancel(&self);
}
