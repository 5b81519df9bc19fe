//! No-op quote provider used when no quote directory is configured.
//!
//! Every lookup fails with `NotLoaded`.

use super::{Quote, QuoteError, QuoteProvider};

pub struct NoQuotes;

impl QuoteProvider for NoQuotes {
    fn load_all(&self) {}

    fn is_loaded(&self, _name: &str) -> bool {
        false
    }

    fn list_loaded(&self) -> Vec<String> {
        vec![]
    }

    fn random_quote(&self, name: &str) -> Result<Quote, QuoteError> {
        Err(QuoteError::NotLoaded(name.to_string()))
    }

    fn quote_at(&self, name: &str, _index: usize) -> Result<Quote, QuoteError> {
        Err(QuoteError::NotLoaded(name.to_string()))
    }

    fn cancel(&self) {}
}
