//! Core handler infrastructure: the handler trait, its context, and the
//! verb-keyed registry.

mod context;
mod registry;

pub use context::{Context, Handler};
pub use registry::Registry;
