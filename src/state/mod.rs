//! Session state module.
//!
//! Contains the per-connection [`Session`] and the operator registry that
//! answers privilege queries.

mod operators;
mod privilege;
mod session;

pub use operators::OperatorRegistry;
pub use privilege::PrivilegeLevel;
pub use session::{ConnectionState, Identity, Session, SessionEnd};
