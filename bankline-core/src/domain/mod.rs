//! Core domain entities
//!
//! Pure data structures shared by the gateway and services - no I/O or
//! external dependencies.

mod session;
mod transaction;
pub mod result;

pub use session::Session;
pub use transaction::{TransactionKind, TransactionRecord};
