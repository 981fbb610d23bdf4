//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Local filesystem for the CredentialStore port (session.json)
//! - In-memory store for tests and embedders

pub mod file_store;
pub mod memory_store;

pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;
