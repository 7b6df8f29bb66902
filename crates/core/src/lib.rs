//! Famledger Core - view scoping, group membership, and goal sharing.
//!
//! This crate holds the client-side logic that decides whose records a
//! caller is looking at and keeps a goal's sharing set in sync with the
//! backend. It is transport- and database-agnostic; collaborator traits are
//! implemented by the `connect` and `storage-sqlite` crates.

pub mod errors;
pub mod events;
pub mod goals;
pub mod groups;
pub mod users;
pub mod view_context;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
