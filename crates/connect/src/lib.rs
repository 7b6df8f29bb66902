//! Famledger Connect - HTTP access to the Famledger backend.
//!
//! This crate implements the collaborator traits `famledger-core` depends on
//! (groups, goal sharing, scoped goal reads) over the REST API.

pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::FamledgerApiClient;
pub use config::{ApiConfig, DEFAULT_API_URL};
