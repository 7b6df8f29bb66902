//! SQLite storage implementation for Famledger.
//!
//! This crate provides the database-related functionality using Diesel ORM with SQLite:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The view-context repository implementing `famledger-core`'s persistence trait
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod view_context;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from famledger-core for convenience
pub use famledger_core::errors::{DatabaseError, Error, Result};
