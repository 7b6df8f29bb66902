//! SQLite storage for the persisted view-context record.

mod model;
mod repository;

pub use model::AppSettingDB;
pub use repository::ViewContextRepository;

// Re-export trait from core for convenience
pub use famledger_core::view_context::ViewContextRepositoryTrait;
