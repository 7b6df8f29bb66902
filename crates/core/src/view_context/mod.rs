//! View context module - viewing mode state, permission gate, and scope resolution.

mod memory_repository;
pub mod permissions;
mod picker;
pub mod scope;
mod view_context_model;
mod view_context_store;
mod view_context_traits;

pub use memory_repository::InMemoryViewContextRepository;
pub use permissions::{can_add_own, can_edit, require_add_own, require_edit, Permissions};
pub use picker::{ViewModeOption, ViewModePicker};
pub use scope::{resolve, ScopeDescriptor, ScopeQuery};
pub use view_context_model::{parse_view_context, ViewContextRecord, ViewContextState, ViewMode};
pub use view_context_store::{storage_key_for, ViewContextStore, VIEW_CONTEXT_KEY_PREFIX};
pub use view_context_traits::ViewContextRepositoryTrait;
