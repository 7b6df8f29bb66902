//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::view_context::ViewMode;

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about client-side state changes. Runtime
/// adapters translate them into platform-specific actions (refetching scoped
/// data, refreshing a goal's "shared with" list, etc.).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The active view context changed and was persisted.
    /// Every scoped read issued before this event is stale.
    ViewContextChanged { mode: ViewMode },

    /// Sharing steps for a goal were confirmed by the backend.
    /// Also emitted after a partially applied run, listing only the steps that succeeded.
    GoalSharingChanged {
        goal_id: String,
        granted: Vec<String>,
        revoked: Vec<String>,
    },
}

impl DomainEvent {
    /// Creates a ViewContextChanged event.
    pub fn view_context_changed(mode: ViewMode) -> Self {
        Self::ViewContextChanged { mode }
    }

    /// Creates a GoalSharingChanged event.
    pub fn goal_sharing_changed(
        goal_id: String,
        granted: Vec<String>,
        revoked: Vec<String>,
    ) -> Self {
        Self::GoalSharingChanged {
            goal_id,
            granted,
            revoked,
        }
    }
}
