use log::{debug, error, warn};
use std::sync::Arc;

use super::permissions::{self, Permissions};
use super::scope::{self, ScopeDescriptor, ScopeQuery};
use super::view_context_model::{parse_view_context, ViewContextRecord, ViewContextState};
use super::ViewContextRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::groups::GroupMember;

/// Prefix of the storage key; the full key is scoped to one user.
pub const VIEW_CONTEXT_KEY_PREFIX: &str = "view_context";

pub fn storage_key_for(user_id: &str) -> String {
    format!("{}:{}", VIEW_CONTEXT_KEY_PREFIX, user_id)
}

/// Long-lived holder of the caller's viewing mode.
///
/// Every transition is written to storage before the in-memory state changes,
/// so a read that follows a successful transition always sees the new mode,
/// and a failed write leaves both copies on the previous mode.
pub struct ViewContextStore {
    repository: Arc<dyn ViewContextRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    storage_key: String,
    state: ViewContextState,
}

impl ViewContextStore {
    /// Restores the persisted state, falling back to Own when it is missing or unreadable.
    pub fn open(
        repository: Arc<dyn ViewContextRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let state = Self::restore(repository.as_ref(), &storage_key);
        ViewContextStore {
            repository,
            event_sink,
            storage_key,
            state,
        }
    }

    pub fn for_user(
        repository: Arc<dyn ViewContextRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        user_id: &str,
    ) -> Self {
        Self::open(repository, event_sink, storage_key_for(user_id))
    }

    fn restore(repository: &dyn ViewContextRepositoryTrait, key: &str) -> ViewContextState {
        let raw = match repository.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ViewContextState::Own,
            Err(e) => {
                error!("Failed to read view context '{}': {}. Using Own.", key, e);
                return ViewContextState::Own;
            }
        };

        match parse_view_context(&raw) {
            Ok(state) => {
                debug!("Restored view context '{}': {:?}", key, state.mode());
                state
            }
            Err(e) => {
                warn!("Ignoring stored view context '{}': {}. Using Own.", key, e);
                ViewContextState::Own
            }
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn state(&self) -> &ViewContextState {
        &self.state
    }

    /// Owned copy of the current state, for threading through scoped calls.
    pub fn snapshot(&self) -> ViewContextState {
        self.state.clone()
    }

    pub fn is_own(&self) -> bool {
        self.state.is_own()
    }

    pub fn is_member(&self) -> bool {
        self.state.is_member()
    }

    pub fn is_all(&self) -> bool {
        self.state.is_all()
    }

    pub fn can_edit(&self) -> bool {
        permissions::can_edit(&self.state)
    }

    pub fn can_add_own(&self) -> bool {
        permissions::can_add_own(&self.state)
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_state(&self.state)
    }

    pub fn scope(&self) -> ScopeDescriptor {
        scope::resolve(&self.state)
    }

    pub fn query_params(&self) -> ScopeQuery {
        self.scope().query()
    }

    pub fn set_own(&mut self) -> Result<()> {
        self.transition(ViewContextState::Own)
    }

    pub fn set_member(&mut self, member: &GroupMember) -> Result<()> {
        if member.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.transition(ViewContextState::member(member))
    }

    pub fn set_all(&mut self) -> Result<()> {
        self.transition(ViewContextState::All)
    }

    fn transition(&mut self, next: ViewContextState) -> Result<()> {
        let raw = ViewContextRecord::from(&next).to_json()?;
        self.repository.save(&self.storage_key, &raw).map_err(|e| {
            error!(
                "Failed to persist view context '{}': {}",
                self.storage_key, e
            );
            e
        })?;

        debug!(
            "View context '{}' changed: {:?} -> {:?}",
            self.storage_key,
            self.state.mode(),
            next.mode()
        );
        self.state = next;
        self.event_sink
            .emit(DomainEvent::view_context_changed(self.state.mode()));
        Ok(())
    }
}
