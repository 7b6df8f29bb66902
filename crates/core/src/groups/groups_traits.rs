use crate::errors::Result;
use crate::groups::{GroupMember, UserGroup};
use async_trait::async_trait;

/// Read access to the caller's groups, provided by the backend.
#[async_trait]
pub trait UserGroupApiTrait: Send + Sync {
    /// Groups the authenticated caller belongs to, with their members.
    async fn get_groups(&self) -> Result<Vec<UserGroup>>;
}

/// Trait for group membership service operations
#[async_trait]
pub trait GroupMembershipServiceTrait: Send + Sync {
    async fn get_groups(&self) -> Result<Vec<UserGroup>>;
    async fn other_members(&self, caller_id: &str) -> Result<Vec<GroupMember>>;
}
