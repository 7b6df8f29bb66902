use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::groups_model::{GroupMember, UserGroup};
use super::groups_traits::{GroupMembershipServiceTrait, UserGroupApiTrait};
use super::membership::other_members;
use crate::errors::Result;
use crate::users::User;
use crate::view_context::{ViewContextState, ViewModePicker};

/// Fetches the caller's groups and derives the member lists the view
/// switcher and the goal-sharing dialog offer.
pub struct GroupMembershipService {
    api: Arc<dyn UserGroupApiTrait>,
}

impl GroupMembershipService {
    pub fn new(api: Arc<dyn UserGroupApiTrait>) -> Self {
        GroupMembershipService { api }
    }

    pub async fn view_mode_picker(
        &self,
        caller: &User,
        current: &ViewContextState,
    ) -> Result<ViewModePicker> {
        let groups = self.api.get_groups().await?;
        Ok(ViewModePicker::build(&groups, &caller.id, current))
    }
}

#[async_trait]
impl GroupMembershipServiceTrait for GroupMembershipService {
    async fn get_groups(&self) -> Result<Vec<UserGroup>> {
        self.api.get_groups().await
    }

    async fn other_members(&self, caller_id: &str) -> Result<Vec<GroupMember>> {
        let groups = self.api.get_groups().await?;
        let members = other_members(&groups, caller_id);
        debug!(
            "Caller {} shares {} group(s) with {} other member(s)",
            caller_id,
            groups.len(),
            members.len()
        );
        Ok(members)
    }
}
