//! User group domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a member inside a group; serialized as `1` Owner, `2` Member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GroupMemberRole {
    Owner,
    Member,
}

impl GroupMemberRole {
    pub fn label(self) -> &'static str {
        match self {
            GroupMemberRole::Owner => "Owner",
            GroupMemberRole::Member => "Member",
        }
    }
}

impl From<GroupMemberRole> for u8 {
    fn from(role: GroupMemberRole) -> Self {
        match role {
            GroupMemberRole::Owner => 1,
            GroupMemberRole::Member => 2,
        }
    }
}

impl TryFrom<u8> for GroupMemberRole {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(GroupMemberRole::Owner),
            2 => Ok(GroupMemberRole::Member),
            other => Err(format!("unknown group member role {}", other)),
        }
    }
}

/// Membership of one user in one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    // The members endpoint nests rows under their group and may omit it.
    #[serde(default)]
    pub group_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub role: GroupMemberRole,
    pub joined_at: DateTime<Utc>,
}

/// A named set of users joined through an invite code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub invite_code: String,
    pub created_by_user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

impl UserGroup {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    pub fn owner(&self) -> Option<&GroupMember> {
        self.members
            .iter()
            .find(|m| m.role == GroupMemberRole::Owner)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
