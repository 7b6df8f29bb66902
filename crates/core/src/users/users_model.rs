use serde::{Deserialize, Serialize};

use crate::groups::GroupMember;

/// Domain model representing an application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&GroupMember> for User {
    fn from(member: &GroupMember) -> Self {
        User {
            id: member.user_id.clone(),
            name: member.user_name.clone(),
            email: member.user_email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_backend_payload() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","name":"Alex","email":"alex@example.com"}"#)
                .unwrap();
        assert_eq!(user.name, "Alex");
        assert_eq!(user.email, "alex@example.com");
    }
}
