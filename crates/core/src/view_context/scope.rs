//! Query scope requested from data collaborators.
//!
//! The resolver only *requests* a scope. The collaborator must verify that the
//! caller shares an active group with the requested member (or with every
//! member aggregated under All) before returning anything but the caller's
//! own records.

use serde::Serialize;

use super::{ViewContextState, ViewMode};

/// Which records a scoped read asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeDescriptor {
    /// The caller's own records; sent as no scope at all.
    Caller,
    SpecificMember(String),
    AllMembersOfCaller,
}

impl ScopeDescriptor {
    pub fn is_caller(&self) -> bool {
        matches!(self, ScopeDescriptor::Caller)
    }

    /// Wire parameters for the scoped query contract.
    pub fn query(&self) -> ScopeQuery {
        match self {
            ScopeDescriptor::Caller => ScopeQuery::default(),
            ScopeDescriptor::SpecificMember(user_id) => ScopeQuery {
                context: Some(ViewMode::Member),
                member_user_id: Some(user_id.clone()),
            },
            ScopeDescriptor::AllMembersOfCaller => ScopeQuery {
                context: Some(ViewMode::All),
                member_user_id: None,
            },
        }
    }
}

/// `{ context?: 2|3, memberUserId? }`; an empty query means Own scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_user_id: Option<String>,
}

impl ScopeQuery {
    pub fn is_empty(&self) -> bool {
        self.context.is_none() && self.member_user_id.is_none()
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(context) = self.context {
            pairs.push(("context", context.code().to_string()));
        }
        if let Some(member_user_id) = &self.member_user_id {
            pairs.push(("memberUserId", member_user_id.clone()));
        }
        pairs
    }
}

pub fn resolve(state: &ViewContextState) -> ScopeDescriptor {
    match state {
        ViewContextState::Own => ScopeDescriptor::Caller,
        ViewContextState::Member { member_user_id, .. } => {
            ScopeDescriptor::SpecificMember(member_user_id.clone())
        }
        ViewContextState::All => ScopeDescriptor::AllMembersOfCaller,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_each_mode() {
        assert_eq!(resolve(&ViewContextState::Own), ScopeDescriptor::Caller);
        assert_eq!(
            resolve(&ViewContextState::Member {
                member_user_id: "u2".to_string(),
                member_user_name: "Ana".to_string(),
            }),
            ScopeDescriptor::SpecificMember("u2".to_string())
        );
        assert_eq!(
            resolve(&ViewContextState::All),
            ScopeDescriptor::AllMembersOfCaller
        );
    }

    #[test]
    fn test_own_scope_sends_no_parameters() {
        let query = resolve(&ViewContextState::Own).query();
        assert!(query.is_empty());
        assert!(query.pairs().is_empty());
        assert_eq!(serde_json::to_string(&query).unwrap(), "{}");
    }

    #[test]
    fn test_member_and_all_query_pairs() {
        let member = ScopeDescriptor::SpecificMember("u2".to_string()).query();
        assert_eq!(
            member.pairs(),
            vec![
                ("context", "2".to_string()),
                ("memberUserId", "u2".to_string())
            ]
        );
        let all = ScopeDescriptor::AllMembersOfCaller.query();
        assert_eq!(all.pairs(), vec![("context", "3".to_string())]);
        assert_eq!(serde_json::to_string(&all).unwrap(), r#"{"context":3}"#);
    }
}
