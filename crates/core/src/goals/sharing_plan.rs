//! Minimal grant/revoke plan that moves a goal's sharing set to a desired set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::goals_model::{shared_user_ids, GoalUser};
use crate::errors::{Result, ValidationError};

/// One step of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SharingOperation {
    /// Atomic batch grant.
    Grant { user_ids: Vec<String> },
    Revoke { user_id: String },
}

impl SharingOperation {
    pub fn user_ids(&self) -> &[String] {
        match self {
            SharingOperation::Grant { user_ids } => user_ids,
            SharingOperation::Revoke { user_id } => std::slice::from_ref(user_id),
        }
    }
}

impl fmt::Display for SharingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingOperation::Grant { user_ids } => write!(f, "grant {}", user_ids.join(", ")),
            SharingOperation::Revoke { user_id } => write!(f, "revoke {}", user_id),
        }
    }
}

/// `to_add = desired - current`, `to_remove = current - desired`.
///
/// `to_add` keeps the order of `desired` and `to_remove` the order of
/// `current`; ids present in both sets produce no operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingPlan {
    pub goal_id: String,
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl SharingPlan {
    pub fn compute(goal_id: &str, current: &[String], desired: &[String]) -> Self {
        let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();

        SharingPlan {
            goal_id: goal_id.to_string(),
            to_add: difference(desired, &current_set),
            to_remove: difference(current, &desired_set),
        }
    }

    /// Like [`SharingPlan::compute`], but rejects inputs that break the caller contract:
    /// duplicate or blank ids in `desired`, or the owner's id in either set.
    pub fn try_compute(
        goal_id: &str,
        current: &[String],
        desired: &[String],
        owner_id: Option<&str>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for user_id in desired {
            if user_id.trim().is_empty() {
                return Err(precondition("desired contains a blank user id"));
            }
            if !seen.insert(user_id.as_str()) {
                return Err(precondition(&format!(
                    "desired lists user {} more than once",
                    user_id
                )));
            }
        }
        if let Some(owner_id) = owner_id {
            if seen.contains(owner_id) || current.iter().any(|id| id == owner_id) {
                return Err(precondition(&format!(
                    "owner {} cannot be granted or revoked",
                    owner_id
                )));
            }
        }
        Ok(Self::compute(goal_id, current, desired))
    }

    pub fn has_changes(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// The grant batch (if any) always precedes the revokes.
    pub fn operations(&self) -> Vec<SharingOperation> {
        let mut operations = Vec::with_capacity(self.to_remove.len() + 1);
        if !self.to_add.is_empty() {
            operations.push(SharingOperation::Grant {
                user_ids: self.to_add.clone(),
            });
        }
        operations.extend(
            self.to_remove
                .iter()
                .map(|user_id| SharingOperation::Revoke {
                    user_id: user_id.clone(),
                }),
        );
        operations
    }
}

fn difference(from: &[String], exclude: &HashSet<&str>) -> Vec<String> {
    let mut emitted = HashSet::new();
    let mut ids = Vec::new();
    for id in from {
        if !exclude.contains(id.as_str()) && emitted.insert(id.as_str()) {
            ids.push(id.clone());
        }
    }
    ids
}

fn precondition(message: &str) -> crate::Error {
    ValidationError::SharingPrecondition(message.to_string()).into()
}

/// Edit state of the "share this goal" dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct SharingDraft {
    goal_id: String,
    owner_id: Option<String>,
    goal_users: Vec<GoalUser>,
    current: Vec<String>,
    selected: Vec<String>,
}

impl SharingDraft {
    /// Seeds the selection with the users the goal is currently shared with.
    pub fn from_goal_users(goal_id: &str, goal_users: Vec<GoalUser>) -> Self {
        let owner_id = goal_users
            .iter()
            .find(|gu| gu.is_owner)
            .map(|gu| gu.user_id.clone());
        let current = shared_user_ids(&goal_users);
        SharingDraft {
            goal_id: goal_id.to_string(),
            owner_id,
            selected: current.clone(),
            current,
            goal_users,
        }
    }

    pub fn goal_id(&self) -> &str {
        &self.goal_id
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, user_id: &str) -> bool {
        self.selected.iter().any(|id| id == user_id)
    }

    /// Whether the goal is shared with `user_id` right now (not in the draft).
    pub fn is_shared(&self, user_id: &str) -> bool {
        self.current.iter().any(|id| id == user_id)
    }

    /// Non-owner rows, for the "shared with" list.
    pub fn shared_with(&self) -> Vec<&GoalUser> {
        self.goal_users.iter().filter(|gu| !gu.is_owner).collect()
    }

    /// Flips `user_id` in or out of the selection; the owner cannot be toggled.
    pub fn toggle(&mut self, user_id: &str) {
        if self.owner_id.as_deref() == Some(user_id) {
            return;
        }
        if let Some(index) = self.selected.iter().position(|id| id == user_id) {
            self.selected.remove(index);
        } else {
            self.selected.push(user_id.to_string());
        }
    }

    pub fn plan(&self) -> SharingPlan {
        SharingPlan::compute(&self.goal_id, &self.current, &self.selected)
    }

    pub fn has_changes(&self) -> bool {
        self.plan().has_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn goal_user(user_id: &str, is_owner: bool) -> GoalUser {
        GoalUser {
            goal_id: "goal-1".to_string(),
            user_id: user_id.to_string(),
            user_name: user_id.to_uppercase(),
            is_owner,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_swaps_one_member() {
        let plan = SharingPlan::compute("goal-1", &ids(&["u1", "u2"]), &ids(&["u2", "u3"]));
        assert_eq!(plan.to_add, ids(&["u3"]));
        assert_eq!(plan.to_remove, ids(&["u1"]));
        assert!(plan.has_changes());
        assert_eq!(
            plan.operations(),
            vec![
                SharingOperation::Grant {
                    user_ids: ids(&["u3"])
                },
                SharingOperation::Revoke {
                    user_id: "u1".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_identical_sets_have_no_changes() {
        let plan = SharingPlan::compute("goal-1", &ids(&["u2", "u3"]), &ids(&["u3", "u2"]));
        assert!(!plan.has_changes());
        assert!(plan.operations().is_empty());
    }

    #[test]
    fn test_grant_is_a_single_batch() {
        let plan = SharingPlan::compute("goal-1", &[], &ids(&["u2", "u3", "u4"]));
        assert_eq!(
            plan.operations(),
            vec![SharingOperation::Grant {
                user_ids: ids(&["u2", "u3", "u4"])
            }]
        );
    }

    #[test]
    fn test_revokes_follow_current_order() {
        let plan = SharingPlan::compute("goal-1", &ids(&["u1", "u2", "u3"]), &ids(&["u2"]));
        let rendered: Vec<String> = plan.operations().iter().map(|op| op.to_string()).collect();
        assert_eq!(rendered, vec!["revoke u1", "revoke u3"]);
    }

    #[test]
    fn test_preconditions() {
        assert!(SharingPlan::try_compute("g", &[], &ids(&["u2", "u2"]), None).is_err());
        assert!(SharingPlan::try_compute("g", &[], &ids(&[" "]), None).is_err());
        assert!(SharingPlan::try_compute("g", &[], &ids(&["u1"]), Some("u1")).is_err());
        assert!(SharingPlan::try_compute("g", &ids(&["u1"]), &[], Some("u1")).is_err());
        assert!(SharingPlan::try_compute("g", &ids(&["u2"]), &ids(&["u3"]), Some("u1")).is_ok());
    }

    #[test]
    fn test_draft_toggles_selection() {
        let mut draft = SharingDraft::from_goal_users(
            "goal-1",
            vec![goal_user("u1", true), goal_user("u2", false)],
        );
        assert_eq!(draft.owner_id(), Some("u1"));
        assert_eq!(draft.current(), ids(&["u2"]).as_slice());
        assert!(!draft.has_changes());

        draft.toggle("u3");
        draft.toggle("u2");
        assert!(draft.is_selected("u3"));
        assert!(!draft.is_selected("u2"));
        assert!(draft.is_shared("u2"));
        assert!(draft.has_changes());
        let plan = draft.plan();
        assert_eq!(plan.to_add, ids(&["u3"]));
        assert_eq!(plan.to_remove, ids(&["u2"]));

        draft.toggle("u3");
        draft.toggle("u2");
        assert!(!draft.has_changes());
    }

    #[test]
    fn test_draft_ignores_owner_toggle() {
        let mut draft = SharingDraft::from_goal_users("goal-1", vec![goal_user("u1", true)]);
        draft.toggle("u1");
        assert!(draft.selected().is_empty());
        assert!(draft.shared_with().is_empty());
    }
}
