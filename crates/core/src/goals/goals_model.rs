//! Goals domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    /// Absent on goals the backend returns without sharing details.
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub shared_with: Vec<GoalUser>,
}

impl Goal {
    /// The single owner row of `shared_with`, checked against `owner_id` when
    /// the backend supplied one.
    pub fn owner_row(&self) -> Result<&GoalUser> {
        let mut owners = self.shared_with.iter().filter(|gu| gu.is_owner);
        let owner = owners.next().ok_or_else(|| {
            ValidationError::InvalidInput(format!("goal {} has no owner row", self.id))
        })?;
        if owners.next().is_some() {
            return Err(ValidationError::InvalidInput(format!(
                "goal {} has more than one owner row",
                self.id
            ))
            .into());
        }
        match self.owner_id.as_deref() {
            Some(owner_id) if owner_id != owner.user_id => {
                Err(ValidationError::InvalidInput(format!(
                    "goal {} owner row belongs to {} instead of {}",
                    self.id, owner.user_id, owner_id
                ))
                .into())
            }
            _ => Ok(owner),
        }
    }

    /// User ids the goal is shared with, excluding the owner.
    pub fn shared_user_ids(&self) -> Vec<String> {
        shared_user_ids(&self.shared_with)
    }

    pub fn is_shared(&self) -> bool {
        self.shared_with.iter().any(|gu| !gu.is_owner)
    }

    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount).clamp(0.0, 1.0)
    }
}

/// A user with access to a goal; exactly one row per goal has `is_owner` set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalUser {
    #[serde(default)]
    pub goal_id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub is_owner: bool,
    pub added_at: DateTime<Utc>,
}

pub fn shared_user_ids(goal_users: &[GoalUser]) -> Vec<String> {
    goal_users
        .iter()
        .filter(|gu| !gu.is_owner)
        .map(|gu| gu.user_id.clone())
        .collect()
}

/// Body of the atomic batch grant call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareGoalRequest {
    pub goal_id: String,
    pub user_ids: Vec<String>,
}

/// Body of the single-user revoke call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnshareGoalRequest {
    pub goal_id: String,
    pub user_id: String,
}
