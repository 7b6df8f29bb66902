use async_trait::async_trait;
use log::{debug, error, info};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::goals_model::{shared_user_ids, ShareGoalRequest, UnshareGoalRequest};
use super::goals_traits::{GoalSharingApiTrait, GoalSharingServiceTrait};
use super::sharing_plan::{SharingDraft, SharingOperation, SharingPlan};
use crate::errors::{Error, PartialApplyError, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};

/// Outcome of a reconciliation run in which every step succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub goal_id: String,
    pub completed: Vec<SharingOperation>,
}

impl ReconciliationReport {
    pub fn granted(&self) -> Vec<String> {
        granted(&self.completed)
    }

    pub fn revoked(&self) -> Vec<String> {
        revoked(&self.completed)
    }

    pub fn is_noop(&self) -> bool {
        self.completed.is_empty()
    }
}

fn granted(operations: &[SharingOperation]) -> Vec<String> {
    operations
        .iter()
        .filter_map(|op| match op {
            SharingOperation::Grant { user_ids } => Some(user_ids.iter().cloned()),
            SharingOperation::Revoke { .. } => None,
        })
        .flatten()
        .collect()
}

fn revoked(operations: &[SharingOperation]) -> Vec<String> {
    operations
        .iter()
        .filter_map(|op| match op {
            SharingOperation::Revoke { user_id } => Some(user_id.clone()),
            SharingOperation::Grant { .. } => None,
        })
        .collect()
}

/// Applies sharing plans against the backend.
///
/// A plan is executed as an ordered list of operations: the grant batch,
/// then one revoke per id, each awaited before the next. The run stops at the
/// first failure without retrying or compensating completed steps.
pub struct GoalSharingService {
    api: Arc<dyn GoalSharingApiTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    in_flight: Mutex<HashSet<String>>,
}

/// Marks a goal as having a run in progress until dropped.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    goal_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.goal_id);
        }
    }
}

impl GoalSharingService {
    pub fn new(api: Arc<dyn GoalSharingApiTrait>, event_sink: Arc<dyn DomainEventSink>) -> Self {
        GoalSharingService {
            api,
            event_sink,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_pending_for(&self, goal_id: &str) -> bool {
        self.in_flight
            .lock()
            .map(|in_flight| in_flight.contains(goal_id))
            .unwrap_or(false)
    }

    fn begin(&self, goal_id: &str) -> Result<InFlightGuard<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|e| Error::Unexpected(format!("sharing state poisoned: {}", e)))?;
        if !in_flight.insert(goal_id.to_string()) {
            return Err(ValidationError::SharingPrecondition(format!(
                "a sharing update for goal {} is already in progress",
                goal_id
            ))
            .into());
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            goal_id: goal_id.to_string(),
        })
    }

    /// Runs an already computed plan.
    pub async fn run_plan(&self, plan: &SharingPlan) -> Result<ReconciliationReport> {
        let _guard = self.begin(&plan.goal_id)?;
        self.execute(plan).await
    }

    async fn execute(&self, plan: &SharingPlan) -> Result<ReconciliationReport> {
        let operations = plan.operations();
        debug!(
            "Reconciling sharing for goal {}: add {:?}, remove {:?}",
            plan.goal_id, plan.to_add, plan.to_remove
        );

        let mut completed: Vec<SharingOperation> = Vec::with_capacity(operations.len());
        for (index, operation) in operations.iter().enumerate() {
            if let Err(e) = self.apply(&plan.goal_id, operation).await {
                error!(
                    "Sharing step '{}' for goal {} failed: {}",
                    operation, plan.goal_id, e
                );
                self.emit_changes(&plan.goal_id, &completed);
                if completed.is_empty() {
                    return Err(e);
                }
                return Err(PartialApplyError {
                    goal_id: plan.goal_id.clone(),
                    completed,
                    failed: operation.clone(),
                    remaining: operations[index + 1..].to_vec(),
                    cause: Box::new(e),
                }
                .into());
            }
            info!("Sharing step '{}' for goal {} applied", operation, plan.goal_id);
            completed.push(operation.clone());
        }

        self.emit_changes(&plan.goal_id, &completed);
        Ok(ReconciliationReport {
            goal_id: plan.goal_id.clone(),
            completed,
        })
    }

    async fn apply(&self, goal_id: &str, operation: &SharingOperation) -> Result<()> {
        match operation {
            SharingOperation::Grant { user_ids } => {
                self.api
                    .share_goal(ShareGoalRequest {
                        goal_id: goal_id.to_string(),
                        user_ids: user_ids.clone(),
                    })
                    .await
            }
            SharingOperation::Revoke { user_id } => {
                self.api
                    .unshare_goal(UnshareGoalRequest {
                        goal_id: goal_id.to_string(),
                        user_id: user_id.clone(),
                    })
                    .await
            }
        }
    }

    fn emit_changes(&self, goal_id: &str, completed: &[SharingOperation]) {
        if completed.is_empty() {
            return;
        }
        self.event_sink.emit(DomainEvent::goal_sharing_changed(
            goal_id.to_string(),
            granted(completed),
            revoked(completed),
        ));
    }
}

#[async_trait]
impl GoalSharingServiceTrait for GoalSharingService {
    fn is_pending(&self) -> bool {
        self.in_flight
            .lock()
            .map(|in_flight| !in_flight.is_empty())
            .unwrap_or(false)
    }

    async fn load_draft(&self, goal_id: &str) -> Result<SharingDraft> {
        let goal_users = self.api.get_goal_users(goal_id).await?;
        Ok(SharingDraft::from_goal_users(goal_id, goal_users))
    }

    async fn save(&self, draft: &SharingDraft) -> Result<ReconciliationReport> {
        let plan = SharingPlan::try_compute(
            draft.goal_id(),
            draft.current(),
            draft.selected(),
            draft.owner_id(),
        )?;
        self.run_plan(&plan).await
    }

    async fn reconcile(
        &self,
        goal_id: &str,
        current: &[String],
        desired: &[String],
    ) -> Result<ReconciliationReport> {
        let plan = SharingPlan::try_compute(goal_id, current, desired, None)?;
        self.run_plan(&plan).await
    }

    /// Re-reads the goal's users before planning, so it is safe to call after a
    /// partially applied run.
    async fn reconcile_remote(
        &self,
        goal_id: &str,
        desired: &[String],
    ) -> Result<ReconciliationReport> {
        let _guard = self.begin(goal_id)?;
        let goal_users = self.api.get_goal_users(goal_id).await?;
        let owner_id = goal_users
            .iter()
            .find(|gu| gu.is_owner)
            .map(|gu| gu.user_id.as_str());
        let current = shared_user_ids(&goal_users);
        let plan = SharingPlan::try_compute(goal_id, &current, desired, owner_id)?;
        self.execute(&plan).await
    }
}
