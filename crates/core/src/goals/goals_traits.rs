use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUser, ShareGoalRequest, UnshareGoalRequest};
use crate::goals::sharing_plan::SharingDraft;
use crate::goals::sharing_service::ReconciliationReport;
use crate::view_context::{ScopeDescriptor, ViewContextState};
use async_trait::async_trait;

/// Backend sharing endpoints.
///
/// Both mutations must be idempotent: granting an id that is already shared,
/// or revoking one that is not, succeeds as a no-op.
#[async_trait]
pub trait GoalSharingApiTrait: Send + Sync {
    /// Grants every listed id or none of them.
    async fn share_goal(&self, request: ShareGoalRequest) -> Result<()>;
    async fn unshare_goal(&self, request: UnshareGoalRequest) -> Result<()>;
    /// All rows for the goal, including the owner row.
    async fn get_goal_users(&self, goal_id: &str) -> Result<Vec<GoalUser>>;
}

/// Scoped goal reads. The backend authorizes the requested scope.
#[async_trait]
pub trait GoalReadApiTrait: Send + Sync {
    async fn get_goals(&self, scope: &ScopeDescriptor) -> Result<Vec<Goal>>;
}

/// Trait for goal read service operations
#[async_trait]
pub trait GoalQueryServiceTrait: Send + Sync {
    /// Goals visible in `state`'s scope.
    async fn get_goals(&self, state: &ViewContextState) -> Result<Vec<Goal>>;
}

/// Trait for goal sharing service operations
#[async_trait]
pub trait GoalSharingServiceTrait: Send + Sync {
    fn is_pending(&self) -> bool;
    async fn load_draft(&self, goal_id: &str) -> Result<SharingDraft>;
    async fn save(&self, draft: &SharingDraft) -> Result<ReconciliationReport>;
    async fn reconcile(
        &self,
        goal_id: &str,
        current: &[String],
        desired: &[String],
    ) -> Result<ReconciliationReport>;
    async fn reconcile_remote(
        &self,
        goal_id: &str,
        desired: &[String],
    ) -> Result<ReconciliationReport>;
}
