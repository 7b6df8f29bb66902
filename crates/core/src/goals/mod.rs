//! Goals module - goal models, sharing reconciliation, and the sharing API traits.

mod goals_model;
mod goals_service;
mod goals_traits;
mod sharing_plan;
mod sharing_service;

pub use goals_model::{shared_user_ids, Goal, GoalUser, ShareGoalRequest, UnshareGoalRequest};
pub use goals_service::GoalQueryService;
pub use goals_traits::{
    GoalQueryServiceTrait, GoalReadApiTrait, GoalSharingApiTrait, GoalSharingServiceTrait,
};
pub use sharing_plan::{SharingDraft, SharingOperation, SharingPlan};
pub use sharing_service::{GoalSharingService, ReconciliationReport};
