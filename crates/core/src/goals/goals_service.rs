use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::goals_model::Goal;
use super::goals_traits::{GoalQueryServiceTrait, GoalReadApiTrait};
use crate::errors::Result;
use crate::view_context::{resolve, ViewContextState};

/// Scoped goal reads for the active view context.
pub struct GoalQueryService {
    api: Arc<dyn GoalReadApiTrait>,
}

impl GoalQueryService {
    pub fn new(api: Arc<dyn GoalReadApiTrait>) -> Self {
        GoalQueryService { api }
    }
}

#[async_trait]
impl GoalQueryServiceTrait for GoalQueryService {
    async fn get_goals(&self, state: &ViewContextState) -> Result<Vec<Goal>> {
        let scope = resolve(state);
        debug!("Loading goals for scope {:?}", scope);
        self.api.get_goals(&scope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::view_context::ScopeDescriptor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockGoalReadApi {
        scopes: Mutex<Vec<ScopeDescriptor>>,
        reject_scoped: bool,
    }

    #[async_trait]
    impl GoalReadApiTrait for MockGoalReadApi {
        async fn get_goals(&self, scope: &ScopeDescriptor) -> Result<Vec<Goal>> {
            self.scopes.lock().unwrap().push(scope.clone());
            if self.reject_scoped && !scope.is_caller() {
                return Err(Error::Authorization(
                    "caller does not share a group with this member".to_string(),
                ));
            }
            Ok(Vec::new())
        }
    }

    fn member_state(user_id: &str) -> ViewContextState {
        ViewContextState::Member {
            member_user_id: user_id.to_string(),
            member_user_name: "Sam".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reads_follow_view_context() {
        let api = Arc::new(MockGoalReadApi::default());
        let service = GoalQueryService::new(api.clone());

        service.get_goals(&ViewContextState::Own).await.unwrap();
        service.get_goals(&member_state("u2")).await.unwrap();
        service.get_goals(&ViewContextState::All).await.unwrap();

        assert_eq!(
            *api.scopes.lock().unwrap(),
            vec![
                ScopeDescriptor::Caller,
                ScopeDescriptor::SpecificMember("u2".to_string()),
                ScopeDescriptor::AllMembersOfCaller,
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_scope_is_surfaced_verbatim() {
        let api = Arc::new(MockGoalReadApi {
            reject_scoped: true,
            ..Default::default()
        });
        let service = GoalQueryService::new(api);

        assert!(service.get_goals(&ViewContextState::Own).await.is_ok());
        let err = service.get_goals(&member_state("u9")).await.unwrap_err();
        assert!(matches!(err, Error::Authorization(message) if message.contains("share a group")));
    }
}
