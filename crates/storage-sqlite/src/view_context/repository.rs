use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::app_settings::dsl::*;
use famledger_core::errors::Result;
use famledger_core::view_context::ViewContextRepositoryTrait;

/// Stores the serialized view context in the `app_settings` key/value table.
pub struct ViewContextRepository {
    pool: Arc<DbPool>,
}

impl ViewContextRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ViewContextRepository { pool }
    }
}

impl ViewContextRepositoryTrait for ViewContextRepository {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::replace_into(app_settings)
            .values(&AppSettingDB {
                setting_key: key.to_string(),
                setting_value: value.to_string(),
            })
            .execute(&mut conn)
            .into_core()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use famledger_core::events::MockDomainEventSink;
    use famledger_core::groups::{GroupMember, GroupMemberRole};
    use famledger_core::view_context::{ViewContextState, ViewContextStore, ViewMode};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<DbPool>) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("app.db");
        let pool = create_pool(db_path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        (dir, pool)
    }

    fn member() -> GroupMember {
        GroupMember {
            group_id: "g1".to_string(),
            user_id: "u2".to_string(),
            user_name: "Sam".to_string(),
            user_email: "sam@example.com".to_string(),
            role: GroupMemberRole::Member,
            joined_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_load_missing_key_returns_none() {
        let (_dir, pool) = setup();
        let repo = ViewContextRepository::new(pool);
        assert_eq!(repo.load("view_context:u1").unwrap(), None);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let (_dir, pool) = setup();
        let repo = ViewContextRepository::new(pool);

        repo.save("view_context:u1", r#"{"mode":3}"#).unwrap();
        repo.save("view_context:u1", r#"{"mode":1}"#).unwrap();

        assert_eq!(
            repo.load("view_context:u1").unwrap().as_deref(),
            Some(r#"{"mode":1}"#)
        );
    }

    #[test]
    fn test_view_context_survives_restart() {
        let (_dir, pool) = setup();
        {
            let mut store = ViewContextStore::for_user(
                Arc::new(ViewContextRepository::new(pool.clone())),
                Arc::new(MockDomainEventSink::new()),
                "u1",
            );
            store.set_member(&member()).unwrap();
        }

        let store = ViewContextStore::for_user(
            Arc::new(ViewContextRepository::new(pool)),
            Arc::new(MockDomainEventSink::new()),
            "u1",
        );
        assert_eq!(store.state().mode(), ViewMode::Member);
        assert_eq!(store.state().member_user_id(), Some("u2"));
        assert!(!store.can_edit());
    }

    #[test]
    fn test_corrupt_row_falls_back_to_own() {
        let (_dir, pool) = setup();
        let repo = Arc::new(ViewContextRepository::new(pool));
        repo.save("view_context:u1", "not json").unwrap();

        let mut store =
            ViewContextStore::for_user(repo.clone(), Arc::new(MockDomainEventSink::new()), "u1");
        assert_eq!(*store.state(), ViewContextState::Own);

        store.set_all().unwrap();
        let raw = repo.load("view_context:u1").unwrap().unwrap();
        assert!(raw.contains("\"mode\":3"));
    }
}
