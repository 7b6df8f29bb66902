use std::collections::HashMap;
use std::sync::Mutex;

use super::ViewContextRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};

/// Process-local view context storage, for headless use and tests.
#[derive(Default)]
pub struct InMemoryViewContextRepository {
    values: Mutex<HashMap<String, String>>,
    reject_writes: Mutex<bool>,
}

impl InMemoryViewContextRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, e.g. a corrupt record left behind by an older client.
    pub fn with_value(key: &str, raw: &str) -> Self {
        let repository = Self::new();
        if let Ok(mut values) = repository.values.lock() {
            values.insert(key.to_string(), raw.to_string());
        }
        repository
    }

    /// Makes subsequent `save` calls fail, simulating a full or read-only disk.
    pub fn set_reject_writes(&self, reject: bool) {
        if let Ok(mut flag) = self.reject_writes.lock() {
            *flag = reject;
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

impl ViewContextRepositoryTrait for InMemoryViewContextRepository {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| Error::Unexpected(format!("view context storage poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let rejected = self.reject_writes.lock().map(|flag| *flag).unwrap_or(false);
        if rejected {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "view context storage is read-only".to_string(),
            )));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|e| Error::Unexpected(format!("view context storage poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
