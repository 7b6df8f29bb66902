use crate::errors::Result;

/// Key/value persistence for the serialized view context.
///
/// Both calls are synchronous so a transition is durable before it returns.
pub trait ViewContextRepositoryTrait: Send + Sync {
    /// Returns the raw stored value, or `None` when nothing was ever saved under `key`.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}
