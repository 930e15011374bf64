//! Key-value persistence for plugin settings.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;

/// Trait implemented by the host's plugin data storage.
///
/// The store holds one JSON record per plugin. `load` returns `None` when
/// nothing has been saved yet.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug {
    /// Load the persisted record.
    async fn load(&self) -> AppResult<Option<Value>>;

    /// Replace the persisted record.
    async fn save(&self, data: &Value) -> AppResult<()>;
}
