//! Persisted plugin settings.
//!
//! Settings are one JSON record stored through the host's
//! [`SettingsStore`]. They are loaded once when the plugin starts and only
//! change through [`SettingsManager::update_default_export_path`], which
//! persists every change.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use directories::{BaseDirs, UserDirs};
use hwp_export_core::result::AppResult;
use hwp_export_core::traits::SettingsStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ConversionError;

/// A value older releases wrote by mistake; replaced on load.
pub const CORRUPTED_LEGACY_EXPORT_PATH: &str = r"s\82109\DeskC:\User\desktop";

/// File name of the settings record inside the plugin directory.
pub const SETTINGS_FILE_NAME: &str = "data.json";

const EXPORT_PATH_KEY: &str = "defaultExportPath";

/// Plugin settings as persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettings {
    /// Folder exports are written to unless the user picks another.
    #[serde(default)]
    pub default_export_path: String,

    /// Keys written by other versions, carried through unchanged.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl PluginSettings {
    /// Settings for a first run.
    pub fn with_default_path(path: impl Into<String>) -> Self {
        Self {
            default_export_path: path.into(),
            extra: Map::new(),
        }
    }
}

/// The user's Desktop folder, or `$HOME/Desktop` when the platform does not
/// define one.
pub fn platform_default_export_path() -> String {
    UserDirs::new()
        .and_then(|dirs| dirs.desktop_dir().map(|p| p.to_path_buf()))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().join("Desktop")))
        .unwrap_or_else(|| PathBuf::from("Desktop"))
        .to_string_lossy()
        .into_owned()
}

/// Owns the loaded settings and writes every change through to the store.
#[derive(Debug)]
pub struct SettingsManager {
    /// Backing store.
    store: Arc<dyn SettingsStore>,
    /// Current settings.
    settings: PluginSettings,
    /// Default used for first runs, blanks, and the self-heal.
    platform_default: String,
}

impl SettingsManager {
    /// Load settings, filling missing keys from the defaults and replacing
    /// the known-corrupted legacy path. The replacement is saved once; a
    /// later load finds the healed value and does not write.
    pub async fn load(
        store: Arc<dyn SettingsStore>,
        platform_default: impl Into<String>,
    ) -> Result<Self, ConversionError> {
        let platform_default = platform_default.into();
        let defaults = PluginSettings::with_default_path(platform_default.clone());

        let mut merged = match serde_json::to_value(&defaults)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        match store.load().await? {
            Some(Value::Object(mut stored)) => {
                if !stored.get(EXPORT_PATH_KEY).is_none_or(Value::is_string) {
                    debug!("Stored export path is not a string, using default");
                    stored.remove(EXPORT_PATH_KEY);
                }
                merged.extend(stored)
            }
            Some(other) => debug!(value = %other, "Ignoring non-object settings record"),
            None => debug!("No stored settings, using defaults"),
        }

        let settings: PluginSettings = serde_json::from_value(Value::Object(merged))?;
        let mut manager = Self {
            store,
            settings,
            platform_default,
        };

        if manager.settings.default_export_path == CORRUPTED_LEGACY_EXPORT_PATH {
            manager.settings.default_export_path = manager.platform_default.clone();
            info!(
                path = %manager.settings.default_export_path,
                "Fixed corrupted default export path setting automatically"
            );
            manager.save().await?;
        }

        Ok(manager)
    }

    /// Current settings.
    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Default export path for a new export flow: the stored value, or the
    /// platform default when the stored value is blank.
    pub fn effective_export_path(&self) -> String {
        if self.settings.default_export_path.trim().is_empty() {
            self.platform_default.clone()
        } else {
            self.settings.default_export_path.clone()
        }
    }

    /// The platform-derived default path.
    pub fn platform_default(&self) -> &str {
        &self.platform_default
    }

    /// Change the default export path and persist it.
    pub async fn update_default_export_path(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), ConversionError> {
        self.settings.default_export_path = value.into();
        debug!(path = %self.settings.default_export_path, "Default export path updated");
        self.save().await
    }

    /// Persist the current settings.
    pub async fn save(&self) -> Result<(), ConversionError> {
        let data = serde_json::to_value(&self.settings)?;
        self.store.save(&data).await?;
        Ok(())
    }
}

/// Settings store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Location of the JSON file.
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the JSON file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn load(&self) -> AppResult<Option<Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, data: &Value) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}
