//! Conversion engine configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How to locate and launch the external conversion engine.
///
/// The engine is a script run by an interpreter found on `PATH`. The script
/// lives in `<plugin_dir>/<scripts_subdir>/<script_file>` and is launched
/// with that scripts directory as its working directory.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interpreter executable used to run the engine script.
    #[validate(length(min = 1))]
    pub interpreter: String,

    /// Plugin installation directory.
    ///
    /// If empty, the plugin directory is derived from the workspace root
    /// (`<vault>/.obsidian/plugins/hwp-converter`).
    pub plugin_dir: String,

    /// Directory under the plugin directory holding the engine script.
    #[validate(length(min = 1))]
    pub scripts_subdir: String,

    /// Engine script file name.
    #[validate(length(min = 1))]
    pub script_file: String,

    /// Extension of the engine's native output format, without the dot.
    #[validate(length(min = 1))]
    pub native_extension: String,

    /// Extension of eligible source documents, without the dot.
    #[validate(length(min = 1))]
    pub source_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            plugin_dir: String::new(),
            scripts_subdir: "scripts".to_string(),
            script_file: "converter.py".to_string(),
            native_extension: "hwp".to_string(),
            source_extension: "md".to_string(),
        }
    }
}

impl EngineConfig {
    /// Relative location of the plugin directory inside a workspace root.
    pub const DEFAULT_PLUGIN_SUBPATH: &'static str = ".obsidian/plugins/hwp-converter";

    /// Whether an explicit plugin directory is configured.
    pub fn has_explicit_plugin_dir(&self) -> bool {
        !self.plugin_dir.trim().is_empty()
    }
}
