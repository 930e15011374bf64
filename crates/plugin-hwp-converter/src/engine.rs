//! Engine installation layout and presence checks.
//!
//! The engine is a script shipped inside the plugin directory:
//! `<plugin_dir>/<scripts_subdir>/<script_file>`. The interpreter that runs it
//! is looked up on `PATH` by the OS at spawn time and is not checked here; a
//! missing interpreter surfaces as a launch failure.

use std::path::{Path, PathBuf};

use hwp_export_core::config::engine::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConversionError;
use crate::paths;

/// Resolved locations of the engine script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInstallation {
    /// Interpreter executable name or path.
    pub interpreter: String,
    /// Directory holding the script; also the engine's working directory.
    pub script_dir: String,
    /// Script file name.
    pub script_file: String,
    /// Native output extension, without the dot.
    pub native_extension: String,
}

impl EngineInstallation {
    /// Resolve the installation for a workspace rooted at `base_path`.
    pub fn resolve(config: &EngineConfig, base_path: &str) -> Self {
        let plugin_dir = if config.has_explicit_plugin_dir() {
            config.plugin_dir.clone()
        } else {
            paths::join(base_path, EngineConfig::DEFAULT_PLUGIN_SUBPATH)
        };

        Self {
            interpreter: config.interpreter.clone(),
            script_dir: paths::join(&plugin_dir, &config.scripts_subdir),
            script_file: config.script_file.clone(),
            native_extension: config.native_extension.clone(),
        }
    }

    /// Absolute path of the script file.
    pub fn script_path(&self) -> String {
        paths::join(&self.script_dir, &self.script_file)
    }

    /// Fail with `MissingEngine` unless both the script directory and the
    /// script file exist.
    pub fn check_presence(&self) -> Result<(), ConversionError> {
        let dir = PathBuf::from(&self.script_dir);
        if !dir.is_dir() {
            warn!(script_dir = %dir.display(), "Engine script directory not found");
            return Err(ConversionError::MissingEngine { path: dir });
        }

        let script = PathBuf::from(self.script_path());
        if !script.is_file() {
            warn!(script = %script.display(), "Engine script not found");
            return Err(ConversionError::MissingEngine { path: script });
        }

        debug!(script = %script.display(), "Engine script present");
        Ok(())
    }

    /// Whether the engine script is installed.
    pub fn is_present(&self) -> bool {
        Path::new(&self.script_dir).is_dir() && Path::new(&self.script_path()).is_file()
    }

    /// Human-readable summary of the engine location.
    pub fn summary(&self) -> String {
        let state = if self.is_present() { "installed" } else { "missing" };
        format!(
            "{} {} ({}, runs in {})",
            self.interpreter,
            self.script_file,
            state,
            self.script_dir
        )
    }
}
