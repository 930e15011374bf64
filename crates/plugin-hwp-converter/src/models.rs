//! Domain models: export targets, parameters, engine invocations and results.

use serde::{Deserialize, Serialize};

/// Export mode derived from a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// One document to one output file.
    Single,
    /// Every eligible document under a folder, in one engine call.
    Batch,
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Batch => write!(f, "batch"),
        }
    }
}

/// What a single export operation converts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExportTarget {
    /// A single document.
    Single {
        /// Workspace-relative path of the document.
        path: String,
        /// Document name without its extension.
        display_name: String,
    },
    /// A folder whose documents are converted recursively.
    Batch {
        /// Workspace-relative path of the folder.
        root_path: String,
        /// Folder name.
        display_name: String,
    },
}

impl ExportTarget {
    /// The export mode of this target.
    pub fn mode(&self) -> ExportMode {
        match self {
            Self::Single { .. } => ExportMode::Single,
            Self::Batch { .. } => ExportMode::Batch,
        }
    }

    /// Workspace-relative path of the document or folder.
    pub fn path(&self) -> &str {
        match self {
            Self::Single { path, .. } => path,
            Self::Batch { root_path, .. } => root_path,
        }
    }

    /// Name shown to the user.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Single { display_name, .. } | Self::Batch { display_name, .. } => display_name,
        }
    }

    /// Default output base name. Only single targets have one.
    pub fn default_output_name(&self) -> Option<&str> {
        match self {
            Self::Single { display_name, .. } => Some(display_name),
            Self::Batch { .. } => None,
        }
    }
}

/// User-confirmed export parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportParameters {
    /// Output file name; required for single exports, ignored for batches.
    pub output_name: Option<String>,
    /// Output directory. Blank means the configured default.
    pub output_directory: String,
    /// Ask the engine to indent each paragraph with one space.
    pub space_indent: bool,
}

/// One fully specified request to run the engine.
///
/// `args[0]` is always the script file name; the script is resolved
/// relative to `working_directory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInvocation {
    /// Interpreter executable.
    pub executable: String,
    /// Absolute path of the engine script.
    pub script_path: String,
    /// Arguments passed to the interpreter, script first.
    pub args: Vec<String>,
    /// Directory the engine runs in.
    pub working_directory: String,
}

/// Captured outcome of an engine process that ran to exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResult {
    /// Exit code; `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    /// All stdout chunks, in order.
    pub stdout: String,
    /// All stderr chunks, in order.
    pub stderr: String,
}

impl EngineResult {
    /// Whether the engine reported success.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// The single terminal resolution of an engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The process could not be started.
    LaunchFailure {
        /// OS error text.
        message: String,
    },
    /// The process ran and exited.
    Exited(EngineResult),
}
