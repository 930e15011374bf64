//! Engine invocation assembly.
//!
//! Turns a resolved target plus confirmed parameters into the exact argument
//! vector the engine expects:
//!
//! | Mode          | Arguments                                                      |
//! |---------------|----------------------------------------------------------------|
//! | Folder picker | `<script> --pick-folder`                                       |
//! | Single export | `<script> <input> <output> [--space-indent]`                   |
//! | Batch export  | `<script> --batch-folder <root> <output_dir> [--space-indent]` |

use crate::engine::EngineInstallation;
use crate::models::{EngineInvocation, ExportMode, ExportParameters, ExportTarget};
use crate::paths;

/// Asks the engine to show a native folder dialog.
pub const PICK_FOLDER_FLAG: &str = "--pick-folder";
/// Switches the engine to recursive folder conversion.
pub const BATCH_FOLDER_FLAG: &str = "--batch-folder";
/// Indent each paragraph with one space.
pub const SPACE_INDENT_FLAG: &str = "--space-indent";

/// Builds engine invocations. Pure: no filesystem access, no errors.
#[derive(Debug, Clone)]
pub struct ExportRequestBuilder {
    /// Engine location.
    installation: EngineInstallation,
    /// Absolute workspace root that target paths are relative to.
    base_path: String,
    /// Output directory used when the caller leaves it blank.
    default_output_directory: String,
}

impl ExportRequestBuilder {
    /// Create a builder.
    pub fn new(
        installation: EngineInstallation,
        base_path: impl Into<String>,
        default_output_directory: impl Into<String>,
    ) -> Self {
        Self {
            installation,
            base_path: base_path.into(),
            default_output_directory: default_output_directory.into(),
        }
    }

    /// Build the invocation for exporting `target` with `params`.
    pub fn build(&self, target: &ExportTarget, params: &ExportParameters) -> EngineInvocation {
        let source = paths::join(&self.base_path, target.path());
        let output = self.output_location(target, params);

        let mut args = vec![self.installation.script_file.clone()];
        if target.mode() == ExportMode::Batch {
            args.push(BATCH_FOLDER_FLAG.to_string());
        }
        args.push(source);
        args.push(output);

        if params.space_indent {
            args.push(SPACE_INDENT_FLAG.to_string());
        }

        self.invocation(args)
    }

    /// Build the folder-picker invocation.
    pub fn build_pick_folder(&self) -> EngineInvocation {
        self.invocation(vec![
            self.installation.script_file.clone(),
            PICK_FOLDER_FLAG.to_string(),
        ])
    }

    /// Output file for a single export, output directory for a batch.
    pub fn output_location(&self, target: &ExportTarget, params: &ExportParameters) -> String {
        let output_dir = self.output_directory(params);
        match target.mode() {
            ExportMode::Single => paths::join(&output_dir, &self.output_file_name(target, params)),
            ExportMode::Batch => output_dir,
        }
    }

    /// Effective output directory: the caller's value with trailing
    /// separators removed, or the default when blank.
    pub fn output_directory(&self, params: &ExportParameters) -> String {
        let dir = params.output_directory.trim();
        let dir = if dir.is_empty() {
            self.default_output_directory.trim()
        } else {
            dir
        };
        paths::trim_trailing_separator(dir).to_string()
    }

    /// Output file name for a single export, always ending in the native
    /// extension. Falls back to the target's own name when none was given.
    pub fn output_file_name(&self, target: &ExportTarget, params: &ExportParameters) -> String {
        let base = params
            .output_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or(target.default_output_name())
            .unwrap_or(target.display_name());

        let suffix = format!(".{}", self.installation.native_extension);
        if base.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
            base.to_string()
        } else {
            format!("{base}{suffix}")
        }
    }

    /// The engine installation invocations are built for.
    pub fn installation(&self) -> &EngineInstallation {
        &self.installation
    }

    fn invocation(&self, args: Vec<String>) -> EngineInvocation {
        EngineInvocation {
            executable: self.installation.interpreter.clone(),
            script_path: self.installation.script_path(),
            args,
            working_directory: self.installation.script_dir.clone(),
        }
    }
}
