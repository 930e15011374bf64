//! Folder picker: asks the engine to show a native folder dialog.

use std::sync::Arc;

use hwp_export_core::traits::Notifier;
use tracing::{debug, info, instrument};

use crate::error::ConversionError;
use crate::executor::EngineRunner;
use crate::models::InvocationOutcome;
use crate::notices;
use crate::request::ExportRequestBuilder;

/// Runs the engine in `--pick-folder` mode and reads back the chosen path.
#[derive(Debug, Clone)]
pub struct FolderPicker {
    /// Builds the picker invocation.
    builder: ExportRequestBuilder,
    /// Runs the engine.
    runner: Arc<dyn EngineRunner>,
    /// Shows notices to the user.
    notifier: Arc<dyn Notifier>,
}

impl FolderPicker {
    /// Create a new picker.
    pub fn new(
        builder: ExportRequestBuilder,
        runner: Arc<dyn EngineRunner>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            builder,
            runner,
            notifier,
        }
    }

    /// Ask the user for a folder.
    ///
    /// Returns `None` when the dialog was cancelled or the engine could not
    /// run; the latter two cases are reported to the user first.
    pub async fn pick_folder(&self) -> Option<String> {
        match self.try_pick_folder().await {
            Ok(choice) => choice,
            Err(ConversionError::MissingEngine { path }) => {
                self.notifier.notify(notices::missing_engine(&path));
                None
            }
            Err(ConversionError::ExecutionUnavailable { message }) => {
                self.notifier.notify(notices::execution_unavailable(&message));
                None
            }
            Err(e) => {
                debug!(error = %e, "Folder picker failed");
                None
            }
        }
    }

    /// Ask the user for a folder, reporting engine problems as errors.
    ///
    /// `Ok(None)` means no selection: a non-zero exit or empty output.
    #[instrument(skip(self))]
    pub async fn try_pick_folder(&self) -> Result<Option<String>, ConversionError> {
        let installation = self.builder.installation();
        info!(script_dir = %installation.script_dir, "Opening engine folder picker");
        installation.check_presence()?;

        let invocation = self.builder.build_pick_folder();
        match self.runner.invoke(&invocation).await {
            InvocationOutcome::LaunchFailure { message } => {
                Err(ConversionError::ExecutionUnavailable { message })
            }
            InvocationOutcome::Exited(result) => {
                let chosen = result.stdout.trim();
                if result.success() && !chosen.is_empty() {
                    info!(folder = %chosen, "Folder selected");
                    Ok(Some(chosen.to_string()))
                } else {
                    debug!(exit_code = result.exit_code, "No folder selected");
                    Ok(None)
                }
            }
        }
    }
}
