//! Export dialog seam.
//!
//! The host shows a dialog that confirms the export parameters. The dialog
//! may run the folder picker; a chosen folder replaces the path field.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ExportMode, ExportParameters};
use crate::picker::FolderPicker;

/// What the dialog is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogRequest {
    /// Export mode of the target.
    pub mode: ExportMode,
    /// Document or folder name shown in the title.
    pub target_name: String,
    /// Pre-filled output name; only single exports have one.
    pub default_name: Option<String>,
    /// Pre-filled output directory.
    pub default_path: String,
}

/// Dialog that confirms export parameters.
#[async_trait]
pub trait ExportDialog: Send + Sync {
    /// Show the dialog. `None` means it was dismissed and nothing happens.
    async fn confirm(
        &self,
        request: DialogRequest,
        picker: &FolderPicker,
    ) -> Option<ExportParameters>;
}

/// Non-interactive dialog answering with preset values.
///
/// Unset fields take the request's defaults. With `pick` set the folder
/// picker runs first; a cancelled pick keeps the path unchanged.
#[derive(Debug, Clone, Default)]
pub struct PresetDialog {
    /// Output name override.
    pub name: Option<String>,
    /// Output directory override.
    pub directory: Option<String>,
    /// Space indent option.
    pub space_indent: bool,
    /// Run the folder picker before answering.
    pub pick: bool,
}

#[async_trait]
impl ExportDialog for PresetDialog {
    async fn confirm(
        &self,
        request: DialogRequest,
        picker: &FolderPicker,
    ) -> Option<ExportParameters> {
        let mut directory = self
            .directory
            .clone()
            .unwrap_or_else(|| request.default_path.clone());

        if self.pick {
            if let Some(chosen) = picker.pick_folder().await {
                directory = chosen;
            }
        }

        let output_name = match request.mode {
            ExportMode::Single => self.name.clone().or(request.default_name),
            ExportMode::Batch => None,
        };

        debug!(
            mode = %request.mode,
            target = %request.target_name,
            directory = %directory,
            "Export parameters confirmed"
        );

        Some(ExportParameters {
            output_name,
            output_directory: directory,
            space_indent: self.space_indent,
        })
    }
}
