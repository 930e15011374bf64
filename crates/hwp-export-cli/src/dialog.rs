//! Interactive export dialog on the terminal.

use async_trait::async_trait;
use dialoguer::{Confirm, Input};
use plugin_hwp_converter::{DialogRequest, ExportDialog, ExportMode, ExportParameters, FolderPicker};
use tracing::warn;

/// Prompts for the export parameters, pre-filled from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct PromptDialog {
    /// Pre-filled output name.
    pub name: Option<String>,
    /// Pre-filled output directory.
    pub directory: Option<String>,
    /// Pre-selected space indent option.
    pub space_indent: bool,
    /// Open the folder picker without asking.
    pub pick: bool,
}

#[async_trait]
impl ExportDialog for PromptDialog {
    async fn confirm(
        &self,
        request: DialogRequest,
        picker: &FolderPicker,
    ) -> Option<ExportParameters> {
        match self.prompt(request, picker).await {
            Ok(params) => params,
            Err(e) => {
                warn!(error = %e, "Export dialog closed");
                None
            }
        }
    }
}

impl PromptDialog {
    async fn prompt(
        &self,
        request: DialogRequest,
        picker: &FolderPicker,
    ) -> Result<Option<ExportParameters>, dialoguer::Error> {
        let mode = request.mode;
        let target_name = request.target_name.clone();
        let default_name = self
            .name
            .clone()
            .or(request.default_name.clone())
            .unwrap_or_default();
        let preset_pick = self.pick;

        let (output_name, pick) = blocking(move || {
            match mode {
                ExportMode::Single => println!("Export '{target_name}' to HWP"),
                ExportMode::Batch => println!("Export folder '{target_name}' to HWP"),
            }
            let output_name = match mode {
                ExportMode::Single => Some(
                    Input::<String>::new()
                        .with_prompt("File name")
                        .default(default_name)
                        .interact_text()?,
                ),
                ExportMode::Batch => None,
            };
            let pick = preset_pick
                || Confirm::new()
                    .with_prompt("Choose the output folder in a dialog?")
                    .default(false)
                    .interact()?;
            Ok((output_name, pick))
        })
        .await?;

        let mut directory = self
            .directory
            .clone()
            .unwrap_or_else(|| request.default_path.clone());
        if pick {
            if let Some(chosen) = picker.pick_folder().await {
                directory = chosen;
            }
        }

        let default_indent = self.space_indent;
        blocking(move || {
            let directory: String = Input::new()
                .with_prompt("Output folder")
                .default(directory)
                .interact_text()?;

            let space_indent = Confirm::new()
                .with_prompt("Indent each paragraph with a space?")
                .default(default_indent)
                .interact()?;

            let proceed = Confirm::new()
                .with_prompt("Convert now?")
                .default(true)
                .interact_opt()?;
            if proceed != Some(true) {
                return Ok(None);
            }

            Ok(Some(ExportParameters {
                output_name,
                output_directory: directory,
                space_indent,
            }))
        })
        .await
    }
}

/// Run a terminal prompt on the blocking pool.
async fn blocking<T, F>(prompt: F) -> Result<T, dialoguer::Error>
where
    F: FnOnce() -> Result<T, dialoguer::Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(std::io::Error::other)?
}
