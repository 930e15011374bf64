//! Export command: runs the export flow for a note or folder.

use clap::Args;
use tracing::info;

use hwp_export_core::config::AppConfig;
use hwp_export_core::error::AppError;

use super::{Cli, DialogArgs};

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Note or folder, relative to the vault
    pub entry: String,

    /// Dialog options
    #[command(flatten)]
    pub dialog: DialogArgs,

    /// Raise no notices during the conversion
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the export command
pub async fn execute(args: &ExportArgs, cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    let session = cli.session(&config, None).await?;
    let entry = super::entry(&session, &args.entry)?;
    info!(entry = %entry.path, folder = entry.is_container, "Exporting");

    let dialog = args.dialog.dialog();
    let outcome = session
        .plugin
        .export_entry(&entry, dialog.as_ref(), args.quiet)
        .await;
    super::finish(outcome)
}
