//! Active command: the `convert-to-hwp` command path.

use clap::Args;

use hwp_export_core::config::AppConfig;
use hwp_export_core::error::AppError;
use plugin_hwp_converter::plugin::COMMAND_ID;

use super::{Cli, DialogArgs};

/// Arguments for the active command
#[derive(Debug, Args)]
pub struct ActiveArgs {
    /// Note treated as the active document, relative to the vault
    #[arg(long)]
    pub active: Option<String>,

    /// Dialog options
    #[command(flatten)]
    pub dialog: DialogArgs,
}

/// Execute the active command
pub async fn execute(args: &ActiveArgs, cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    let session = cli.session(&config, args.active.as_deref()).await?;

    if !session.plugin.command_available() {
        return Err(AppError::validation(format!(
            "Command '{}' needs an active note (--active)",
            COMMAND_ID
        )));
    }

    let dialog = args.dialog.dialog();
    match session.plugin.run_active_command(dialog.as_ref()).await {
        Some(outcome) => super::finish(outcome),
        None => Err(AppError::validation("No active note")),
    }
}
