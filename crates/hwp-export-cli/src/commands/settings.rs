//! Plugin settings commands.

use clap::{Args, Subcommand};

use hwp_export_core::config::AppConfig;
use hwp_export_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the stored settings
    Show,
    /// Change the default export directory
    SetPath {
        /// New default export directory
        dir: String,
    },
}

/// Execute settings commands
pub async fn execute(
    args: &SettingsArgs,
    cli: &Cli,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = cli.session(&config, None).await?;

    match &args.command {
        SettingsCommand::Show => {
            let settings = session.plugin.settings().await;
            match format {
                OutputFormat::Json => output::print_item(&settings, format),
                OutputFormat::Text => {
                    output::print_kv("Settings file", &session.settings_path.display().to_string());
                    output::print_kv("Default export path", &settings.default_export_path);
                    output::print_kv(
                        "Effective export path",
                        &session.plugin.effective_export_path().await,
                    );
                }
            }
        }
        SettingsCommand::SetPath { dir } => {
            session.plugin.update_default_export_path(dir.clone()).await?;
            output::print_success(&format!("Default export path set to '{}'", dir));
        }
    }

    Ok(())
}
