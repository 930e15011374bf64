//! Context menu command.

use clap::Args;

use hwp_export_core::config::AppConfig;
use hwp_export_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for the menu command
#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Note or folder, relative to the vault
    pub entry: String,
}

/// Execute the menu command
pub async fn execute(
    args: &MenuArgs,
    cli: &Cli,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = cli.session(&config, None).await?;
    let entry = super::entry(&session, &args.entry)?;
    let items = session.host.context_menu(&entry);

    match format {
        OutputFormat::Json => output::print_item(&items, format),
        OutputFormat::Text if items.is_empty() => {
            output::print_warning(&format!("No export actions for '{}'", entry.path));
        }
        OutputFormat::Text => {
            for item in &items {
                output::print_kv(&item.id, &item.title);
            }
        }
    }
    Ok(())
}
