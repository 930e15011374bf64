//! Folder picker command.

use hwp_export_core::config::AppConfig;
use hwp_export_core::error::AppError;

use super::Cli;

/// Execute the pick-folder command
pub async fn execute(cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    let session = cli.session(&config, None).await?;
    match session.plugin.pick_folder().await {
        Some(folder) => println!("{}", folder),
        None => println!("No folder selected"),
    }
    Ok(())
}
