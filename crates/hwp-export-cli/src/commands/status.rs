//! Status command: engine presence and configuration summary.

use serde::Serialize;

use hwp_export_core::config::AppConfig;
use hwp_export_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Status report
#[derive(Debug, Serialize)]
struct StatusReport {
    plugin: String,
    version: String,
    vault: String,
    interpreter: String,
    script_path: String,
    engine_present: bool,
    commands: Vec<String>,
    default_export_path: String,
    log_level: String,
    log_format: String,
}

/// Execute the status command
pub async fn execute(cli: &Cli, config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = cli.session(&config, None).await?;
    let installation = session.plugin.installation();
    let info = session.plugin.info();

    let report = StatusReport {
        plugin: info.name.clone(),
        version: info.version.clone(),
        vault: session.host.root().display().to_string(),
        interpreter: installation.interpreter.clone(),
        script_path: installation.script_path(),
        engine_present: installation.is_present(),
        commands: session.host.commands().into_iter().map(|(id, _)| id).collect(),
        default_export_path: session.plugin.effective_export_path().await,
        log_level: config.logging.level.clone(),
        log_format: config.logging.format.clone(),
    };

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Text => {
            println!("{} {}", report.plugin, report.version);
            output::print_kv("Vault", &report.vault);
            output::print_kv("Interpreter", &report.interpreter);
            output::print_kv("Engine script", &report.script_path);
            output::print_kv("Default export path", &report.default_export_path);
            output::print_kv("Commands", &report.commands.join(", "));
            output::print_kv("Logging", &format!("{} ({})", report.log_level, report.log_format));
            if report.engine_present {
                output::print_success("Conversion engine installed");
            } else {
                output::print_warning("Conversion engine not found");
            }
        }
    }

    Ok(())
}
