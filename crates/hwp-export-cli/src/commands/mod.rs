//! CLI command definitions and dispatch.

pub mod active;
pub mod export;
pub mod menu;
pub mod pick;
pub mod settings;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use hwp_export_core::config::AppConfig;
use hwp_export_core::config::engine::EngineConfig;
use hwp_export_core::error::AppError;
use hwp_export_core::traits::WorkspaceEntry;
use plugin_hwp_converter::settings::SETTINGS_FILE_NAME;
use plugin_hwp_converter::{
    ExportDialog, ExportFlowOutcome, HwpConverterPlugin, JsonFileStore, PresetDialog,
};

use crate::dialog::PromptDialog;
use crate::host::FsWorkspace;
use crate::notifier::ConsoleNotifier;
use crate::output::{self, OutputFormat};

/// HWP export: convert Markdown notes to HWP documents
#[derive(Debug, Parser)]
#[command(name = "hwp-export", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (`config/<env>.toml` overlays `config/default.toml`)
    #[arg(short, long, default_value = "development")]
    pub config: String,

    /// Workspace (vault) directory
    #[arg(long, default_value = ".")]
    pub vault: PathBuf,

    /// Plugin directory holding the engine scripts and settings
    #[arg(long)]
    pub plugin_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export a note or folder to HWP
    Export(export::ExportArgs),
    /// Run the convert command on an active note
    Active(active::ActiveArgs),
    /// Open the engine folder picker
    PickFolder,
    /// Show the context menu items for an entry
    Menu(menu::MenuArgs),
    /// Show or change plugin settings
    Settings(settings::SettingsArgs),
    /// Show engine and configuration status
    Status,
}

/// Export dialog options shared by the export commands.
#[derive(Debug, Clone, Args)]
pub struct DialogArgs {
    /// Output file name (single note only)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<String>,

    /// Indent each paragraph with one space
    #[arg(long)]
    pub space_indent: bool,

    /// Choose the output directory with the engine folder picker
    #[arg(long)]
    pub pick: bool,

    /// Accept the values without prompting
    #[arg(short, long)]
    pub yes: bool,
}

impl DialogArgs {
    /// The dialog these options describe.
    pub fn dialog(&self) -> Box<dyn ExportDialog> {
        if self.yes {
            Box::new(PresetDialog {
                name: self.name.clone(),
                directory: self.out.clone(),
                space_indent: self.space_indent,
                pick: self.pick,
            })
        } else {
            Box::new(PromptDialog {
                name: self.name.clone(),
                directory: self.out.clone(),
                space_indent: self.space_indent,
                pick: self.pick,
            })
        }
    }
}

/// A loaded plugin and the vault it runs in.
pub struct Session {
    /// Vault host.
    pub host: Arc<FsWorkspace>,
    /// Loaded plugin.
    pub plugin: HwpConverterPlugin,
    /// Settings file location.
    pub settings_path: PathBuf,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Export(args) => export::execute(args, self, config).await,
            Commands::Active(args) => active::execute(args, self, config).await,
            Commands::PickFolder => pick::execute(self, config).await,
            Commands::Menu(args) => menu::execute(args, self, config, self.format).await,
            Commands::Settings(args) => settings::execute(args, self, config, self.format).await,
            Commands::Status => status::execute(self, config, self.format).await,
        }
    }

    /// Engine configuration with command-line overrides applied.
    pub fn engine_config(&self, config: &AppConfig) -> EngineConfig {
        let mut engine = config.engine.clone();
        if let Some(dir) = &self.plugin_dir {
            engine.plugin_dir = dir.to_string_lossy().into_owned();
        }
        engine
    }

    /// Open the vault and load the plugin into it.
    pub async fn session(
        &self,
        config: &AppConfig,
        active: Option<&str>,
    ) -> Result<Session, AppError> {
        let mut host = FsWorkspace::open(&self.vault)?;
        if let Some(active) = active {
            let entry = host.entry(active)?;
            host = host.with_active(entry);
        }
        let host = Arc::new(host);

        let engine = self.engine_config(config);
        let plugin_dir = if engine.has_explicit_plugin_dir() {
            PathBuf::from(&engine.plugin_dir)
        } else {
            host.root().join(EngineConfig::DEFAULT_PLUGIN_SUBPATH)
        };
        let settings_path = plugin_dir.join(SETTINGS_FILE_NAME);

        let plugin = HwpConverterPlugin::new(
            engine,
            host.clone(),
            Arc::new(JsonFileStore::new(settings_path.clone())),
            Arc::new(ConsoleNotifier),
        );
        plugin.on_load().await?;

        Ok(Session {
            host,
            plugin,
            settings_path,
        })
    }
}

/// Helper: look up an entry in the vault
pub fn entry(session: &Session, relative: &str) -> Result<WorkspaceEntry, AppError> {
    session.host.entry(relative)
}

/// Helper: turn an export flow outcome into a command result
pub fn finish(outcome: ExportFlowOutcome) -> Result<(), AppError> {
    match outcome {
        ExportFlowOutcome::Succeeded => Ok(()),
        ExportFlowOutcome::Dismissed => {
            output::print_warning("Export cancelled");
            Ok(())
        }
        ExportFlowOutcome::Failed => Err(AppError::external_service("Export failed")),
    }
}
