//! HWP converter plugin: lifecycle, command and context menu registration,
//! and the interactive export flow.

use std::sync::Arc;

use hwp_export_core::config::engine::EngineConfig;
use hwp_export_core::traits::{
    ContextMenuHandler, MenuItem, Notifier, SettingsStore, WorkspaceEntry, WorkspaceHost,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::converter::ConversionOrchestrator;
use crate::dialog::{DialogRequest, ExportDialog};
use crate::engine::EngineInstallation;
use crate::error::ConversionError;
use crate::executor::{EngineRunner, ProcessInvoker};
use crate::metrics::ConversionMetrics;
use crate::models::{EngineInvocation, ExportMode, ExportParameters, ExportTarget};
use crate::picker::FolderPicker;
use crate::request::ExportRequestBuilder;
use crate::settings::{PluginSettings, SettingsManager, platform_default_export_path};
use crate::target::ExportTargetResolver;

/// Command that exports the active document.
pub const COMMAND_ID: &str = "convert-to-hwp";
/// Display name of [`COMMAND_ID`].
pub const COMMAND_NAME: &str = "Convert current note to HWP";
/// Context menu action for a single document.
pub const EXPORT_FILE_ACTION: &str = "export-to-hwp";
/// Context menu action for a folder.
pub const EXPORT_FOLDER_ACTION: &str = "export-folder-to-hwp";

/// Static plugin description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin identifier.
    pub name: String,
    /// Plugin version.
    pub version: String,
    /// Short description.
    pub description: String,
}

/// How an interactive export flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFlowOutcome {
    /// The dialog was dismissed; nothing ran.
    Dismissed,
    /// The engine reported success.
    Succeeded,
    /// The export failed; the user has been notified.
    Failed,
}

impl ExportFlowOutcome {
    fn from_success(success: bool) -> Self {
        if success { Self::Succeeded } else { Self::Failed }
    }
}

/// The export plugin as loaded by a host.
#[derive(Debug)]
pub struct HwpConverterPlugin {
    /// Plugin information.
    info: PluginInfo,
    /// Engine location settings.
    config: EngineConfig,
    /// Host workspace.
    host: Arc<dyn WorkspaceHost>,
    /// Settings persistence.
    store: Arc<dyn SettingsStore>,
    /// Shows notices to the user.
    notifier: Arc<dyn Notifier>,
    /// Runs the engine.
    runner: Arc<dyn EngineRunner>,
    /// Classifies workspace entries.
    resolver: ExportTargetResolver,
    /// Counters shared by every export flow.
    metrics: Arc<ConversionMetrics>,
    /// Platform default export path.
    platform_default: String,
    /// Loaded settings; `None` until `on_load`.
    settings: RwLock<Option<SettingsManager>>,
}

impl HwpConverterPlugin {
    /// Create the plugin. Settings are not read until [`Self::on_load`].
    pub fn new(
        config: EngineConfig,
        host: Arc<dyn WorkspaceHost>,
        store: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let resolver = ExportTargetResolver::new(config.source_extension.clone());
        Self {
            info: PluginInfo {
                name: "hwp-converter".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Export Markdown notes to HWP documents".to_string(),
            },
            config,
            host,
            store,
            notifier,
            runner: Arc::new(ProcessInvoker::new()),
            resolver,
            metrics: Arc::new(ConversionMetrics::new()),
            platform_default: platform_default_export_path(),
            settings: RwLock::new(None),
        }
    }

    /// Replace the engine runner.
    pub fn with_runner(mut self, runner: Arc<dyn EngineRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the platform default export path.
    pub fn with_platform_default(mut self, path: impl Into<String>) -> Self {
        self.platform_default = path.into();
        self
    }

    /// Load settings and register the command and context menu.
    pub async fn on_load(&self) -> Result<(), ConversionError> {
        info!(plugin = %self.info.name, "Loading HWP converter plugin");

        let manager =
            SettingsManager::load(Arc::clone(&self.store), self.platform_default.clone()).await?;
        *self.settings.write().await = Some(manager);

        self.host.register_command(COMMAND_ID, COMMAND_NAME);
        self.host.register_context_menu(Arc::new(ExportMenu {
            resolver: self.resolver.clone(),
        }));

        info!(
            engine = %self.installation().summary(),
            "HWP converter plugin loaded"
        );
        Ok(())
    }

    /// Log shutdown. Running engine processes are not tracked or stopped.
    pub fn on_unload(&self) {
        info!(plugin = %self.info.name, "Unloading HWP converter plugin");
    }

    /// Context menu items offered for `entry`.
    pub fn menu_items(&self, entry: &WorkspaceEntry) -> Vec<MenuItem> {
        menu_items_for(&self.resolver, entry)
    }

    /// Whether the convert command can run: the host has an active document.
    pub fn command_available(&self) -> bool {
        self.host.active_selection().is_some()
    }

    /// Run the convert command on the active document.
    ///
    /// Returns `None` when there is no active document.
    pub async fn run_active_command(
        &self,
        dialog: &dyn ExportDialog,
    ) -> Option<ExportFlowOutcome> {
        let Some(entry) = self.host.active_selection() else {
            debug!(command = COMMAND_ID, "No active document");
            return None;
        };
        Some(self.open_export(&entry, dialog).await)
    }

    /// Run the export flow for `entry`: open the dialog with defaults and,
    /// once confirmed, run the conversion.
    pub async fn open_export(
        &self,
        entry: &WorkspaceEntry,
        dialog: &dyn ExportDialog,
    ) -> ExportFlowOutcome {
        self.export_entry(entry, dialog, false).await
    }

    /// Like [`Self::open_export`]; with `quiet` set the conversion raises no
    /// notices. Folder picker problems are still reported.
    pub async fn export_entry(
        &self,
        entry: &WorkspaceEntry,
        dialog: &dyn ExportDialog,
        quiet: bool,
    ) -> ExportFlowOutcome {
        let target = self.resolve_target(entry);
        let default_path = self.effective_export_path().await;

        let request = DialogRequest {
            mode: target.mode(),
            target_name: target.display_name().to_string(),
            default_name: target.default_output_name().map(str::to_string),
            default_path: default_path.clone(),
        };

        let picker = self.folder_picker_with(&default_path);
        let Some(params) = dialog.confirm(request, &picker).await else {
            debug!(target = %target.path(), "Export dialog dismissed");
            return ExportFlowOutcome::Dismissed;
        };

        let orchestrator = self.orchestrator_with(&default_path).quiet(quiet);
        let success = match target.mode() {
            ExportMode::Single => orchestrator.convert_single(&target, &params).await,
            ExportMode::Batch => orchestrator.convert_batch(&target, &params).await,
        };
        ExportFlowOutcome::from_success(success)
    }

    /// Export one document without a dialog.
    pub async fn run_single(
        &self,
        target: &ExportTarget,
        params: &ExportParameters,
        quiet: bool,
    ) -> bool {
        self.orchestrator()
            .await
            .quiet(quiet)
            .convert_single(target, params)
            .await
    }

    /// Export a folder without a dialog.
    pub async fn run_batch(
        &self,
        target: &ExportTarget,
        params: &ExportParameters,
        quiet: bool,
    ) -> bool {
        self.orchestrator()
            .await
            .quiet(quiet)
            .convert_batch(target, params)
            .await
    }

    /// Ask the engine for a folder.
    pub async fn pick_folder(&self) -> Option<String> {
        self.folder_picker().await.pick_folder().await
    }

    /// Classify a workspace entry.
    pub fn resolve_target(&self, entry: &WorkspaceEntry) -> ExportTarget {
        self.resolver.resolve(entry)
    }

    /// Invocation that exporting `target` with `params` would run.
    pub async fn build_invocation(
        &self,
        target: &ExportTarget,
        params: &ExportParameters,
    ) -> EngineInvocation {
        self.request_builder().await.build(target, params)
    }

    /// Engine location for the host workspace.
    pub fn installation(&self) -> EngineInstallation {
        EngineInstallation::resolve(&self.config, &self.host.base_path())
    }

    /// Request builder using the current default export path.
    pub async fn request_builder(&self) -> ExportRequestBuilder {
        let default_path = self.effective_export_path().await;
        self.request_builder_with(&default_path)
    }

    /// Orchestrator using the current default export path.
    pub async fn orchestrator(&self) -> ConversionOrchestrator {
        let default_path = self.effective_export_path().await;
        self.orchestrator_with(&default_path)
    }

    /// Folder picker for the host workspace.
    pub async fn folder_picker(&self) -> FolderPicker {
        let default_path = self.effective_export_path().await;
        self.folder_picker_with(&default_path)
    }

    /// Snapshot of the current settings.
    pub async fn settings(&self) -> PluginSettings {
        match self.settings.read().await.as_ref() {
            Some(manager) => manager.settings().clone(),
            None => PluginSettings::with_default_path(self.platform_default.clone()),
        }
    }

    /// Default export path for a new export flow.
    pub async fn effective_export_path(&self) -> String {
        match self.settings.read().await.as_ref() {
            Some(manager) => manager.effective_export_path(),
            None => self.platform_default.clone(),
        }
    }

    /// Change and persist the default export path.
    pub async fn update_default_export_path(
        &self,
        value: impl Into<String>,
    ) -> Result<(), ConversionError> {
        let mut guard = self.settings.write().await;
        let manager = guard.as_mut().ok_or_else(|| ConversionError::Settings {
            reason: "settings are not loaded".to_string(),
        })?;
        manager.update_default_export_path(value).await
    }

    /// Plugin information.
    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    /// Engine location settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters shared by every export flow.
    pub fn metrics(&self) -> &ConversionMetrics {
        &self.metrics
    }

    fn request_builder_with(&self, default_path: &str) -> ExportRequestBuilder {
        ExportRequestBuilder::new(self.installation(), self.host.base_path(), default_path)
    }

    fn orchestrator_with(&self, default_path: &str) -> ConversionOrchestrator {
        ConversionOrchestrator::new(
            self.request_builder_with(default_path),
            Arc::clone(&self.runner),
            Arc::clone(&self.notifier),
        )
        .with_metrics(Arc::clone(&self.metrics))
    }

    fn folder_picker_with(&self, default_path: &str) -> FolderPicker {
        FolderPicker::new(
            self.request_builder_with(default_path),
            Arc::clone(&self.runner),
            Arc::clone(&self.notifier),
        )
    }
}

/// Context menu handler registered with the host.
#[derive(Debug, Clone)]
struct ExportMenu {
    resolver: ExportTargetResolver,
}

impl ContextMenuHandler for ExportMenu {
    fn menu_items(&self, entry: &WorkspaceEntry) -> Vec<MenuItem> {
        menu_items_for(&self.resolver, entry)
    }
}

fn menu_items_for(resolver: &ExportTargetResolver, entry: &WorkspaceEntry) -> Vec<MenuItem> {
    if entry.is_container {
        vec![MenuItem {
            id: EXPORT_FOLDER_ACTION.to_string(),
            title: "Export folder to HWP".to_string(),
            icon: "folder-output".to_string(),
        }]
    } else if resolver.is_eligible_document(entry) {
        vec![MenuItem {
            id: EXPORT_FILE_ACTION.to_string(),
            title: "Export to HWP".to_string(),
            icon: "document".to_string(),
        }]
    } else {
        Vec::new()
    }
}
