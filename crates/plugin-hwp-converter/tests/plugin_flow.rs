//! Plugin lifecycle and export flow with on-disk settings and a real engine.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hwp_export_core::config::engine::EngineConfig;
use hwp_export_core::traits::{
    ContextMenuHandler, Notice, Notifier, WorkspaceEntry, WorkspaceHost,
};
use plugin_hwp_converter::settings::{CORRUPTED_LEGACY_EXPORT_PATH, SETTINGS_FILE_NAME};
use plugin_hwp_converter::{ExportFlowOutcome, HwpConverterPlugin, JsonFileStore, PresetDialog};

#[derive(Debug)]
struct VaultHost {
    root: PathBuf,
    active: Option<WorkspaceEntry>,
    commands: Mutex<Vec<String>>,
}

impl WorkspaceHost for VaultHost {
    fn base_path(&self) -> String {
        self.root.to_string_lossy().to_string()
    }

    fn active_selection(&self) -> Option<WorkspaceEntry> {
        self.active.clone()
    }

    fn register_context_menu(&self, _handler: Arc<dyn ContextMenuHandler>) {}

    fn register_command(&self, id: &str, _name: &str) {
        self.commands.lock().expect("lock").push(id.to_string());
    }
}

#[derive(Debug, Default)]
struct Notices(Mutex<Vec<String>>);

impl Notifier for Notices {
    fn notify(&self, notice: Notice) {
        self.0.lock().expect("lock").push(notice.message);
    }
}

fn plugin_dir(vault: &Path) -> PathBuf {
    vault.join(EngineConfig::DEFAULT_PLUGIN_SUBPATH)
}

fn setup(vault: &Path, active: Option<WorkspaceEntry>) -> (Arc<VaultHost>, HwpConverterPlugin) {
    let scripts = plugin_dir(vault).join("scripts");
    std::fs::create_dir_all(&scripts).expect("mkdir");
    std::fs::write(scripts.join("converter.py"), "cp \"$1\" \"$2\"\n").expect("script");

    let host = Arc::new(VaultHost {
        root: vault.to_path_buf(),
        active,
        commands: Mutex::new(Vec::new()),
    });
    let store = Arc::new(JsonFileStore::new(
        plugin_dir(vault).join(SETTINGS_FILE_NAME),
    ));
    let config = EngineConfig {
        interpreter: "sh".to_string(),
        ..Default::default()
    };
    let plugin = HwpConverterPlugin::new(config, host.clone(), store, Arc::new(Notices::default()))
        .with_platform_default(vault.join("Desktop").to_string_lossy().to_string());
    (host, plugin)
}

#[tokio::test]
async fn test_active_note_exported_to_stored_default_path() {
    let vault = tempfile::tempdir().expect("vault");
    let out = tempfile::tempdir().expect("out");
    std::fs::write(vault.path().join("todo.md"), "- [ ] ship").expect("note");

    std::fs::create_dir_all(plugin_dir(vault.path())).expect("mkdir");
    std::fs::write(
        plugin_dir(vault.path()).join(SETTINGS_FILE_NAME),
        serde_json::json!({ "defaultExportPath": out.path() }).to_string(),
    )
    .expect("settings");

    let (host, plugin) = setup(vault.path(), Some(WorkspaceEntry::file("todo.md")));
    plugin.on_load().await.expect("load");
    assert_eq!(host.commands.lock().expect("lock").as_slice(), ["convert-to-hwp"]);

    let outcome = plugin.run_active_command(&PresetDialog::default()).await;
    assert_eq!(outcome, Some(ExportFlowOutcome::Succeeded));
    assert_eq!(
        std::fs::read_to_string(out.path().join("todo.hwp")).expect("output"),
        "- [ ] ship"
    );
    plugin.on_unload();
}

#[tokio::test]
async fn test_corrupted_setting_healed_on_disk_once() {
    let vault = tempfile::tempdir().expect("vault");
    let settings_path = plugin_dir(vault.path()).join(SETTINGS_FILE_NAME);
    std::fs::create_dir_all(plugin_dir(vault.path())).expect("mkdir");
    std::fs::write(
        &settings_path,
        serde_json::json!({ "defaultExportPath": CORRUPTED_LEGACY_EXPORT_PATH }).to_string(),
    )
    .expect("settings");

    let (_, plugin) = setup(vault.path(), None);
    plugin.on_load().await.expect("load");

    let expected = vault.path().join("Desktop").to_string_lossy().to_string();
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_path).expect("read"))
            .expect("json");
    assert_eq!(stored["defaultExportPath"], expected.as_str());

    let modified = std::fs::metadata(&settings_path)
        .and_then(|m| m.modified())
        .expect("mtime");
    let (_, again) = setup(vault.path(), None);
    again.on_load().await.expect("reload");
    let modified_again = std::fs::metadata(&settings_path)
        .and_then(|m| m.modified())
        .expect("mtime");
    assert_eq!(modified, modified_again);
}

#[tokio::test]
async fn test_missing_engine_reports_without_running() {
    let vault = tempfile::tempdir().expect("vault");
    let (_, plugin) = setup(vault.path(), None);
    std::fs::remove_dir_all(plugin_dir(vault.path()).join("scripts")).expect("rm");
    plugin.on_load().await.expect("load");

    let outcome = plugin
        .open_export(&WorkspaceEntry::folder("projects"), &PresetDialog::default())
        .await;
    assert_eq!(outcome, ExportFlowOutcome::Failed);
    assert_eq!(plugin.metrics().snapshot().missing_engine, 1);
    assert_eq!(plugin.metrics().snapshot().conversions_started, 0);
}
