//! Filesystem-backed workspace host.
//!
//! The workspace ("vault") is a directory on disk. Entries are addressed by
//! paths relative to it; directories are containers, everything else is a
//! document.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hwp_export_core::error::AppError;
use hwp_export_core::result::AppResult;
use hwp_export_core::traits::{ContextMenuHandler, MenuItem, WorkspaceEntry, WorkspaceHost};
use tracing::debug;

/// A vault directory acting as the plugin host.
#[derive(Debug)]
pub struct FsWorkspace {
    /// Absolute vault root.
    root: PathBuf,
    /// Entry treated as the active document.
    active: Option<WorkspaceEntry>,
    /// Registered commands, `(id, name)`.
    commands: Mutex<Vec<(String, String)>>,
    /// Registered context menu handlers.
    menus: Mutex<Vec<Arc<dyn ContextMenuHandler>>>,
}

impl FsWorkspace {
    /// Open the vault at `root`.
    pub fn open(root: &Path) -> AppResult<Self> {
        let root = root.canonicalize().map_err(|e| {
            AppError::not_found(format!("Vault '{}' not found: {}", root.display(), e))
        })?;
        if !root.is_dir() {
            return Err(AppError::validation(format!(
                "Vault '{}' is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root,
            active: None,
            commands: Mutex::new(Vec::new()),
            menus: Mutex::new(Vec::new()),
        })
    }

    /// Mark `entry` as the active document.
    pub fn with_active(mut self, entry: WorkspaceEntry) -> Self {
        self.active = Some(entry);
        self
    }

    /// Vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up the entry at `relative`. Paths that leave the vault, through
    /// `..` segments or symlinks, are rejected.
    pub fn entry(&self, relative: &str) -> AppResult<WorkspaceEntry> {
        let relative = normalize(relative);
        if relative.split('/').any(|s| s == "..") {
            return Err(outside_vault(&relative));
        }

        let full = self.root.join(&relative).canonicalize().map_err(|_| {
            AppError::not_found(format!("'{}' not found in vault", relative))
        })?;
        if !full.starts_with(&self.root) {
            return Err(outside_vault(&relative));
        }
        let meta = std::fs::metadata(&full).map_err(|_| {
            AppError::not_found(format!("'{}' not found in vault", relative))
        })?;

        if meta.is_dir() {
            Ok(WorkspaceEntry::folder(relative))
        } else {
            Ok(WorkspaceEntry::file(relative))
        }
    }

    /// Menu items every registered handler offers for `entry`.
    pub fn context_menu(&self, entry: &WorkspaceEntry) -> Vec<MenuItem> {
        let menus = match self.menus.lock() {
            Ok(menus) => menus.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        menus.iter().flat_map(|h| h.menu_items(entry)).collect()
    }

    /// Registered commands, `(id, name)`.
    pub fn commands(&self) -> Vec<(String, String)> {
        match self.commands.lock() {
            Ok(commands) => commands.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl WorkspaceHost for FsWorkspace {
    fn base_path(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }

    fn active_selection(&self) -> Option<WorkspaceEntry> {
        self.active.clone()
    }

    fn register_context_menu(&self, handler: Arc<dyn ContextMenuHandler>) {
        if let Ok(mut menus) = self.menus.lock() {
            menus.push(handler);
        }
    }

    fn register_command(&self, id: &str, name: &str) {
        debug!(id, name, "Command registered");
        if let Ok(mut commands) = self.commands.lock() {
            commands.push((id.to_string(), name.to_string()));
        }
    }
}

fn outside_vault(relative: &str) -> AppError {
    AppError::validation(format!("'{}' is outside the vault", relative))
}

/// Vault-relative, `/`-separated, without leading `./` or separators.
fn normalize(relative: &str) -> String {
    let unified = relative.replace('\\', "/");
    unified
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwp_export_core::error::ErrorKind;

    #[test]
    fn test_entry_kinds() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(temp.path().join("notes")).expect("mkdir");
        std::fs::write(temp.path().join("notes/todo.md"), "x").expect("write");

        let vault = FsWorkspace::open(temp.path()).expect("open");
        let file = vault.entry("./notes/todo.md").expect("file");
        assert_eq!(file, WorkspaceEntry::file("notes/todo.md"));

        let folder = vault.entry("notes/").expect("folder");
        assert!(folder.is_container);
        assert_eq!(folder.name, "notes");

        assert!(vault.entry("missing.md").is_err());
    }

    #[test]
    fn test_parent_segments_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("vault");
        std::fs::create_dir_all(root.join("notes")).expect("mkdir");
        std::fs::write(temp.path().join("outside.md"), "x").expect("write");

        let vault = FsWorkspace::open(&root).expect("open");
        for path in ["../outside.md", r"notes\..\..\outside.md", ".."] {
            let err = vault.entry(path).expect_err("outside");
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert_eq!(
            vault.entry("notes").expect("inside"),
            WorkspaceEntry::folder("notes")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_vault_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("vault");
        std::fs::create_dir_all(&root).expect("mkdir");
        std::fs::create_dir_all(temp.path().join("elsewhere")).expect("mkdir");
        std::os::unix::fs::symlink(temp.path().join("elsewhere"), root.join("link"))
            .expect("symlink");

        let vault = FsWorkspace::open(&root).expect("open");
        let err = vault.entry("link").expect_err("outside");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_missing_vault() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert!(FsWorkspace::open(&temp.path().join("nope")).is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(r".\a\b.md"), "a/b.md");
        assert_eq!(normalize("/a//b/"), "a/b");
    }
}
