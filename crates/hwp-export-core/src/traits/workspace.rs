//! Host workspace interface: entries, selection, and menu registration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An entry in the host workspace tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    /// Path relative to the workspace root, `/`-separated.
    pub path: String,
    /// Entry name including any extension.
    pub name: String,
    /// Whether the entry has children (a folder).
    pub is_container: bool,
}

impl WorkspaceEntry {
    /// Create a leaf (document) entry from a workspace-relative path.
    pub fn file(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = last_segment(&path);
        Self {
            path,
            name,
            is_container: false,
        }
    }

    /// Create a container (folder) entry from a workspace-relative path.
    pub fn folder(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = last_segment(&path);
        Self {
            path,
            name,
            is_container: true,
        }
    }

    /// File extension of a leaf entry, without the dot.
    pub fn extension(&self) -> Option<&str> {
        if self.is_container {
            return None;
        }
        match self.name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&self.name[idx + 1..]),
        }
    }

    /// Entry name without its extension.
    pub fn basename(&self) -> &str {
        match self.extension() {
            Some(ext) => &self.name[..self.name.len() - ext.len() - 1],
            None => &self.name,
        }
    }
}

fn last_segment(path: &str) -> String {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A context menu item offered for a workspace entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable identifier of the action.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Host icon name.
    pub icon: String,
}

/// Handler asked by the host for menu items when an entry's context menu opens.
pub trait ContextMenuHandler: Send + Sync + std::fmt::Debug {
    /// Items to add for `entry`; empty when the entry is not eligible.
    fn menu_items(&self, entry: &WorkspaceEntry) -> Vec<MenuItem>;
}

/// The host workspace as seen by the export plugin.
pub trait WorkspaceHost: Send + Sync + std::fmt::Debug {
    /// Absolute path of the workspace root on disk.
    fn base_path(&self) -> String;

    /// The currently active document, if any.
    fn active_selection(&self) -> Option<WorkspaceEntry>;

    /// Register a context menu handler.
    fn register_context_menu(&self, handler: Arc<dyn ContextMenuHandler>);

    /// Register a named command.
    fn register_command(&self, id: &str, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_name_and_basename() {
        let entry = WorkspaceEntry::file("notes/todo.md");
        assert_eq!(entry.name, "todo.md");
        assert_eq!(entry.extension(), Some("md"));
        assert_eq!(entry.basename(), "todo");
        assert!(!entry.is_container);
    }

    #[test]
    fn test_folder_entry_has_no_extension() {
        let entry = WorkspaceEntry::folder("projects/v1.2/");
        assert_eq!(entry.name, "v1.2");
        assert_eq!(entry.extension(), None);
        assert_eq!(entry.basename(), "v1.2");
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        let entry = WorkspaceEntry::file(".hidden");
        assert_eq!(entry.extension(), None);
        assert_eq!(entry.basename(), ".hidden");
    }

    #[test]
    fn test_multiple_dots_strip_last_only() {
        let entry = WorkspaceEntry::file("a/report.final.md");
        assert_eq!(entry.basename(), "report.final");
    }
}
