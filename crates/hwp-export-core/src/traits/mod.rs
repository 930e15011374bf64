//! Core traits defined in `hwp-export-core` and implemented by hosts.

pub mod notifier;
pub mod settings;
pub mod workspace;

pub use notifier::{Notice, NoticeLevel, Notifier};
pub use settings::SettingsStore;
pub use workspace::{ContextMenuHandler, MenuItem, WorkspaceEntry, WorkspaceHost};
