//! User-facing notices raised by the export flows.

use hwp_export_core::traits::{Notice, NoticeLevel, Notifier};
use std::path::Path;
use tracing::{error, info};

/// Display time for progress and result notices.
const SHORT_MS: u64 = 3000;
/// Display time for errors and long-running progress.
const LONG_MS: u64 = 5000;

/// Single export started.
pub fn converting() -> Notice {
    Notice::info("Converting to HWP...", LONG_MS)
}

/// Single export finished.
pub fn saved(file_name: &str) -> Notice {
    Notice::info(format!("Saved: {file_name}"), SHORT_MS)
}

/// Single export failed.
pub fn failed(file_name: &str) -> Notice {
    Notice::error(format!("Failed: {file_name}"), SHORT_MS)
}

/// Batch export started.
pub fn batch_started(folder_name: &str) -> Notice {
    Notice::info(format!("Folder conversion started: {folder_name}"), SHORT_MS)
}

/// Batch export finished.
pub fn batch_done() -> Notice {
    Notice::info("Batch conversion complete!", LONG_MS)
}

/// Batch export failed.
pub fn batch_failed() -> Notice {
    Notice::error("An error occurred during batch conversion.", LONG_MS)
}

/// Engine script or directory missing.
pub fn missing_engine(path: &Path) -> Notice {
    Notice::error(
        format!(
            "Error: conversion script not found. Check the plugin installation.\n{}",
            path.display()
        ),
        LONG_MS,
    )
}

/// Interpreter could not be started.
pub fn execution_unavailable(message: &str) -> Notice {
    Notice::error(
        format!("Could not run Python. Check that Python is installed and on PATH.\n{message}"),
        LONG_MS,
    )
}

/// Notifier that writes notices to the log. Used when the host has no UI.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!(notice = %notice.message, "Notice"),
            NoticeLevel::Error => error!(notice = %notice.message, "Notice"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Notifier that records every notice for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().expect("lock").clone()
        }

        pub fn messages(&self) -> Vec<String> {
            self.notices().into_iter().map(|n| n.message).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().expect("lock").push(notice);
        }
    }
}
