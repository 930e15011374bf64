//! User-facing notices.

use serde::{Deserialize, Serialize};

/// Severity of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Progress or success information.
    Info,
    /// A failure the user should see.
    Error,
}

/// A transient message shown to the user by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Message text.
    pub message: String,
    /// How long the host should display the notice, in milliseconds.
    pub duration_ms: u64,
    /// Severity.
    pub level: NoticeLevel,
}

impl Notice {
    /// Create an informational notice.
    pub fn info(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            duration_ms,
            level: NoticeLevel::Info,
        }
    }

    /// Create an error notice.
    pub fn error(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            duration_ms,
            level: NoticeLevel::Error,
        }
    }
}

/// Trait implemented by hosts that can display notices.
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Display a notice.
    fn notify(&self, notice: Notice);
}
