//! Console notices.

use hwp_export_core::traits::{Notice, NoticeLevel, Notifier};

use crate::output;

/// Prints notices to the terminal. Display durations do not apply.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(duration_ms = notice.duration_ms, "Showing notice");
        match notice.level {
            NoticeLevel::Info => output::print_info(&notice.message),
            NoticeLevel::Error => output::print_error(&notice.message),
        }
    }
}
