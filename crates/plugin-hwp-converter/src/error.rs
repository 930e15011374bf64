//! Unified error type for the HWP export plugin.
//!
//! Engine, settings, and I/O failures are consolidated into a single
//! `ConversionError` enum that maps cleanly to
//! `hwp_export_core::error::AppError`.

use hwp_export_core::error::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all export operations.
#[derive(Debug, Error)]
pub enum ConversionError {
    // --- Engine errors ---
    /// The engine script or its directory is absent.
    #[error("Conversion engine not found: {}", .path.display())]
    MissingEngine {
        /// The missing script directory or script file.
        path: PathBuf,
    },

    /// The OS could not start the engine process.
    #[error("Conversion engine could not be started: {message}")]
    ExecutionUnavailable {
        /// OS error text.
        message: String,
    },

    /// The engine started and exited with a non-zero status.
    #[error("Conversion engine exited with code {code}")]
    EngineReportedFailure {
        /// The exit code (`-1` when terminated by a signal).
        code: i32,
    },

    // --- Settings errors ---
    /// Plugin settings could not be loaded or saved.
    #[error("Settings error: {reason}")]
    Settings {
        /// Description of the failure.
        reason: String,
    },

    // --- Generic errors ---
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<AppError> for ConversionError {
    fn from(err: AppError) -> Self {
        ConversionError::Settings {
            reason: err.to_string(),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::MissingEngine { .. } => AppError::not_found(err.to_string()),
            ConversionError::ExecutionUnavailable { .. } => {
                AppError::service_unavailable(err.to_string())
            }
            ConversionError::EngineReportedFailure { .. } => {
                AppError::external_service(err.to_string())
            }
            ConversionError::Settings { .. } => AppError::plugin(err.to_string()),
            _ => AppError::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwp_export_core::error::ErrorKind;

    #[test]
    fn test_engine_errors_map_to_distinct_kinds() {
        let missing: AppError = ConversionError::MissingEngine {
            path: PathBuf::from("/plugins/scripts"),
        }
        .into();
        let unavailable: AppError = ConversionError::ExecutionUnavailable {
            message: "No such file or directory".to_string(),
        }
        .into();
        let failed: AppError = ConversionError::EngineReportedFailure { code: 2 }.into();

        assert_eq!(missing.kind, ErrorKind::NotFound);
        assert_eq!(unavailable.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(failed.kind, ErrorKind::ExternalService);
        assert!(missing.message.contains("/plugins/scripts"));
    }
}
