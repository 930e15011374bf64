//! # Plugin HWP Converter
//!
//! Exports Markdown documents from a note workspace to HWP by driving an
//! external conversion engine: a script run by a general-purpose
//! interpreter, shipped in the plugin directory.
//!
//! ## Engine protocol
//!
//! The engine is invoked once per export with a positional argument vector
//! and reports success through its exit status. Its stdout is only read in
//! folder-picker mode, where the trimmed output is the chosen directory.
//! A single document becomes one `.hwp` file; a folder is converted
//! recursively in one engine call.

pub mod converter;
pub mod dialog;
pub mod engine;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod models;
pub mod notices;
pub mod paths;
pub mod picker;
pub mod plugin;
pub mod request;
pub mod settings;
pub mod target;

pub use converter::{ConversionOrchestrator, ExportReport};
pub use dialog::{DialogRequest, ExportDialog, PresetDialog};
pub use engine::EngineInstallation;
pub use error::ConversionError;
pub use executor::{EngineRunner, ProcessInvoker};
pub use metrics::{ConversionMetrics, MetricsSnapshot};
pub use models::{
    EngineInvocation, EngineResult, ExportMode, ExportParameters, ExportTarget, InvocationOutcome,
};
pub use picker::FolderPicker;
pub use plugin::{ExportFlowOutcome, HwpConverterPlugin};
pub use request::ExportRequestBuilder;
pub use settings::{JsonFileStore, PluginSettings, SettingsManager};
pub use target::ExportTargetResolver;
