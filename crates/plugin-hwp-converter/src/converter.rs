//! Conversion orchestrator: engine presence check, invocation, and outcome
//! reporting for single and batch exports.

use std::sync::Arc;

use hwp_export_core::traits::Notifier;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::error::ConversionError;
use crate::executor::EngineRunner;
use crate::metrics::ConversionMetrics;
use crate::models::{EngineResult, ExportMode, ExportParameters, ExportTarget, InvocationOutcome};
use crate::notices;
use crate::request::ExportRequestBuilder;

/// Per-call conversion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionState {
    /// Nothing done yet.
    Idle,
    /// Engine script and directory exist.
    EnginePresenceChecked,
    /// Engine process running.
    Invoking,
    /// Engine exited with code 0.
    Succeeded,
    /// Engine missing, not startable, or exited non-zero.
    Failed,
}

/// Result of a successful export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    /// Export mode.
    pub mode: ExportMode,
    /// Output file (single) or output directory (batch).
    pub output: String,
    /// Captured engine output.
    pub result: EngineResult,
}

/// Drives one export per call. Calls share no mutable state apart from
/// the metrics counters, so exports of different targets may overlap.
#[derive(Debug, Clone)]
pub struct ConversionOrchestrator {
    /// Builds engine invocations.
    builder: ExportRequestBuilder,
    /// Runs the engine.
    runner: Arc<dyn EngineRunner>,
    /// Shows notices to the user.
    notifier: Arc<dyn Notifier>,
    /// Conversion counters.
    metrics: Arc<ConversionMetrics>,
    /// Suppress all notices.
    quiet: bool,
}

impl ConversionOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        builder: ExportRequestBuilder,
        runner: Arc<dyn EngineRunner>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            builder,
            runner,
            notifier,
            metrics: Arc::new(ConversionMetrics::new()),
            quiet: false,
        }
    }

    /// Share an existing metrics collector.
    pub fn with_metrics(mut self, metrics: Arc<ConversionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run without user notices; outcomes are still returned and logged.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Export a single document. Returns whether the engine succeeded.
    pub async fn convert_single(&self, target: &ExportTarget, params: &ExportParameters) -> bool {
        self.convert_as(ExportMode::Single, target, params).await
    }

    /// Export every document under a folder in one engine call. Returns
    /// whether the engine reported overall success.
    pub async fn convert_batch(&self, target: &ExportTarget, params: &ExportParameters) -> bool {
        self.convert_as(ExportMode::Batch, target, params).await
    }

    /// Export `target` in whichever mode it calls for.
    pub async fn convert(&self, target: &ExportTarget, params: &ExportParameters) -> bool {
        self.convert_as(target.mode(), target, params).await
    }

    /// Export `target` and return the outcome without reporting it.
    ///
    /// The progress notices (`converting` for a document, `batch_started`
    /// for a folder once the engine is found) are still raised unless the
    /// orchestrator is quiet; the success and failure notices are left to
    /// the caller.
    #[instrument(
        skip(self, target, params),
        fields(invocation_id, mode = %target.mode(), target = %target.path())
    )]
    pub async fn try_convert(
        &self,
        target: &ExportTarget,
        params: &ExportParameters,
    ) -> Result<ExportReport, ConversionError> {
        tracing::Span::current().record("invocation_id", Uuid::now_v7().to_string());
        let mode = target.mode();
        let mut state = ConversionState::Idle;

        if mode == ExportMode::Single {
            self.notify(notices::converting());
        }

        if let Err(e) = self.builder.installation().check_presence() {
            self.metrics.record_missing_engine();
            transition(&mut state, ConversionState::Failed);
            return Err(e);
        }
        transition(&mut state, ConversionState::EnginePresenceChecked);

        if mode == ExportMode::Batch {
            self.notify(notices::batch_started(target.display_name()));
        }

        let invocation = self.builder.build(target, params);
        let output = self.builder.output_location(target, params);

        info!(output = %output, "Starting conversion");
        transition(&mut state, ConversionState::Invoking);
        self.metrics.record_started();

        match self.runner.invoke(&invocation).await {
            InvocationOutcome::LaunchFailure { message } => {
                self.metrics.record_launch_failure();
                transition(&mut state, ConversionState::Failed);
                error!(error = %message, "Conversion engine could not be started");
                Err(ConversionError::ExecutionUnavailable { message })
            }
            InvocationOutcome::Exited(result) if result.success() => {
                self.metrics.record_success();
                transition(&mut state, ConversionState::Succeeded);
                info!(output = %output, "Conversion completed");
                Ok(ExportReport {
                    mode,
                    output,
                    result,
                })
            }
            InvocationOutcome::Exited(result) => {
                self.metrics.record_failure();
                transition(&mut state, ConversionState::Failed);
                error!(
                    exit_code = result.exit_code,
                    stderr = %result.stderr.chars().take(2000).collect::<String>(),
                    "Conversion engine reported failure"
                );
                Err(ConversionError::EngineReportedFailure {
                    code: result.exit_code,
                })
            }
        }
    }

    /// Get the request builder.
    pub fn builder(&self) -> &ExportRequestBuilder {
        &self.builder
    }

    /// Get the metrics collector.
    pub fn metrics(&self) -> &ConversionMetrics {
        &self.metrics
    }

    async fn convert_as(
        &self,
        expected: ExportMode,
        target: &ExportTarget,
        params: &ExportParameters,
    ) -> bool {
        if target.mode() != expected {
            warn!(
                expected = %expected,
                actual = %target.mode(),
                target = %target.path(),
                "Export target does not match the requested mode"
            );
            return false;
        }

        let label = match expected {
            ExportMode::Single => self.builder.output_file_name(target, params),
            ExportMode::Batch => target.display_name().to_string(),
        };

        match self.try_convert(target, params).await {
            Ok(_) => {
                self.notify(match expected {
                    ExportMode::Single => notices::saved(&label),
                    ExportMode::Batch => notices::batch_done(),
                });
                true
            }
            Err(e) => {
                self.report_failure(expected, &label, &e);
                false
            }
        }
    }

    fn report_failure(&self, mode: ExportMode, label: &str, err: &ConversionError) {
        let notice = match err {
            ConversionError::MissingEngine { path } => notices::missing_engine(path),
            ConversionError::ExecutionUnavailable { message } => {
                notices::execution_unavailable(message)
            }
            _ => match mode {
                ExportMode::Single => notices::failed(label),
                ExportMode::Batch => notices::batch_failed(),
            },
        };
        self.notify(notice);
    }

    fn notify(&self, notice: hwp_export_core::traits::Notice) {
        if self.quiet {
            debug!(notice = %notice.message, "Notice suppressed");
        } else {
            self.notifier.notify(notice);
        }
    }
}

fn transition(state: &mut ConversionState, next: ConversionState) {
    debug!(from = ?*state, to = ?next, "Conversion state");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineInstallation;
    use crate::executor::testing::StubRunner;
    use crate::notices::testing::RecordingNotifier;
    use hwp_export_core::traits::NoticeLevel;

    fn exited(code: i32) -> InvocationOutcome {
        InvocationOutcome::Exited(EngineResult {
            exit_code: code,
            stdout: String::new(),
            stderr: if code == 0 { String::new() } else { "boom".to_string() },
        })
    }

    fn installation(temp: &tempfile::TempDir, present: bool) -> EngineInstallation {
        let scripts = temp.path().join("scripts");
        if present {
            std::fs::create_dir_all(&scripts).expect("mkdir");
            std::fs::write(scripts.join("converter.py"), "").expect("write");
        }
        EngineInstallation {
            interpreter: "python".to_string(),
            script_dir: scripts.to_string_lossy().to_string(),
            script_file: "converter.py".to_string(),
            native_extension: "hwp".to_string(),
        }
    }

    fn orchestrator(
        temp: &tempfile::TempDir,
        present: bool,
        runner: Arc<StubRunner>,
        notifier: Arc<RecordingNotifier>,
    ) -> ConversionOrchestrator {
        let builder =
            ExportRequestBuilder::new(installation(temp, present), r"C:\vault", r"C:\Desktop");
        ConversionOrchestrator::new(builder, runner, notifier)
    }

    fn single() -> ExportTarget {
        ExportTarget::Single {
            path: "notes/todo.md".to_string(),
            display_name: "todo".to_string(),
        }
    }

    fn batch() -> ExportTarget {
        ExportTarget::Batch {
            root_path: "projects".to_string(),
            display_name: "projects".to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_success() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new(exited(0));
        let notifier = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, true, runner.clone(), notifier.clone());

        let params = ExportParameters {
            output_name: Some("todo".to_string()),
            output_directory: r"C:\Out\".to_string(),
            space_indent: true,
        };
        assert!(orch.convert_single(&single(), &params).await);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].args,
            vec![
                "converter.py",
                r"C:\vault\notes\todo.md",
                r"C:\Out\todo.hwp",
                "--space-indent"
            ]
        );
        assert_eq!(
            notifier.messages(),
            vec!["Converting to HWP...", "Saved: todo.hwp"]
        );
        assert_eq!(orch.metrics().snapshot().conversions_succeeded, 1);
    }

    #[tokio::test]
    async fn test_batch_engine_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new(exited(2));
        let notifier = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, true, runner.clone(), notifier.clone());

        let params = ExportParameters {
            output_name: None,
            output_directory: r"D:\Export".to_string(),
            space_indent: false,
        };

        let err = orch.try_convert(&batch(), &params).await.unwrap_err();
        assert!(matches!(
            err,
            ConversionError::EngineReportedFailure { code: 2 }
        ));

        assert!(!orch.convert_batch(&batch(), &params).await);
        let notices = notifier.notices();
        let last = notices.last().expect("notice");
        assert_eq!(last.level, NoticeLevel::Error);
        assert_eq!(last.message, "An error occurred during batch conversion.");
        assert_eq!(
            runner.calls()[0].args,
            vec![
                "converter.py",
                "--batch-folder",
                r"C:\vault\projects",
                r"D:\Export"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_engine_never_spawns() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new(exited(0));
        let notifier = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, false, runner.clone(), notifier.clone());

        assert!(!orch.convert_batch(&batch(), &ExportParameters::default()).await);
        assert!(runner.calls().is_empty());

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("scripts"));
        assert_eq!(orch.metrics().snapshot().missing_engine, 1);
        assert_eq!(orch.metrics().snapshot().conversions_started, 0);
    }

    #[tokio::test]
    async fn test_launch_failure_distinct_from_engine_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new(InvocationOutcome::LaunchFailure {
            message: "program not found".to_string(),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, true, runner, notifier.clone());

        let params = ExportParameters {
            output_name: Some("todo".to_string()),
            output_directory: "/out".to_string(),
            space_indent: false,
        };
        let err = orch.try_convert(&single(), &params).await.unwrap_err();
        assert!(matches!(err, ConversionError::ExecutionUnavailable { .. }));

        assert!(!orch.convert_single(&single(), &params).await);
        let last = notifier.messages().pop().expect("notice");
        assert!(last.contains("program not found"));
    }

    #[tokio::test]
    async fn test_quiet_suppresses_notices() {
        let temp = tempfile::tempdir().expect("tempdir");
        let notifier = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, true, StubRunner::new(exited(1)), notifier.clone())
            .quiet(true);

        let params = ExportParameters {
            output_name: Some("todo".to_string()),
            output_directory: "/out".to_string(),
            space_indent: false,
        };
        assert!(!orch.convert_single(&single(), &params).await);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_try_convert_raises_only_progress_notices() {
        let temp = tempfile::tempdir().expect("tempdir");
        let notifier = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, true, StubRunner::new(exited(0)), notifier.clone());
        let params = ExportParameters {
            output_name: Some("todo".to_string()),
            output_directory: "/out".to_string(),
            space_indent: false,
        };
        orch.try_convert(&single(), &params).await.expect("report");
        orch.try_convert(&batch(), &params).await.expect("report");
        assert_eq!(
            notifier.messages(),
            vec!["Converting to HWP...", "Folder conversion started: projects"]
        );

        let failing = Arc::new(RecordingNotifier::default());
        let orch = orchestrator(&temp, true, StubRunner::new(exited(1)), failing.clone());
        assert!(orch.try_convert(&single(), &params).await.is_err());
        assert_eq!(failing.messages(), vec!["Converting to HWP..."]);
    }

    #[tokio::test]
    async fn test_mode_mismatch_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new(exited(0));
        let orch = orchestrator(
            &temp,
            true,
            runner.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        assert!(!orch.convert_single(&batch(), &ExportParameters::default()).await);
        assert!(runner.calls().is_empty());
        assert!(orch.convert(&batch(), &ExportParameters::default()).await);
    }

    #[tokio::test]
    async fn test_batch_success_reports_output_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let orch = orchestrator(
            &temp,
            true,
            StubRunner::new(exited(0)),
            Arc::new(RecordingNotifier::default()),
        );
        let params = ExportParameters {
            output_name: None,
            output_directory: "/srv/out/".to_string(),
            space_indent: true,
        };
        let report = orch.try_convert(&batch(), &params).await.expect("report");
        assert_eq!(report.mode, ExportMode::Batch);
        assert_eq!(report.output, "/srv/out");
    }
}
