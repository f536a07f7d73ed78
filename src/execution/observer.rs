use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::error::SndError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunSeverity {
    /// Error-level event (the command failed on its input).
    Error,
    /// Critical error (I/O and other infrastructure failures).
    Critical,
}

impl RunSeverity {
    /// Classify a failure.
    pub fn for_error(e: &SndError) -> Self {
        match e {
            SndError::Io(_) => Self::Critical,
            SndError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            SndError::ParseError { .. } | SndError::InvalidOption { .. } => Self::Error,
        }
    }
}

/// Context about one command run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Subcommand name (`rank`, `selcol`, ...).
    pub command: &'static str,
    /// Main input path (`-` for standard input).
    pub input: PathBuf,
}

/// Counters reported when a run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records read from the input.
    pub records: usize,
    /// Header/comment rows among them.
    pub header_rows: usize,
    /// Records written to the output.
    pub written: usize,
}

impl RunStats {
    /// Data (non-header) rows read.
    pub fn data_rows(&self) -> usize {
        self.records - self.header_rows
    }
}

/// Observer interface for run outcomes.
pub trait RunObserver {
    /// Called when a run succeeds.
    fn on_success(&self, _ctx: &RunContext, _stats: RunStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: RunSeverity, _error: &SndError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: RunSeverity, error: &SndError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Reports run outcomes through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        info!(
            command = ctx.command,
            input = %ctx.input.display(),
            records = stats.records,
            headers = stats.header_rows,
            written = stats.written,
            "run finished"
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: RunSeverity, error: &SndError) {
        debug!(
            command = ctx.command,
            input = %ctx.input.display(),
            ?severity,
            %error,
            "run failed"
        );
    }

    fn on_alert(&self, ctx: &RunContext, severity: RunSeverity, error: &SndError) {
        error!(
            command = ctx.command,
            input = %ctx.input.display(),
            ?severity,
            %error,
            "run aborted"
        );
    }
}
