//! Single-pass streaming driver.
//!
//! One record is read, transformed and written before the next is read. [`Runner`] wraps the
//! loop with observer hooks so the binary can log outcomes and classify failures.

mod observer;

use std::io::{Read, Write};
use std::sync::Arc;

use tracing::debug;

use crate::error::SndResult;
use crate::ingestion::{SndReader, SndWriter};
use crate::processing::RecordTransform;

pub use observer::{RunContext, RunObserver, RunSeverity, RunStats, TracingObserver};

/// Stream every record of `reader` through `transform` into `writer`, then flush.
///
/// Stops at the first error; records already written stay written.
pub fn run_transform<R, W, T>(
    reader: SndReader<R>,
    writer: &mut SndWriter<W>,
    transform: &mut T,
) -> SndResult<RunStats>
where
    R: Read,
    W: Write,
    T: RecordTransform + ?Sized,
{
    let mut stats = RunStats::default();
    for record in reader {
        let record = record?;
        stats.records += 1;
        if record.is_header() {
            stats.header_rows += 1;
        }
        if let Some(out) = transform.apply(&record)? {
            writer.write_record(&out)?;
            stats.written += 1;
        }
    }
    writer.flush()?;
    Ok(stats)
}

/// Runs transforms and reports outcomes to an optional observer.
#[derive(Clone)]
pub struct Runner {
    observer: Option<Arc<dyn RunObserver>>,
    alert_at_or_above: RunSeverity,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: RunSeverity::Critical,
        }
    }
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer for run outcomes.
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Severity at which `on_alert` is invoked in addition to `on_failure`.
    pub fn alert_at_or_above(mut self, severity: RunSeverity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    /// Run [`run_transform`] and report the outcome.
    pub fn run<R, W, T>(
        &self,
        ctx: &RunContext,
        reader: SndReader<R>,
        writer: &mut SndWriter<W>,
        transform: &mut T,
    ) -> SndResult<RunStats>
    where
        R: Read,
        W: Write,
        T: RecordTransform + ?Sized,
    {
        debug!(command = ctx.command, input = %ctx.input.display(), "run started");
        let result = run_transform(reader, writer, transform);

        if let Some(obs) = self.observer.as_ref() {
            match &result {
                Ok(stats) => obs.on_success(ctx, *stats),
                Err(e) => {
                    let sev = RunSeverity::for_error(e);
                    obs.on_failure(ctx, sev, e);
                    if sev >= self.alert_at_or_above {
                        obs.on_alert(ctx, sev, e);
                    }
                }
            }
        }

        result
    }
}
