//! Load outcome reporting.

use std::error::Error as StdError;
use std::path::PathBuf;

use crate::error::EnrichmentError;

use super::unified::IngestionFormat;

/// How bad a load outcome is. Ordered, so it can be compared against an alert threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    /// Non-fatal.
    Warning,
    /// The file was read but its content was unusable.
    Error,
    /// The file could not be read at all.
    #[default]
    Critical,
}

impl IngestionSeverity {
    /// Severity of a failed load: `Critical` when an I/O error is behind it, `Error` otherwise.
    pub fn for_error(error: &EnrichmentError) -> Self {
        let io_backed = match error {
            EnrichmentError::Io(_) => true,
            EnrichmentError::Csv(err) => matches!(err.kind(), ::csv::ErrorKind::Io(_)),
            // Parquet wraps I/O failures without a dedicated variant.
            EnrichmentError::Parquet(err) => caused_by_io(err),
            _ => false,
        };
        if io_backed { Self::Critical } else { Self::Error }
    }
}

fn caused_by_io(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |&e| e.source()).any(|e| e.is::<std::io::Error>())
}

/// Which file a callback is about.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: IngestionFormat,
}

/// Shape of a successfully loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Order rows loaded.
    pub rows: usize,
    /// Columns loaded, order columns included.
    pub columns: usize,
}

/// Receives load outcomes from [`super::ingest_from_path`].
///
/// Every method has a no-op default, so implementors only override what they record.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(
        &self,
        _ctx: &IngestionContext,
        _severity: IngestionSeverity,
        _error: &EnrichmentError,
    ) {
    }

    /// Called after `on_failure` when the severity meets the alert threshold.
    ///
    /// Forwards to [`Self::on_failure`] unless overridden.
    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &EnrichmentError,
    ) {
        self.on_failure(ctx, severity, error)
    }
}

/// Emits load outcomes as `tracing` events: `info` on success, `warn` on failure, and `error`
/// on alert.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            format = ?ctx.format,
            path = %ctx.path.display(),
            rows = stats.rows,
            columns = stats.columns,
            "loaded orders"
        );
    }

    fn on_failure(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &EnrichmentError,
    ) {
        tracing::warn!(
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "failed to load orders"
        );
    }

    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &EnrichmentError,
    ) {
        tracing::error!(
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "order load alert"
        );
    }
}
