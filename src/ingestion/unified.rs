//! Single entrypoint over every supported order file format.
//!
//! [`ingest_from_path`] picks a loader from [`IngestionOptions::format`], or from the file
//! extension when no format is forced, and reports the outcome to the configured
//! [`IngestionObserver`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::types::DataSet;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json, parquet};

/// Order file formats understood by [`ingest_from_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Headered CSV.
    Csv,
    /// A JSON object, an array of objects, or NDJSON.
    Json,
    /// Apache Parquet.
    Parquet,
}

const EXTENSIONS: [(&str, IngestionFormat); 5] = [
    ("csv", IngestionFormat::Csv),
    ("json", IngestionFormat::Json),
    ("ndjson", IngestionFormat::Json),
    ("parquet", IngestionFormat::Parquet),
    ("pq", IngestionFormat::Parquet),
];

impl IngestionFormat {
    /// Format for a file extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }

    /// Format for `path`, from its extension.
    pub fn for_path(path: &Path) -> EnrichmentResult<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).ok_or_else(|| {
            EnrichmentError::schema_mismatch(format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ))
        })?;
        Self::from_extension(ext).ok_or_else(|| {
            EnrichmentError::schema_mismatch(format!(
                "cannot infer format from extension '{ext}' ({})",
                path.display()
            ))
        })
    }

    fn load(self, path: &Path) -> EnrichmentResult<DataSet> {
        match self {
            Self::Csv => csv::ingest_csv_from_path(path),
            Self::Json => json::ingest_json_from_path(path),
            Self::Parquet => parquet::ingest_parquet_from_path(path),
        }
    }
}

/// How [`ingest_from_path`] picks a loader and who hears about the result.
#[derive(Clone, Default)]
pub struct IngestionOptions {
    /// Forced format; `None` means use the file extension.
    pub format: Option<IngestionFormat>,
    /// Receives success and failure callbacks.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity also trigger `on_alert`. Defaults to `Critical`.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("has_observer", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl IngestionOptions {
    fn report(&self, ctx: &IngestionContext, result: &EnrichmentResult<DataSet>) {
        let Some(observer) = self.observer.as_deref() else {
            return;
        };
        match result {
            Ok(ds) => observer.on_success(
                ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.schema.len(),
                },
            ),
            Err(error) => {
                let severity = IngestionSeverity::for_error(error);
                observer.on_failure(ctx, severity, error);
                if severity >= self.alert_at_or_above {
                    observer.on_alert(ctx, severity, error);
                }
            }
        }
    }
}

/// Load an order file into a [`DataSet`].
///
/// A configured observer gets `on_success` with row and column counts, or `on_failure` with
/// the error's severity. Failures at or above `options.alert_at_or_above` additionally get
/// `on_alert`. Format inference errors happen before any file is opened and are not reported.
///
/// # Examples
///
/// ```no_run
/// use order_enrichment::enrichment::enrich;
/// use order_enrichment::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), order_enrichment::EnrichmentError> {
/// let orders = ingest_from_path("orders.csv", &IngestionOptions::default())?;
/// let enriched = enrich(&orders)?;
/// println!("rows={}", enriched.row_count());
/// # Ok(())
/// # }
/// ```
///
/// Reading an extensionless export as JSON and logging through `tracing`:
///
/// ```no_run
/// use std::sync::Arc;
///
/// use order_enrichment::ingestion::{
///     ingest_from_path, IngestionFormat, IngestionOptions, IngestionSeverity, TracingObserver,
/// };
///
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Json),
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: IngestionSeverity::Error,
/// };
/// let _ = ingest_from_path("orders_export", &opts);
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> EnrichmentResult<DataSet> {
    let path = path.as_ref();
    let format = options.format.map_or_else(|| IngestionFormat::for_path(path), Ok)?;
    tracing::debug!(?format, path = %path.display(), "loading orders");

    let result = format.load(path);
    options.report(
        &IngestionContext {
            path: path.to_path_buf(),
            format,
        },
        &result,
    );
    result
}
