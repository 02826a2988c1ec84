use thiserror::Error;

/// Convenience result type used across loading, enrichment, and export.
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;

/// Error type returned by this crate.
///
/// A single enum shared by the loaders, the enricher, and the writers. Missing values and
/// zero-quantity division are never errors; they are absorbed by defaulting and zeroing.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error while exporting.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet read error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Configuration could not be read or parsed.
    #[error("config error: {message}")]
    Config { message: String },

    /// The input does not carry the columns an order dataset needs.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A raw value could not be parsed into the column's [`crate::types::DataType`] while loading.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A present value has the wrong type for its order field.
    ///
    /// `row` is the 0-based index of the record in the dataset passed to the enricher.
    #[error("invalid record {row}: field '{column}' expected {expected}, found {found}")]
    InvalidRecord {
        row: usize,
        column: String,
        expected: &'static str,
        found: String,
    },
}

impl EnrichmentError {
    /// Build a [`EnrichmentError::SchemaMismatch`] from any displayable message.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Build a [`EnrichmentError::Config`] from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
