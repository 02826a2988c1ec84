//! Loading order datasets.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - loads the file into an in-memory [`crate::types::DataSet`] ready for
//!   [`crate::enrichment::enrich`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Every loader requires the five order columns. They are typed (`Quantity` as `Int64`,
//! `UnitPrice`/`Discount`/`ShippingCost` as `Float64`, `OrderPriority` as `Utf8`); any other
//! column is carried through so it survives enrichment. Empty cells and nulls load as
//! [`crate::types::Value::Null`] and are left for the enricher to default.
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`parquet`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{IngestionFormat, IngestionOptions, ingest_from_path};

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::orders::SOURCE_COLUMNS;
use crate::types::DataType;

/// Fail with `SchemaMismatch` unless every order column is among `columns`.
pub(crate) fn require_order_columns(columns: &[&str]) -> EnrichmentResult<()> {
    for required in SOURCE_COLUMNS {
        if !columns.contains(&required) {
            return Err(EnrichmentError::schema_mismatch(format!(
                "missing required column '{required}'. columns={columns:?}"
            )));
        }
    }
    Ok(())
}

/// Combine the type seen so far for a pass-through column with the type of its next value.
///
/// Integers and floats widen to `Float64`; any other disagreement falls back to `Utf8`.
pub(crate) fn widen(current: Option<DataType>, next: DataType) -> DataType {
    match (current, next) {
        (None, t) => t,
        (Some(a), b) if a == b => a,
        (Some(DataType::Int64), DataType::Float64) | (Some(DataType::Float64), DataType::Int64) => {
            DataType::Float64
        }
        _ => DataType::Utf8,
    }
}

/// Whole-number view of a float, for `Quantity` cells written as `3.0`.
pub(crate) fn integral(v: f64) -> Option<i64> {
    (v.fract() == 0.0 && v.abs() < i64::MAX as f64).then_some(v as i64)
}
