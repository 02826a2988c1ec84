//! `order-enrichment` derives financial metrics for tabular order records.
//!
//! Each order carries five source fields, any of which may be missing:
//!
//! | Field | Default when missing |
//! |---|---|
//! | `Quantity` | `0` |
//! | `UnitPrice` | `0.0` |
//! | `Discount` | `0.0` |
//! | `ShippingCost` | `0.0` |
//! | `OrderPriority` | `"Medium"` |
//!
//! Enrichment fills the missing values and appends four derived columns:
//!
//! - `TotalRevenue = Quantity * UnitPrice`
//! - `Profit = TotalRevenue * (1 - Discount) - ShippingCost`
//! - `DiscountAmount = TotalRevenue * Discount`
//! - `ShippingCostPerUnit = ShippingCost / Quantity`, or `0` when `Quantity` is `0`
//!
//! The input is never modified; a new [`types::DataSet`] with the same rows in the same order
//! is returned. Discounts outside `[0, 1]`, negative quantities, and unknown priority labels are
//! accepted and simply flow through the arithmetic.
//!
//! ## Quick example
//!
//! ```rust
//! use order_enrichment::enrichment::enrich;
//! use order_enrichment::orders::order_schema;
//! use order_enrichment::types::{DataSet, Value};
//!
//! let ds = DataSet::new(
//!     order_schema(),
//!     vec![
//!         vec![
//!             Value::Int64(0),
//!             Value::Float64(3.0),
//!             Value::Float64(0.0),
//!             Value::Float64(15.0),
//!             Value::Utf8("Low".to_string()),
//!         ],
//!         vec![Value::Null, Value::Float64(5.0), Value::Null, Value::Null, Value::Null],
//!     ],
//! );
//!
//! let out = enrich(&ds).unwrap();
//! assert_eq!(out.value(0, "Profit"), Some(&Value::Float64(-15.0)));
//! assert_eq!(out.value(0, "ShippingCostPerUnit"), Some(&Value::Float64(0.0)));
//! assert_eq!(out.value(1, "OrderPriority"), Some(&Value::Utf8("Medium".to_string())));
//!
//! // The input is untouched.
//! assert_eq!(ds.rows[1][0], Value::Null);
//! ```
//!
//! ## Loading and writing
//!
//! ```no_run
//! use order_enrichment::config::load_config_from;
//! use order_enrichment::enrichment::RecordEnricher;
//! use order_enrichment::export::write_csv_to_path;
//! use order_enrichment::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), order_enrichment::EnrichmentError> {
//! let config = load_config_from("enrichment.toml")?;
//! let orders = ingest_from_path("orders.parquet", &IngestionOptions::default())?;
//! let enriched = RecordEnricher::from_config(&config).enrich(&orders)?;
//! write_csv_to_path(&enriched, "orders_enriched.csv")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`enrichment`]: defaulting and derived-metric computation
//! - [`orders`]: order column names, schemas, and typed records
//! - [`types`]: schema + in-memory dataset types
//! - [`ingestion`]: CSV / JSON / Parquet loaders
//! - [`export`]: CSV / JSON writers
//! - [`config`]: TOML-configurable defaults
//! - [`error`]: the crate error type

pub mod config;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod orders;
pub mod types;

pub use config::{EnrichmentConfig, EnrichmentDefaults};
pub use enrichment::{RecordEnricher, enrich, enrich_records, enrich_with};
pub use error::{EnrichmentError, EnrichmentResult};
