//! Order enrichment.
//!
//! [`RecordEnricher`] fills missing source fields with [`EnrichmentDefaults`] and appends the
//! four derived columns (`TotalRevenue`, `Profit`, `DiscountAmount`, `ShippingCostPerUnit`).
//! It never mutates its input: the result is always a freshly built dataset with the same row
//! count and row order.
//!
//! Two forms are supported:
//!
//! - [`enrich`] / [`enrich_with`] over a [`DataSet`], which carries extra columns through
//!   untouched and rejects values of the wrong type with [`EnrichmentError::InvalidRecord`].
//! - [`enrich_records`] over typed [`OrderRecord`]s, which cannot fail.
//!
//! ```rust
//! use order_enrichment::enrichment::enrich;
//! use order_enrichment::orders::{dataset_from_records, OrderRecord};
//! use order_enrichment::types::Value;
//!
//! let ds = dataset_from_records(&[OrderRecord {
//!     quantity: Some(10),
//!     unit_price: Some(5.0),
//!     discount: Some(0.1),
//!     shipping_cost: Some(2.0),
//!     order_priority: Some("High".to_string()),
//! }]);
//!
//! let out = enrich(&ds).unwrap();
//! assert_eq!(out.value(0, "TotalRevenue"), Some(&Value::Float64(50.0)));
//! assert_eq!(out.value(0, "DiscountAmount"), Some(&Value::Float64(5.0)));
//! assert_eq!(out.value(0, "ShippingCostPerUnit"), Some(&Value::Float64(0.2)));
//! ```

pub mod metrics;

use crate::config::{EnrichmentConfig, EnrichmentDefaults};
use crate::error::{EnrichmentError, EnrichmentResult};
use crate::orders::{
    self, DERIVED_COLUMNS, DISCOUNT, EnrichedOrderRecord, OrderRecord, SHIPPING_COST, UNIT_PRICE,
};
use crate::types::{DataSet, DataType, Field, Schema, Value};

pub use metrics::OrderMetrics;

/// Stateless order enricher parameterized by its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordEnricher {
    defaults: EnrichmentDefaults,
}

impl RecordEnricher {
    pub fn new(defaults: EnrichmentDefaults) -> Self {
        Self { defaults }
    }

    pub fn from_config(config: &EnrichmentConfig) -> Self {
        Self::new(config.defaults.clone())
    }

    pub fn defaults(&self) -> &EnrichmentDefaults {
        &self.defaults
    }

    /// Enrich an order dataset.
    ///
    /// - All five source columns must be present (any position); otherwise `SchemaMismatch`.
    /// - Derived columns are appended as `Float64`. A column that already carries a derived
    ///   name is overwritten in place.
    /// - A missing `Quantity` becomes `Int64` or `Float64` zero to match its column type.
    /// - Any present value of the wrong type fails the whole call with `InvalidRecord`.
    pub fn enrich(&self, dataset: &DataSet) -> EnrichmentResult<DataSet> {
        let src = orders::source_column_indexes(&dataset.schema)?;
        let (schema, derived) = enriched_schema(&dataset.schema);
        let width = schema.len();

        let quantity_default = match dataset.schema.fields[src[0]].data_type {
            DataType::Float64 => Value::Float64(self.defaults.quantity as f64),
            _ => Value::Int64(self.defaults.quantity),
        };

        let mut zero_quantity_rows = 0usize;
        let mut rows = Vec::with_capacity(dataset.row_count());
        for (row_idx, row) in dataset.rows.iter().enumerate() {
            if row.len() != dataset.schema.len() {
                return Err(EnrichmentError::schema_mismatch(format!(
                    "row {row_idx} has {} values but the schema has {} fields",
                    row.len(),
                    dataset.schema.len()
                )));
            }

            let mut out = row.clone();
            out.resize(width, Value::Null);

            let quantity = match orders::read_number(row_idx, orders::QUANTITY, &row[src[0]])? {
                Some(q) => q,
                None => {
                    out[src[0]] = quantity_default.clone();
                    self.defaults.quantity as f64
                }
            };
            let d = &self.defaults;
            let unit_price = fill_number(&mut out, src[1], row_idx, UNIT_PRICE, d.unit_price)?;
            let discount = fill_number(&mut out, src[2], row_idx, DISCOUNT, d.discount)?;
            let shipping_cost =
                fill_number(&mut out, src[3], row_idx, SHIPPING_COST, d.shipping_cost)?;
            if orders::read_label(row_idx, orders::ORDER_PRIORITY, &row[src[4]])?.is_none() {
                out[src[4]] = Value::Utf8(self.defaults.order_priority.clone());
            }

            if quantity == 0.0 {
                zero_quantity_rows += 1;
            }
            let m = OrderMetrics::compute(quantity, unit_price, discount, shipping_cost);
            out[derived[0]] = Value::Float64(m.total_revenue);
            out[derived[1]] = Value::Float64(m.profit);
            out[derived[2]] = Value::Float64(m.discount_amount);
            out[derived[3]] = Value::Float64(m.shipping_cost_per_unit);

            rows.push(out);
        }

        tracing::debug!(
            rows = rows.len(),
            zero_quantity_rows,
            "enriched order dataset"
        );
        Ok(DataSet::new(schema, rows))
    }

    /// Enrich typed records.
    pub fn enrich_records(&self, records: &[OrderRecord]) -> Vec<EnrichedOrderRecord> {
        let d = &self.defaults;
        let out: Vec<EnrichedOrderRecord> = records
            .iter()
            .map(|r| {
                let quantity = r.quantity.unwrap_or(d.quantity);
                let unit_price = r.unit_price.filter(|v| !v.is_nan()).unwrap_or(d.unit_price);
                let discount = r.discount.filter(|v| !v.is_nan()).unwrap_or(d.discount);
                let shipping_cost = r
                    .shipping_cost
                    .filter(|v| !v.is_nan())
                    .unwrap_or(d.shipping_cost);
                let m = OrderMetrics::compute(quantity as f64, unit_price, discount, shipping_cost);
                EnrichedOrderRecord {
                    quantity,
                    unit_price,
                    discount,
                    shipping_cost,
                    order_priority: r
                        .order_priority
                        .clone()
                        .unwrap_or_else(|| d.order_priority.clone()),
                    total_revenue: m.total_revenue,
                    profit: m.profit,
                    discount_amount: m.discount_amount,
                    shipping_cost_per_unit: m.shipping_cost_per_unit,
                }
            })
            .collect();
        tracing::debug!(rows = out.len(), "enriched order records");
        out
    }
}

/// Enrich `dataset` with the documented defaults.
pub fn enrich(dataset: &DataSet) -> EnrichmentResult<DataSet> {
    RecordEnricher::default().enrich(dataset)
}

/// Enrich `dataset` with explicit defaults.
pub fn enrich_with(dataset: &DataSet, defaults: &EnrichmentDefaults) -> EnrichmentResult<DataSet> {
    RecordEnricher::new(defaults.clone()).enrich(dataset)
}

/// Enrich typed records with explicit defaults.
pub fn enrich_records(
    records: &[OrderRecord],
    defaults: &EnrichmentDefaults,
) -> Vec<EnrichedOrderRecord> {
    RecordEnricher::new(defaults.clone()).enrich_records(records)
}

fn fill_number(
    out: &mut [Value],
    idx: usize,
    row: usize,
    column: &str,
    default: f64,
) -> EnrichmentResult<f64> {
    match orders::read_number(row, column, &out[idx])? {
        Some(v) => Ok(v),
        None => {
            out[idx] = Value::Float64(default);
            Ok(default)
        }
    }
}

/// Output schema plus the position of each derived column.
fn enriched_schema(input: &Schema) -> (Schema, [usize; 4]) {
    let mut schema = input.clone();
    let mut positions = [0usize; 4];
    for (slot, name) in positions.iter_mut().zip(DERIVED_COLUMNS) {
        *slot = match schema.index_of(name) {
            Some(i) => {
                schema.fields[i].data_type = DataType::Float64;
                i
            }
            None => {
                schema.fields.push(Field::new(name, DataType::Float64));
                schema.len() - 1
            }
        };
    }
    (schema, positions)
}
