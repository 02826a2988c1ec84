//! Order field names, the canonical order schema, and the typed record view.
//!
//! The column names below are the public contract with loaders and consumers and are
//! reproduced exactly in every schema this crate builds.

use serde::{Deserialize, Serialize};

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

pub const QUANTITY: &str = "Quantity";
pub const UNIT_PRICE: &str = "UnitPrice";
pub const DISCOUNT: &str = "Discount";
pub const SHIPPING_COST: &str = "ShippingCost";
pub const ORDER_PRIORITY: &str = "OrderPriority";

pub const TOTAL_REVENUE: &str = "TotalRevenue";
pub const PROFIT: &str = "Profit";
pub const DISCOUNT_AMOUNT: &str = "DiscountAmount";
pub const SHIPPING_COST_PER_UNIT: &str = "ShippingCostPerUnit";

/// The five source columns, in canonical order.
pub const SOURCE_COLUMNS: [&str; 5] =
    [QUANTITY, UNIT_PRICE, DISCOUNT, SHIPPING_COST, ORDER_PRIORITY];

/// The four derived columns, in computation order.
pub const DERIVED_COLUMNS: [&str; 4] =
    [TOTAL_REVENUE, PROFIT, DISCOUNT_AMOUNT, SHIPPING_COST_PER_UNIT];

/// Logical type of a source column.
pub fn source_data_type(column: &str) -> Option<DataType> {
    match column {
        QUANTITY => Some(DataType::Int64),
        UNIT_PRICE | DISCOUNT | SHIPPING_COST => Some(DataType::Float64),
        ORDER_PRIORITY => Some(DataType::Utf8),
        _ => None,
    }
}

/// Schema of the five source columns.
pub fn order_schema() -> Schema {
    Schema::new(
        SOURCE_COLUMNS
            .iter()
            .filter_map(|name| source_data_type(name).map(|dt| Field::new(*name, dt)))
            .collect(),
    )
}

/// Schema of the five source columns followed by the four derived columns.
pub fn enriched_order_schema() -> Schema {
    let mut schema = order_schema();
    schema
        .fields
        .extend(DERIVED_COLUMNS.iter().map(|name| Field::new(*name, DataType::Float64)));
    schema
}

/// One order as it arrives from a loader. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderRecord {
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub discount: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub order_priority: Option<String>,
}

/// An order with defaults applied and the four derived fields computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichedOrderRecord {
    pub quantity: i64,
    pub unit_price: f64,
    pub discount: f64,
    pub shipping_cost: f64,
    pub order_priority: String,
    pub total_revenue: f64,
    pub profit: f64,
    pub discount_amount: f64,
    pub shipping_cost_per_unit: f64,
}

impl OrderRecord {
    /// Row in [`order_schema`] order.
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            self.quantity.map_or(Value::Null, Value::Int64),
            float_or_null(self.unit_price),
            float_or_null(self.discount),
            float_or_null(self.shipping_cost),
            self.order_priority
                .as_ref()
                .map_or(Value::Null, |s| Value::Utf8(s.clone())),
        ]
    }
}

impl EnrichedOrderRecord {
    /// Row in [`enriched_order_schema`] order.
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::Int64(self.quantity),
            Value::Float64(self.unit_price),
            Value::Float64(self.discount),
            Value::Float64(self.shipping_cost),
            Value::Utf8(self.order_priority.clone()),
            Value::Float64(self.total_revenue),
            Value::Float64(self.profit),
            Value::Float64(self.discount_amount),
            Value::Float64(self.shipping_cost_per_unit),
        ]
    }
}

fn float_or_null(v: Option<f64>) -> Value {
    v.map_or(Value::Null, Value::Float64)
}

/// Build an order [`DataSet`] from typed records.
pub fn dataset_from_records(records: &[OrderRecord]) -> DataSet {
    DataSet::new(order_schema(), records.iter().map(OrderRecord::to_row).collect())
}

/// Build an enriched order [`DataSet`] from typed enriched records.
pub fn dataset_from_enriched(records: &[EnrichedOrderRecord]) -> DataSet {
    DataSet::new(
        enriched_order_schema(),
        records.iter().map(EnrichedOrderRecord::to_row).collect(),
    )
}

/// Read the five source columns of `dataset` into typed records.
///
/// Extra columns are ignored. Fails with `SchemaMismatch` if a source column is absent or a row
/// is the wrong length, and with `InvalidRecord` if a present value has the wrong type.
pub fn records_from_dataset(dataset: &DataSet) -> EnrichmentResult<Vec<OrderRecord>> {
    let idx = source_column_indexes(&dataset.schema)?;

    dataset
        .rows
        .iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() != dataset.schema.len() {
                return Err(EnrichmentError::schema_mismatch(format!(
                    "row {row} has {} values but the schema has {} fields",
                    values.len(),
                    dataset.schema.len()
                )));
            }
            Ok(OrderRecord {
                quantity: read_quantity(row, &values[idx[0]])?,
                unit_price: read_number(row, UNIT_PRICE, &values[idx[1]])?,
                discount: read_number(row, DISCOUNT, &values[idx[2]])?,
                shipping_cost: read_number(row, SHIPPING_COST, &values[idx[3]])?,
                order_priority: read_label(row, ORDER_PRIORITY, &values[idx[4]])?,
            })
        })
        .collect()
}

/// Positions of the five source columns in `schema`, in [`SOURCE_COLUMNS`] order.
pub(crate) fn source_column_indexes(schema: &Schema) -> EnrichmentResult<[usize; 5]> {
    let mut out = [0usize; 5];
    for (slot, name) in out.iter_mut().zip(SOURCE_COLUMNS) {
        *slot = schema.index_of(name).ok_or_else(|| {
            EnrichmentError::schema_mismatch(format!(
                "missing required column '{name}'. columns={:?}",
                schema.field_names().collect::<Vec<_>>()
            ))
        })?;
    }
    Ok(out)
}

/// Numeric value of an order field; `None` when missing. Integers widen to `f64`.
pub(crate) fn read_number(row: usize, column: &str, v: &Value) -> EnrichmentResult<Option<f64>> {
    if v.is_missing() {
        return Ok(None);
    }
    match v {
        Value::Int64(n) => Ok(Some(*n as f64)),
        Value::Float64(n) => Ok(Some(*n)),
        other => Err(invalid(row, column, "number", other)),
    }
}

/// Whole-number quantity; an integral float is accepted.
pub(crate) fn read_quantity(row: usize, v: &Value) -> EnrichmentResult<Option<i64>> {
    if v.is_missing() {
        return Ok(None);
    }
    match v {
        Value::Int64(n) => Ok(Some(*n)),
        Value::Float64(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(Some(*n as i64)),
        other => Err(invalid(row, QUANTITY, "integer", other)),
    }
}

pub(crate) fn read_label(row: usize, column: &str, v: &Value) -> EnrichmentResult<Option<String>> {
    if v.is_missing() {
        return Ok(None);
    }
    match v {
        Value::Utf8(s) => Ok(Some(s.clone())),
        other => Err(invalid(row, column, "string", other)),
    }
}

fn invalid(row: usize, column: &str, expected: &'static str, found: &Value) -> EnrichmentError {
    EnrichmentError::InvalidRecord {
        row,
        column: column.to_string(),
        expected,
        found: format!("{} '{found}'", found.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enriched_schema_appends_derived_columns_in_order() {
        let names: Vec<String> = enriched_order_schema()
            .field_names()
            .map(str::to_string)
            .collect();
        assert_eq!(
            names,
            vec![
                "Quantity",
                "UnitPrice",
                "Discount",
                "ShippingCost",
                "OrderPriority",
                "TotalRevenue",
                "Profit",
                "DiscountAmount",
                "ShippingCostPerUnit",
            ]
        );
    }

    #[test]
    fn records_round_trip_through_dataset() {
        let records = vec![
            OrderRecord {
                quantity: Some(2),
                unit_price: Some(9.5),
                discount: None,
                shipping_cost: Some(1.0),
                order_priority: Some("Critical".to_string()),
            },
            OrderRecord::default(),
        ];
        let ds = dataset_from_records(&records);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows[1], vec![Value::Null; 5]);
        assert_eq!(records_from_dataset(&ds).unwrap(), records);
    }

    #[test]
    fn records_from_dataset_reads_by_name_and_ignores_extras() {
        let schema = Schema::new(vec![
            Field::new("OrderId", DataType::Utf8),
            Field::new(ORDER_PRIORITY, DataType::Utf8),
            Field::new(SHIPPING_COST, DataType::Float64),
            Field::new(DISCOUNT, DataType::Float64),
            Field::new(UNIT_PRICE, DataType::Float64),
            Field::new(QUANTITY, DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![
                Value::Utf8("A-1".to_string()),
                Value::Utf8("High".to_string()),
                Value::Int64(2),
                Value::Float64(f64::NAN),
                Value::Float64(5.0),
                Value::Float64(4.0),
            ]],
        );
        let records = records_from_dataset(&ds).unwrap();
        assert_eq!(
            records[0],
            OrderRecord {
                quantity: Some(4),
                unit_price: Some(5.0),
                discount: None,
                shipping_cost: Some(2.0),
                order_priority: Some("High".to_string()),
            }
        );
    }

    #[test]
    fn fractional_quantity_is_invalid() {
        let ds = DataSet::new(
            order_schema(),
            vec![vec![
                Value::Float64(1.5),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
            ]],
        );
        let err = records_from_dataset(&ds).unwrap_err();
        assert!(matches!(
            err,
            EnrichmentError::InvalidRecord { row: 0, ref column, expected: "integer", .. }
                if column == QUANTITY
        ));
    }

    #[test]
    fn missing_source_column_is_schema_mismatch() {
        let schema = Schema::new(vec![Field::new(QUANTITY, DataType::Int64)]);
        let err = source_column_indexes(&schema).unwrap_err();
        assert!(err.to_string().contains("missing required column 'UnitPrice'"));
    }
}
