//! CSV order loading.

use std::path::Path;

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::orders::source_data_type;
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::{integral, require_order_columns};

/// Load a CSV file of orders into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers, and the headers must include the five order columns (any order).
/// - Columns keep their header order. Order columns are parsed to their types; any other
///   column is kept as trimmed `Utf8`.
/// - Empty cells load as `Null`.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> EnrichmentResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Load orders from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> EnrichmentResult<DataSet> {
    let headers = rdr.headers()?.clone();
    require_order_columns(&headers.iter().collect::<Vec<_>>())?;

    let schema = Schema::new(
        headers
            .iter()
            .map(|h| Field::new(h, source_data_type(h).unwrap_or(DataType::Utf8)))
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.len());
        for (i, field) in schema.fields.iter().enumerate() {
            let raw = record.get(i).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> EnrichmentResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| EnrichmentError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Int64 => match trimmed.parse::<i64>() {
            Ok(v) => Ok(Value::Int64(v)),
            Err(e) => match trimmed.parse::<f64>() {
                // NaN is a missing marker, same as in the float columns.
                Ok(v) if v.is_nan() => Ok(Value::Null),
                Ok(v) => integral(v)
                    .map(Value::Int64)
                    .ok_or_else(|| parse_err(e.to_string())),
                Err(_) => Err(parse_err(e.to_string())),
            },
        },
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Bool | DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_typed_value;
    use crate::types::{DataType, Value};

    #[test]
    fn quantity_accepts_integral_float_text() {
        assert_eq!(
            parse_typed_value(2, "Quantity", DataType::Int64, " 3.0 ").unwrap(),
            Value::Int64(3)
        );
        let err = parse_typed_value(2, "Quantity", DataType::Int64, "3.5").unwrap_err();
        assert!(err.to_string().contains("column 'Quantity'"));
    }

    #[test]
    fn nan_quantity_is_null() {
        assert_eq!(
            parse_typed_value(2, "Quantity", DataType::Int64, "NaN").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn blank_cell_is_null() {
        assert_eq!(
            parse_typed_value(2, "UnitPrice", DataType::Float64, "   ").unwrap(),
            Value::Null
        );
    }
}
