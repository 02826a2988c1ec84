//! Parquet order loading.

use std::collections::HashMap;
use std::path::Path;

use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::{Field, Row};

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::orders::source_data_type;
use crate::types::{self, DataSet, DataType, Schema, Value};

use super::{integral, require_order_columns, widen};

/// Load a Parquet file of orders into an in-memory `DataSet`.
///
/// Notes:
/// - Columns follow the file's leaf column order; all five order columns must be present.
/// - Order columns are converted to their types (`Quantity` accepts whole-number floats);
///   other columns get a type inferred from their non-null values.
/// - Uses the Parquet record API (`RowIter`), so the whole file is materialized in memory.
pub fn ingest_parquet_from_path(path: impl AsRef<Path>) -> EnrichmentResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let columns = parquet_leaf_column_paths(&reader);
    require_order_columns(&columns.iter().map(String::as_str).collect::<Vec<_>>())?;

    let mut records: Vec<Row> = Vec::new();
    for row_res in reader.into_iter() {
        records.push(row_res?);
    }
    let lookups: Vec<HashMap<&str, &Field>> = records
        .iter()
        .map(|row| {
            row.get_column_iter()
                .map(|(name, field)| (name.as_str(), field))
                .collect()
        })
        .collect();

    let schema = Schema::new(
        columns
            .iter()
            .map(|name| {
                let data_type = source_data_type(name)
                    .unwrap_or_else(|| infer_column_type(name, &lookups));
                types::Field::new(name.as_str(), data_type)
            })
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(lookups.len());
    for (idx0, lookup) in lookups.iter().enumerate() {
        let row_num = idx0 + 1;
        let mut out_row: Vec<Value> = Vec::with_capacity(schema.len());
        for f in &schema.fields {
            let value = match lookup.get(f.name.as_str()) {
                None | Some(Field::Null) => Value::Null,
                Some(field) if source_data_type(&f.name).is_some() => {
                    convert_order_field(row_num, &f.name, f.data_type, field)?
                }
                Some(field) => convert_passthrough_field(f.data_type, field),
            };
            out_row.push(value);
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(schema, rows))
}

fn parquet_leaf_column_paths<R: ChunkReader + 'static>(
    reader: &SerializedFileReader<R>,
) -> Vec<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.path().string())
        .collect()
}

fn as_i64(f: &Field) -> Option<i64> {
    match f {
        Field::Byte(v) => Some(i64::from(*v)),
        Field::Short(v) => Some(i64::from(*v)),
        Field::Int(v) => Some(i64::from(*v)),
        Field::Long(v) => Some(*v),
        Field::UByte(v) => Some(i64::from(*v)),
        Field::UShort(v) => Some(i64::from(*v)),
        Field::UInt(v) => Some(i64::from(*v)),
        Field::ULong(v) => i64::try_from(*v).ok(),
        _ => None,
    }
}

fn as_f64(f: &Field) -> Option<f64> {
    match f {
        Field::Float(v) => Some(f64::from(*v)),
        Field::Double(v) => Some(*v),
        other => as_i64(other).map(|v| v as f64),
    }
}

fn field_kind(f: &Field) -> Option<DataType> {
    match f {
        Field::Null => None,
        Field::Bool(_) => Some(DataType::Bool),
        Field::Float(_) | Field::Double(_) => Some(DataType::Float64),
        other if as_i64(other).is_some() => Some(DataType::Int64),
        _ => Some(DataType::Utf8),
    }
}

fn infer_column_type(name: &str, lookups: &[HashMap<&str, &Field>]) -> DataType {
    lookups
        .iter()
        .filter_map(|lookup| lookup.get(name).and_then(|f| field_kind(f)))
        .fold(None, |acc, next| Some(widen(acc, next)))
        .unwrap_or(DataType::Utf8)
}

fn convert_order_field(
    row: usize,
    column: &str,
    data_type: DataType,
    f: &Field,
) -> EnrichmentResult<Value> {
    let parse_err = |message: &str| EnrichmentError::ParseError {
        row,
        column: column.to_string(),
        raw: f.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Int64 => match f {
            Field::Float(_) | Field::Double(_) => match as_f64(f) {
                Some(v) if v.is_nan() => Ok(Value::Null),
                v => v
                    .and_then(integral)
                    .map(Value::Int64)
                    .ok_or_else(|| parse_err("expected integer")),
            },
            _ => as_i64(f)
                .map(Value::Int64)
                .ok_or_else(|| parse_err("expected integer")),
        },
        DataType::Float64 => as_f64(f)
            .map(Value::Float64)
            .ok_or_else(|| parse_err("expected number")),
        DataType::Utf8 => match f {
            Field::Str(s) => Ok(Value::Utf8(s.clone())),
            _ => Err(parse_err("expected string")),
        },
        DataType::Bool => match f {
            Field::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(parse_err("expected bool")),
        },
    }
}

fn convert_passthrough_field(data_type: DataType, f: &Field) -> Value {
    let converted = match (data_type, f) {
        (DataType::Int64, _) => as_i64(f).map(Value::Int64),
        (DataType::Float64, _) => as_f64(f).map(Value::Float64),
        (DataType::Bool, Field::Bool(b)) => Some(Value::Bool(*b)),
        (DataType::Utf8, Field::Str(s)) => Some(Value::Utf8(s.clone())),
        _ => None,
    };
    converted.unwrap_or_else(|| Value::Utf8(f.to_string()))
}
