//! JSON order loading.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"Quantity":1}, {"Quantity":2}]`
//! - A single JSON object
//! - Newline-delimited JSON (NDJSON): `{"Quantity":1}\n{"Quantity":2}\n`
//!
//! Columns appear in order of first appearance across the objects. A key absent from an object
//! loads as `Null`, and an order column absent from every object is still present (all `Null`).

use std::fs;
use std::path::Path;

use serde_json::Map;

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::orders::{SOURCE_COLUMNS, source_data_type};
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::{integral, widen};

type JsonObject = Map<String, serde_json::Value>;

/// Load a JSON or NDJSON file of orders into a [`DataSet`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> EnrichmentResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Load orders from an in-memory JSON string.
pub fn ingest_json_from_str(input: &str) -> EnrichmentResult<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EnrichmentError::schema_mismatch("json input is empty"));
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match &v {
            serde_json::Value::Array(items) => ingest_json_values(items),
            serde_json::Value::Object(_) => ingest_json_values(std::slice::from_ref(&v)),
            _ => Err(EnrichmentError::schema_mismatch(
                "json must be an object, an array of objects, or NDJSON",
            )),
        }
    } else {
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                EnrichmentError::schema_mismatch(format!("invalid ndjson at line {}: {}", i + 1, e))
            })?;
            values.push(v);
        }
        ingest_json_values(&values)
    }
}

fn ingest_json_values(values: &[serde_json::Value]) -> EnrichmentResult<DataSet> {
    let mut objects: Vec<&JsonObject> = Vec::with_capacity(values.len());
    for (idx0, v) in values.iter().enumerate() {
        let obj = v.as_object().ok_or_else(|| {
            EnrichmentError::schema_mismatch(format!("row {} is not a json object", idx0 + 1))
        })?;
        objects.push(obj);
    }

    let mut names: Vec<&str> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key.as_str());
            }
        }
    }
    for required in SOURCE_COLUMNS {
        if !names.contains(&required) {
            names.push(required);
        }
    }

    let schema = Schema::new(
        names
            .iter()
            .map(|name| {
                let data_type =
                    source_data_type(name).unwrap_or_else(|| infer_column_type(name, &objects));
                Field::new(*name, data_type)
            })
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(objects.len());
    for (idx0, obj) in objects.iter().enumerate() {
        let row_num = idx0 + 1;
        let mut row: Vec<Value> = Vec::with_capacity(schema.len());
        for field in &schema.fields {
            let value = match obj.get(&field.name) {
                None | Some(serde_json::Value::Null) => Value::Null,
                Some(jv) if source_data_type(&field.name).is_some() => {
                    convert_order_value(row_num, &field.name, field.data_type, jv)?
                }
                Some(jv) => convert_passthrough_value(field.data_type, jv),
            };
            row.push(value);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

fn json_kind(v: &serde_json::Value) -> Option<DataType> {
    match v {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(_) => Some(DataType::Bool),
        serde_json::Value::Number(n) if n.is_i64() => Some(DataType::Int64),
        serde_json::Value::Number(_) => Some(DataType::Float64),
        _ => Some(DataType::Utf8),
    }
}

fn infer_column_type(name: &str, objects: &[&JsonObject]) -> DataType {
    objects
        .iter()
        .filter_map(|obj| obj.get(name).and_then(json_kind))
        .fold(None, |acc, next| Some(widen(acc, next)))
        .unwrap_or(DataType::Utf8)
}

fn convert_order_value(
    row: usize,
    column: &str,
    data_type: DataType,
    v: &serde_json::Value,
) -> EnrichmentResult<Value> {
    let parse_err = |message: &str| EnrichmentError::ParseError {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Int64 => v
            .as_i64()
            .or_else(|| v.as_f64().and_then(integral))
            .map(Value::Int64)
            .ok_or_else(|| parse_err("expected integer number")),
        DataType::Float64 => v
            .as_f64()
            .map(Value::Float64)
            .ok_or_else(|| parse_err("expected number")),
        DataType::Utf8 => v
            .as_str()
            .map(|s| Value::Utf8(s.to_string()))
            .ok_or_else(|| parse_err("expected string")),
        DataType::Bool => v.as_bool().map(Value::Bool).ok_or_else(|| parse_err("expected bool")),
    }
}

/// Inferred pass-through columns always convert: anything that does not fit becomes text.
fn convert_passthrough_value(data_type: DataType, v: &serde_json::Value) -> Value {
    let converted = match data_type {
        DataType::Int64 => v.as_i64().map(Value::Int64),
        DataType::Float64 => v.as_f64().map(Value::Float64),
        DataType::Bool => v.as_bool().map(Value::Bool),
        DataType::Utf8 => v.as_str().map(|s| Value::Utf8(s.to_string())),
    };
    converted.unwrap_or_else(|| Value::Utf8(v.to_string()))
}
