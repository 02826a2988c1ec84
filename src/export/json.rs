//! JSON writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Number};

use crate::error::EnrichmentResult;
use crate::types::{DataSet, Value};

/// Convert `dataset` to a JSON array of objects keyed by column name, in schema order.
pub fn to_json_value(dataset: &DataSet) -> serde_json::Value {
    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let obj: Map<String, serde_json::Value> = dataset
                .schema
                .field_names()
                .zip(row)
                .map(|(name, v)| (name.to_string(), value_to_json(v)))
                .collect();
            serde_json::Value::Object(obj)
        })
        .collect();
    serde_json::Value::Array(rows)
}

/// Write `dataset` as a pretty-printed JSON array.
pub fn write_json<W: Write>(dataset: &DataSet, mut writer: W) -> EnrichmentResult<()> {
    serde_json::to_writer_pretty(&mut writer, &to_json_value(dataset))?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write `dataset` as JSON to a file, replacing it if it exists.
pub fn write_json_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> EnrichmentResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(dataset, &mut writer)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = dataset.row_count(), "wrote json");
    Ok(())
}

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Int64(n) => serde_json::Value::from(*n),
        // NaN and infinities have no JSON representation.
        Value::Float64(n) => {
            Number::from_f64(*n).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Utf8(s) => serde_json::Value::String(s.clone()),
    }
}
