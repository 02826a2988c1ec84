//! Core tabular data model.
//!
//! Orders travel through this crate as an in-memory [`DataSet`]: a [`Schema`] (ordered, typed
//! [`Field`]s) plus row-major [`Value`] storage. The enricher never edits one in place; it
//! builds a new one.

use std::fmt;

/// Column type declared by a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int64,
    Float64,
    Bool,
    Utf8,
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Column layout of a [`DataSet`]. Field order is row value order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Column names, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Position of the first field called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One cell.
///
/// A cell's variant normally matches its column's [`DataType`]; `Null` is allowed in any column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Utf8(String),
}

impl Value {
    /// Whether this value counts as missing.
    ///
    /// A `NaN` float is a null marker in tabular sources, so it is missing too.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Short description of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Utf8(_) => "utf8",
        }
    }
}

impl fmt::Display for Value {
    /// Renders the cell the way the CSV writer emits it. `Null` renders as an empty string and
    /// floats keep a fractional part (`43.0`, not `43`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
        }
    }
}

/// A table of orders held in memory, one `Vec<Value>` per row.
///
/// Each row is expected to hold exactly one value per schema field, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    pub schema: Schema,
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the values of a named column, or `None` if the column does not exist.
    ///
    /// Rows too short to reach the column are skipped.
    pub fn column<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }

    /// Value at `row` in the named column.
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.schema.index_of(name)?;
        self.rows.get(row)?.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Quantity", DataType::Int64),
            Field::new("OrderPriority", DataType::Utf8),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(3), Value::Utf8("High".to_string())],
                vec![Value::Null, Value::Utf8("Low".to_string())],
            ],
        )
    }

    #[test]
    fn schema_index_of_works() {
        let ds = sample_dataset();
        assert_eq!(ds.schema.index_of("Quantity"), Some(0));
        assert_eq!(ds.schema.index_of("OrderPriority"), Some(1));
        assert_eq!(ds.schema.index_of("missing"), None);
        assert_eq!(ds.schema.len(), 2);
    }

    #[test]
    fn column_and_value_lookup() {
        let ds = sample_dataset();
        let qty: Vec<&Value> = ds.column("Quantity").unwrap().collect();
        assert_eq!(qty, vec![&Value::Int64(3), &Value::Null]);
        assert!(ds.column("nope").is_none());

        assert_eq!(ds.value(1, "OrderPriority"), Some(&Value::Utf8("Low".to_string())));
        assert_eq!(ds.value(5, "OrderPriority"), None);
    }

    #[test]
    fn column_skips_short_rows() {
        let mut ds = sample_dataset();
        ds.rows.push(vec![Value::Int64(7)]);
        let priorities: Vec<&Value> = ds.column("OrderPriority").unwrap().collect();
        assert_eq!(priorities.len(), 2);
        assert_eq!(ds.value(2, "OrderPriority"), None);
    }

    #[test]
    fn nan_counts_as_missing() {
        assert!(Value::Null.is_missing());
        assert!(Value::Float64(f64::NAN).is_missing());
        assert!(!Value::Float64(0.0).is_missing());
        assert!(!Value::Utf8(String::new()).is_missing());
    }

    #[test]
    fn display_keeps_float_fraction() {
        assert_eq!(Value::Float64(43.0).to_string(), "43.0");
        assert_eq!(Value::Float64(0.2).to_string(), "0.2");
        assert_eq!(Value::Int64(10).to_string(), "10");
        assert_eq!(Value::Null.to_string(), "");
    }
}
