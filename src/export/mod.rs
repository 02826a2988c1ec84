//! Writing datasets out.
//!
//! The enricher hands back a [`crate::types::DataSet`]; these writers serialize it for
//! downstream consumers. Both keep schema column order.
//!
//! - [`csv`]: header row plus one record per row; `Null` as an empty cell
//! - [`json`]: array of objects; `Null` and non-finite floats as JSON `null`

pub mod csv;
pub mod json;

pub use self::csv::{write_csv, write_csv_to_path};
pub use self::json::{to_json_value, write_json, write_json_to_path};
