//! CSV writer.

use std::io::Write;
use std::path::Path;

use crate::error::EnrichmentResult;
use crate::types::DataSet;

/// Write `dataset` as CSV with a header row.
///
/// Cells use [`crate::types::Value`]'s `Display`: floats keep their fractional part and `Null`
/// becomes an empty cell, so the output loads back through
/// [`crate::ingestion::csv::ingest_csv_from_reader`].
pub fn write_csv<W: Write>(dataset: &DataSet, writer: W) -> EnrichmentResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    write_records(dataset, &mut wtr)
}

/// Write `dataset` as CSV to a file, replacing it if it exists.
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> EnrichmentResult<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    write_records(dataset, &mut wtr)?;
    tracing::info!(path = %path.display(), rows = dataset.row_count(), "wrote csv");
    Ok(())
}

fn write_records<W: Write>(dataset: &DataSet, wtr: &mut csv::Writer<W>) -> EnrichmentResult<()> {
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
