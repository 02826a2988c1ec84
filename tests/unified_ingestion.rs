use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use order_enrichment::enrichment::enrich;
use order_enrichment::ingestion::{IngestionFormat, IngestionOptions, ingest_from_path};
use order_enrichment::types::Value;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("order-enrichment-unified-{nanos}.{ext}"))
}

#[test]
fn unified_csv_autodetect_by_extension() {
    let ds = ingest_from_path("tests/fixtures/orders.csv", &IngestionOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 4);
    assert_eq!(ds.value(3, "ShippingCost"), Some(&Value::Float64(-2.0)));
}

#[test]
fn unified_json_autodetect_by_extension() {
    let ds = ingest_from_path("tests/fixtures/orders.json", &IngestionOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.value(0, "OrderId"), Some(&Value::Utf8("A-100".to_string())));
}

#[test]
fn unified_explicit_format_overrides_extension() {
    let path = tmp_file("txt");
    std::fs::copy("tests/fixtures/orders.json", &path).unwrap();

    let opts = IngestionOptions {
        format: Some(IngestionFormat::Json),
        ..Default::default()
    };
    let ds = ingest_from_path(&path, &opts).unwrap();
    assert_eq!(ds.row_count(), 3);

    let err = ingest_from_path(&path, &IngestionOptions::default()).unwrap_err();
    assert!(err.to_string().contains("cannot infer format from extension 'txt'"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn csv_and_json_fixtures_enrich_identically() {
    let opts = IngestionOptions::default();
    let from_csv = enrich(&ingest_from_path("tests/fixtures/orders.csv", &opts).unwrap()).unwrap();
    let from_json =
        enrich(&ingest_from_path("tests/fixtures/orders.json", &opts).unwrap()).unwrap();

    for row in 0..from_json.row_count() {
        assert_eq!(from_csv.rows[row], from_json.rows[row], "row {row}");
    }
    assert_eq!(from_csv.value(2, "Profit"), Some(&Value::Float64(-15.0)));
}
