use criterion::{Criterion, black_box, criterion_group, criterion_main};
use order_enrichment::config::EnrichmentDefaults;
use order_enrichment::enrichment::{RecordEnricher, enrich_records};
use order_enrichment::orders::{OrderRecord, dataset_from_records};

fn generate_orders(count: usize) -> Vec<OrderRecord> {
    (0..count)
        .map(|i| OrderRecord {
            // Every seventh row has a zero quantity, every fifth misses its discount.
            quantity: if i % 11 == 0 { None } else { Some((i % 7) as i64) },
            unit_price: Some(1.0 + (i % 100) as f64 * 0.25),
            discount: if i % 5 == 0 { None } else { Some((i % 4) as f64 * 0.05) },
            shipping_cost: Some((i % 13) as f64),
            order_priority: if i % 3 == 0 { None } else { Some("High".to_string()) },
        })
        .collect()
}

fn bench_enrich_dataset(c: &mut Criterion) {
    let enricher = RecordEnricher::default();
    let mut group = c.benchmark_group("enrich_dataset");

    for count in [1_000, 100_000] {
        let ds = dataset_from_records(&generate_orders(count));
        group.bench_function(format!("{count}_rows"), |b| {
            b.iter(|| enricher.enrich(black_box(&ds)).unwrap())
        });
    }

    group.finish();
}

fn bench_enrich_records(c: &mut Criterion) {
    let defaults = EnrichmentDefaults::default();
    let records = generate_orders(100_000);

    c.bench_function("enrich_records_100k", |b| {
        b.iter(|| enrich_records(black_box(&records), &defaults))
    });
}

criterion_group!(benches, bench_enrich_dataset, bench_enrich_records);
criterion_main!(benches);
