//! Kit expansion benchmarks.
//!
//! Measures explosion throughput for growing catalogs and sales tables.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use restock::{BomEntry, Catalog, CatalogItem, Sku, expand};

/// A catalog of `components` parts and `components / 2` two-part kits.
fn generate_catalog(components: usize) -> Catalog {
    let items = (0..components)
        .map(|i| CatalogItem::new(format!("COMP-{i:05}").as_str(), format!("SUP-{}", i % 7)))
        .collect();
    let bom = (0..components / 2)
        .flat_map(|k| {
            let kit = format!("KIT-{k:05}");
            [
                BomEntry::new(kit.as_str(), format!("COMP-{:05}", 2 * k).as_str(), 2),
                BomEntry::new(kit.as_str(), format!("COMP-{:05}", 2 * k + 1).as_str(), 1),
            ]
        })
        .collect();
    Catalog::new(items, bom)
}

/// Sales rows alternating between kits, components and unknown SKUs.
fn generate_rows(rows: usize, components: usize) -> Vec<(Sku, i64)> {
    (0..rows)
        .map(|i| {
            let sku = match i % 3 {
                0 => format!("KIT-{:05}", i % (components / 2)),
                1 => format!("COMP-{:05}", i % components),
                _ => format!("GHOST-{i}"),
            };
            (Sku::new(&sku), (i % 50) as i64)
        })
        .collect()
}

fn bench_effective_bom(c: &mut Criterion) {
    let mut group = c.benchmark_group("effective_bom");

    for components in [100, 1_000, 10_000].iter() {
        let catalog = generate_catalog(*components);
        group.bench_with_input(
            BenchmarkId::new("components", components),
            &catalog,
            |b, catalog| b.iter(|| black_box(catalog.effective_bom())),
        );
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    let bom = generate_catalog(2_000).effective_bom();

    for rows in [1_000, 10_000, 100_000].iter() {
        let data = generate_rows(*rows, 2_000);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(expand(data.iter().cloned(), &bom)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_effective_bom, bench_expand);
criterion_main!(benches);
