use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::fmt::Write as _;
use std::fs;

use stockfile_inventory::{InventoryStore, Price, Product, ProductUpdate};
use tempfile::TempDir;

/// Write a backing file with `n` well-formed records.
fn seed_file(dir: &TempDir, n: usize) -> std::path::PathBuf {
    let path = dir.path().join("inventory.txt");
    let mut contents = String::with_capacity(n * 32);
    for i in 0..n {
        let _ = writeln!(contents, "SKU-{i:06};Product {i};{};{}.99", i % 500, i % 100);
    }
    fs::write(&path, contents).unwrap();
    path
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_from_file");
    for size in [100usize, 1_000, 10_000] {
        let dir = TempDir::new().unwrap();
        let path = seed_file(&dir, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| black_box(InventoryStore::open(path)));
        });
    }
    group.finish();
}

/// Every mutation rewrites the whole file, so cost grows with catalog size.
fn bench_update_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_full_rewrite");
    for size in [100usize, 1_000, 10_000] {
        let dir = TempDir::new().unwrap();
        let mut store = InventoryStore::open(seed_file(&dir, size));
        let price = Price::new(4.2).unwrap();
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                store
                    .update("SKU-000000", ProductUpdate::price(black_box(price)))
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_find_by_name(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut store = InventoryStore::open(dir.path().join("inventory.txt"));
    for i in 0..2_000 {
        let name = if i % 10 == 0 { format!("Widget {i}") } else { format!("Bolt {i}") };
        store
            .add(Product::new(format!("ID-{i}"), name, 1, Price::new(1.0).unwrap()))
            .unwrap();
    }

    c.bench_function("find_by_name/2000", |b| {
        b.iter(|| black_box(store.find_by_name(black_box("wIdGeT"))).len());
    });
}

criterion_group!(benches, bench_load, bench_update_rewrite, bench_find_by_name);
criterion_main!(benches);
