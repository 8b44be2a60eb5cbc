//! Benchmarks for the packing strategies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use stowage_packing::{base_constraints, BinModel, Item, PackConfig, Packer, Strategy};

fn batch(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::new(
                format!("item_{i}"),
                Decimal::from(1 + i as u32 % 3),
                Decimal::from(1 + i as u32 % 2),
                Decimal::from(1 + i as u32 % 4),
                Decimal::from(2),
            )
        })
        .collect()
}

fn pack_benchmark(c: &mut Criterion) {
    let constraints = base_constraints();

    c.bench_function("greedy_pack_20_boxes", |b| {
        b.iter(|| {
            let mut packer = Packer::new();
            packer.set_default_bin(BinModel::new(
                "bin",
                Decimal::from(10),
                Decimal::from(10),
                Decimal::from(10),
                Decimal::from(1000),
            ));
            packer.add_batch(batch(20));
            packer
                .pack(black_box(&constraints), &PackConfig::default())
                .unwrap();
            black_box(packer.statistics())
        })
    });

    c.bench_function("multi_anchor_pack_20_boxes", |b| {
        b.iter(|| {
            let mut packer = Packer::new();
            packer.set_default_bin(BinModel::new(
                "bin",
                Decimal::from(10),
                Decimal::from(10),
                Decimal::from(10),
                Decimal::from(1000),
            ));
            packer.add_batch(batch(20));
            let config = PackConfig::default().with_strategy(Strategy::MultiAnchor);
            packer.pack(black_box(&constraints), &config).unwrap();
            black_box(packer.statistics())
        })
    });
}

criterion_group!(benches, pack_benchmark);
criterion_main!(benches);
