//! Benchmarks for catalog lookup and placeholder substitution.
//!
//! The translate path runs per displayed string, potentially many times per
//! second during UI refresh, so lookup hits and plain interpolation are the
//! hot cases.
//!
//! Run with: cargo bench -p lingua-catalog --bench lookup_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lingua_catalog::{Argument, Catalog, MessageEntry, interpolate};

fn build_catalog(contexts: usize, messages: usize) -> Catalog {
    let mut catalog = Catalog::new("bench");
    for c in 0..contexts {
        let ctx = catalog.context_mut(&format!("Dialog{c}"));
        for m in 0..messages {
            ctx.insert(
                MessageEntry::new(format!("Source string number {m}"))
                    .with_translation(format!("Translated string number {m}")),
            );
        }
    }
    catalog
}

fn bench_lookup(c: &mut Criterion) {
    let catalog = build_catalog(50, 40);
    let mut group = c.benchmark_group("catalog");

    group.bench_function("lookup_hit", |b| {
        b.iter(|| {
            black_box(catalog.lookup(
                black_box("Dialog25"),
                black_box("Source string number 20"),
                None,
            ))
        })
    });

    group.bench_function("lookup_miss", |b| {
        b.iter(|| black_box(catalog.lookup(black_box("Dialog25"), black_box("absent"), None)))
    });

    group.bench_function("translate_hit", |b| {
        b.iter(|| {
            black_box(catalog.translate(
                black_box("Dialog25"),
                black_box("Source string number 20"),
                &[],
            ))
        })
    });

    group.bench_function("translate_unknown_context", |b| {
        b.iter(|| black_box(catalog.translate(black_box("Nowhere"), black_box("plain text"), &[])))
    });

    group.finish();
}

fn bench_interpolate(c: &mut Criterion) {
    let args = [
        Argument::from("Nightjar"),
        Argument::Int(42),
        Argument::Float(59.94),
    ];
    let mut group = c.benchmark_group("interpolate");

    group.bench_function("no_tokens", |b| {
        b.iter(|| black_box(interpolate(black_box("a plain status bar message"), &args)))
    });

    group.bench_function("three_tokens", |b| {
        b.iter(|| black_box(interpolate(black_box("%1 running at %3 FPS (%2)"), &args)))
    });

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_interpolate);
criterion_main!(benches);
