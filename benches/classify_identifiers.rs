use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rocks::{classify, LocalIndex};

const IDENTIFIERS: [&str; 8] = [
    "ceres",
    "2014_yc62",
    "A898 pa",
    "2040_P-L",
    "C/2020 F3",
    "12345",
    "G!kun||'homdima",
    "1993ft8",
];

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify/mixed", |b| {
        b.iter(|| {
            for raw in IDENTIFIERS {
                black_box(classify(black_box(raw)));
            }
        })
    });
}

fn bench_local_lookup(c: &mut Criterion) {
    let index = LocalIndex::from_pairs((1..=100_000u64).map(|n| (Some(n), format!("Rock{n}"))));

    c.bench_function("local_index/number_from_name", |b| {
        b.iter(|| black_box(index.number_from_name(black_box("Rock54321"))))
    });
}

criterion_group!(benches, bench_classify, bench_local_lookup);
criterion_main!(benches);
