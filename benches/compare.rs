// benches/compare.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use epitrack::compare::Rule;
use epitrack::snapshot::{RegionRecord, Snapshot};

const STATES: [&str; 8] = [
    "California", "New York", "Texas", "Washington",
    "Illinois", "Florida", "Ohio", "Arizona",
];

fn synthetic(rows: usize, bump: u64) -> Snapshot {
    Snapshot::Regional(
        (0..rows)
            .map(|i| {
                RegionRecord::counts(
                    STATES[i % STATES.len()],
                    i as u64 + bump,
                    (i / 10) as u64,
                    (i / 20) as u64,
                )
            })
            .collect(),
    )
}

fn bench_regional(c: &mut Criterion) {
    let old = synthetic(5_000, 0);
    let new = synthetic(5_000, 1);

    c.bench_function("regional_is_new_changed", |b| {
        b.iter(|| Rule::Regional.is_new(black_box(&new), black_box(&old)).is_new)
    });

    c.bench_function("regional_is_new_identical", |b| {
        b.iter(|| Rule::Regional.is_new(black_box(&old), black_box(&old)).is_new)
    });
}

criterion_group!(benches, bench_regional);
criterion_main!(benches);
