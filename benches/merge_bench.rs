// Benchmark for interval merging and weekly repeats
// Measures canonicalisation cost as the selection list grows

use booking_scheduler::models::interval::TimeInterval;
use booking_scheduler::services::interval::{merge, repeated_ranges};
use booking_scheduler::services::selection::SelectionState;
use chrono_tz::Australia::Sydney;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const HOUR_MS: i64 = 3_600_000;

// Hour-long slots, every third one touching its neighbour
fn slots(count: usize) -> Vec<TimeInterval> {
    (0..count as i64)
        .rev()
        .map(|i| {
            let start = i * 2 * HOUR_MS - (i % 3) * HOUR_MS;
            TimeInterval {
                start,
                end: start + HOUR_MS,
            }
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for count in [10, 100, 1000].iter() {
        let input = slots(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| merge(black_box(input.clone())));
        });
    }

    group.finish();
}

fn bench_select_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_sequence");

    for count in [10, 100].iter() {
        let input = slots(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| {
                let mut state = SelectionState::new();
                for slot in input {
                    state.select(black_box(*slot), &[], -1);
                }
                state
            });
        });
    }

    group.finish();
}

fn bench_repeated_ranges(c: &mut Criterion) {
    let slot = TimeInterval {
        start: 1_728_144_000_000,
        end: 1_728_144_000_000 + HOUR_MS,
    };

    c.bench_function("repeated_ranges_99_weeks", |b| {
        b.iter(|| repeated_ranges(black_box(&slot), black_box(99), Sydney));
    });
}

criterion_group!(
    benches,
    bench_merge,
    bench_select_sequence,
    bench_repeated_ranges
);
criterion_main!(benches);
