use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use walk_scheduler::{end_times, generate, start_times, AvailabilityRange, TimeOfDay};

fn busy_day() -> Vec<AvailabilityRange> {
    [
        ("06:00", "08:30"),
        ("09:15", "12:00"),
        ("13:00", "17:45"),
        ("18:30", "21:00"),
        ("22:00", "02:00"),
    ]
    .iter()
    .map(|(s, e)| AvailabilityRange::parse(s, e).unwrap())
    .collect()
}

fn bench_slots(c: &mut Criterion) {
    let ranges = busy_day();
    let start = TimeOfDay::parse("22:30").unwrap();

    c.bench_function("fixed_slots_solo_walk", |b| {
        b.iter(|| generate(black_box(&ranges), 60, 15).unwrap())
    });
    c.bench_function("sitting_start_times", |b| {
        b.iter(|| start_times(black_box(&ranges), 60, 30).unwrap())
    });
    c.bench_function("sitting_end_times_overnight", |b| {
        b.iter(|| end_times(black_box(&ranges), start, 60, 30).unwrap())
    });
}

criterion_group!(benches, bench_slots);
criterion_main!(benches);
