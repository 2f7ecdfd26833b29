use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use starry_sim::SimWorld;

fn bench_populate(c: &mut Criterion) {
    c.bench_function("populate_1000x800", |b| {
        b.iter_batched(
            || SimWorld::seeded(0xBEEF),
            |mut sim| {
                sim.set_play_area(1000.0, 800.0);
                sim
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    // Small areas push the search toward its attempt budget
    for &(w, h) in &[(1920.0_f32, 1080.0_f32), (1000.0, 800.0), (600.0, 400.0)] {
        group.bench_function(format!("ticks64_{}x{}", w, h), |b| {
            b.iter_batched(
                || {
                    let mut sim = SimWorld::seeded(0xBEEF);
                    sim.set_retain_events(false);
                    sim.set_play_area(w, h);
                    sim
                },
                |mut sim| {
                    for _ in 0..64 {
                        sim.update();
                    }
                    sim
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_populate, bench_ticks);
criterion_main!(benches);
