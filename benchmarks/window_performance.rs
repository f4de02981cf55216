use criterion::{black_box, criterion_group, criterion_main, Criterion};

use avg_window_server::WindowManager;

fn bench_ingest(c: &mut Criterion) {
    c.bench_function("ingest_fresh_batch", |b| {
        let manager = WindowManager::new(10);
        let mut next = 0i64;
        b.iter(|| {
            let batch: Vec<i64> = (next..next + 16).collect();
            next += 16;
            black_box(manager.ingest(&batch));
        });
    });

    c.bench_function("ingest_all_duplicates", |b| {
        let manager = WindowManager::new(10);
        let batch: Vec<i64> = (0..10).collect();
        manager.ingest(&batch);
        b.iter(|| black_box(manager.ingest(&batch)));
    });

    c.bench_function("fallback_outcome", |b| {
        let manager = WindowManager::new(10);
        manager.ingest(&(0..10).collect::<Vec<_>>());
        b.iter(|| black_box(manager.fallback_outcome()));
    });
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
