// this_file: benches/render.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use omamori::batch::Job;
use omamori::rarity::sample_seeds;
use omamori::{layout_punches, process_jobs, render_seeded, ExecutionOptions, MaterialCatalog, Seed};

fn bench_render(c: &mut Criterion) {
    let seed = Seed::new("0x1234567890abcdef").unwrap();
    c.bench_function("render_seeded_golden", |b| {
        b.iter(|| render_seeded(black_box(&seed), 1, 0, None).unwrap())
    });
    c.bench_function("layout_punches_25", |b| {
        b.iter(|| layout_punches(black_box(&seed), 25))
    });
}

fn bench_batch(c: &mut Criterion) {
    let jobs: Vec<Job> = sample_seeds(256, 9)
        .into_iter()
        .enumerate()
        .map(|(i, seed)| {
            serde_json::from_value(serde_json::json!({
                "id": i.to_string(),
                "seed": seed.as_str(),
                "major": i % 12,
                "minor": i % 4,
            }))
            .unwrap()
        })
        .collect();
    let cold = ExecutionOptions::new(MaterialCatalog::builtin().clone(), 0);
    c.bench_function("batch_256_uncached", |b| {
        b.iter(|| process_jobs(black_box(&jobs), &cold))
    });
    let warm = ExecutionOptions::new(MaterialCatalog::builtin().clone(), 512);
    c.bench_function("batch_256_cached", |b| {
        b.iter(|| process_jobs(black_box(&jobs), &warm))
    });
}

criterion_group!(benches, bench_render, bench_batch);
criterion_main!(benches);
