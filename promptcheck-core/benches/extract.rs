use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use promptcheck_core::parser::{extract_constraints, normalize_amount, SAMPLE_PROMPT};

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_sample_prompt", |b| {
        b.iter(|| extract_constraints(black_box(SAMPLE_PROMPT)).unwrap());
    });

    // Long prompt with the only constraint at the very end
    let filler = "Describe the plan in detail. ".repeat(400);
    let long_prompt = format!("{} Keep it under 250 words.", filler);
    c.bench_function("extract_long_prompt", |b| {
        b.iter(|| extract_constraints(black_box(&long_prompt)).unwrap());
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_amount", |b| {
        b.iter(|| normalize_amount(black_box("$1,250.5 million")).unwrap());
    });
}

criterion_group!(benches, bench_extract, bench_normalize);
criterion_main!(benches);
