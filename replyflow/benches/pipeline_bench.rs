//! Benchmarks for the normalization pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use replyflow::prelude::*;
use std::sync::Arc;

fn pipeline_benchmark(c: &mut Criterion) {
    let pipeline = OutputPipeline::new(Arc::new(FixedSampler {
        flip: true,
        index: 0,
    }));
    let envelope = CompletionEnvelope::from_text(
        "0\n\nAssistant: Sometimes, we must suffer through pain and hardship to grow.  Great question!",
    );

    c.bench_function("normalize_noisy_completion", |b| {
        b.iter(|| {
            black_box(pipeline.process(
                black_box("We are not put in this world for mere pleasure alone."),
                &envelope,
                StageConfig::default(),
            ))
        })
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
