use confsplice::{inject_source, SourceLanguage};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

const NUXT3: &str = include_str!("../tests/fixtures/nuxt3/async.ts");
const SVELTEKIT: &str = include_str!("../tests/fixtures/sveltekit/default.js");

fn bench_inject(c: &mut Criterion) {
    let value = json!("/docs/");

    c.bench_function("inject_wrapped_typescript", |b| {
        b.iter(|| {
            inject_source(
                black_box(NUXT3),
                SourceLanguage::TypeScript,
                true,
                "app.baseURL",
                &value,
            )
        })
    });

    c.bench_function("inject_nested_javascript", |b| {
        b.iter(|| {
            inject_source(
                black_box(SVELTEKIT),
                SourceLanguage::JavaScript,
                false,
                "kit.paths.base",
                &value,
            )
        })
    });
}

criterion_group!(benches, bench_inject);
criterion_main!(benches);
