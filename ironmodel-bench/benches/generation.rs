//! Generation benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ironmodel_bench::Workload;
use ironmodel_codegen::{GeneratorSettings, generate_from_json};
use std::hint::black_box;

fn benchmark_generate(c: &mut Criterion) {
    let settings = GeneratorSettings::default()
        .generate_rewriting_visitor(true)
        .generate_equality_comparers(true);
    let mut group = c.benchmark_group("generate");

    for definitions in [10, 50, 200] {
        let workload = Workload::new(definitions);
        group.bench_with_input(
            BenchmarkId::from_parameter(definitions),
            &workload,
            |b, workload| {
                b.iter(|| {
                    generate_from_json(
                        black_box(&workload.schema),
                        black_box(&workload.hints),
                        &settings,
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_generate);
criterion_main!(benches);
