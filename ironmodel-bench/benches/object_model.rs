//! Equality, hashing, cloning and visiting benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use ironmodel_bench::{Workload, synthetic_instance};
use ironmodel_codegen::{GeneratorSettings, generate_from_json};
use ironmodel_core::{IdentityHook, ObjectModel, RewritingVisitor, Value};
use std::hint::black_box;

fn benchmark_object_model(c: &mut Criterion) {
    let workload = Workload::new(8);
    let settings = GeneratorSettings::default().generate_rewriting_visitor(true);
    let Ok(types) = generate_from_json(&workload.schema, &workload.hints, &settings) else {
        return;
    };
    let model = ObjectModel::new(&types);
    let instance = synthetic_instance(&workload, 4, 3);
    let Ok(record) = model.read_json("Root", &instance) else {
        return;
    };
    let Ok(copy) = model.copy("Root", Some(&record)) else {
        return;
    };

    c.bench_function("read_json", |b| {
        b.iter(|| model.read_json("Root", black_box(&instance)))
    });

    c.bench_function("equals", |b| {
        b.iter(|| model.equals(black_box(&record), Some(black_box(&copy))))
    });

    c.bench_function("hash_code", |b| {
        b.iter(|| model.hash_code(black_box(&record)))
    });

    c.bench_function("copy", |b| {
        b.iter(|| model.copy("Root", Some(black_box(&record))))
    });

    c.bench_function("visit_identity", |b| {
        b.iter_batched(
            || Value::from(record.clone()),
            |value| {
                RewritingVisitor::new(&types, IdentityHook)
                    .and_then(|mut visitor| visitor.visit(value))
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, benchmark_object_model);
criterion_main!(benches);
