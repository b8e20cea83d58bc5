//! Benchmarks for intercepted method dispatch.
//!
//! Compares the cost of calling a host method:
//! - directly through its original body
//! - through a detached call site
//! - through an attached site with an empty hook
//! - through an attached site with a before/after pair carrying state
//! - through an attached site that short-circuits the original

extern crate hostpatch;

use std::{hint::black_box, sync::Arc};

use criterion::{criterion_group, criterion_main, Criterion};
use hostpatch::prelude::*;

fn table() -> (Arc<MethodTable>, MethodHandle) {
    let table = Arc::new(MethodTable::new());
    let handle = table.define(
        MethodDef::new("Bench", "Step")
            .param(ParameterDescriptor::by_ref("int"))
            .returns("int"),
        |value: &mut i32| {
            *value = value.wrapping_mul(31).wrapping_add(7);
            *value
        },
    )
    .unwrap();
    (table, handle)
}

fn signature() -> MethodSignature {
    MethodSignature::builder("Bench", "Step").by_ref("int").build()
}

fn bench_call_original(c: &mut Criterion) {
    let (table, handle) = table();
    let site = table.site::<i32, i32>(handle).unwrap();

    c.bench_function("dispatch_call_original", |b| {
        let mut value = 1;
        b.iter(|| black_box(site.call_original(black_box(&mut value))));
    });
}

fn bench_detached_site(c: &mut Criterion) {
    let (table, handle) = table();
    let registry = PatchRegistry::new(table.clone());
    registry
        .register(&signature(), Hook::<i32, i32>::new("unused"))
        .unwrap();
    let site = table.site::<i32, i32>(handle).unwrap();

    c.bench_function("dispatch_detached", |b| {
        let mut value = 1;
        b.iter(|| black_box(site.call(black_box(&mut value)).unwrap()));
    });
}

fn bench_empty_hook(c: &mut Criterion) {
    let (table, handle) = table();
    let registry = PatchRegistry::with_config(table.clone(), InterceptionConfig::eager());
    registry
        .register(&signature(), Hook::<i32, i32>::new("empty"))
        .unwrap();
    let site = table.site::<i32, i32>(handle).unwrap();

    c.bench_function("dispatch_empty_hook", |b| {
        let mut value = 1;
        b.iter(|| black_box(site.call(black_box(&mut value)).unwrap()));
    });
}

fn bench_stateful_pair(c: &mut Criterion) {
    let (table, handle) = table();
    let registry = PatchRegistry::with_config(table.clone(), InterceptionConfig::eager());
    registry
        .register(
            &signature(),
            Hook::<i32, i32, i32>::new("diff")
                .before(|ctx| {
                    ctx.state = *ctx.args;
                    Ok(())
                })
                .after(|ctx| {
                    if ctx.state == *ctx.args {
                        ctx.result = Some(0);
                    }
                    Ok(())
                }),
        )
        .unwrap();
    let site = table.site::<i32, i32>(handle).unwrap();

    c.bench_function("dispatch_stateful_pair", |b| {
        let mut value = 1;
        b.iter(|| black_box(site.call(black_box(&mut value)).unwrap()));
    });
}

fn bench_short_circuit(c: &mut Criterion) {
    let (table, handle) = table();
    let registry = PatchRegistry::with_config(table.clone(), InterceptionConfig::eager());
    registry
        .register(
            &signature(),
            Hook::<i32, i32>::new("constant").before(|ctx| {
                ctx.skip_with(42);
                Ok(())
            }),
        )
        .unwrap();
    let site = table.site::<i32, i32>(handle).unwrap();

    c.bench_function("dispatch_short_circuit", |b| {
        let mut value = 1;
        b.iter(|| black_box(site.call(black_box(&mut value)).unwrap()));
    });
}

fn bench_resolve_cached(c: &mut Criterion) {
    let (table, _) = table();
    let resolver = SignatureResolver::new(table);
    let signature = signature();
    resolver.resolve(&signature).unwrap();

    c.bench_function("dispatch_resolve_cached", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&signature)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_call_original,
    bench_detached_site,
    bench_empty_hook,
    bench_stateful_pair,
    bench_short_circuit,
    bench_resolve_cached
);
criterion_main!(benches);
