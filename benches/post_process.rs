//! Benchmark: cost of `post_process` per path step.
//!
//! Compares:
//! - pass-through: property without a handler
//! - collection handler: cast the raw list, pick the first element
//! - map handler: cast the raw map, pick a value by key
//!
//! Run: `cargo bench --bench post_process`

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use traversal_context::{PropertyDescriptor, TraversalContext, Value, ValueType};

fn make_context(properties: &[PropertyDescriptor]) -> TraversalContext {
    let mut context = TraversalContext::new();
    context
        .register_collection_handler(&properties[0], |list| list.and_then(|l| l.into_iter().next()))
        .and_then(|ctx| ctx.register_map_handler(&properties[1], |map| map.and_then(|mut m| m.remove("k7"))))
        .expect("handlers match declared types");
    context
}

fn bench_post_process(c: &mut Criterion) {
    let properties = [
        PropertyDescriptor::new("Root", "items", ValueType::list_of(ValueType::Int)),
        PropertyDescriptor::new("Root", "index", ValueType::map_of(ValueType::Int)),
        PropertyDescriptor::new("Root", "name", ValueType::Text),
    ];
    let context = make_context(&properties);

    let list = Value::from((0..16).collect::<Vec<i64>>());
    let map = Value::from((0..16).map(|i| (format!("k{}", i), i)).collect::<BTreeMap<String, i64>>());
    let text = Value::from("leaf");

    let mut group = c.benchmark_group("post_process");

    group.bench_function("pass_through", |b| {
        b.iter(|| black_box(context.post_process(&properties[2], Some(black_box(text.clone())))))
    });

    group.bench_function("collection_handler", |b| {
        b.iter(|| black_box(context.post_process(&properties[0], Some(black_box(list.clone())))))
    });

    group.bench_function("map_handler", |b| {
        b.iter(|| black_box(context.post_process(&properties[1], Some(black_box(map.clone())))))
    });

    group.finish();
}

criterion_group!(benches, bench_post_process);
criterion_main!(benches);
