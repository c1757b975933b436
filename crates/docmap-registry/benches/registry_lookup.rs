//! Benchmarks for doc set loading and lookup.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use docmap_registry::{LoadOptions, VersionedDocSet};

/// Build a payload with `doc_count` docs linked from one sidebar.
fn synthetic_payload(doc_count: usize) -> String {
    let mut docs = serde_json::Map::new();
    let mut items = Vec::new();

    for i in 0..doc_count {
        let id = format!("doc-{i:04}");
        docs.insert(
            id.clone(),
            serde_json::json!({
                "id": id,
                "title": format!("Doc {i}"),
                "description": "",
                "sidebar": "main"
            }),
        );
        items.push(serde_json::json!({
            "type": "link",
            "label": format!("Doc {i}"),
            "href": format!("/docs/{id}"),
            "docId": id
        }));
    }

    serde_json::json!({"docsSidebars": {"main": items}, "docs": docs}).to_string()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for doc_count in [10, 100, 1000] {
        let payload = synthetic_payload(doc_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(doc_count),
            &payload,
            |b, payload| b.iter(|| VersionedDocSet::load_str(payload, LoadOptions::default())),
        );
    }

    group.finish();
}

fn bench_doc_lookup(c: &mut Criterion) {
    let payload = synthetic_payload(1000);
    let set = VersionedDocSet::load_str(&payload, LoadOptions::default()).unwrap();

    let mut group = c.benchmark_group("doc_lookup");

    group.bench_function("hit", |b| b.iter(|| set.doc("doc-0500")));
    group.bench_function("miss", |b| b.iter(|| set.doc("nonexistent")));

    group.finish();
}

fn bench_docs_iteration(c: &mut Criterion) {
    let payload = synthetic_payload(1000);
    let set = VersionedDocSet::load_str(&payload, LoadOptions::default()).unwrap();

    let mut group = c.benchmark_group("iteration");

    group.bench_function("docs", |b| b.iter(|| set.docs().count()));
    group.bench_function("links", |b| b.iter(|| set.links().len()));

    group.finish();
}

criterion_group!(benches, bench_load, bench_doc_lookup, bench_docs_iteration);
criterion_main!(benches);
