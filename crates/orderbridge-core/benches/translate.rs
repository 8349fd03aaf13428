//! Translation and normalization benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orderbridge_core::{normalize, translate_document};
use serde_json::{json, Value};

fn order_with_items(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Product {}", i),
                "quantity": i % 7 + 1,
                "unitPrice": 5.5,
                "tax": 0.8
            })
        })
        .collect();

    json!({
        "orderId": "ORD-789",
        "state": "SHIPPED",
        "amount": {"value": 59.5, "currency": "USD"},
        "customer": {"id": "C789", "name": "Bob", "email": "bob@example.com"},
        "createdAt": "2024-12-17T15:45:30Z",
        "trackingNumber": "TRACK-789-XYZ",
        "lineItems": items
    })
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    for count in [0usize, 1, 10, 100] {
        let doc = order_with_items(count);
        group.bench_with_input(BenchmarkId::new("line_items", count), &doc, |b, doc| {
            b.iter(|| black_box(translate_document(black_box(doc))));
        });
    }

    group.bench_function("unknown_state", |b| {
        let doc = json!({"state": "FULFILLED", "createdAt": "not-a-dateTlater"});
        b.iter(|| black_box(translate_document(black_box(&doc))));
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("modern_errors", |b| {
        let body = json!({
            "errors": [
                {"code": "INVALID_USER_ID", "message": "User ID must be numeric", "field": "userId"},
                {"code": "RATE_LIMIT", "message": "Too many requests", "field": null}
            ]
        });
        b.iter(|| black_box(normalize(400, black_box(&body))));
    });

    group.bench_function("fallback", |b| {
        let body = order_with_items(10);
        b.iter(|| black_box(normalize(500, black_box(&body))));
    });

    group.finish();
}

criterion_group!(benches, bench_translate, bench_normalize);
criterion_main!(benches);
