//! Array literal benchmarks.
//!
//! These measure the hot text paths: rendering element sequences into brace
//! literals and scanning literals back into element strings.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sqlarray::array::literal::{parse_literal, render_literal};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal_render");

    let sizes = [4usize, 64, 1024];
    for size in sizes {
        let owned: Vec<Option<String>> = (0..size)
            .map(|i| {
                if i % 7 == 3 {
                    None
                } else {
                    Some(format!("element-{}", i))
                }
            })
            .collect();
        let elements: Vec<Option<&str>> = owned.iter().map(|e| e.as_deref()).collect();

        group.bench_with_input(BenchmarkId::new("quoted", size), &elements, |b, elements| {
            b.iter(|| render_literal(black_box(elements), true));
        });
        group.bench_with_input(BenchmarkId::new("bare", size), &elements, |b, elements| {
            b.iter(|| render_literal(black_box(elements), false));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal_parse");

    let inputs: Vec<(&str, String)> = vec![
        ("small_bare", "{55,12,null,616}".to_string()),
        (
            "small_quoted",
            r#"{"512","",null,"null"}"#.to_string(),
        ),
        ("escapes", r#"{"a\"b","c\\d","plain"}"#.to_string()),
        ("large", {
            let owned: Vec<Option<String>> = (0..1024)
                .map(|i| Some(format!("element-{}", i)))
                .collect();
            let elements: Vec<Option<&str>> = owned.iter().map(|e| e.as_deref()).collect();
            render_literal(&elements, true)
        }),
    ];

    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("parse", name), input, |b, input| {
            b.iter(|| parse_literal(black_box(input)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_parse);
criterion_main!(benches);
