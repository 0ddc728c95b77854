use criterion::{black_box, criterion_group, criterion_main, Criterion};

use janus::grammars::{declaration, statements};
use janus::{parse, render, Codec};

const DECLARATION: &str = r#"let greeting = "This is a sample string we wish to parse out";"#;

fn program(n: usize) -> String {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                format!("let v{i} = \"value {i}\";")
            } else {
                format!("v{i} = {i};")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn declaration_bench(c: &mut Criterion) {
    let g = declaration().unwrap();
    let rec = parse(&g, DECLARATION).unwrap();
    c.bench_function("declaration_decode", |b| {
        b.iter(|| black_box(parse(&g, black_box(DECLARATION))))
    });
    c.bench_function("declaration_encode", |b| {
        b.iter(|| black_box(g.encode(black_box(&rec))))
    });
    c.bench_function("declaration_render", |b| {
        b.iter(|| black_box(render(&g, black_box(&rec))))
    });
}

fn statements_bench(c: &mut Criterion) {
    let g = statements().unwrap();
    let text = program(100);
    c.bench_function("statements_decode_100", |b| {
        b.iter(|| black_box(parse(&g, black_box(&text))))
    });
}

criterion_group! {
    name = parser_benches;
    config = Criterion::default();
    targets = declaration_bench, statements_bench
}

criterion_main!(parser_benches);
