use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use precis_core::{Document, extract_text, prepare_input, split_chunks};

fn article_html(paragraphs: usize) -> String {
    let body: String = (0..paragraphs)
        .map(|i| format!("<p>Paragraph {i} talks about systems programming, memory safety and fearless concurrency.</p>"))
        .collect();
    format!("<html><head><title>Bench</title></head><body><nav>Menu</nav>{body}<footer>Footer</footer></body></html>")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for paragraphs in [10, 100, 1000] {
        let html = article_html(paragraphs);
        group.bench_with_input(BenchmarkId::new("paragraphs", paragraphs), &html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_extract_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_text");

    for paragraphs in [10, 100, 1000] {
        let html = article_html(paragraphs);
        group.bench_with_input(BenchmarkId::new("paragraphs", paragraphs), &html, |b, html| {
            b.iter(|| extract_text(black_box(html)))
        });
    }

    group.finish();
}

fn bench_prepare_and_chunk(c: &mut Criterion) {
    let text = extract_text(&article_html(1000)).unwrap();

    c.bench_function("prepare_and_chunk", |b| {
        b.iter(|| {
            let input = prepare_input(black_box(&text), 4097);
            split_chunks(input.text, 2000)
        })
    });
}

criterion_group!(benches, bench_parse, bench_extract_text, bench_prepare_and_chunk);
criterion_main!(benches);
