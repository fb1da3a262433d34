//! Render and merge benchmarks.
//!
//! Measures docblock rendering and tag merging across collection sizes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use phpdoc_generator::{DocBlock, RenderOptions, Tag, TagsCollection};

/// Generate `n` property tags plus `n / 4` method tags.
fn generate_tags(n: usize) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(n + n / 4);
    for i in 0..n {
        let body = format!("array<int, string> $field{i} Generated property number {i}.");
        let name = match i % 3 {
            0 => "property",
            1 => "property-read",
            _ => "property-write",
        };
        tags.push(Tag::parse(name, &body).unwrap());
    }
    for i in 0..n / 4 {
        let body = format!("static self method{i}(int $a, string $b = 'x') Generated method.");
        tags.push(Tag::parse("method", &body).unwrap());
    }
    tags
}

fn generate_docblock(n: usize) -> DocBlock {
    let description = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(n / 4 + 1);
    DocBlock::from_parts(
        Some("Generated docblock.".to_string()),
        description,
        generate_tags(n),
    )
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for size in [10, 100, 1000] {
        let doc = generate_docblock(size);
        group.bench_with_input(BenchmarkId::new("insertion_order", size), &doc, |b, doc| {
            b.iter(|| black_box(doc.render()));
        });

        let sorted = RenderOptions {
            sort_tags: true,
            ..RenderOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("sorted", size), &doc, |b, doc| {
            b.iter(|| black_box(doc.render_with(&sorted)));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for size in [10, 100, 1000] {
        let incoming = generate_tags(size);
        group.bench_with_input(BenchmarkId::new("into_self", size), &incoming, |b, incoming| {
            b.iter(|| {
                let mut tags: TagsCollection = incoming.iter().cloned().collect();
                black_box(tags.merge(incoming.iter().cloned()).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_merge);
criterion_main!(benches);
