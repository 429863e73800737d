// benches/render_bench.rs
//! Benchmarks for parsing and rendering block trees of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion2jira::{parse_document, render_markdown, render_rich_document};
use serde_json::{json, Value};

fn raw_block(id: String, kind: &str, text: &str, children: Vec<Value>) -> Value {
    let mut raw = json!({
        "id": id,
        "type": kind,
        "created_time": "2024-05-14T08:15:00Z",
        "last_edited_time": "2024-05-14T08:15:00Z",
        "has_children": !children.is_empty(),
        "children": children
    });
    raw[kind] = json!({
        "rich_text": [{"plain_text": text, "href": format!("https://example.com/{}", text.len())}],
        "checked": false
    });
    raw
}

/// A tree `depth` levels deep with `breadth` children per block, alternating
/// paragraphs, checklist items and bullets.
fn create_sample_tree(depth: usize, breadth: usize) -> Vec<Value> {
    fn build(level: usize, index: usize, depth: usize, breadth: usize) -> Value {
        let children = if level < depth {
            (0..breadth)
                .map(|i| build(level + 1, i, depth, breadth))
                .collect()
        } else {
            Vec::new()
        };
        let kind = match level % 3 {
            0 => "paragraph",
            1 => "to_do",
            _ => "bulleted_list_item",
        };
        let text = format!("Block {} at level {}", index, level);
        raw_block(format!("block-{}-{}", level, index), kind, &text, children)
    }
    (0..breadth).map(|i| build(0, i, depth, breadth)).collect()
}

fn sample_page() -> Value {
    json!({
        "id": "bench-page",
        "created_time": "2024-05-14T08:15:00Z",
        "last_edited_time": "2024-05-20T17:42:00Z",
        "url": "https://www.notion.so/bench-page",
        "properties": {}
    })
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");
    let page = sample_page();

    for (depth, breadth) in [(2, 5), (3, 5), (4, 4)] {
        let blocks = create_sample_tree(depth, breadth);
        group.bench_with_input(
            BenchmarkId::new("tree", format!("{}x{}", depth, breadth)),
            &blocks,
            |b, blocks| b.iter(|| parse_document(black_box(&page), black_box(blocks))),
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let page = sample_page();

    for (depth, breadth) in [(2, 5), (3, 5), (4, 4)] {
        let blocks = create_sample_tree(depth, breadth);
        let Ok(doc) = parse_document(&page, &blocks) else {
            continue;
        };
        let label = format!("{}x{}", depth, breadth);
        group.bench_with_input(BenchmarkId::new("markdown", &label), &doc, |b, doc| {
            b.iter(|| render_markdown(black_box(doc)))
        });
        group.bench_with_input(BenchmarkId::new("rich_document", &label), &doc, |b, doc| {
            b.iter(|| render_rich_document(black_box(doc)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
