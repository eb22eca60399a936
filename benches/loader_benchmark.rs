//! Performance benchmarks for the document loader
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use document_mcp_server::pdf::TextExtractor;
use document_mcp_server::{format_listing, LoaderConfig, PdfLoader, Result};
use std::path::Path;
use std::sync::Arc;

/// Pretends every document has the same fixed set of pages
struct FixedPages(Vec<String>);

impl TextExtractor for FixedPages {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

fn populated_dir(count: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for i in 0..count {
        std::fs::write(dir.path().join(format!("doc-{:05}.pdf", i)), b"%PDF").unwrap();
        std::fs::write(dir.path().join(format!("note-{:05}.txt", i)), b"text").unwrap();
    }
    dir
}

/// Benchmark directory listing as the number of documents grows
fn bench_list_available(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_available");

    for count in [10usize, 100, 1000] {
        let dir = populated_dir(count);
        let loader = PdfLoader::new(LoaderConfig::new(dir.path(), 350));

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &loader, |b, loader| {
            b.iter(|| black_box(loader.list_available()));
        });
    }

    group.finish();
}

/// Benchmark validation plus page joining for documents of increasing length
fn bench_load(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let dir = populated_dir(1);

    let mut group = c.benchmark_group("load");

    for pages in [1usize, 50, 500] {
        let page_texts = vec!["Lorem ipsum dolor sit amet. ".repeat(80); pages];
        let loader = PdfLoader::with_extractor(
            LoaderConfig::new(dir.path(), 350),
            Arc::new(FixedPages(page_texts)),
        );

        group.bench_with_input(BenchmarkId::from_parameter(pages), &loader, |b, loader| {
            b.iter(|| {
                runtime
                    .block_on(loader.load(black_box("doc-00000.pdf")))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_format_listing(c: &mut Criterion) {
    let names: Vec<String> = (0..1000).map(|i| format!("doc-{:05}.pdf", i)).collect();

    c.bench_function("format_listing_1000", |b| {
        b.iter(|| format_listing(black_box(&names)));
    });
}

criterion_group!(benches, bench_list_available, bench_load, bench_format_listing);

criterion_main!(benches);
