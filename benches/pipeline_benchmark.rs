//! Benchmarks for unscan pipeline stages.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic pages with drawn boxes and a fixed
//! in-process recognizer, so only the crate's own work is measured.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use unscan::recognize::from_fn;
use unscan::render::render_table;
use unscan::{
    parse_table, ConvertOptions, Converter, Page, RecognizedText, RegionDetector, SubstitutionMode,
    TableFormat,
};

/// Creates a white page with a table box and a figure box.
fn create_test_page(width: u32, height: u32) -> Page {
    let mut image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let black = Rgb([0, 0, 0]);
    draw_hollow_rect_mut(&mut image, Rect::at(40, 40).of_size(width / 2, 160), black);
    draw_hollow_rect_mut(
        &mut image,
        Rect::at(40, height as i32 / 2).of_size(width - 80, 120),
        black,
    );
    Page::new(image)
}

fn table_text(rows: usize) -> String {
    let mut text = String::from("Item Qty Price\n");
    for i in 0..rows {
        text.push_str(&format!("item{} {} {}.50\n", i, i % 9, i * 3));
    }
    text
}

/// Benchmark region detection at various page sizes.
fn bench_region_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_detection");
    let detector = RegionDetector::new();

    for (width, height) in [(640, 480), (1240, 1754)].iter() {
        let page = create_test_page(*width, *height);

        group.bench_function(format!("tables_{}x{}", width, height), |b| {
            b.iter(|| detector.detect_tables(black_box(&page)));
        });
        group.bench_function(format!("suppress_{}x{}", width, height), |b| {
            b.iter(|| detector.suppress(black_box(&page)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark table parsing and rendering.
fn bench_table(c: &mut Criterion) {
    let text = RecognizedText::new(table_text(200));
    let table = parse_table(&text);

    c.bench_function("parse_table_200_rows", |b| {
        b.iter(|| parse_table(black_box(&text)));
    });

    c.bench_function("render_table_200_rows", |b| {
        b.iter(|| render_table(black_box(&table), TableFormat::Markdown));
    });
}

/// Benchmark both substitution strategies on the same body.
fn bench_substitution(c: &mut Criterion) {
    let body = "Results Summary\nThe results below summarize the quarter.\n".repeat(200);
    let matches = vec!["Results".to_string(), "Summary".to_string()];
    let replacements = vec!["# Results <br>".to_string(), "# Summary <br>".to_string()];

    for mode in [SubstitutionMode::Token, SubstitutionMode::Substring] {
        c.bench_function(&format!("substitute_{}", mode.strategy().name()), |b| {
            b.iter(|| mode.apply(black_box(&body), &matches, &replacements).unwrap());
        });
    }
}

/// Benchmark a full conversion with a fixed recognizer.
fn bench_convert(c: &mut Criterion) {
    let page = create_test_page(1240, 1754);
    let text = table_text(20);
    let recognizer = Arc::new(from_fn("fixed", move |_: &Page| Ok(text.clone())));

    let mut group = c.benchmark_group("convert");
    for (name, options) in [
        ("parallel", ConvertOptions::new()),
        ("sequential", ConvertOptions::new().sequential()),
    ] {
        let converter = Converter::new(recognizer.clone(), options).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| converter.convert(black_box(&page)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_region_detection,
    bench_table,
    bench_substitution,
    bench_convert,
);
criterion_main!(benches);
