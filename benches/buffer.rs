//! Buffer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use termbuf::{Buffer, CellAttributes};

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");

    let text: String = "The quick brown fox jumps over the lazy dog. ".repeat(50);
    group.throughput(Throughput::Elements(text.chars().count() as u64));

    group.bench_function("write_chars", |b| {
        b.iter(|| {
            let mut buf = Buffer::new(80, 24, CellAttributes::default(), 10_000);
            buf.write(text.chars());
            black_box(buf)
        })
    });

    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");

    group.bench_function("scroll_lines", |b| {
        b.iter(|| {
            let mut buf = Buffer::new(80, 24, CellAttributes::default(), 1_000);
            for i in 0..200 {
                buf.write_str(&format!("Line {}: some text content here", i));
                buf.new_line();
            }
            black_box(buf)
        })
    });

    group.finish();
}

fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");

    group.bench_function("resize_reflow", |b| {
        b.iter(|| {
            let mut buf = Buffer::new(80, 24, CellAttributes::default(), 2_000);
            for i in 0..100 {
                buf.write_str(&format!("{i}: ").repeat(30));
                buf.new_line();
            }
            buf.resize_view(40, 24).unwrap();
            buf.resize_view(120, 24).unwrap();
            black_box(buf)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_write, bench_scroll, bench_reflow);
criterion_main!(benches);
