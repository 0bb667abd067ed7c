//! Diff pipeline benchmark: text diffing, wrapping and frame presentation.
//!
//! Target: a compare of two 2 KB texts well under one frame (16ms).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use diffbench::diff::{colorize, compute_diff, compute_diff_with, wrap, wrap_styled, Theme};
use diffbench::terminal::{OutputBuffer, Screen};
use diffbench::{Buffer, Cell, Granularity, Rgb};

/// Deterministic prose of roughly `words` words.
fn create_text(words: usize, seed: usize) -> String {
    const VOCAB: [&str; 12] = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "while", "terminal",
        "diff", "renders",
    ];
    (0..words)
        .map(|i| VOCAB[(i * 7 + seed) % VOCAB.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// `text` with every `every`-th word replaced.
fn mutate(text: &str, every: usize) -> String {
    text.split(' ')
        .enumerate()
        .map(|(i, w)| if i % every == 0 { "CHANGED" } else { w })
        .collect::<Vec<_>>()
        .join(" ")
}

fn diff_identical(c: &mut Criterion) {
    let text = create_text(400, 0);

    c.bench_function("diff_2kb_identical", |b| {
        b.iter(|| compute_diff(black_box(&text), black_box(&text)));
    });
}

fn diff_sparse_changes(c: &mut Criterion) {
    let old = create_text(400, 0);
    let new = mutate(&old, 25);

    c.bench_function("diff_2kb_sparse_changes", |b| {
        b.iter(|| compute_diff(black_box(&old), black_box(&new)));
    });
}

fn diff_by_granularity(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_granularity");
    let old = create_text(400, 0);
    let new = mutate(&old, 5);

    for granularity in [Granularity::Char, Granularity::Word, Granularity::Line] {
        group.bench_with_input(
            BenchmarkId::new("dense_changes", format!("{granularity:?}")),
            &granularity,
            |b, &granularity| {
                b.iter(|| compute_diff_with(black_box(&old), black_box(&new), granularity));
            },
        );
    }

    group.finish();
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for words in [50, 200, 800, 3200] {
        let old = create_text(words, 0);
        let new = create_text(words, 3);

        group.bench_with_input(
            BenchmarkId::new("unrelated", words),
            &(old, new),
            |b, (old, new)| {
                b.iter(|| compute_diff(black_box(old), black_box(new)));
            },
        );
    }

    group.finish();
}

fn colorize_and_wrap(c: &mut Criterion) {
    let old = create_text(400, 0);
    let new = mutate(&old, 10);
    let styled = colorize(&compute_diff(&old, &new), &Theme::default());
    let plain = styled.plain();

    c.bench_function("wrap_plain_80", |b| {
        b.iter(|| wrap(black_box(&plain), 80));
    });
    c.bench_function("wrap_styled_80", |b| {
        b.iter(|| wrap_styled(black_box(&styled), 80));
    });
}

fn create_frame(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let c = char::from(b'A' + u8::try_from((x + y + seed) % 26).unwrap_or(0));
            let cell = Cell::new(c).with_fg(Rgb::new(
                u8::try_from((x * 3 + seed) % 256).unwrap_or(0),
                u8::try_from((y * 7 + seed) % 256).unwrap_or(0),
                128,
            ));
            buffer.set(x, y, cell);
        }
    }
    buffer
}

fn present_frames(c: &mut Criterion) {
    let first = create_frame(200, 50, 0);
    let mut single = first.clone();
    single.set(100, 25, Cell::new('X').with_fg(Rgb::RED));
    let full = create_frame(200, 50, 1);

    for (name, next) in [
        ("present_200x50_single_change", &single),
        ("present_200x50_full_change", &full),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut screen = Screen::new(200, 50);
                let mut out = OutputBuffer::with_capacity(65536);
                screen.present(&first, None, &mut out);
                out.clear();
                screen.present(black_box(next), None, &mut out)
            });
        });
    }
}

criterion_group!(
    benches,
    diff_identical,
    diff_sparse_changes,
    diff_by_granularity,
    diff_various_sizes,
    colorize_and_wrap,
    present_frames,
);
criterion_main!(benches);
