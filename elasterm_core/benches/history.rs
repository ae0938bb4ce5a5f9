//! Benchmarks for hot-path terminal input processing.
//!
//! Models realistic pty workloads: bulk ASCII output (`cat`, compiler
//! logs), escape-dense streams (`ls --color`, TUI redraws), scroll-heavy
//! output, and elastic-tab column recomputation. Buffer sizes match what a
//! pty read typically hands over.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use elasterm_core::{History, MonospaceWidths, Settings, VoidListener};

/// Pty read sizes that represent real usage.
const CHUNK_SIZES: [usize; 2] = [512, 4096];

fn fresh_history() -> History<VoidListener> {
    History::new(&Settings::default(), VoidListener)
}

/// Simulate `cat large_file.txt`: printable ASCII with newlines, the most
/// common workload by far.
fn ascii_stream(len: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(len);
    for i in 0..len {
        if i % 70 == 69 {
            bytes.push(b'\n');
        } else {
            bytes.push(b'a' + (i % 26) as u8);
        }
    }
    bytes
}

/// Simulate colored tool output: short styled fragments with frequent SGR
/// changes and cursor motion, the worst case for the CSI parser.
fn escape_dense_stream(len: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(len);
    let mut color = 0;
    while bytes.len() < len {
        bytes.extend_from_slice(format!("\x1b[3{color}mword\x1b[0m ").as_bytes());
        color = (color + 1) % 8;
        if bytes.len() % 400 < 20 {
            bytes.extend_from_slice(b"\r\n");
        }
    }
    bytes
}

/// Tab-separated table output inside an elastic group.
fn tabular_stream(rows: usize) -> Vec<u8> {
    let mut bytes = b"\x1b[?5001h".to_vec();
    for row in 0..rows {
        bytes.extend_from_slice(format!("name{row}\t{}\tdone\n", row * 37).as_bytes());
    }
    bytes.extend_from_slice(b"\x1b[?5001l");
    bytes
}

fn bench_ascii_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_input_ascii");
    for chunk_size in CHUNK_SIZES {
        let stream = ascii_stream(64 * 1024);
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut history = fresh_history();
                    for chunk in stream.chunks(chunk_size) {
                        black_box(history.add_input(black_box(chunk)));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_escape_dense(c: &mut Criterion) {
    c.bench_function("add_input_escape_dense", |b| {
        let stream = escape_dense_stream(64 * 1024);
        b.iter(|| {
            let mut history = fresh_history();
            black_box(history.add_input(black_box(&stream)));
        });
    });
}

fn bench_scrolling(c: &mut Criterion) {
    c.bench_function("add_input_scroll_through_ring", |b| {
        // Enough newlines to wrap the ring and exercise slot recycling.
        let stream = vec![b'\n'; 16 * 1024];
        b.iter(|| {
            let mut history = History::with_capacity(&Settings::default(), 1000, VoidListener);
            black_box(history.add_input(black_box(&stream)));
        });
    });
}

fn bench_elastic_recompute(c: &mut Criterion) {
    c.bench_function("recompute_tab_columns_500_rows", |b| {
        let stream = tabular_stream(500);
        let metrics = MonospaceWidths { cell_width: 9 };
        b.iter(|| {
            let mut history = fresh_history();
            history.add_input(&stream);
            let id = history
                .line(0)
                .tab_group()
                .expect("table lines form a group");
            history.recompute_tab_columns(id, &metrics);
            black_box(history.tab_group(id).map(|g| g.column_widths.len()));
        });
    });
}

criterion_group!(
    benches,
    bench_ascii_throughput,
    bench_escape_dense,
    bench_scrolling,
    bench_elastic_recompute
);
criterion_main!(benches);
