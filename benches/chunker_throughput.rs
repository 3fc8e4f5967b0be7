//! Throughput of a full pass over a generated oplog.
//!
//! # Benchmarks
//!
//! - `scan`: records per second through the chunker at several window sizes
//! - `scan_filtered`: the same pass with a namespace + opcode filter applied
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench chunker_throughput
//! ```

use std::hint::black_box;
use std::io::Write;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oplog_core::{Chunker, NamespaceCriteria, ScanOptions};
use tempfile::NamedTempFile;

const RECORDS: usize = 50_000;

fn generate_oplog() -> NamedTempFile {
    let namespaces = ["app.users", "app.orders", "app.sessions", "billing.invoices"];
    let ops = ["i", "u", "d"];
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..RECORDS {
        writeln!(
            file,
            r#"{{"ts":{i},"h":{},"v":2,"op":"{}","ns":"{}","o":{{"_id":{i},"payload":"record number {i}"}}}}"#,
            i * 7919,
            ops[i % ops.len()],
            namespaces[i % namespaces.len()],
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn bench_scan(c: &mut Criterion) {
    let file = generate_oplog();
    let len = file.as_file().metadata().unwrap().len();

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(len));
    for window_size in [64 * 1024, 1024 * 1024, 8 * 1024 * 1024] {
        group.bench_with_input(
            BenchmarkId::from_parameter(window_size),
            &window_size,
            |b, &window_size| {
                b.iter(|| {
                    let options = ScanOptions::builder().window_size(window_size).build();
                    let chunker = Chunker::open(file.path(), options).unwrap();
                    black_box(chunker.filter_map(Result::ok).count())
                });
            },
        );
    }
    group.finish();
}

fn bench_scan_filtered(c: &mut Criterion) {
    let file = generate_oplog();
    let len = file.as_file().metadata().unwrap().len();

    let mut group = c.benchmark_group("scan_filtered");
    group.throughput(Throughput::Bytes(len));
    group.bench_function("app.orders.update", |b| {
        b.iter(|| {
            let chunker = Chunker::open(file.path(), ScanOptions::default()).unwrap();
            let criteria = NamespaceCriteria::new("app.orders.update", false);
            black_box(chunker.filter_with(criteria).filter_map(Result::ok).count())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_scan, bench_scan_filtered);
criterion_main!(benches);
