use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dynbuf::{DynamicBuffer, DynamicBufferOptions};
use std::hint::black_box;

fn bench_write_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_byte");

    for &count in &[1_000usize, 100_000, 1_000_000] {
        group.throughput(Throughput::Bytes(count as u64));

        group.bench_with_input(BenchmarkId::new("dynamic_buffer", count), &count, |b, &n| {
            b.iter(|| {
                let mut buf = DynamicBuffer::new();
                for i in 0..n {
                    buf.write_byte(black_box(i as u8)).unwrap();
                }
                black_box(buf.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_push", count), &count, |b, &n| {
            b.iter(|| {
                let mut vec = Vec::with_capacity(DynamicBuffer::DEFAULT_CAPACITY);
                for i in 0..n {
                    vec.push(black_box(i as u8));
                }
                black_box(vec.len())
            });
        });
    }

    group.finish();
}

fn bench_append_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_text");
    let line = "GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";

    for &factor in &[1.25, 1.5, 2.0, 4.0] {
        group.throughput(Throughput::Bytes((line.len() * 10_000) as u64));
        group.bench_with_input(BenchmarkId::new("growth_factor", factor), &factor, |b, &f| {
            let options = DynamicBufferOptions::new().growth_factor(f);
            b.iter(|| {
                let mut buf = DynamicBuffer::with_options(&options).unwrap();
                for _ in 0..10_000 {
                    buf.append(black_box(line)).unwrap();
                }
                black_box(buf.len())
            });
        });
    }

    group.finish();
}

fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat");
    let chunk = DynamicBuffer::from(vec![0xabu8; 4096]);

    group.throughput(Throughput::Bytes(4096 * 256));
    group.bench_function("concat_buffers", |b| {
        b.iter(|| {
            let mut buf = DynamicBuffer::new();
            for _ in 0..256 {
                buf.concat(black_box(&chunk)).unwrap();
            }
            black_box(buf.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_write_byte, bench_append_text, bench_concat);
criterion_main!(benches);
