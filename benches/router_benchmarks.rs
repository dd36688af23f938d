//! Criterion benchmarks for rust_log_router

use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_router::prelude::*;
use rust_log_router::BoxError;
use std::sync::Arc;
use std::time::Duration;

/// Backend that discards everything it receives
struct DiscardClient;

impl BackendClient for DiscardClient {
    fn log(&self, doc: Document, ts: Option<DateTime<Utc>>) -> std::result::Result<(), BoxError> {
        black_box((doc, ts));
        Ok(())
    }

    fn flush(&self) -> std::result::Result<(), BoxError> {
        Ok(())
    }
}

fn discard_sink(minimum: Severity) -> Arc<dyn Sink> {
    Arc::new(PayloadSink::new(Arc::new(DiscardClient), minimum))
}

// ============================================================================
// Severity Benchmarks
// ============================================================================

fn bench_severity_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("severity_parse");
    group.throughput(Throughput::Elements(1));

    group.bench_function("canonical", |b| {
        b.iter(|| black_box("warn").parse::<Severity>());
    });

    group.bench_function("mixed_case", |b| {
        b.iter(|| black_box("Warn").parse::<Severity>());
    });

    group.bench_function("unrecognized", |b| {
        b.iter(|| black_box("verbose").parse::<Severity>());
    });

    group.finish();
}

fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate");
    group.throughput(Throughput::Elements(1));

    let gate = SeverityGate::at(Severity::Warn);

    group.bench_function("load", |b| {
        b.iter(|| black_box(gate.load()));
    });

    group.bench_function("enabled", |b| {
        b.iter(|| black_box(gate.enabled(black_box(Severity::Debug))));
    });

    group.bench_function("store", |b| {
        b.iter(|| gate.store(black_box(Severity::Warn)));
    });

    group.finish();
}

// ============================================================================
// Routing Benchmarks
// ============================================================================

fn bench_tee_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("tee_write");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(Arc::new(Tee::new(vec![
        discard_sink(Severity::Warn),
        discard_sink(Severity::Debug),
    ])));
    let fields = [
        Field::string("component", "billing"),
        Field::i64("attempt", 3),
        Field::duration("elapsed", Duration::from_micros(1500)),
        Field::bool("retry", true),
    ];

    group.bench_function("rejected", |b| {
        let quiet = Logger::new(discard_sink(Severity::Error));
        b.iter(|| quiet.debug(black_box("filtered out"), &fields));
    });

    group.bench_function("one_member", |b| {
        b.iter(|| logger.info(black_box("order placed"), &fields));
    });

    group.bench_function("both_members", |b| {
        b.iter(|| logger.error(black_box("order failed"), &fields));
    });

    group.finish();
}

fn bench_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("context");
    group.throughput(Throughput::Elements(1));

    let sink = discard_sink(Severity::Debug);
    let context = [Field::string("request_id", "f3a9"), Field::u32("shard", 7)];

    group.bench_function("with", |b| {
        b.iter(|| black_box(sink.with(&context)));
    });

    let client = Arc::new(DiscardClient);
    let payload = PayloadSink::new(client, Severity::Debug);
    let entry = Entry::new(Severity::Info, "built").with_logger_name("bench");

    group.bench_function("document", |b| {
        b.iter(|| black_box(payload.document(&entry, &context)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_severity_parse,
    bench_gate,
    bench_tee_write,
    bench_context,
);
criterion_main!(benches);
