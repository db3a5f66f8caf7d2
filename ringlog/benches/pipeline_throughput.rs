use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use ringlog::config::Config;
use ringlog::level::Level;
use ringlog::log_info;
use ringlog::logger::Logger;

fn bench_logging(c: &mut Criterion) {
  let dir = tempfile::tempdir().unwrap();
  let logger = Logger::init(Config::new(dir.path(), "bench").with_level(Level::Info)).unwrap();

  let mut group = c.benchmark_group("logger");
  group.throughput(Throughput::Elements(1));
  group.bench_function("log_info", |b| {
    b.iter(|| log_info!("bench record {}", black_box(42)));
  });
  group.bench_function("log_debug_filtered", |b| {
    b.iter(|| ringlog::log_debug!("filtered record {}", black_box(42)));
  });
  group.finish();

  logger.flush_and_stop();
}

fn bench_clock(c: &mut Criterion) {
  c.bench_function("clock_now", |b| {
    b.iter(|| ringlog::clock::with(|clock| black_box(clock.now())));
  });
}

criterion_group!(benches, bench_logging, bench_clock);
criterion_main!(benches);
