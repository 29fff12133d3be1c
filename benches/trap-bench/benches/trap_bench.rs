//! Base-fee trap benchmarks.
//!
//! Measures:
//! - Decision rule throughput over decoded samples
//! - `should_respond` throughput including decoding
//! - Operator-style replay over a block series

use {
    basefee_trap::{
        decide, BaseFeeTrap, Payload, Sample, SampleLayout, SequenceFeeSource, Trap, TrapConfig,
    },
    basefee_trap_bench::helpers::make_fee_series,
    criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput},
    std::hint::black_box,
};

// ---------------------------------------------------------------------------
// Decision rule
// ---------------------------------------------------------------------------

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("trap/decide");
    let config = TrapConfig::default();
    group.throughput(Throughput::Elements(1));

    let spike = [Sample::new(23_000_000_000), Sample::new(20_150_000_000)];
    let stable = [Sample::new(20_100_000_000), Sample::new(20_000_000_000)];
    let zero = [Sample::new(1), Sample::new(0)];

    group.bench_function("spike", |b| b.iter(|| decide(black_box(&spike), &config)));
    group.bench_function("stable", |b| b.iter(|| decide(black_box(&stable), &config)));
    group.bench_function("zero_baseline", |b| {
        b.iter(|| decide(black_box(&zero), &config))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Decode + decide
// ---------------------------------------------------------------------------

fn bench_should_respond(c: &mut Criterion) {
    let mut group = c.benchmark_group("trap/should_respond");
    group.throughput(Throughput::Elements(1));

    for layout in [SampleLayout::Value, SampleLayout::ValueWithThreshold] {
        let config = TrapConfig {
            layout,
            ..Default::default()
        };
        let trap = BaseFeeTrap::new(SequenceFeeSource::default(), config).unwrap();
        let data = match layout {
            SampleLayout::Value => vec![
                Sample::new(23_000_000_000).encode(),
                Sample::new(20_150_000_000).encode(),
            ],
            SampleLayout::ValueWithThreshold => vec![
                Sample::with_threshold(23_000_000_000, 2).encode(),
                Sample::with_threshold(20_150_000_000, 2).encode(),
            ],
        };
        group.bench_function(layout.to_string(), |b| {
            b.iter(|| trap.should_respond(black_box(&data)).unwrap())
        });
    }

    let spike_payload = decide(
        &[Sample::new(23_000_000_000), Sample::new(20_150_000_000)],
        &TrapConfig::default(),
    )
    .payload
    .to_bytes();
    group.bench_function("classify_spike_payload", |b| {
        b.iter(|| Payload::classify(black_box(&spike_payload)).unwrap())
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("trap/replay");

    for &n_blocks in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n_blocks as u64));
        group.bench_with_input(BenchmarkId::new("blocks", n_blocks), &n_blocks, |b, &n| {
            let fees = make_fee_series(n);
            b.iter(|| {
                let trap =
                    BaseFeeTrap::new(SequenceFeeSource::new(fees.clone()), TrapConfig::default())
                        .unwrap();
                let mut buffer: Vec<Vec<u8>> = Vec::with_capacity(2);
                let mut spikes = 0usize;
                for _ in 0..n {
                    buffer.insert(0, trap.collect().unwrap());
                    buffer.truncate(2);
                    if trap.should_respond(&buffer).unwrap().0 {
                        spikes += 1;
                    }
                }
                spikes
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decide, bench_should_respond, bench_replay);
criterion_main!(benches);
