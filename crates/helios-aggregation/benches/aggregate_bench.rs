//! Criterion benchmarks for helios-aggregation.
//!
//! Targets:
//! - 4 detectors, scalar predictions < 0.005ms
//! - 64 detectors with feature explanations < 0.1ms

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use helios_aggregation::Aggregator;
use helios_core::models::{DetectorId, DetectorVerdict, Explanation};

fn verdicts(n: usize) -> (Vec<DetectorVerdict>, BTreeMap<DetectorId, f64>) {
    let mut weights = BTreeMap::new();
    let verdicts = (0..n)
        .map(|i| {
            let id = DetectorId::new(format!("detector_{i:03}"));
            weights.insert(id.clone(), 0.1 + (i % 20) as f64 * 0.095);
            DetectorVerdict {
                detector_id: id,
                prediction: (i as f64 * 0.37) % 1.0,
                explanation: Explanation::features([
                    ("depth", i as f64 * 1e-4),
                    ("snr", 5.0 + i as f64),
                    ("duration_h", 3.0),
                ]),
                latency_ms: 0,
            }
        })
        .collect();
    (verdicts, weights)
}

fn bench_aggregate(c: &mut Criterion) {
    let aggregator = Aggregator::default();
    let predictions: BTreeMap<DetectorId, f64> = [
        ("transit", 0.9),
        ("radial_velocity", 0.3),
        ("orbital_dynamics", 0.5),
        ("habitable_zone", 0.7),
    ]
    .into_iter()
    .map(|(k, v)| (DetectorId::from(k), v))
    .collect();
    let weights: BTreeMap<DetectorId, f64> = predictions.keys().map(|k| (k.clone(), 1.0)).collect();

    c.bench_function("aggregate_4_scalar", |b| {
        b.iter(|| aggregator.aggregate(black_box(&predictions), black_box(&weights)))
    });

    let mut group = c.benchmark_group("aggregate_verdicts");
    for n in [4usize, 16, 64] {
        let (verdicts, weights) = verdicts(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| aggregator.aggregate_verdicts(black_box(&verdicts), black_box(&weights)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
