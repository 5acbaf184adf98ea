//! ML-KEM-1024 benchmarks using the Criterion framework.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use krater_core::Kem;
use krater_ml_kem::MlKem1024;
use rand::rng;

/// Benchmark key generation.
fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM-1024");
    group.throughput(Throughput::Elements(1));

    group.bench_function("KeyGen", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(MlKem1024::keygen(&mut rng).unwrap())
        })
    });

    group.finish();
}

/// Benchmark encapsulation against a fixed key.
fn bench_encaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM-1024");
    group.throughput(Throughput::Elements(1));

    let (_, ek) = MlKem1024::keygen(&mut rng()).unwrap();

    group.bench_function("Encaps", |b| {
        b.iter(|| {
            let mut thread_rng = rng();
            black_box(MlKem1024::encaps(&ek, &mut thread_rng).unwrap())
        })
    });

    group.finish();
}

/// Benchmark decapsulation against a fixed key and ciphertext.
fn bench_decaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM-1024");
    group.throughput(Throughput::Elements(1));

    let mut rng = rng();
    let (dk, ek) = MlKem1024::keygen(&mut rng).unwrap();
    let (ct, _) = MlKem1024::encaps(&ek, &mut rng).unwrap();

    group.bench_function("Decaps", |b| {
        b.iter(|| black_box(MlKem1024::decaps(&dk, &ct).unwrap()))
    });

    group.finish();
}

/// Benchmark the complete keygen + encaps + decaps roundtrip.
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM-1024");
    group.throughput(Throughput::Elements(1));

    group.bench_function("Roundtrip", |b| {
        b.iter(|| {
            let mut rng = rng();
            let (dk, ek) = MlKem1024::keygen(&mut rng).unwrap();
            let (ct, _ss_sender) = MlKem1024::encaps(&ek, &mut rng).unwrap();
            black_box(MlKem1024::decaps(&dk, &ct).unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_keygen, bench_encaps, bench_decaps, bench_roundtrip);
criterion_main!(benches);
