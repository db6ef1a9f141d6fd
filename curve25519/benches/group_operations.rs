use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve25519::{basepoint, basepoint_table, RistrettoPoint, Scalar};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_group_ops(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let s = Scalar::random(&mut rng);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);
    let point = RistrettoPoint::mul_base(&s);

    c.bench_function("basepoint_table_mul", |bench| {
        bench.iter(|| basepoint_table().mul(black_box(&s)))
    });

    c.bench_function("point_double", |bench| {
        bench.iter(|| black_box(basepoint()).double())
    });

    c.bench_function("vartime_double_scalar_mul_basepoint", |bench| {
        bench.iter(|| {
            RistrettoPoint::vartime_double_scalar_mul_basepoint(
                black_box(&a),
                black_box(&point),
                black_box(&b),
            )
        })
    });

    c.bench_function("ristretto_compress", |bench| {
        bench.iter(|| black_box(&point).compress())
    });

    let compressed = point.compress();
    c.bench_function("ristretto_decompress", |bench| {
        bench.iter(|| black_box(&compressed).decompress())
    });
}

criterion_group!(benches, bench_group_ops);
criterion_main!(benches);
