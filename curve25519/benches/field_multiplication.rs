use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve25519::FieldElement;

fn bench_field_ops(c: &mut Criterion) {
    let a_bytes: [u8; 32] = {
        let mut bytes = [0x57u8; 32];
        bytes[31] &= 0x7f;
        bytes
    };
    let b_bytes: [u8; 32] = {
        let mut bytes = [0xa3u8; 32];
        bytes[31] &= 0x7f;
        bytes
    };
    let a = FieldElement::from_bytes(&a_bytes);
    let b = FieldElement::from_bytes(&b_bytes);

    c.bench_function("field_mul", |bench| {
        bench.iter(|| black_box(&a) * black_box(&b))
    });

    c.bench_function("field_square", |bench| bench.iter(|| black_box(&a).square()));

    c.bench_function("field_invert", |bench| bench.iter(|| black_box(&a).invert()));
}

criterion_group!(benches, bench_field_ops);
criterion_main!(benches);
