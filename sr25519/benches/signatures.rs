use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sr25519::{Keypair, SigningContext};

fn bench_signatures(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keypair = Keypair::generate(&mut rng);
    let ctx = SigningContext::new(b"benchmark");
    let message = [0x5au8; 256];

    c.bench_function("sign", |bench| {
        bench.iter(|| keypair.sign_with_rng(ctx.bytes(black_box(&message)), &mut rng))
    });

    let signature = keypair.sign_with_rng(ctx.bytes(&message), &mut rng);
    c.bench_function("verify", |bench| {
        bench.iter(|| keypair.verify(ctx.bytes(black_box(&message)), &signature))
    });

    c.bench_function("keypair_generate", |bench| {
        bench.iter(|| Keypair::generate(&mut rng))
    });
}

criterion_group!(benches, bench_signatures);
criterion_main!(benches);
