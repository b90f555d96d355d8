use criterion::{Criterion, criterion_group, criterion_main};
use curvefun::Curve;
use num_bigint::BigInt;

fn scalar_mul_basepoint(c: &mut Criterion) {
    let curve = Curve::secp256k1();
    let k = BigInt::parse_bytes(
        b"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        16,
    )
    .unwrap();

    c.bench_function("scalar_mul_basepoint", |b| {
        b.iter(|| curve.mul(&k, &curve.g).unwrap())
    });
}

criterion_group!(benches, scalar_mul_basepoint);
criterion_main!(benches);
