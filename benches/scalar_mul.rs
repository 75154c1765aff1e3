use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use nebula_ecc::curves::{self, CurveId};

fn bench_scalar_mul(c: &mut Criterion) {
    let p256 = curves::weierstrass(CurveId::P256).unwrap();
    let k256 = curves::weierstrass(CurveId::Secp256k1).unwrap();
    let ed = curves::edwards(CurveId::Ed25519).unwrap();
    let x = curves::montgomery(CurveId::X25519).unwrap();

    let kb = [0x5au8; 32];
    let k = p256.scalar_field().import_reduce_be(&kb);
    let g = p256.generator();
    c.bench_function("p256 mul", |b| {
        b.iter(|| black_box(p256.mul(black_box(&g), black_box(&k))))
    });
    c.bench_function("p256 mul_g", |b| {
        b.iter(|| black_box(p256.mul_g(black_box(&k))))
    });

    let kk = k256.scalar_field().import_reduce_be(&kb);
    let gk = k256.generator();
    c.bench_function("secp256k1 mul (glv)", |b| {
        b.iter(|| black_box(k256.mul(black_box(&gk), black_box(&kk))))
    });

    let ke = ed.scalar_field().import_reduce_be(&kb);
    let ge = ed.generator();
    c.bench_function("ed25519 mul", |b| {
        b.iter(|| black_box(ed.mul(black_box(&ge), black_box(&ke))))
    });
    c.bench_function("ed25519 mul_g", |b| {
        b.iter(|| black_box(ed.mul_g(black_box(&ke))))
    });

    let mut clamped = kb;
    clamped[0] &= 248;
    clamped[31] = (clamped[31] & 127) | 64;
    let gu = x.generator_u();
    c.bench_function("x25519 ladder", |b| {
        b.iter(|| black_box(x.ladder(black_box(&gu), black_box(&clamped))))
    });
}

criterion_group!(benches, bench_scalar_mul);
criterion_main!(benches);
