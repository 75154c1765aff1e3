use nebula_ecc::curves::{self, CurveId};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Every 2-field-size input maps to a valid non-identity point.
#[test]
fn weierstrass_from_hash_validity() {
    let mut rng = StdRng::seed_from_u64(60);
    for id in [
        CurveId::P192,
        CurveId::P224,
        CurveId::P256,
        CurveId::P384,
        CurveId::P521,
        CurveId::Secp256k1,
    ] {
        let curve = curves::weierstrass(id).unwrap();
        let fs = curve.field().size();
        for _ in 0..8 {
            let mut bytes = vec![0u8; 2 * fs];
            rng.fill_bytes(&mut bytes);
            let p = curve.point_from_hash(&bytes).expect("map must land on the curve");
            assert!(curve.wge_validate(&p), "{id:?}: mapped point must be on-curve");
        }
    }
}

/// `point_from_hash(point_to_hash(P))` returns `P` whenever encoding
/// succeeds.
#[test]
fn weierstrass_hash_roundtrip() {
    let mut rng = StdRng::seed_from_u64(61);
    for id in [CurveId::P256, CurveId::Secp256k1, CurveId::P384] {
        let curve = curves::weierstrass(id).unwrap();
        let fs = curve.field().size();
        for _ in 0..4 {
            let mut kb = vec![0u8; curve.scalar_field().size()];
            rng.fill_bytes(&mut kb);
            let k = curve.scalar_field().import_reduce_be(&kb);
            let p = curve.jge_to_wge(&curve.mul(&curve.generator(), &k));
            let mut entropy = [0u8; 32];
            rng.fill_bytes(&mut entropy);
            let mut out = vec![0u8; 2 * fs];
            assert!(
                curve.point_to_hash(&p, &entropy, &mut out),
                "{id:?}: encoding should succeed for random points"
            );
            let back = curve.point_from_hash(&out).unwrap();
            assert!(curve.wge_equal(&back, &p), "{id:?}: hash round trip");
        }
    }
}

#[test]
fn edwards_from_hash_validity() {
    let mut rng = StdRng::seed_from_u64(62);
    for id in [CurveId::Ed25519, CurveId::Ed448, CurveId::Ed1174] {
        let ed = curves::edwards(id).unwrap();
        let fs = ed.field().size();
        for _ in 0..8 {
            let mut bytes = vec![0u8; 2 * fs];
            rng.fill_bytes(&mut bytes);
            if let Some(p) = ed.point_from_hash(&bytes) {
                assert!(ed.xge_validate(&p), "{id:?}: mapped point must be valid");
            }
        }
    }
}

#[test]
fn edwards_hash_roundtrip() {
    let mut rng = StdRng::seed_from_u64(63);
    for id in [CurveId::Ed25519, CurveId::Ed448, CurveId::Ed1174] {
        let ed = curves::edwards(id).unwrap();
        let fs = ed.field().size();
        for _ in 0..3 {
            let mut kb = vec![0u8; ed.scalar_field().size()];
            rng.fill_bytes(&mut kb);
            let k = ed.scalar_field().import_reduce_be(&kb);
            let p = ed.mul(&ed.generator(), &k);
            let mut entropy = [0u8; 32];
            rng.fill_bytes(&mut entropy);
            let mut out = vec![0u8; 2 * fs];
            assert!(
                ed.point_to_hash(&p, &entropy, &mut out),
                "{id:?}: encoding should succeed for subgroup points"
            );
            let back = ed.point_from_hash(&out).unwrap();
            assert!(ed.xge_equal(&back, &p), "{id:?}: hash round trip");
        }
    }
}

/// The uniform map is deterministic and its inverse finds preimages
/// for roughly half of all hints.
#[test]
fn uniform_map_inverse() {
    let mut rng = StdRng::seed_from_u64(64);
    let curve = curves::weierstrass(CurveId::P256).unwrap();
    let fs = curve.field().size();
    let mut hits = 0;
    let total = 20;
    for _ in 0..total {
        let mut b = vec![0u8; fs];
        rng.fill_bytes(&mut b);
        let u = curve.field().from_bytes_be_reduce(&b).unwrap();
        let p = curve.point_from_uniform(&u);
        assert!(curve.wge_validate(&p));
        for hint in 0..4 {
            if let Some(u2) = curve.point_to_uniform(&p, hint) {
                let q = curve.point_from_uniform(&u2);
                assert!(curve.wge_equal(&q, &p), "preimage must map back");
                hits += 1;
                break;
            }
        }
    }
    assert!(hits >= total / 2, "inversion should succeed for most points, got {hits}");
}
