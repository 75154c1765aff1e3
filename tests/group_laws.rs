use nebula_ecc::curves::{self, CurveId};
use nebula_ecc::group::weierstrass::Curve;
use nebula_ecc::scalar::Sc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

const WEI_IDS: [CurveId; 6] = [
    CurveId::P192,
    CurveId::P224,
    CurveId::P256,
    CurveId::P384,
    CurveId::P521,
    CurveId::Secp256k1,
];

const ED_IDS: [CurveId; 3] = [CurveId::Ed25519, CurveId::Ed448, CurveId::Ed1174];

fn random_scalar(curve: &Curve, rng: &mut StdRng) -> Sc {
    let mut b = vec![0u8; curve.scalar_field().size()];
    rng.fill_bytes(&mut b);
    curve.scalar_field().import_reduce_be(&b)
}

#[test]
fn weierstrass_group_laws() {
    let mut rng = StdRng::seed_from_u64(42);
    for id in WEI_IDS {
        let curve = curves::weierstrass(id).unwrap();
        let g = curve.generator();
        assert!(curve.wge_validate(&g), "generator must lie on the curve");

        let k1 = random_scalar(&curve, &mut rng);
        let k2 = random_scalar(&curve, &mut rng);
        let p = curve.jge_to_wge(&curve.mul(&g, &k1));
        let q = curve.jge_to_wge(&curve.mul(&g, &k2));
        assert!(curve.wge_validate(&p));

        // P + O = P
        let jp = curve.wge_to_jge(&p);
        let sum = curve.jge_add(&jp, &curve.jge_zero());
        assert!(curve.wge_equal(&curve.jge_to_wge(&sum), &p), "P + O must be P");

        // P + (-P) = O
        let neg = curve.wge_to_jge(&curve.wge_neg(&p));
        assert!(curve.jge_is_zero(&curve.jge_add(&jp, &neg)), "P + (-P) must vanish");

        // commutativity
        let jq = curve.wge_to_jge(&q);
        let pq = curve.jge_to_wge(&curve.jge_add(&jp, &jq));
        let qp = curve.jge_to_wge(&curve.jge_add(&jq, &jp));
        assert!(curve.wge_equal(&pq, &qp), "addition must commute");

        // unified addition handles doubling
        let dbl = curve.jge_to_wge(&curve.jge_dbl(&jp));
        let add = curve.jge_to_wge(&curve.jge_add(&jp, &jp));
        assert!(curve.wge_equal(&dbl, &add), "unified add must double");

        // variable-time addition agrees
        let var = curve.jge_to_wge(&curve.jge_add_var(&jp, &jq));
        assert!(curve.wge_equal(&var, &pq));

        // (k1 + k2)G = k1*G + k2*G
        let ks = curve.scalar_field().add(&k1, &k2);
        let lhs = curve.jge_to_wge(&curve.mul(&g, &ks));
        let rhs = curve.jge_to_wge(&curve.jge_add(
            &curve.mul(&g, &k1),
            &curve.mul(&g, &k2),
        ));
        assert!(curve.wge_equal(&lhs, &rhs), "scalar distributivity");

        // 0 * P = O
        let zero = curve.scalar_field().from_word(0);
        assert!(curve.jge_is_zero(&curve.mul(&p, &zero)));
    }
}

#[test]
fn ladders_agree() {
    let mut rng = StdRng::seed_from_u64(43);
    for id in WEI_IDS {
        let mut curve = curves::weierstrass(id).unwrap();
        let g = curve.generator();
        for _ in 0..4 {
            let k = random_scalar(&curve, &mut rng);
            // variable-point ladder (GLV on secp256k1) vs blinded comb
            let a = curve.jge_to_wge(&curve.mul(&g, &k));
            let b = curve.jge_to_wge(&curve.mul_g(&k));
            assert!(curve.wge_equal(&a, &b), "ladder and comb must agree");
        }
        // refreshing the blinding must not change results
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);
        curve.randomize(&entropy);
        let k = random_scalar(&curve, &mut rng);
        let a = curve.jge_to_wge(&curve.mul(&g, &k));
        let b = curve.jge_to_wge(&curve.mul_g(&k));
        assert!(curve.wge_equal(&a, &b), "blinded comb must agree after randomize");
    }
}

#[test]
fn multi_scalar_matches_naive() {
    let mut rng = StdRng::seed_from_u64(44);
    for id in [CurveId::P256, CurveId::Secp256k1, CurveId::P384] {
        let curve = curves::weierstrass(id).unwrap();
        let g = curve.generator();
        let mut scratch = curve.scratch();
        for npoints in [0usize, 1, 2, 3, 5] {
            let k0 = random_scalar(&curve, &mut rng);
            let mut pts = Vec::new();
            let mut cfs = Vec::new();
            let mut expect = curve.mul(&g, &k0);
            for _ in 0..npoints {
                let kp = random_scalar(&curve, &mut rng);
                let c = random_scalar(&curve, &mut rng);
                let p = curve.jge_to_wge(&curve.mul(&g, &kp));
                expect = curve.jge_add(&expect, &curve.mul(&p, &c));
                pts.push(p);
                cfs.push(c);
            }
            let got = curve.mul_multi_var(&mut scratch, &k0, &pts, &cfs);
            assert!(
                curve.wge_equal(&curve.jge_to_wge(&got), &curve.jge_to_wge(&expect)),
                "multi-scalar mismatch with {npoints} points"
            );
        }
        // double-mul helper
        let k0 = random_scalar(&curve, &mut rng);
        let k1 = random_scalar(&curve, &mut rng);
        let p = curve.jge_to_wge(&curve.mul(&g, &k1));
        let got = curve.mul_double_var(&k0, &p, &k1);
        let expect = curve.jge_add(&curve.mul(&g, &k0), &curve.mul(&p, &k1));
        assert!(curve.wge_equal(&curve.jge_to_wge(&got), &curve.jge_to_wge(&expect)));
    }
}

#[test]
fn sec1_roundtrip() {
    let mut rng = StdRng::seed_from_u64(45);
    for id in WEI_IDS {
        let curve = curves::weierstrass(id).unwrap();
        let k = random_scalar(&curve, &mut rng);
        let p = curve.jge_to_wge(&curve.mul(&curve.generator(), &k));
        for compress in [true, false] {
            let enc = curve.wge_export(&p, compress).unwrap();
            let back = curve.wge_import(&enc).expect("exported point must import");
            assert!(curve.wge_equal(&back, &p), "SEC1 round trip");
        }
        // hybrid form
        let mut enc = curve.wge_export(&p, false).unwrap();
        enc[0] = 0x06 | (curve.wge_export(&p, true).unwrap()[0] & 1);
        assert!(curve.wge_import(&enc).is_some(), "hybrid import must succeed");
        enc[0] ^= 1;
        assert!(curve.wge_import(&enc).is_none(), "bad hybrid parity must fail");
    }
}

#[test]
fn edwards_group_laws() {
    let mut rng = StdRng::seed_from_u64(46);
    for id in ED_IDS {
        let ed = curves::edwards(id).unwrap();
        let g = ed.generator();
        assert!(ed.xge_validate(&g), "generator must satisfy the extended invariants");

        let mut b = vec![0u8; ed.scalar_field().size()];
        rng.fill_bytes(&mut b);
        let k1 = ed.scalar_field().import_reduce_be(&b);
        rng.fill_bytes(&mut b);
        let k2 = ed.scalar_field().import_reduce_be(&b);

        let p = ed.mul(&g, &k1);
        let q = ed.mul(&g, &k2);
        assert!(ed.xge_validate(&p));

        // unified addition: identity, doubling, inverses
        assert!(ed.xge_equal(&ed.xge_add(&p, &ed.xge_zero()), &p));
        assert!(ed.xge_equal(&ed.xge_add(&p, &p), &ed.xge_dbl(&p)));
        assert!(ed.xge_is_zero(&ed.xge_add(&p, &ed.xge_neg(&p))));
        assert!(ed.xge_equal(&ed.xge_add(&p, &q), &ed.xge_add(&q, &p)));

        // scalar distributivity and comb agreement
        let ks = ed.scalar_field().add(&k1, &k2);
        assert!(ed.xge_equal(&ed.mul(&g, &ks), &ed.xge_add(&p, &q)));
        assert!(ed.xge_equal(&ed.mul_g(&k1), &p), "comb must agree with ladder");

        // compressed encoding round trip
        let mut enc = vec![0u8; ed.encoded_size()];
        ed.export(&p, &mut enc);
        let back = ed.import(&enc).expect("exported point must import");
        assert!(ed.xge_equal(&back, &p));

        // torsion-freeness of prime-subgroup points
        assert!(ed.is_torsion_free_var(&p));
    }
}

#[test]
fn edwards_multi_scalar() {
    let mut rng = StdRng::seed_from_u64(47);
    let ed = curves::edwards(CurveId::Ed25519).unwrap();
    let g = ed.generator();
    let mut scratch = ed.scratch();
    let mut b = [0u8; 32];
    for npoints in [0usize, 2, 3] {
        rng.fill_bytes(&mut b);
        let k0 = ed.scalar_field().import_reduce_be(&b);
        let mut pts = Vec::new();
        let mut cfs = Vec::new();
        let mut expect = ed.mul(&g, &k0);
        for _ in 0..npoints {
            rng.fill_bytes(&mut b);
            let kp = ed.scalar_field().import_reduce_be(&b);
            rng.fill_bytes(&mut b);
            let c = ed.scalar_field().import_reduce_be(&b);
            let p = ed.mul(&g, &kp);
            expect = ed.xge_add(&expect, &ed.mul(&p, &c));
            pts.push(p);
            cfs.push(c);
        }
        let got = ed.mul_multi_var(&mut scratch, &k0, &pts, &cfs);
        assert!(ed.xge_equal(&got, &expect), "edwards multi-scalar with {npoints} points");
    }
}

#[test]
fn registry_lookup() {
    for name in [
        "P192", "P224", "P256", "P384", "P521", "SECP256K1", "X25519", "X448", "ED25519",
        "ED448", "ED1174",
    ] {
        assert!(curves::create(name).is_ok(), "{name} must resolve");
    }
    assert!(curves::create("P512").is_err(), "unknown names must fail");
    assert!(curves::create("ed25519").is_err(), "identifiers are case-sensitive");
}
