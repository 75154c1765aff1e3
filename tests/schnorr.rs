use nebula_ecc::curves::{self, CurveId};
use nebula_ecc::signatures::{schnorr, schnorr_legacy};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_priv(curve: &nebula_ecc::group::weierstrass::Curve, rng: &mut StdRng) -> Vec<u8> {
    let mut k = vec![0u8; curve.scalar_field().size()];
    loop {
        rng.fill_bytes(&mut k);
        if let Some(s) = curve.scalar_field().import_be(&k) {
            if curve.scalar_field().is_zero(&s) == 0 {
                return k;
            }
        }
    }
}

#[test]
fn legacy_sign_verify() {
    let mut rng = StdRng::seed_from_u64(50);
    // p = 3 mod 4 curves only
    for id in [CurveId::P192, CurveId::P256, CurveId::P384, CurveId::Secp256k1] {
        let curve = curves::weierstrass(id).unwrap();
        assert!(schnorr_legacy::supported(&curve));
        let priv_key = random_priv(&curve, &mut rng);
        let pub_enc =
            nebula_ecc::signatures::ecdsa::pubkey_create(&curve, &priv_key, true).unwrap();
        let pubkey = curve.wge_import(&pub_enc).unwrap();
        let msg = b"legacy schnorr message";
        let sig = schnorr_legacy::sign(&curve, msg, &priv_key).unwrap();
        assert!(schnorr_legacy::verify(&curve, msg, &sig, &pubkey), "{id:?}");

        let mut bad = sig.clone();
        bad[sig.len() - 1] ^= 1;
        assert!(!schnorr_legacy::verify(&curve, msg, &bad, &pubkey), "{id:?} flipped s");
        let mut bad = sig.clone();
        bad[0] ^= 1;
        assert!(!schnorr_legacy::verify(&curve, msg, &bad, &pubkey), "{id:?} flipped r");
        assert!(!schnorr_legacy::verify(&curve, b"other", &sig, &pubkey), "{id:?} wrong msg");
    }
}

#[test]
fn legacy_unsupported_field() {
    // p224 = 1 mod 4: the square-y convention breaks down
    let curve = curves::weierstrass(CurveId::P224).unwrap();
    assert!(!schnorr_legacy::supported(&curve));
    assert!(schnorr_legacy::sign(&curve, b"x", &[1u8; 28]).is_none());
}

#[test]
fn legacy_batch() {
    let mut rng = StdRng::seed_from_u64(51);
    let curve = curves::weierstrass(CurveId::Secp256k1).unwrap();
    let mut scratch = curve.scratch();
    let mut keep = Vec::new();
    for i in 0..6 {
        let priv_key = random_priv(&curve, &mut rng);
        let pub_enc =
            nebula_ecc::signatures::ecdsa::pubkey_create(&curve, &priv_key, true).unwrap();
        let pubkey = curve.wge_import(&pub_enc).unwrap();
        let msg = format!("legacy batch {i}").into_bytes();
        let sig = schnorr_legacy::sign(&curve, &msg, &priv_key).unwrap();
        keep.push((msg, sig, pubkey));
    }
    let items: Vec<(&[u8], &[u8], &nebula_ecc::group::weierstrass::Wge)> =
        keep.iter().map(|(m, s, p)| (m.as_slice(), s.as_slice(), p)).collect();
    assert!(schnorr_legacy::batch_verify(&curve, &mut scratch, &items));

    let mut corrupted = keep.clone();
    corrupted[2].1[40] ^= 2;
    let items: Vec<(&[u8], &[u8], &nebula_ecc::group::weierstrass::Wge)> =
        corrupted.iter().map(|(m, s, p)| (m.as_slice(), s.as_slice(), p)).collect();
    assert!(!schnorr_legacy::batch_verify(&curve, &mut scratch, &items));
}

#[test]
fn bip_sign_verify() {
    let mut rng = StdRng::seed_from_u64(52);
    let curve = curves::weierstrass(CurveId::Secp256k1).unwrap();
    for _ in 0..4 {
        let priv_key = random_priv(&curve, &mut rng);
        let pk = schnorr::pubkey_create(&curve, &priv_key).unwrap();
        assert_eq!(pk.len(), 32, "x-only keys are one field element");
        let mut msg = [0u8; 32];
        rng.fill_bytes(&mut msg);
        let sig = schnorr::sign(&curve, &msg, &priv_key).unwrap();
        assert_eq!(sig.len(), 64);
        assert!(schnorr::verify(&curve, &msg, &sig, &pk));

        let mut bad = sig.clone();
        bad[33] ^= 4;
        assert!(!schnorr::verify(&curve, &msg, &bad, &pk));
        let mut bad_pk = pk.clone();
        bad_pk[5] ^= 1;
        // a flipped key either fails to lift or fails the equation
        assert!(!schnorr::verify(&curve, &msg, &sig, &bad_pk));
    }
}

/// A batch of 64 valid signatures verifies; corrupting any single `s`
/// makes the whole batch fail.
#[test]
fn bip_batch_of_64() {
    let mut rng = StdRng::seed_from_u64(53);
    let curve = curves::weierstrass(CurveId::Secp256k1).unwrap();
    let mut scratch = curve.scratch();
    let mut keep = Vec::new();
    for i in 0..64 {
        let priv_key = random_priv(&curve, &mut rng);
        let pk = schnorr::pubkey_create(&curve, &priv_key).unwrap();
        let msg = format!("bip batch item {i}").into_bytes();
        let sig = schnorr::sign(&curve, &msg, &priv_key).unwrap();
        keep.push((msg, sig, pk));
    }
    let items: Vec<(&[u8], &[u8], &[u8])> = keep
        .iter()
        .map(|(m, s, p)| (m.as_slice(), s.as_slice(), p.as_slice()))
        .collect();
    assert!(schnorr::batch_verify(&curve, &mut scratch, &items), "full batch");

    let victim = 41;
    let mut corrupted = keep.clone();
    corrupted[victim].1[47] ^= 0x10;
    let items: Vec<(&[u8], &[u8], &[u8])> = corrupted
        .iter()
        .map(|(m, s, p)| (m.as_slice(), s.as_slice(), p.as_slice()))
        .collect();
    assert!(
        !schnorr::batch_verify(&curve, &mut scratch, &items),
        "one corrupted s must sink the batch"
    );
}
