use nebula_ecc::curves::{self, CurveId};
use nebula_ecc::encoding;
use nebula_ecc::hash::{HashKind, Hasher};
use nebula_ecc::signatures::ecdsa;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

const ALL: [CurveId; 6] = [
    CurveId::P192,
    CurveId::P224,
    CurveId::P256,
    CurveId::P384,
    CurveId::P521,
    CurveId::Secp256k1,
];

fn digest(kind: HashKind, msg: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; kind.output_size()];
    let mut h = Hasher::new(kind);
    h.update(msg);
    h.finalize_into(&mut out);
    out
}

/// RFC 6979 A.2.5, P-256 with SHA-256, message "sample", with the
/// vector's nonce injected. The expected `s` is the low-S form.
#[test]
fn p256_known_answer() {
    let curve = curves::weierstrass(CurveId::P256).unwrap();
    let priv_key =
        hex::decode("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721").unwrap();
    let k = hex::decode("a6e3c57dd01abe90086538398355dd4c3b17aa873382b0f24d6129493d8aad60").unwrap();
    let md = digest(HashKind::Sha256, b"sample");
    let (sig, param) = ecdsa::sign_with_nonce(&curve, &md, &priv_key, &k).unwrap();
    assert_eq!(
        hex::encode(&sig),
        "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716\
         0834e36ad29a83bf2bc9385e491d6099c8fdf9d1ed67aa7ea5f51f93782857a9",
        "signature must match the deterministic vector"
    );
    assert_eq!(param, 1);

    let pub_enc = ecdsa::pubkey_create(&curve, &priv_key, false).unwrap();
    assert_eq!(
        hex::encode(&pub_enc),
        "0460fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6\
         7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299"
    );
    let pubkey = curve.wge_import(&pub_enc).unwrap();
    assert!(ecdsa::verify(&curve, &md, &sig, &pubkey));

    let rec = ecdsa::recover(&curve, &md, &sig, param).expect("recovery");
    assert!(curve.wge_equal(&rec, &pubkey), "recovered key must match");
}

#[test]
fn sign_verify_all_curves() {
    let mut rng = StdRng::seed_from_u64(7);
    for id in ALL {
        let curve = curves::weierstrass(id).unwrap();
        let mut priv_key = vec![0u8; curve.scalar_field().size()];
        loop {
            rng.fill_bytes(&mut priv_key);
            if curve.scalar_field().import_be(&priv_key).is_some() {
                break;
            }
        }
        let md = digest(HashKind::Sha256, b"ecdsa across the registry");
        let (sig, param) = ecdsa::sign(&curve, &md, &priv_key).unwrap();
        let pub_enc = ecdsa::pubkey_create(&curve, &priv_key, true).unwrap();
        let pubkey = curve.wge_import(&pub_enc).unwrap();
        assert!(ecdsa::verify(&curve, &md, &sig, &pubkey), "{id:?} verify");
        assert!(ecdsa::is_low_s(&curve, &sig), "{id:?} low-S");

        // any bit flip must invalidate
        let mut bad = sig.clone();
        bad[3] ^= 0x40;
        assert!(!ecdsa::verify(&curve, &md, &bad, &pubkey), "{id:?} corrupted sig");
        let md2 = digest(HashKind::Sha256, b"some other message");
        assert!(!ecdsa::verify(&curve, &md2, &sig, &pubkey), "{id:?} wrong message");

        let rec = ecdsa::recover(&curve, &md, &sig, param).expect("recovery");
        assert!(curve.wge_equal(&rec, &pubkey), "{id:?} recovery");
    }
}

#[test]
fn high_s_is_rejected_and_normalizes() {
    let curve = curves::weierstrass(CurveId::P256).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let mut priv_key = vec![0u8; 32];
    rng.fill_bytes(&mut priv_key);
    let md = digest(HashKind::Sha256, b"malleability");
    let (sig, _) = ecdsa::sign(&curve, &md, &priv_key).unwrap();
    let pub_enc = ecdsa::pubkey_create(&curve, &priv_key, true).unwrap();
    let pubkey = curve.wge_import(&pub_enc).unwrap();

    // forge the high-S counterpart: s' = n - s
    let sc = curve.scalar_field();
    let s = sc.import_be(&sig[32..]).unwrap();
    let high = sc.neg(&s);
    let mut forged = sig.clone();
    sc.export_be(&high, &mut forged[32..]);
    assert!(!ecdsa::verify(&curve, &md, &forged, &pubkey), "high-S must be rejected");
    assert!(!ecdsa::is_low_s(&curve, &forged));
    let renorm = ecdsa::normalize(&curve, &forged).unwrap();
    assert_eq!(renorm, sig, "normalize must restore the low-S form");
}

#[test]
fn der_roundtrip() {
    let mut rng = StdRng::seed_from_u64(9);
    for id in [CurveId::P256, CurveId::P521, CurveId::Secp256k1] {
        let curve = curves::weierstrass(id).unwrap();
        let ss = curve.scalar_field().size();
        let mut priv_key = vec![0u8; ss];
        rng.fill_bytes(&mut priv_key);
        if curve.scalar_field().import_be(&priv_key).is_none() {
            priv_key[0] = 0;
        }
        let md = digest(HashKind::Sha256, b"der");
        let (sig, _) = ecdsa::sign(&curve, &md, &priv_key).unwrap();
        let der = encoding::sig_export(ss, &sig).unwrap();
        assert_eq!(encoding::sig_import(ss, &der).unwrap(), sig, "{id:?} strict");
        assert_eq!(encoding::sig_import_lax(ss, &der).unwrap(), sig, "{id:?} lax");
    }
}
