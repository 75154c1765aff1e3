use nebula_ecc::curves::{self, CurveId};
use nebula_ecc::keys;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// RFC 7748 section 6.1 Diffie-Hellman vector.
#[test]
fn rfc7748_key_exchange() {
    let curve = curves::montgomery(CurveId::X25519).unwrap();
    let priv_a =
        hex::decode("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a").unwrap();
    let priv_b =
        hex::decode("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb").unwrap();
    let pub_a = keys::pubkey_create(&curve, &priv_a).unwrap();
    let pub_b = keys::pubkey_create(&curve, &priv_b).unwrap();
    assert_eq!(
        hex::encode(&pub_a),
        "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"
    );
    assert_eq!(
        hex::encode(&pub_b),
        "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f"
    );
    let shared_a = keys::derive(&curve, &pub_b, &priv_a).unwrap();
    let shared_b = keys::derive(&curve, &pub_a, &priv_b).unwrap();
    assert_eq!(shared_a, shared_b, "both sides must agree");
    assert_eq!(
        hex::encode(&shared_a),
        "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742"
    );
}

/// RFC 7748 section 5.2: one ladder iteration with k = u = base point.
#[test]
fn rfc7748_one_iteration() {
    let curve = curves::montgomery(CurveId::X25519).unwrap();
    let k = hex::decode("0900000000000000000000000000000000000000000000000000000000000000")
        .unwrap();
    let out = keys::derive(&curve, &k, &k).unwrap();
    assert_eq!(
        hex::encode(&out),
        "422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079"
    );
}

#[test]
fn keygen_and_exchange() {
    let curve = curves::montgomery(CurveId::X25519).unwrap();
    let mut rng = StdRng::seed_from_u64(29);
    let priv_a = keys::privkey_generate(&curve, &mut rng);
    let priv_b = keys::privkey_generate(&curve, &mut rng);
    let pub_a = keys::pubkey_create(&curve, &priv_a).unwrap();
    let pub_b = keys::pubkey_create(&curve, &priv_b).unwrap();
    let s1 = keys::derive(&curve, &pub_b, &priv_a).unwrap();
    let s2 = keys::derive(&curve, &pub_a, &priv_b).unwrap();
    assert_eq!(s1, s2);

    // generated public keys are in the prime-order subgroup
    assert!(keys::pubkey_is_torsion_free(&curve, &pub_a));
    assert!(!keys::pubkey_is_small(&curve, &pub_a));
}

#[test]
fn small_order_peer_is_rejected() {
    let curve = curves::montgomery(CurveId::X25519).unwrap();
    let mut rng = StdRng::seed_from_u64(30);
    let priv_a = keys::privkey_generate(&curve, &mut rng);
    // u = 0 is the order-2 point; the clamped ladder collapses to zero
    let zero_pub = vec![0u8; 32];
    assert!(keys::derive(&curve, &zero_pub, &priv_a).is_err(), "zero output must error");
}

#[test]
fn montgomery_edwards_key_conversion() {
    let mont = curves::montgomery(CurveId::X25519).unwrap();
    let ed = curves::edwards(CurveId::Ed25519).unwrap();
    let mut rng = StdRng::seed_from_u64(31);
    let priv_a = keys::privkey_generate(&mont, &mut rng);
    let pub_a = keys::pubkey_create(&mont, &priv_a).unwrap();
    for sign in [0u8, 1] {
        let ed_pub = keys::pubkey_to_edwards(&mont, &ed, &pub_a, sign)
            .expect("conversion must succeed for ladder outputs");
        let back = keys::pubkey_from_edwards(&ed, &mont, &ed_pub).unwrap();
        assert_eq!(back, pub_a, "round trip through edwards form");
    }
}
