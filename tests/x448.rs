use nebula_ecc::curves::{self, CurveId};
use nebula_ecc::keys;
use nebula_ecc::signatures::eddsa;

/// RFC 7748 section 6.2 Diffie-Hellman vector.
#[test]
fn rfc7748_key_exchange() {
    let curve = curves::montgomery(CurveId::X448).unwrap();
    let priv_a = hex::decode(
        "9a8f4925d1519f5775cf46b04b5800d4ee9ee8bae8bc5565d498c28d\
         d9c9baf574a9419744897391006382a6f127ab1d9ac2d8c0a598726b",
    )
    .unwrap();
    let priv_b = hex::decode(
        "1c306a7ac2a0e2e0990b294470cba339e6453772b075811d8fad0d1d\
         6927c120bb5ee8972b0d3e21374c9c921b09d1b0366f10b65173992d",
    )
    .unwrap();
    let pub_a = keys::pubkey_create(&curve, &priv_a).unwrap();
    let pub_b = keys::pubkey_create(&curve, &priv_b).unwrap();
    assert_eq!(
        hex::encode(&pub_a),
        "9b08f7cc31b7e3e67d22d5aea121074a273bd2b83de09c63faa73d2c\
         22c5d9bbc836647241d953d40c5b12da88120d53177f80e532c41fa0"
    );
    assert_eq!(
        hex::encode(&pub_b),
        "3eb7a829b0cd20f5bcfc0b599b6feccf6da4627107bdb0d4f345b430\
         27d8b972fc3e34fb4232a13ca706dcb57aec3dae07bdc1c67bf33609"
    );
    let shared_a = keys::derive(&curve, &pub_b, &priv_a).unwrap();
    let shared_b = keys::derive(&curve, &pub_a, &priv_b).unwrap();
    assert_eq!(shared_a, shared_b);
    assert_eq!(
        hex::encode(&shared_a),
        "07fff4181ac6cc95ec1c16a94a0f74d12da232ce40a77552281d282b\
         b60c0b56fd2464c335543936521c24403085d59a449a5037514a879d"
    );
}

/// RFC 7748 section 5.2: one ladder iteration with k = u = base point.
#[test]
fn rfc7748_one_iteration() {
    let curve = curves::montgomery(CurveId::X448).unwrap();
    let k = hex::decode(
        "05000000000000000000000000000000000000000000000000000000\
         00000000000000000000000000000000000000000000000000000000",
    )
    .unwrap();
    let out = keys::derive(&curve, &k, &k).unwrap();
    assert_eq!(
        hex::encode(&out),
        "3f482c8a9f19b01e6c46ee9711d9dc14fd4bf67af30765c2ae2b846a\
         4d23a8cd0db897086239492caf350b51f833868b9bc2b3bca9cf4113"
    );
}

/// X448 derivation and Ed448 signing over the same private bytes both
/// accept their RFC vector output.
#[test]
fn shared_private_bytes_with_ed448() {
    let priv_bytes = hex::decode(
        "6c82a562cb808d10d632be89c8513ebf6c929f34ddfa8c9f63c9960ef6e348a3\
         528c8a3fcc2f044e39a3fc5b94492f8f032e7549a20098f95b",
    )
    .unwrap();

    // Ed448 side (57-byte seed)
    let ed = curves::edwards(CurveId::Ed448).unwrap();
    let pubkey = eddsa::pubkey_create(&ed, &priv_bytes).unwrap();
    let sig = eddsa::sign(&ed, b"", &priv_bytes, None, b"").unwrap();
    assert!(eddsa::verify(&ed, b"", &sig, &pubkey, None, b""));

    // X448 side (the first 56 bytes as a ladder scalar)
    let curve = curves::montgomery(CurveId::X448).unwrap();
    let pub_m = keys::pubkey_create(&curve, &priv_bytes[..56]).unwrap();
    let shared = keys::derive(&curve, &pub_m, &priv_bytes[..56]).unwrap();
    assert!(!shared.iter().all(|&b| b == 0));
}
