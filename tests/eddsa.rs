use nebula_ecc::curves::{self, CurveId};
use nebula_ecc::signatures::eddsa;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// RFC 8032 test 1: empty message, byte-exact signature.
#[test]
fn ed25519_rfc8032_test1() {
    let ed = curves::edwards(CurveId::Ed25519).unwrap();
    let seed =
        hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60").unwrap();
    let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
    assert_eq!(
        hex::encode(&pubkey),
        "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
    );
    let sig = eddsa::sign(&ed, b"", &seed, None, b"").unwrap();
    assert_eq!(
        hex::encode(&sig),
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
         5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
    );
    assert!(eddsa::verify(&ed, b"", &sig, &pubkey, None, b""));
    assert!(eddsa::verify_single_cofactor(&ed, b"", &sig, &pubkey, None, b""));
}

/// RFC 8032 test 2: one-byte message.
#[test]
fn ed25519_rfc8032_test2() {
    let ed = curves::edwards(CurveId::Ed25519).unwrap();
    let seed =
        hex::decode("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb").unwrap();
    let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
    assert_eq!(
        hex::encode(&pubkey),
        "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"
    );
    let sig = eddsa::sign(&ed, &[0x72], &seed, None, b"").unwrap();
    assert_eq!(
        hex::encode(&sig),
        "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
         085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
    );
    assert!(eddsa::verify(&ed, &[0x72], &sig, &pubkey, None, b""));
}

/// RFC 8032 Ed448: blank and 1-octet vectors, byte-exact.
#[test]
fn ed448_rfc8032() {
    let ed = curves::edwards(CurveId::Ed448).unwrap();
    let seed = hex::decode(
        "6c82a562cb808d10d632be89c8513ebf6c929f34ddfa8c9f63c9960ef6e348a3\
         528c8a3fcc2f044e39a3fc5b94492f8f032e7549a20098f95b",
    )
    .unwrap();
    let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
    assert_eq!(
        hex::encode(&pubkey),
        "5fd7449b59b461fd2ce787ec616ad46a1da1342485a70e1f8a0ea75d80e96778\
         edf124769b46c7061bd6783df1e50f6cd1fa1abeafe8256180"
    );
    let sig = eddsa::sign(&ed, b"", &seed, None, b"").unwrap();
    assert_eq!(
        hex::encode(&sig),
        "533a37f6bbe457251f023c0d88f976ae2dfb504a843e34d2074fd823d41a591f\
         2b233f034f628281f2fd7a22ddd47d7828c59bd0a21bfd3980ff0d2028d4b18a\
         9df63e006c5d1c2d345b925d8dc00b4104852db99ac5c7cdda8530a113a0f4db\
         b61149f05a7363268c71d95808ff2e652600"
    );
    assert!(eddsa::verify(&ed, b"", &sig, &pubkey, None, b""));

    let seed = hex::decode(
        "c4eab05d357007c632f3dbb48489924d552b08fe0c353a0d4a1f00acda2c463a\
         fbea67c5e8d2877c5e3bc397a659949ef8021e954e0a12274e",
    )
    .unwrap();
    let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
    assert_eq!(
        hex::encode(&pubkey),
        "43ba28f430cdff456ae531545f7ecd0ac834a55d9358c0372bfa0c6c6798c086\
         6aea01eb00742802b8438ea4cb82169c235160627b4c3a9480"
    );
    let sig = eddsa::sign(&ed, &[0x03], &seed, None, b"").unwrap();
    assert_eq!(
        hex::encode(&sig),
        "26b8f91727bd62897af15e41eb43c377efb9c610d48f2335cb0bd0087810f435\
         2541b143c4b981b7e18f62de8ccdf633fc1bf037ab7cd779805e0dbcc0aae1cb\
         cee1afb2e027df36bc04dcecbf154336c19f0af7e0a6472905e799f1953d2a0f\
         f3348ab21aa4adafd1d234441cf807c03a00"
    );
    assert!(eddsa::verify(&ed, &[0x03], &sig, &pubkey, None, b""));
}

#[test]
fn bit_flips_are_rejected() {
    let mut rng = StdRng::seed_from_u64(17);
    for id in [CurveId::Ed25519, CurveId::Ed448, CurveId::Ed1174] {
        let ed = curves::edwards(id).unwrap();
        let mut seed = vec![0u8; ed.encoded_size()];
        rng.fill_bytes(&mut seed);
        let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
        let msg = b"flip resistance";
        let sig = eddsa::sign(&ed, msg, &seed, None, b"").unwrap();
        assert!(eddsa::verify(&ed, msg, &sig, &pubkey, None, b""), "{id:?}");

        let mut bad = sig.clone();
        bad[10] ^= 1;
        assert!(!eddsa::verify(&ed, msg, &bad, &pubkey, None, b""), "{id:?} sig flip");
        let mut bad_msg = msg.to_vec();
        bad_msg[0] ^= 0x80;
        assert!(!eddsa::verify(&ed, &bad_msg, &sig, &pubkey, None, b""), "{id:?} msg flip");
    }
}

#[test]
fn context_and_prehash_domains_separate() {
    let ed = curves::edwards(CurveId::Ed25519).unwrap();
    let seed = [9u8; 32];
    let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
    let msg = b"domain separation";
    let plain = eddsa::sign(&ed, msg, &seed, None, b"").unwrap();
    let with_ctx = eddsa::sign(&ed, msg, &seed, None, b"ctx").unwrap();
    assert_ne!(plain, with_ctx);
    assert!(!eddsa::verify(&ed, msg, &plain, &pubkey, None, b"ctx"));
    assert!(eddsa::verify(&ed, msg, &with_ctx, &pubkey, None, b"ctx"));
    let ph = eddsa::sign(&ed, msg, &seed, Some(false), b"").unwrap();
    assert_ne!(plain, ph, "the ph flag alone must change the domain");
}

#[test]
fn batch_verify_and_corruption() {
    let mut rng = StdRng::seed_from_u64(18);
    for id in [CurveId::Ed25519, CurveId::Ed448] {
        let ed = curves::edwards(id).unwrap();
        let mut scratch = ed.scratch();
        let mut seeds = Vec::new();
        let mut pubs = Vec::new();
        let mut msgs = Vec::new();
        let mut sigs = Vec::new();
        for i in 0..8 {
            let mut seed = vec![0u8; ed.encoded_size()];
            rng.fill_bytes(&mut seed);
            let pubkey = eddsa::pubkey_create(&ed, &seed).unwrap();
            let msg = format!("batch message {i}").into_bytes();
            let sig = eddsa::sign(&ed, &msg, &seed, None, b"").unwrap();
            seeds.push(seed);
            pubs.push(pubkey);
            msgs.push(msg);
            sigs.push(sig);
        }
        let items: Vec<(&[u8], &[u8], &[u8])> = (0..8)
            .map(|i| (msgs[i].as_slice(), sigs[i].as_slice(), pubs[i].as_slice()))
            .collect();
        assert!(eddsa::batch_verify(&ed, &mut scratch, &items, None, b""), "{id:?} batch");

        let mut bad_sigs = sigs.clone();
        bad_sigs[3][ed.encoded_size() + 1] ^= 1;
        let items: Vec<(&[u8], &[u8], &[u8])> = (0..8)
            .map(|i| (msgs[i].as_slice(), bad_sigs[i].as_slice(), pubs[i].as_slice()))
            .collect();
        assert!(
            !eddsa::batch_verify(&ed, &mut scratch, &items, None, b""),
            "{id:?} corrupted batch must fail"
        );
    }
}
