//! BIP-Schnorr signatures (`schnorr_*`).
//!
//! The same equations as the legacy scheme, but with tagged hashes
//! (`BIPSchnorr` / `BIPSchnorrDerive`) and x-only public keys under the
//! square-Y convention: the signer negates its secret when `y(A)` is
//! not a square, and verifiers lift `x(A)` to the square-y point.

use zeroize::Zeroize;

use crate::group::Scratch;
use crate::group::weierstrass::{Curve, Jge, Wge};
use crate::hash::{HashKind, Hasher, hash_into};
use crate::rng::HmacDrbg;
use crate::scalar::Sc;

const TAG_CHALLENGE: &[u8] = b"BIPSchnorr";
const TAG_DERIVE: &[u8] = b"BIPSchnorrDerive";

pub fn supported(curve: &Curve) -> bool {
    curve.fe.p[0] & 3 == 3
}

/// `H(H(tag) || H(tag) || parts...)`.
fn tagged_hash(kind: HashKind, tag: &[u8], parts: &[&[u8]], out: &mut [u8]) {
    let len = kind.output_size();
    let mut th = [0u8; 64];
    hash_into(kind, &[tag], &mut th[..len]);
    let mut h = Hasher::new(kind);
    h.update(&th[..len]);
    h.update(&th[..len]);
    for p in parts {
        h.update(p);
    }
    h.finalize_into(out);
}

fn challenge(curve: &Curve, r: &[u8], pk: &[u8], msg: &[u8]) -> Sc {
    let mut e = [0u8; 64];
    let len = curve.hash.output_size();
    tagged_hash(curve.hash, TAG_CHALLENGE, &[r, pk, msg], &mut e[..len]);
    curve.sc.import_reduce_be(&e[..len])
}

/// The x-only public key for a secret scalar.
pub fn pubkey_create(curve: &Curve, priv_key: &[u8]) -> Option<Vec<u8>> {
    let mut a = curve.sc.import_be(priv_key)?;
    if curve.sc.is_zero(&a) != 0 {
        return None;
    }
    let ap = curve.jge_to_wge(&curve.mul_g(&a));
    a.zeroize();
    let mut out = vec![0u8; curve.fe.size];
    curve.fe.to_bytes_be(&ap.x, &mut out);
    Some(out)
}

/// Lifts an x-only key to the point with square `y`.
pub fn pubkey_lift(curve: &Curve, pk: &[u8]) -> Option<Wge> {
    if pk.len() != curve.fe.size {
        return None;
    }
    let x = curve.fe.from_bytes_be(pk)?;
    curve.wge_from_x_square(&x)
}

/// Signs `msg`. Returns `x(R) || s`.
pub fn sign(curve: &Curve, msg: &[u8], priv_key: &[u8]) -> Option<Vec<u8>> {
    if !supported(curve) {
        return None;
    }
    let sc = &curve.sc;
    let f = &curve.fe;
    let mut a = sc.import_be(priv_key)?;
    if sc.is_zero(&a) != 0 {
        return None;
    }
    let ap = curve.jge_to_wge(&curve.mul_g(&a));
    // square-y convention for the public key
    a = sc.cnd_neg(&a, !f.is_square(&ap.y));
    let mut pk = vec![0u8; f.size];
    f.to_bytes_be(&ap.x, &mut pk);

    let mut abytes = vec![0u8; sc.size];
    sc.export_be(&a, &mut abytes);
    let mut kd = [0u8; 64];
    let hl = curve.hash.output_size();
    tagged_hash(curve.hash, TAG_DERIVE, &[&abytes, msg], &mut kd[..hl]);
    abytes.zeroize();
    let mut k = sc.import_reduce_be(&kd[..hl]);
    kd.zeroize();
    if sc.is_zero(&k) != 0 {
        a.zeroize();
        return None;
    }
    let rp = curve.jge_to_wge(&curve.mul_g(&k));
    k = sc.cnd_neg(&k, !f.is_square(&rp.y));

    let mut sig = vec![0u8; f.size + sc.size];
    f.to_bytes_be(&rp.x, &mut sig[..f.size]);
    let e = challenge(curve, &sig[..f.size], &pk, msg);
    let s = sc.add(&k, &sc.mul(&e, &a));
    sc.export_be(&s, &mut sig[f.size..]);
    k.zeroize();
    a.zeroize();
    Some(sig)
}

/// Verifies `x(R) || s` against an x-only public key.
pub fn verify(curve: &Curve, msg: &[u8], sig: &[u8], pk: &[u8]) -> bool {
    if !supported(curve) {
        return false;
    }
    let sc = &curve.sc;
    let f = &curve.fe;
    let fs = f.size;
    if sig.len() != fs + sc.size {
        return false;
    }
    let Some(a) = pubkey_lift(curve, pk) else {
        return false;
    };
    let Some(r) = f.from_bytes_be(&sig[..fs]) else {
        return false;
    };
    let Some(s) = sc.import_be(&sig[fs..]) else {
        return false;
    };
    let e = challenge(curve, &sig[..fs], pk, msg);
    let rj = curve.mul_double_var(&s, &a, &sc.neg(&e));
    check_r_var(curve, &rj, &r)
}

fn check_r_var(curve: &Curve, rj: &Jge, r: &crate::field::Fe) -> bool {
    let f = &curve.fe;
    if curve.jge_is_zero(rj) {
        return false;
    }
    if f.jacobi_var(&f.mul(&rj.y, &rj.z)) != 1 {
        return false;
    }
    f.equal(&rj.x, &f.mul(r, &f.sqr(&rj.z))) != 0
}

/// Batch verification with DRBG coefficients; fails fast on any
/// malformed element.
pub fn batch_verify(
    curve: &Curve,
    scratch: &mut Scratch<Jge>,
    items: &[(&[u8], &[u8], &[u8])],
) -> bool {
    if !supported(curve) {
        return false;
    }
    let sc = &curve.sc;
    let f = &curve.fe;
    let fs = f.size;
    let mut seed_h = Hasher::new(curve.hash);
    for (msg, sig, pk) in items {
        let mut mh = [0u8; 64];
        let hl = curve.hash.output_size();
        hash_into(curve.hash, &[msg], &mut mh[..hl]);
        seed_h.update(sig);
        seed_h.update(pk);
        seed_h.update(&mh[..hl]);
    }
    let mut seed = [0u8; 64];
    seed_h.finalize_into(&mut seed[..curve.hash.output_size()]);
    let mut drbg = HmacDrbg::new(curve.hash, &seed[..curve.hash.output_size()]);

    let mut sum = Sc::ZERO;
    let mut pts = [curve.wge_zero(); crate::group::SCRATCH_POINTS];
    let mut cfs = [Sc::ZERO; crate::group::SCRATCH_POINTS];
    let mut count = 0;
    let mut first = true;
    for (msg, sig, pk) in items {
        if sig.len() != fs + sc.size {
            return false;
        }
        let Some(a) = pubkey_lift(curve, pk) else {
            return false;
        };
        let Some(rx) = f.from_bytes_be(&sig[..fs]) else {
            return false;
        };
        let Some(s) = sc.import_be(&sig[fs..]) else {
            return false;
        };
        let Some(rp) = curve.wge_from_x_square(&rx) else {
            return false;
        };
        let e = challenge(curve, &sig[..fs], pk, msg);
        let ai = if first { sc.from_word(1) } else { sc.random(&mut drbg) };
        first = false;
        sum = sc.add(&sum, &sc.mul(&ai, &s));
        pts[count] = rp;
        cfs[count] = sc.neg(&ai);
        pts[count + 1] = a;
        cfs[count + 1] = sc.neg(&sc.mul(&ai, &e));
        count += 2;
        if count == crate::group::SCRATCH_POINTS {
            let t = curve.mul_multi_var(scratch, &sum, &pts[..count], &cfs[..count]);
            if !curve.jge_is_zero(&t) {
                return false;
            }
            sum = Sc::ZERO;
            count = 0;
        }
    }
    let t = curve.mul_multi_var(scratch, &sum, &pts[..count], &cfs[..count]);
    curve.jge_is_zero(&t)
}
