//! Legacy Schnorr signatures (curves with `p ≡ 3 (mod 4)`).
//!
//! The signature is `x(R) || s` with `r` a full field element. The
//! nonce is derived as `H(priv || msg)` and flipped so `y(R)` is a
//! square; verification reconstructs `R = s*G - e*A` in Jacobian form
//! and checks squareness through `y*z` without normalizing.

use zeroize::Zeroize;

use crate::group::weierstrass::{Curve, Jge, Wge};
use crate::group::Scratch;
use crate::hash::{Hasher, hash_into};
use crate::rng::HmacDrbg;
use crate::scalar::Sc;

/// The construction needs `p ≡ 3 (mod 4)`.
pub fn supported(curve: &Curve) -> bool {
    curve.fe.p[0] & 3 == 3
}

fn challenge(curve: &Curve, r: &[u8], pub_comp: &[u8], msg: &[u8]) -> Sc {
    let mut e = [0u8; 64];
    let len = curve.hash.output_size();
    hash_into(curve.hash, &[r, pub_comp, msg], &mut e[..len]);
    curve.sc.import_reduce_be(&e[..len])
}

/// Signs `msg` (arbitrary bytes). Returns `x(R) || s`.
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
    // k = H(priv || msg) mod n
    let mut kd = [0u8; 64];
    let hl = curve.hash.output_size();
    hash_into(curve.hash, &[priv_key, msg], &mut kd[..hl]);
    let mut k = sc.import_reduce_be(&kd[..hl]);
    kd.zeroize();
    if sc.is_zero(&k) != 0 {
        a.zeroize();
        return None;
    }
    let rj = curve.mul_g(&k);
    let rp = curve.jge_to_wge(&rj);
    // flip the nonce until y(R) is a square
    let flip = !f.is_square(&rp.y);
    k = sc.cnd_neg(&k, flip);

    let fs = f.size;
    let mut sig = vec![0u8; fs + sc.size];
    f.to_bytes_be(&rp.x, &mut sig[..fs]);
    let aj = curve.mul_g(&a);
    let ap = curve.jge_to_wge(&aj);
    let pub_comp = curve.wge_export(&ap, true)?;
    let e = challenge(curve, &sig[..fs], &pub_comp, msg);
    let s = sc.add(&k, &sc.mul(&e, &a));
    sc.export_be(&s, &mut sig[fs..]);
    k.zeroize();
    a.zeroize();
    Some(sig)
}

/// Verifies `x(R) || s` against a full public key.
pub fn verify(curve: &Curve, msg: &[u8], sig: &[u8], pubkey: &Wge) -> bool {
    if !supported(curve) {
        return false;
    }
    let sc = &curve.sc;
    let f = &curve.fe;
    let fs = f.size;
    if sig.len() != fs + sc.size {
        return false;
    }
    let Some(r) = f.from_bytes_be(&sig[..fs]) else {
        return false;
    };
    let Some(s) = sc.import_be(&sig[fs..]) else {
        return false;
    };
    let Some(pub_comp) = curve.wge_export(pubkey, true) else {
        return false;
    };
    let e = challenge(curve, &sig[..fs], &pub_comp, msg);
    // R = s*G - e*A
    let rj = curve.mul_double_var(&s, pubkey, &sc.neg(&e));
    check_r_var(curve, &rj, &r)
}

/// Jacobian check: `y(R)*z(R)` square and `x(R) == r * z(R)^2`.
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

/// Batch verification: random linear combination with DRBG-derived
/// coefficients, flushed through the multi-scalar path.
pub fn batch_verify(
    curve: &Curve,
    scratch: &mut Scratch<Jge>,
    items: &[(&[u8], &[u8], &Wge)],
) -> bool {
    if !supported(curve) {
        return false;
    }
    let sc = &curve.sc;
    let f = &curve.fe;
    let fs = f.size;
    let mut seed_h = Hasher::new(curve.hash);
    for (msg, sig, pubkey) in items {
        let Some(pc) = curve.wge_export(pubkey, true) else {
            return false;
        };
        let mut mh = [0u8; 64];
        let hl = curve.hash.output_size();
        hash_into(curve.hash, &[msg], &mut mh[..hl]);
        seed_h.update(sig);
        seed_h.update(&pc);
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
    for (msg, sig, pubkey) in items {
        if sig.len() != fs + sc.size {
            return false;
        }
        let Some(r) = f.from_bytes_be(&sig[..fs]) else {
            return false;
        };
        let Some(s) = sc.import_be(&sig[fs..]) else {
            return false;
        };
        let Some(rp) = curve.wge_from_x_square(&r) else {
            return false;
        };
        let Some(pc) = curve.wge_export(pubkey, true) else {
            return false;
        };
        let e = challenge(curve, &sig[..fs], &pc, msg);
        let ai = if first { sc.from_word(1) } else { sc.random(&mut drbg) };
        first = false;
        sum = sc.add(&sum, &sc.mul(&ai, &s));
        pts[count] = rp;
        cfs[count] = sc.neg(&ai);
        pts[count + 1] = **pubkey;
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
