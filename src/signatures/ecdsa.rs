//! ECDSA over the short Weierstrass curves.
//!
//! Signing follows the deterministic-retry design: an HMAC-DRBG is
//! seeded with `priv || m` and sampled until a valid `(k, r, s)` comes
//! out. Signatures are low-S normalized; the recovery parameter packs
//! the `x >= n` overflow bit and the parity of `y(R)`.
//!
//! Verification and parsing are variable time (public inputs); the
//! `r`-check runs against the Jacobian point directly, trading the
//! final inversion for at most one extra field addition.

use zeroize::Zeroize;

use crate::field::Fe;
use crate::group::weierstrass::{Curve, Wge};
use crate::primitives::{Limb, lt_mask};
use crate::rng::HmacDrbg;
use crate::scalar::{MAX_SC_LIMBS, Sc};

/// Reduces a message digest to a scalar: leftmost `bits(n)` bits, then
/// a weak reduction.
pub(crate) fn reduce_msg(curve: &Curve, msg: &[u8]) -> Sc {
    let sc = &curve.sc;
    let take = msg.len().min(sc.size);
    let mut l = [0 as Limb; MAX_SC_LIMBS];
    for (i, &b) in msg[..take].iter().rev().enumerate() {
        l[i / 8] |= (b as Limb) << (8 * (i % 8));
    }
    let have = take * 8;
    if have > sc.bits {
        let mut sh = [0; MAX_SC_LIMBS];
        crate::primitives::shr_bits(&mut sh[..sc.limbs], &l[..sc.limbs], (have - sc.bits) as u32);
        l = sh;
    }
    sc.import_weak(&l[..sc.limbs])
}

/// Lifts a field x-coordinate into the scalar ring; the second return
/// is 1 when the value was `>= n`.
fn fe_to_scalar(curve: &Curve, x: &Fe) -> (Sc, Limb) {
    let mut bytes = [0u8; 66];
    let fs = curve.fe.size;
    curve.fe.to_bytes_be(x, &mut bytes[..fs]);
    let mut l = [0 as Limb; MAX_SC_LIMBS];
    for (i, &b) in bytes[..fs].iter().rev().enumerate() {
        l[i / 8] |= (b as Limb) << (8 * (i % 8));
    }
    let high = !lt_mask(&l[..curve.sc.limbs], &curve.sc.n[..curve.sc.limbs]) & 1;
    (curve.sc.import_weak(&l[..curve.sc.limbs]), high)
}

/// Derives the SEC1 public key for a private scalar.
pub fn pubkey_create(curve: &Curve, priv_key: &[u8], compress: bool) -> Option<Vec<u8>> {
    let mut a = curve.sc.import_be(priv_key)?;
    if curve.sc.is_zero(&a) != 0 {
        return None;
    }
    let p = curve.jge_to_wge(&curve.mul_g(&a));
    a.zeroize();
    curve.wge_export(&p, compress)
}

/// Signs a message digest. Returns `r || s` (fixed width, big-endian)
/// and the recovery parameter.
pub fn sign(curve: &Curve, msg: &[u8], priv_key: &[u8]) -> Option<(Vec<u8>, u8)> {
    sign_internal(curve, msg, priv_key, None)
}

/// Signing with an injected nonce; the seam used by known-answer tests.
/// Production callers use [`sign`].
pub fn sign_with_nonce(
    curve: &Curve,
    msg: &[u8],
    priv_key: &[u8],
    nonce: &[u8],
) -> Option<(Vec<u8>, u8)> {
    let k = curve.sc.import_be(nonce)?;
    sign_internal(curve, msg, priv_key, Some(k))
}

fn sign_internal(
    curve: &Curve,
    msg: &[u8],
    priv_key: &[u8],
    nonce: Option<Sc>,
) -> Option<(Vec<u8>, u8)> {
    let sc = &curve.sc;
    let mut a = sc.import_be(priv_key)?;
    if sc.is_zero(&a) != 0 {
        return None;
    }
    let mut m = reduce_msg(curve, msg);
    let mut seed = vec![0u8; 2 * sc.size];
    sc.export_be(&a, &mut seed[..sc.size]);
    sc.export_be(&m, &mut seed[sc.size..]);
    let mut drbg = HmacDrbg::new(curve.hash, &seed);
    seed.zeroize();

    let mut kbuf = vec![0u8; sc.size];
    let out = loop {
        let mut k = match nonce {
            Some(k) => k,
            None => {
                drbg.generate(&mut kbuf);
                sc.import_reduce_be(&kbuf)
            }
        };
        // an injected nonce gets exactly one attempt
        let retry = nonce.is_none();
        if sc.is_zero(&k) != 0 {
            if retry {
                continue;
            }
            break None;
        }
        let rj = curve.mul_g(&k);
        let rp = curve.jge_to_wge(&rj);
        if rp.inf == 1 {
            if retry {
                continue;
            }
            break None;
        }
        let (r, high) = fe_to_scalar(curve, &rp.x);
        if sc.is_zero(&r) != 0 {
            if retry {
                continue;
            }
            break None;
        }
        let s = {
            let ki = sc.invert(&k);
            sc.mul(&ki, &sc.add(&m, &sc.mul(&r, &a)))
        };
        k.zeroize();
        if sc.is_zero(&s) != 0 {
            if retry {
                continue;
            }
            break None;
        }
        let (s, flipped) = sc.minimize(&s);
        let y_odd = curve.fe.is_odd(&rp.y);
        let param = ((high as u8) << 1) | (((y_odd ^ flipped) & 1) as u8);
        let mut sig = vec![0u8; 2 * sc.size];
        sc.export_be(&r, &mut sig[..sc.size]);
        sc.export_be(&s, &mut sig[sc.size..]);
        break Some((sig, param));
    };
    a.zeroize();
    m.zeroize();
    kbuf.zeroize();
    out
}

/// Verifies an `r || s` signature over a message digest. Rejects high-S
/// signatures outright.
pub fn verify(curve: &Curve, msg: &[u8], sig: &[u8], pubkey: &Wge) -> bool {
    let sc = &curve.sc;
    if sig.len() != 2 * sc.size {
        return false;
    }
    let Some(r) = sc.import_be(&sig[..sc.size]) else {
        return false;
    };
    let Some(s) = sc.import_be(&sig[sc.size..]) else {
        return false;
    };
    if sc.is_zero(&r) != 0 || sc.is_zero(&s) != 0 || sc.is_high(&s) != 0 {
        return false;
    }
    let m = reduce_msg(curve, msg);
    let si = sc.invert_var(&s);
    let u1 = sc.mul(&m, &si);
    let u2 = sc.mul(&r, &si);
    let rj = curve.mul_double_var(&u1, pubkey, &u2);
    curve.jge_equal_r_var(&rj, &r)
}

/// Whether a signature's `s` half is already in the low range.
pub fn is_low_s(curve: &Curve, sig: &[u8]) -> bool {
    let sc = &curve.sc;
    if sig.len() != 2 * sc.size {
        return false;
    }
    match sc.import_be(&sig[sc.size..]) {
        Some(s) => sc.is_zero(&s) == 0 && sc.is_high(&s) == 0,
        None => false,
    }
}

/// Rewrites a signature into its low-S form.
pub fn normalize(curve: &Curve, sig: &[u8]) -> Option<Vec<u8>> {
    let sc = &curve.sc;
    if sig.len() != 2 * sc.size {
        return None;
    }
    let s = sc.import_be(&sig[sc.size..])?;
    let (s, _) = sc.minimize(&s);
    let mut out = sig.to_vec();
    sc.export_be(&s, &mut out[sc.size..]);
    Some(out)
}

/// Recovers the public key from a signature and its recovery parameter.
pub fn recover(curve: &Curve, msg: &[u8], sig: &[u8], param: u8) -> Option<Wge> {
    let sc = &curve.sc;
    let f = &curve.fe;
    if sig.len() != 2 * sc.size || param > 3 {
        return None;
    }
    let r = sc.import_be(&sig[..sc.size])?;
    let s = sc.import_be(&sig[sc.size..])?;
    if sc.is_zero(&r) != 0 || sc.is_zero(&s) != 0 || sc.is_high(&s) != 0 {
        return None;
    }
    let sign = (param & 1) as Limb;
    let high = (param >> 1) & 1;
    // x = r (+ n when the coordinate overflowed the order)
    let mut xl = [0 as Limb; crate::field::MAX_FE_LIMBS];
    xl[..sc.limbs].copy_from_slice(&r.0[..sc.limbs]);
    if high == 1 {
        let mut nl = [0 as Limb; crate::field::MAX_FE_LIMBS];
        nl[..sc.limbs].copy_from_slice(&sc.n[..sc.limbs]);
        let mut t = [0 as Limb; crate::field::MAX_FE_LIMBS];
        let carry = crate::primitives::add_n(&mut t[..f.limbs], &xl[..f.limbs], &nl[..f.limbs]);
        if carry != 0
            || crate::primitives::cmp_var(&t[..f.limbs], &f.p[..f.limbs])
                != core::cmp::Ordering::Less
        {
            return None;
        }
        xl = t;
    }
    let x = f.to_mont(&Fe(xl));
    let rp = curve.wge_from_x(&x, sign)?;
    let m = reduce_msg(curve, msg);
    let ri = sc.invert_var(&r);
    // A = (s*R - m*G) / r
    let u1 = sc.neg(&sc.mul(&m, &ri));
    let u2 = sc.mul(&s, &ri);
    let aj = curve.mul_double_var(&u1, &rp, &u2);
    let a = curve.jge_to_wge(&aj);
    if a.inf == 1 { None } else { Some(a) }
}
