//! EdDSA over the twisted Edwards curves (Ed25519, Ed448, Ed1174).
//!
//! Key expansion splits `H(seed)` into a clamped scalar and a prefix;
//! signing is deterministic. The `dom` separator is included when the
//! curve demands it (Ed448), when a pre-hash flag is given, or when a
//! context string is present.
//!
//! Verification comes in the cofactorless form (`s*G == R + e*A`) and
//! the cofactor-multiplied form matching strict RFC 8032; batch
//! verification accumulates the cofactored equation.

use zeroize::Zeroize;

use crate::group::Scratch;
use crate::group::edwards::{EdwardsCurve, Xge};
use crate::hash::{Hasher, hash_into};
use crate::rng::HmacDrbg;
use crate::scalar::Sc;

/// Expanded secret: clamped scalar and hash prefix.
struct Expanded {
    a: Sc,
    prefix: [u8; 64],
    prefix_len: usize,
}

impl Drop for Expanded {
    fn drop(&mut self) {
        self.a.zeroize();
        self.prefix.zeroize();
    }
}

fn expand(ed: &EdwardsCurve, seed: &[u8]) -> Option<Expanded> {
    if seed.len() != ed.adj_size {
        return None;
    }
    let adj = ed.adj_size;
    let mut h = [0u8; 128];
    hash_into(ed.hash, &[seed], &mut h[..2 * adj]);
    (ed.clamp)(&mut h[..adj]);
    let a = ed.sc.import_reduce_le(&h[..adj]);
    let mut prefix = [0u8; 64];
    prefix[..adj].copy_from_slice(&h[adj..2 * adj]);
    h.zeroize();
    Some(Expanded { a, prefix, prefix_len: adj })
}

/// Derives the public key for a seed.
pub fn pubkey_create(ed: &EdwardsCurve, seed: &[u8]) -> Option<Vec<u8>> {
    let ex = expand(ed, seed)?;
    let a_point = ed.mul_g(&ex.a);
    let mut out = vec![0u8; ed.adj_size];
    ed.export(&a_point, &mut out);
    Some(out)
}

fn dom(ed: &EdwardsCurve, ph: Option<bool>, ctx: &[u8]) -> Option<Vec<u8>> {
    if ctx.len() > 255 {
        return None;
    }
    if !(ed.ctx_always || ph.is_some() || !ctx.is_empty()) {
        return Some(Vec::new());
    }
    let mut d = Vec::with_capacity(ed.dom_prefix.len() + 2 + ctx.len());
    d.extend_from_slice(ed.dom_prefix);
    d.push(u8::from(ph == Some(true)));
    d.push(ctx.len() as u8);
    d.extend_from_slice(ctx);
    Some(d)
}

fn hash_to_scalar(ed: &EdwardsCurve, parts: &[&[u8]]) -> Sc {
    let len = 2 * ed.adj_size;
    let mut out = [0u8; 128];
    let mut h = Hasher::new(ed.hash);
    for p in parts {
        h.update(p);
    }
    h.finalize_into(&mut out[..len]);
    let s = ed.sc.import_reduce_le(&out[..len]);
    out.zeroize();
    s
}

/// Signs a message. `ph` marks a pre-hashed message; `ctx` is the
/// context string (Ed448 always carries the separator).
pub fn sign(
    ed: &EdwardsCurve,
    msg: &[u8],
    seed: &[u8],
    ph: Option<bool>,
    ctx: &[u8],
) -> Option<Vec<u8>> {
    let d = dom(ed, ph, ctx)?;
    let ex = expand(ed, seed)?;
    let a_point = ed.mul_g(&ex.a);
    let mut pubkey = vec![0u8; ed.adj_size];
    ed.export(&a_point, &mut pubkey);

    let mut r = hash_to_scalar(ed, &[&d, &ex.prefix[..ex.prefix_len], msg]);
    let r_point = ed.mul_g(&r);
    let mut sig = vec![0u8; 2 * ed.adj_size];
    {
        let (rb, _) = sig.split_at_mut(ed.adj_size);
        ed.export(&r_point, rb);
    }
    let e = hash_to_scalar(ed, &[&d, &sig[..ed.adj_size], &pubkey, msg]);
    let mut s = ed.sc.add(&r, &ed.sc.mul(&e, &ex.a));
    ed.sc.export_le(&s, &mut sig[ed.adj_size..ed.adj_size + ed.sc.size]);
    r.zeroize();
    s.zeroize();
    Some(sig)
}

fn parse_s(ed: &EdwardsCurve, bytes: &[u8]) -> Option<Sc> {
    // trailing bytes beyond the scalar width must be zero
    if bytes[ed.sc.size..].iter().any(|&b| b != 0) {
        return None;
    }
    ed.sc.import_le(&bytes[..ed.sc.size])
}

fn recompute(
    ed: &EdwardsCurve,
    msg: &[u8],
    sig: &[u8],
    pubkey: &[u8],
    ph: Option<bool>,
    ctx: &[u8],
) -> Option<(Xge, Xge)> {
    if sig.len() != 2 * ed.adj_size || pubkey.len() != ed.adj_size {
        return None;
    }
    let d = dom(ed, ph, ctx)?;
    let r_point = ed.import(&sig[..ed.adj_size])?;
    let a_point = ed.import(pubkey)?;
    let s = parse_s(ed, &sig[ed.adj_size..])?;
    let e = hash_to_scalar(ed, &[&d, &sig[..ed.adj_size], pubkey, msg]);
    // s*G - e*A, exact also in the presence of torsion
    let check = ed.mul_double_var(&s, &ed.xge_neg(&a_point), &e);
    Some((check, r_point))
}

/// Cofactorless verification: `s*G - e*A == R`.
pub fn verify(
    ed: &EdwardsCurve,
    msg: &[u8],
    sig: &[u8],
    pubkey: &[u8],
    ph: Option<bool>,
    ctx: &[u8],
) -> bool {
    match recompute(ed, msg, sig, pubkey, ph, ctx) {
        Some((check, r_point)) => ed.xge_equal(&check, &r_point),
        None => false,
    }
}

/// Cofactor-multiplied single verification (strict RFC 8032):
/// `[h](s*G - e*A - R) == O`.
pub fn verify_single_cofactor(
    ed: &EdwardsCurve,
    msg: &[u8],
    sig: &[u8],
    pubkey: &[u8],
    ph: Option<bool>,
    ctx: &[u8],
) -> bool {
    match recompute(ed, msg, sig, pubkey, ph, ctx) {
        Some((check, r_point)) => {
            let diff = ed.xge_sub(&check, &r_point);
            ed.xge_is_zero(&ed.xge_mulh(&diff))
        }
        None => false,
    }
}

/// Batch verification: accumulate `(R_i, A_i)` with DRBG coefficients,
/// flush through the multi-scalar path, cofactor-multiplied.
pub fn batch_verify(
    ed: &EdwardsCurve,
    scratch: &mut Scratch<Xge>,
    items: &[(&[u8], &[u8], &[u8])],
    ph: Option<bool>,
    ctx: &[u8],
) -> bool {
    let Some(d) = dom(ed, ph, ctx) else {
        return false;
    };
    let sc = &ed.sc;
    let mut seed_h = Hasher::new(crate::hash::HashKind::Sha256);
    for (msg, sig, pubkey) in items {
        let mut mh = [0u8; 32];
        hash_into(crate::hash::HashKind::Sha256, &[msg], &mut mh);
        seed_h.update(sig);
        seed_h.update(pubkey);
        seed_h.update(&mh);
    }
    let mut seed = [0u8; 32];
    seed_h.finalize_into(&mut seed);
    let mut drbg = HmacDrbg::new(ed.hash, &seed);

    let mut sum = Sc::ZERO;
    let mut pts = [ed.xge_zero(); crate::group::SCRATCH_POINTS];
    let mut cfs = [Sc::ZERO; crate::group::SCRATCH_POINTS];
    let mut count = 0;
    let mut first = true;
    for (msg, sig, pubkey) in items {
        if sig.len() != 2 * ed.adj_size || pubkey.len() != ed.adj_size {
            return false;
        }
        let Some(r_point) = ed.import(&sig[..ed.adj_size]) else {
            return false;
        };
        let Some(a_point) = ed.import(pubkey) else {
            return false;
        };
        let Some(s) = parse_s(ed, &sig[ed.adj_size..]) else {
            return false;
        };
        let e = hash_to_scalar(ed, &[&d, &sig[..ed.adj_size], pubkey, msg]);
        let ai = if first { sc.from_word(1) } else { sc.random(&mut drbg) };
        first = false;
        sum = sc.add(&sum, &sc.mul(&ai, &s));
        pts[count] = ed.xge_neg(&r_point);
        cfs[count] = ai;
        pts[count + 1] = ed.xge_neg(&a_point);
        cfs[count + 1] = sc.mul(&ai, &e);
        count += 2;
        if count == crate::group::SCRATCH_POINTS {
            let t = ed.mul_multi_var(scratch, &sum, &pts[..count], &cfs[..count]);
            if !ed.xge_is_zero(&ed.xge_mulh(&t)) {
                return false;
            }
            sum = Sc::ZERO;
            count = 0;
        }
    }
    let t = ed.mul_multi_var(scratch, &sum, &pts[..count], &cfs[..count]);
    ed.xge_is_zero(&ed.xge_mulh(&t))
}
