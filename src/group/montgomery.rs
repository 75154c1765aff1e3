//! Montgomery curves: `B*v^2 = u^3 + A*u^2 + u`.
//!
//! The ladder works on projective x/z pairs (`Pge`); affine points
//! (`Mge`) exist for conversions and the Elligator maps. Scalars arrive
//! as raw clamped byte strings, never reduced mod `n`, matching the
//! X25519/X448 function contracts.

use zeroize::Zeroize;

use crate::curves::CurveId;
use crate::field::{Fe, PrimeField};
use crate::hash::HashKind;
use crate::primitives::{Limb, mask_of};
use crate::scalar::{Sc, ScalarField};

/// Affine Montgomery point.
#[derive(Clone, Copy, Debug)]
pub struct Mge {
    pub(crate) x: Fe,
    pub(crate) y: Fe,
    pub(crate) inf: Limb,
}

/// Projective x-only point `(X : Z)`; `Z = 0` is the identity.
#[derive(Clone, Copy, Debug)]
pub struct Pge {
    pub(crate) x: Fe,
    pub(crate) z: Fe,
}

/// A Montgomery curve context.
pub struct MontCurve {
    pub id: CurveId,
    pub(crate) fe: PrimeField,
    pub(crate) sc: ScalarField,
    pub hash: HashKind,
    pub(crate) a: Fe,
    pub(crate) b: Fe,
    /// `(A - 2) / 4`, the ladder constant.
    a24: Fe,
    /// Elligator 2 parameter (a non-square).
    pub(crate) z: Fe,
    pub(crate) gu: Fe,
    pub(crate) h: u32,
    /// Scalar clamp applied at import (curve-specific bit surgery).
    pub(crate) clamp: fn(&mut [u8]),
}

impl MontCurve {
    pub(crate) fn build(
        id: CurveId,
        fe: PrimeField,
        sc: ScalarField,
        hash: HashKind,
        a_word: u64,
        b_word: u64,
        gu_word: u64,
        map_z: i64,
        h: u32,
        clamp: fn(&mut [u8]),
    ) -> MontCurve {
        let a = fe.from_word(a_word);
        let b = fe.from_word(b_word);
        let quarter = fe.invert(&fe.from_word(4));
        let a24 = fe.mul(&fe.sub(&a, &fe.from_word(2)), &quarter);
        let z = fe.from_int(map_z);
        let gu = fe.from_word(gu_word);
        MontCurve { id, a, b, a24, z, gu, h, clamp, fe, sc, hash }
    }

    pub fn field(&self) -> &PrimeField {
        &self.fe
    }

    pub fn scalar_field(&self) -> &ScalarField {
        &self.sc
    }

    /// The base point's u-coordinate.
    pub fn generator_u(&self) -> Fe {
        self.gu
    }

    // ------------------------------------------------------------ points

    pub fn pge_zero(&self) -> Pge {
        Pge { x: self.fe.one, z: Fe::ZERO }
    }

    pub fn pge_is_zero(&self, p: &Pge) -> bool {
        self.fe.is_zero(&p.z) != 0
    }

    pub fn mge_to_pge(&self, p: &Mge) -> Pge {
        let z = self.fe.select(&self.fe.one, &Fe::ZERO, mask_of(p.inf));
        Pge { x: p.x, z }
    }

    /// Normalized u-coordinate; zero for the identity (RFC 7748
    /// convention).
    pub fn pge_normalize(&self, p: &Pge) -> Fe {
        self.fe.mul(&p.x, &self.fe.invert(&p.z))
    }

    /// `u^3 + A*u^2 + u`.
    fn g_of(&self, u: &Fe) -> Fe {
        let f = &self.fe;
        let u2 = f.sqr(u);
        let u3 = f.mul(&u2, u);
        f.add(&f.add(&u3, &f.mul(&self.a, &u2)), u)
    }

    /// Recovers an affine point from a u-coordinate and a y parity bit.
    /// Fails when `g(u)/B` is not a square.
    pub fn mge_set_x(&self, u: &Fe, sign: Limb) -> Option<Mge> {
        let f = &self.fe;
        let (y, ok) = f.isqrt(&self.g_of(u), &self.b);
        if ok == 0 {
            return None;
        }
        let y = f.cnd_neg(&y, mask_of((f.is_odd(&y) ^ sign) & 1));
        Some(Mge { x: *u, y, inf: 0 })
    }

    pub fn mge_validate(&self, p: &Mge) -> bool {
        if p.inf == 1 {
            return true;
        }
        let f = &self.fe;
        let lhs = f.mul(&self.b, &f.sqr(&p.y));
        f.equal(&lhs, &self.g_of(&p.x)) != 0
    }

    // ------------------------------------------------------------ ladder

    /// One simultaneous differential add-and-double step.
    fn ladder_step(&self, x1: &Fe, p2: &mut Pge, p3: &mut Pge) {
        let f = &self.fe;
        let a = f.add(&p2.x, &p2.z);
        let aa = f.sqr(&a);
        let b = f.sub(&p2.x, &p2.z);
        let bb = f.sqr(&b);
        let e = f.sub(&aa, &bb);
        let c = f.add(&p3.x, &p3.z);
        let d = f.sub(&p3.x, &p3.z);
        let da = f.mul(&d, &a);
        let cb = f.mul(&c, &b);
        p3.x = f.sqr(&f.add(&da, &cb));
        p3.z = f.mul(x1, &f.sqr(&f.sub(&da, &cb)));
        p2.x = f.mul(&aa, &bb);
        p2.z = f.mul(&e, &f.add(&aa, &f.mul(&self.a24, &e)));
    }

    /// Montgomery ladder: `k * (u : 1)` for a clamped little-endian
    /// scalar. Constant time; the conditional swap runs on the XOR of
    /// consecutive bits.
    pub fn ladder(&self, u: &Fe, k: &[u8]) -> Pge {
        let f = &self.fe;
        let x1 = *u;
        let mut p2 = Pge { x: f.one, z: Fe::ZERO };
        let mut p3 = Pge { x: x1, z: f.one };
        let mut swap: Limb = 0;
        for i in (0..self.fe.bits).rev() {
            let bit = ((k[i / 8] >> (i % 8)) & 1) as Limb;
            swap ^= bit;
            f.swap(&mut p2.x, &mut p3.x, mask_of(swap));
            f.swap(&mut p2.z, &mut p3.z, mask_of(swap));
            swap = bit;
            self.ladder_step(&x1, &mut p2, &mut p3);
        }
        f.swap(&mut p2.x, &mut p3.x, mask_of(swap));
        f.swap(&mut p2.z, &mut p3.z, mask_of(swap));
        p3.x.0.zeroize();
        p3.z.0.zeroize();
        p2
    }

    /// Projective doubling (one ladder half-step).
    pub(crate) fn pge_dbl(&self, p: &Pge) -> Pge {
        let f = &self.fe;
        let a = f.add(&p.x, &p.z);
        let aa = f.sqr(&a);
        let b = f.sub(&p.x, &p.z);
        let bb = f.sqr(&b);
        let e = f.sub(&aa, &bb);
        Pge {
            x: f.mul(&aa, &bb),
            z: f.mul(&e, &f.add(&aa, &f.mul(&self.a24, &e))),
        }
    }

    /// Multiplies by the cofactor through repeated doubling.
    pub fn pge_mulh(&self, p: &Pge) -> Pge {
        let mut r = *p;
        let mut h = self.h;
        while h > 1 {
            r = self.pge_dbl(&r);
            h >>= 1;
        }
        r
    }

    /// A point is in the small subgroup when the cofactor kills it.
    pub fn is_small(&self, p: &Pge) -> bool {
        let q = self.pge_mulh(p);
        !self.pge_is_zero(p) && self.pge_is_zero(&q)
    }

    /// Torsion-freeness: the order must kill the point. Variable time,
    /// public points only.
    pub fn is_torsion_free_var(&self, u: &Fe) -> bool {
        let mut k = [0u8; 66];
        self.sc.export_le(&Sc(self.sc.n), &mut k[..self.sc.size]);
        let q = self.ladder(u, &k[..self.fe.size.max(self.sc.size)]);
        self.pge_is_zero(&q)
    }

    // ------------------------------------------------------------ byte io

    /// Little-endian u-coordinate import with high-bit masking and weak
    /// reduction (RFC 7748 semantics).
    pub fn import_x(&self, bytes: &[u8]) -> Option<Fe> {
        self.fe.from_bytes_le_reduce(bytes)
    }

    pub fn export_x(&self, u: &Fe, out: &mut [u8]) {
        self.fe.to_bytes_le(u, out);
    }

    // ------------------------------------------------------------ maps

    /// Elligator 2 forward map.
    pub fn point_from_uniform(&self, u: &Fe) -> Mge {
        let (x, y) = elligator2(&self.fe, &self.a, &self.b, &self.z, u);
        Mge { x, y, inf: 0 }
    }

    /// Elligator 2 inverse attempt under a 1-bit hint.
    pub fn point_to_uniform(&self, p: &Mge, hint: u8) -> Option<Fe> {
        if p.inf == 1 {
            return None;
        }
        let (u, ok) = elligator2_invert(&self.fe, &self.a, &self.z, &p.x, &p.y, hint);
        if ok == 0 {
            return None;
        }
        let q = self.point_from_uniform(&u);
        if self.fe.equal(&q.x, &p.x) & self.fe.equal(&q.y, &p.y) != 0 {
            Some(u)
        } else {
            None
        }
    }
}

/// Elligator 2 on `B*y^2 = x^3 + A*x^2 + x` with non-square `z`:
/// `x1 = -A/(1 + z*u^2)` (with the exceptional fixup to `-A`),
/// `x2 = -x1 - A`, picking the candidate whose `g(x)/B` is square;
/// the sign of `y` follows the sign of `u`. Constant time.
pub(crate) fn elligator2(f: &PrimeField, a: &Fe, b: &Fe, z: &Fe, u: &Fe) -> (Fe, Fe) {
    let t = f.add(&f.one, &f.mul(z, &f.sqr(u)));
    let neg_a = f.neg(a);
    let mut x = f.mul(&neg_a, &f.invert(&t));
    x = f.select(&x, &neg_a, f.is_zero(&x));
    let g = |x: &Fe| {
        let x2 = f.sqr(x);
        f.add(&f.add(&f.mul(&x2, x), &f.mul(a, &x2)), x)
    };
    let (y1, ok1) = f.isqrt(&g(&x), b);
    let x2 = f.sub(&neg_a, &x);
    let (y2, _) = f.isqrt(&g(&x2), b);
    let x = f.select(&x2, &x, ok1);
    let y = f.select(&y2, &y1, ok1);
    let flip = mask_of((f.is_odd(u) ^ f.is_odd(&y)) & 1);
    (x, f.cnd_neg(&y, flip))
}

/// Inverse of the Elligator 2 map: `u^2 = -(x + A)/(x*z)` or
/// `u^2 = -x/((x + A)*z)` by the hint bit; the sign of `u` follows the
/// sign of `y`.
pub(crate) fn elligator2_invert(
    f: &PrimeField,
    a: &Fe,
    z: &Fe,
    x: &Fe,
    y: &Fe,
    hint: u8,
) -> (Fe, Limb) {
    let case = mask_of((hint & 1) as Limb);
    let xa = f.add(x, a);
    let num = f.select(&f.neg(&xa), &f.neg(x), case);
    let den = f.select(&f.mul(x, z), &f.mul(&xa, z), case);
    let dz = f.is_zero(&den);
    let u2 = f.mul(&num, &f.invert(&den));
    let (u, ok) = f.sqrt(&u2);
    let flip = mask_of((f.is_odd(&u) ^ f.is_odd(y)) & 1);
    (f.cnd_neg(&u, flip), ok & !dz)
}
