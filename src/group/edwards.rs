//! Twisted Edwards curves: `a*x^2 + y^2 = 1 + d*x^2*y^2`.
//!
//! All arithmetic runs in extended coordinates (`Xge`). The addition
//! law is unified and complete for the supported curves, so the
//! identity and doubling need no masking at all; two kernels exist, the
//! general one and the Hisil–Wong–Carter–Dawson variant for `a = -1`.
//!
//! Each curve carries a Montgomery companion model: an isomorphism
//! (scaled birational maps) for edwards25519 and curve1174, and the
//! 4-isogeny pair for edwards448. Elligator 2 hashing is inherited
//! through that model.

use zeroize::Zeroize;

use crate::curves::CurveId;
use crate::field::{Fe, PrimeField};
use crate::group::montgomery::{elligator2, elligator2_invert};
use crate::group::{SCRATCH_POINTS, Scratch};
use crate::hash::HashKind;
use crate::primitives::{Limb, mask_of, nonzero_mask};
use crate::rng::HmacDrbg;
use crate::scalar::{
    MAX_NAF_LEN, MAX_WND_STEPS, Sc, ScalarField, jsf_var, recode_wnd4, wnaf_var,
};

/// Extended point `(X : Y : Z : T)` with `T = X*Y/Z`, `Z != 0`.
#[derive(Clone, Copy, Debug)]
pub struct Xge {
    pub(crate) x: Fe,
    pub(crate) y: Fe,
    pub(crate) z: Fe,
    pub(crate) t: Fe,
}

/// Montgomery companion relation.
enum MontModel {
    /// Scaled birational isomorphism with constant `c`,
    /// `c^2 = (A ± 2)/(B*a)`; `invert` selects the sign and swaps the
    /// map roles.
    Iso { c: Fe, invert: bool },
    /// The edwards448/curve448 4-isogeny; `dinv` is the inverse of the
    /// composition degree mod `n`.
    Iso448 { dinv: Sc },
}

/// A twisted Edwards curve context.
pub struct EdwardsCurve {
    pub id: CurveId,
    pub(crate) fe: PrimeField,
    pub(crate) sc: ScalarField,
    pub hash: HashKind,
    a: Fe,
    d: Fe,
    /// `2d` for the `a = -1` kernel.
    k2d: Fe,
    a_is_m1: bool,
    pub(crate) g: Xge,
    pub(crate) h: u32,
    /// Encoded-point length: field size plus a sign byte when the field
    /// is byte-aligned.
    pub(crate) adj_size: usize,
    /// Whether the EdDSA `dom` prefix is always present (Ed448).
    pub(crate) ctx_always: bool,
    pub(crate) dom_prefix: &'static [u8],
    pub(crate) clamp: fn(&mut [u8]),
    // Montgomery companion
    m_a: Fe,
    m_b: Fe,
    m_z: Fe,
    model: MontModel,
    comb: Box<[Xge]>,
    comb_steps: usize,
    naf_g: Box<[Xge]>,
    blind: Sc,
    unblind: Xge,
}

impl EdwardsCurve {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        id: CurveId,
        fe: PrimeField,
        sc: ScalarField,
        hash: HashKind,
        d: &[Limb],
        a_word: i64,
        gx: &[Limb],
        gy: &[Limb],
        mont_a: Option<u64>,
        iso_degree: u32,
        map_z: i64,
        h: u32,
        ctx_always: bool,
        dom_prefix: &'static [u8],
        clamp: fn(&mut [u8]),
    ) -> EdwardsCurve {
        let a = fe.from_int(a_word);
        let dm = fe.to_mont(&lift(d));
        let k2d = fe.dbl(&dm);
        let a_is_m1 = fe.equal(&a, &fe.neg(&fe.one)) != 0;
        let gxm = fe.to_mont(&lift(gx));
        let gym = fe.to_mont(&lift(gy));
        let g = Xge { x: gxm, y: gym, z: fe.one, t: fe.mul(&gxm, &gym) };
        // Montgomery companion: the registry model when one exists,
        // otherwise the birational A = 2(a+d)/(a-d), B = 4/(a-d).
        let (m_a, m_b) = match mont_a {
            Some(w) => (fe.from_word(w), fe.from_word(1)),
            None => {
                let ad = fe.invert(&fe.sub(&a, &dm));
                let m_a = fe.mul(&fe.dbl(&fe.add(&a, &dm)), &ad);
                let m_b = fe.mul(&fe.from_word(4), &ad);
                (m_a, m_b)
            }
        };
        let model = if iso_degree > 1 {
            MontModel::Iso448 { dinv: sc.invert(&sc.from_word(iso_degree as u64)) }
        } else {
            // c^2 = (A + 2)/(B*a), falling back to (A - 2)/(B*a)
            let ba = fe.invert(&fe.mul(&m_b, &a));
            let c2 = fe.mul(&fe.add(&m_a, &fe.from_word(2)), &ba);
            let (c, ok) = fe.sqrt(&c2);
            if ok != 0 {
                MontModel::Iso { c, invert: false }
            } else {
                let c2 = fe.mul(&fe.sub(&m_a, &fe.from_word(2)), &ba);
                let (c, ok) = fe.sqrt(&c2);
                debug_assert!(ok != 0, "montgomery scale constant");
                MontModel::Iso { c, invert: true }
            }
        };
        let adj_size = fe.size + usize::from(fe.bits % 8 == 0);
        let m_z = fe.from_int(map_z);
        let mut curve = EdwardsCurve {
            id,
            a,
            d: dm,
            k2d,
            a_is_m1,
            g,
            h,
            adj_size,
            ctx_always,
            dom_prefix,
            clamp,
            m_a,
            m_b,
            m_z,
            model,
            comb: Box::new([]),
            comb_steps: 0,
            naf_g: Box::new([]),
            blind: Sc::ZERO,
            unblind: Xge { x: Fe::ZERO, y: fe.one, z: fe.one, t: Fe::ZERO },
            hash,
            fe,
            sc,
        };
        curve.precompute();
        curve
    }

    fn precompute(&mut self) {
        let steps = self.sc.bits.div_ceil(4) + 1;
        self.comb_steps = steps;
        let mut tab = vec![self.xge_zero(); steps * 16];
        let mut base = self.g;
        for i in 0..steps {
            let mut acc = self.xge_zero();
            for j in 1..16 {
                acc = self.xge_add(&acc, &base);
                tab[i * 16 + j] = acc;
            }
            for _ in 0..4 {
                base = self.xge_dbl(&base);
            }
        }
        self.comb = self.normalize_batch(&tab);

        let mut ntab = vec![self.xge_zero(); 64];
        let g2 = self.xge_dbl(&self.g);
        ntab[0] = self.g;
        for i in 1..64 {
            ntab[i] = self.xge_add(&ntab[i - 1], &g2);
        }
        self.naf_g = self.normalize_batch(&ntab);
    }

    /// Batch normalization to `Z = 1` (public points only).
    fn normalize_batch(&self, points: &[Xge]) -> Box<[Xge]> {
        let f = &self.fe;
        let n = points.len();
        let mut prefix = vec![f.one; n + 1];
        for i in 0..n {
            prefix[i + 1] = f.mul(&prefix[i], &points[i].z);
        }
        let mut inv = f.invert(&prefix[n]);
        let mut out = vec![self.xge_zero(); n];
        for i in (0..n).rev() {
            let zi = f.mul(&inv, &prefix[i]);
            inv = f.mul(&inv, &points[i].z);
            let x = f.mul(&points[i].x, &zi);
            let y = f.mul(&points[i].y, &zi);
            out[i] = Xge { x, y, z: f.one, t: f.mul(&x, &y) };
        }
        out.into_boxed_slice()
    }

    /// Refreshes the blinding pair from caller entropy.
    pub fn randomize(&mut self, entropy: &[u8; 32]) {
        let mut drbg = HmacDrbg::new(self.hash, entropy);
        let mut blind = self.sc.random(&mut drbg);
        let neg = self.sc.neg(&blind);
        self.unblind = self.mul(&self.g, &neg);
        core::mem::swap(&mut self.blind, &mut blind);
        blind.zeroize();
    }

    pub fn field(&self) -> &PrimeField {
        &self.fe
    }

    pub fn scalar_field(&self) -> &ScalarField {
        &self.sc
    }

    pub fn generator(&self) -> Xge {
        self.g
    }

    /// Encoded point and signature-half length for this curve.
    pub fn encoded_size(&self) -> usize {
        self.adj_size
    }

    // ------------------------------------------------------------ points

    pub fn xge_zero(&self) -> Xge {
        Xge { x: Fe::ZERO, y: self.fe.one, z: self.fe.one, t: Fe::ZERO }
    }

    pub fn xge_is_zero(&self, p: &Xge) -> bool {
        let f = &self.fe;
        (f.is_zero(&p.x) & f.equal(&p.y, &p.z)) != 0
    }

    pub fn xge_neg(&self, p: &Xge) -> Xge {
        let f = &self.fe;
        Xge { x: f.neg(&p.x), y: p.y, z: p.z, t: f.neg(&p.t) }
    }

    fn xge_cnd_neg(&self, p: &Xge, mask: Limb) -> Xge {
        let f = &self.fe;
        Xge { x: f.cnd_neg(&p.x, mask), y: p.y, z: p.z, t: f.cnd_neg(&p.t, mask) }
    }

    fn xge_select(&self, a: &Xge, b: &Xge, mask: Limb) -> Xge {
        let f = &self.fe;
        Xge {
            x: f.select(&a.x, &b.x, mask),
            y: f.select(&a.y, &b.y, mask),
            z: f.select(&a.z, &b.z, mask),
            t: f.select(&a.t, &b.t, mask),
        }
    }

    pub fn xge_equal(&self, p: &Xge, q: &Xge) -> bool {
        let f = &self.fe;
        let xe = f.equal(&f.mul(&p.x, &q.z), &f.mul(&q.x, &p.z));
        let ye = f.equal(&f.mul(&p.y, &q.z), &f.mul(&q.y, &p.z));
        (xe & ye) != 0
    }

    pub fn xge_from_affine(&self, x: &Fe, y: &Fe) -> Xge {
        Xge { x: *x, y: *y, z: self.fe.one, t: self.fe.mul(x, y) }
    }

    pub fn xge_to_affine(&self, p: &Xge) -> (Fe, Fe) {
        let f = &self.fe;
        let zi = f.invert(&p.z);
        (f.mul(&p.x, &zi), f.mul(&p.y, &zi))
    }

    /// Validates the extended-coordinate invariants.
    pub fn xge_validate(&self, p: &Xge) -> bool {
        let f = &self.fe;
        let x2 = f.sqr(&p.x);
        let y2 = f.sqr(&p.y);
        let z2 = f.sqr(&p.z);
        let lhs = f.mul(&f.add(&f.mul(&self.a, &x2), &y2), &z2);
        let rhs = f.add(&f.sqr(&z2), &f.mul(&self.d, &f.mul(&x2, &y2)));
        let tz = f.equal(&f.mul(&p.t, &p.z), &f.mul(&p.x, &p.y));
        (f.equal(&lhs, &rhs) & tz & !f.is_zero(&p.z)) != 0
    }

    /// Unified addition: HWCD for `a = -1`, the general kernel
    /// otherwise. Complete; handles doubling and the identity.
    pub fn xge_add(&self, p: &Xge, q: &Xge) -> Xge {
        let f = &self.fe;
        if self.a_is_m1 {
            // add-2008-hwcd-3
            let a = f.mul(&f.sub(&p.y, &p.x), &f.sub(&q.y, &q.x));
            let b = f.mul(&f.add(&p.y, &p.x), &f.add(&q.y, &q.x));
            let c = f.mul(&f.mul(&p.t, &self.k2d), &q.t);
            let d = f.dbl(&f.mul(&p.z, &q.z));
            let e = f.sub(&b, &a);
            let ff = f.sub(&d, &c);
            let g = f.add(&d, &c);
            let h = f.add(&b, &a);
            Xge { x: f.mul(&e, &ff), y: f.mul(&g, &h), z: f.mul(&ff, &g), t: f.mul(&e, &h) }
        } else {
            // add-2008-hwcd
            let a = f.mul(&p.x, &q.x);
            let b = f.mul(&p.y, &q.y);
            let c = f.mul(&f.mul(&self.d, &p.t), &q.t);
            let d = f.mul(&p.z, &q.z);
            let e = {
                let t = f.mul(&f.add(&p.x, &p.y), &f.add(&q.x, &q.y));
                f.sub(&f.sub(&t, &a), &b)
            };
            let ff = f.sub(&d, &c);
            let g = f.add(&d, &c);
            let h = f.sub(&b, &f.mul(&self.a, &a));
            Xge { x: f.mul(&e, &ff), y: f.mul(&g, &h), z: f.mul(&ff, &g), t: f.mul(&e, &h) }
        }
    }

    /// Doubling (dbl-2008-hwcd).
    pub fn xge_dbl(&self, p: &Xge) -> Xge {
        let f = &self.fe;
        let a = f.sqr(&p.x);
        let b = f.sqr(&p.y);
        let c = f.dbl(&f.sqr(&p.z));
        let d = f.mul(&self.a, &a);
        let e = {
            let t = f.sqr(&f.add(&p.x, &p.y));
            f.sub(&f.sub(&t, &a), &b)
        };
        let g = f.add(&d, &b);
        let ff = f.sub(&g, &c);
        let h = f.sub(&d, &b);
        Xge { x: f.mul(&e, &ff), y: f.mul(&g, &h), z: f.mul(&ff, &g), t: f.mul(&e, &h) }
    }

    pub fn xge_sub(&self, p: &Xge, q: &Xge) -> Xge {
        self.xge_add(p, &self.xge_neg(q))
    }

    /// Multiplies by the cofactor through repeated doubling.
    pub fn xge_mulh(&self, p: &Xge) -> Xge {
        let mut r = *p;
        let mut h = self.h;
        while h > 1 {
            r = self.xge_dbl(&r);
            h >>= 1;
        }
        r
    }

    /// Order multiplication for the torsion-freeness test; variable
    /// time, public points only.
    pub fn is_torsion_free_var(&self, p: &Xge) -> bool {
        let mut r = self.xge_zero();
        for i in (0..self.sc.bits).rev() {
            r = self.xge_dbl(&r);
            if crate::primitives::get_bit(&self.sc.n[..self.sc.limbs], i) == 1 {
                r = self.xge_add(&r, p);
            }
        }
        self.xge_is_zero(&r)
    }

    pub fn is_small(&self, p: &Xge) -> bool {
        !self.xge_is_zero(p) && self.xge_is_zero(&self.xge_mulh(p))
    }

    // ------------------------------------------------------------ ladders

    fn table_select(&self, table: &[Xge; 8], digit: i8) -> Xge {
        let neg = mask_of(((digit as i16 >> 8) & 1) as Limb);
        let abs = ((digit as i16 ^ (digit as i16 >> 8)) - (digit as i16 >> 8)) as u64;
        let mut r = self.xge_zero();
        for (j, entry) in table.iter().enumerate() {
            let m = !nonzero_mask(abs ^ (j as u64 + 1));
            r = self.xge_select(&r, entry, m);
        }
        self.xge_cnd_neg(&r, neg)
    }

    fn build_table(&self, p: &Xge) -> [Xge; 8] {
        let mut t = [*p; 8];
        for i in 1..8 {
            t[i] = self.xge_add(&t[i - 1], p);
        }
        t
    }

    /// Constant-time variable-point multiplication (width-4 signed
    /// digits).
    pub fn mul(&self, p: &Xge, k: &Sc) -> Xge {
        let mut digits = [0i8; MAX_WND_STEPS];
        let steps = recode_wnd4(&self.sc, k, self.sc.bits, &mut digits);
        let table = self.build_table(p);
        let mut acc = self.xge_zero();
        for i in (0..steps).rev() {
            for _ in 0..4 {
                acc = self.xge_dbl(&acc);
            }
            acc = self.xge_add(&acc, &self.table_select(&table, digits[i]));
        }
        digits.zeroize();
        acc
    }

    /// Blinded constant-time generator multiplication (fixed-window
    /// comb, structure shared with the Weierstrass path).
    pub fn mul_g(&self, k: &Sc) -> Xge {
        let mut kb = self.sc.add(k, &self.blind);
        let mut acc = self.unblind;
        for i in 0..self.comb_steps {
            let w = self.sc.window(&kb, i * 4, 4);
            let window = &self.comb[i * 16..i * 16 + 16];
            let mut entry = self.xge_zero();
            for (j, cand) in window.iter().enumerate() {
                let m = !nonzero_mask(w ^ j as u64);
                entry = self.xge_select(&entry, cand, m);
            }
            acc = self.xge_add(&acc, &entry);
        }
        kb.zeroize();
        acc
    }

    /// `k0*G + sum coeffs[i]*points[i]`, variable time; same shape as
    /// the Weierstrass multi-multiplication.
    pub fn mul_multi_var(
        &self,
        scratch: &mut Scratch<Xge>,
        k0: &Sc,
        points: &[Xge],
        coeffs: &[Sc],
    ) -> Xge {
        assert!(points.len() == coeffs.len() && points.len() <= SCRATCH_POINTS);
        let mut naf0 = [0i8; MAX_NAF_LEN];
        let naf0_len = wnaf_var(&self.sc, k0, 8, &mut naf0);

        let pairs = points.len() / 2;
        let mut max_len = naf0_len;
        for i in 0..pairs {
            let (a, b) = (&points[2 * i], &points[2 * i + 1]);
            scratch.tables[4 * i] = *a;
            scratch.tables[4 * i + 1] = *b;
            scratch.tables[4 * i + 2] = self.xge_add(a, b);
            scratch.tables[4 * i + 3] = self.xge_sub(a, b);
            let o = i * MAX_NAF_LEN;
            let mut b1 = [0i8; MAX_NAF_LEN];
            let mut b2 = [0i8; MAX_NAF_LEN];
            let len = jsf_var(&self.sc, &coeffs[2 * i], &coeffs[2 * i + 1], &mut b1, &mut b2);
            scratch.jsf1[o..o + len].copy_from_slice(&b1[..len]);
            scratch.jsf2[o..o + len].copy_from_slice(&b2[..len]);
            scratch.lens[i] = len;
            max_len = max_len.max(len);
        }
        let mut single_naf = [0i8; MAX_NAF_LEN];
        let mut single_len = 0;
        if points.len() % 2 == 1 {
            let p = points[points.len() - 1];
            let p2 = self.xge_dbl(&p);
            scratch.single[0] = p;
            for i in 1..4 {
                scratch.single[i] = self.xge_add(&scratch.single[i - 1], &p2);
            }
            single_len = wnaf_var(&self.sc, &coeffs[points.len() - 1], 4, &mut single_naf);
            max_len = max_len.max(single_len);
        }

        let mut acc = self.xge_zero();
        for b in (0..max_len).rev() {
            acc = self.xge_dbl(&acc);
            if b < naf0_len && naf0[b] != 0 {
                let d = naf0[b];
                let e = self.naf_g[(d.unsigned_abs() as usize) / 2];
                let q = if d > 0 { e } else { self.xge_neg(&e) };
                acc = self.xge_add(&acc, &q);
            }
            for i in 0..pairs {
                if b >= scratch.lens[i] {
                    continue;
                }
                let u1 = scratch.jsf1[i * MAX_NAF_LEN + b];
                let u2 = scratch.jsf2[i * MAX_NAF_LEN + b];
                if u1 == 0 && u2 == 0 {
                    continue;
                }
                let (idx, neg) = match (u1, u2) {
                    (1, 0) => (0, false),
                    (-1, 0) => (0, true),
                    (0, 1) => (1, false),
                    (0, -1) => (1, true),
                    (1, 1) => (2, false),
                    (-1, -1) => (2, true),
                    (1, -1) => (3, false),
                    _ => (3, true),
                };
                let q = scratch.tables[4 * i + idx];
                let q = if neg { self.xge_neg(&q) } else { q };
                acc = self.xge_add(&acc, &q);
            }
            if b < single_len && single_naf[b] != 0 {
                let d = single_naf[b];
                let q = scratch.single[(d.unsigned_abs() as usize) / 2];
                let q = if d > 0 { q } else { self.xge_neg(&q) };
                acc = self.xge_add(&acc, &q);
            }
        }
        acc
    }

    /// `k0*G + k1*P`, variable time; stack tables, no scratch.
    pub fn mul_double_var(&self, k0: &Sc, p: &Xge, k1: &Sc) -> Xge {
        let mut naf0 = [0i8; MAX_NAF_LEN];
        let n0 = wnaf_var(&self.sc, k0, 8, &mut naf0);
        let mut naf1 = [0i8; MAX_NAF_LEN];
        let n1 = wnaf_var(&self.sc, k1, 4, &mut naf1);
        let p2 = self.xge_dbl(p);
        let mut tbl = [*p; 4];
        for i in 1..4 {
            tbl[i] = self.xge_add(&tbl[i - 1], &p2);
        }
        let mut acc = self.xge_zero();
        for b in (0..n0.max(n1)).rev() {
            acc = self.xge_dbl(&acc);
            if b < n0 && naf0[b] != 0 {
                let d = naf0[b];
                let e = self.naf_g[(d.unsigned_abs() as usize) / 2];
                let q = if d > 0 { e } else { self.xge_neg(&e) };
                acc = self.xge_add(&acc, &q);
            }
            if b < n1 && naf1[b] != 0 {
                let d = naf1[b];
                let q = tbl[(d.unsigned_abs() as usize) / 2];
                let q = if d > 0 { q } else { self.xge_neg(&q) };
                acc = self.xge_add(&acc, &q);
            }
        }
        acc
    }

    pub fn scratch(&self) -> Scratch<Xge> {
        Scratch::new(self.xge_zero())
    }

    // ------------------------------------------------------------ byte io

    /// Compressed export: little-endian `y` with the sign of `x` in the
    /// top bit (or the trailing sign byte for byte-aligned fields).
    pub fn export(&self, p: &Xge, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.adj_size);
        let f = &self.fe;
        let (x, y) = self.xge_to_affine(p);
        let sign = (f.is_odd(&x) & 1) as u8;
        f.to_bytes_le(&y, &mut out[..f.size]);
        if self.fe.bits % 8 == 0 {
            out[f.size] = sign << 7;
        } else {
            out[f.size - 1] |= sign << 7;
        }
    }

    /// Compressed import; strict: non-canonical `y` and an impossible
    /// sign bit are rejected.
    pub fn import(&self, bytes: &[u8]) -> Option<Xge> {
        if bytes.len() != self.adj_size {
            return None;
        }
        let f = &self.fe;
        let sign;
        let mut ybytes = [0u8; 66];
        if f.bits % 8 == 0 {
            if bytes[f.size] & 0x7f != 0 {
                return None;
            }
            sign = (bytes[f.size] >> 7) as Limb;
            ybytes[..f.size].copy_from_slice(&bytes[..f.size]);
        } else {
            sign = (bytes[f.size - 1] >> 7) as Limb;
            ybytes[..f.size].copy_from_slice(&bytes[..f.size]);
            ybytes[f.size - 1] &= 0x7f;
        }
        let y = f.from_bytes_le(&ybytes[..f.size])?;
        // x^2 = (y^2 - 1)/(d*y^2 - a)
        let y2 = f.sqr(&y);
        let u = f.sub(&y2, &f.one);
        let v = f.sub(&f.mul(&self.d, &y2), &self.a);
        let (mut x, ok) = f.isqrt(&u, &v);
        if ok == 0 {
            return None;
        }
        if f.is_zero(&x) != 0 && sign == 1 {
            return None;
        }
        x = f.cnd_neg(&x, mask_of((f.is_odd(&x) ^ sign) & 1));
        Some(self.xge_from_affine(&x, &y))
    }

    // ----------------------------------------------------- mont companion

    /// Converts to the Montgomery companion model. Fails on the
    /// exceptional points (identity, 2-torsion and their images).
    pub fn to_mont(&self, p: &Xge) -> Option<(Fe, Fe)> {
        let f = &self.fe;
        let (x, y) = self.xge_to_affine(p);
        match &self.model {
            MontModel::Iso { c, invert } => {
                // u = (1 + y)/(1 - y), v = c*u/x (roles swapped under
                // `invert`)
                let (num, den) = if *invert {
                    (f.sub(&f.one, &y), f.add(&f.one, &y))
                } else {
                    (f.add(&f.one, &y), f.sub(&f.one, &y))
                };
                if f.is_zero(&den) != 0 || f.is_zero(&x) != 0 {
                    return None;
                }
                let u = f.mul(&num, &f.invert(&den));
                let v = f.mul(&f.mul(c, &u), &f.invert(&x));
                Some((u, v))
            }
            MontModel::Iso448 { .. } => {
                // u = y^2/x^2, v = y*(2 - x^2 - y^2)/x^3
                if f.is_zero(&x) != 0 {
                    return None;
                }
                let x2 = f.sqr(&x);
                let y2 = f.sqr(&y);
                let xi = f.invert(&x);
                let xi2 = f.sqr(&xi);
                let u = f.mul(&y2, &xi2);
                let w = f.sub(&f.sub(&f.dbl(&f.one), &x2), &y2);
                let v = f.mul(&f.mul(&y, &w), &f.mul(&xi2, &xi));
                Some((u, v))
            }
        }
    }

    /// Converts from the Montgomery companion model. Fails on the
    /// exceptional inputs.
    pub fn from_mont(&self, u: &Fe, v: &Fe) -> Option<Xge> {
        let f = &self.fe;
        match &self.model {
            MontModel::Iso { c, invert } => {
                if f.is_zero(v) != 0 {
                    return None;
                }
                let x = f.mul(&f.mul(c, u), &f.invert(v));
                let (num, den) = if *invert {
                    (f.sub(&f.one, u), f.add(&f.one, u))
                } else {
                    (f.sub(u, &f.one), f.add(u, &f.one))
                };
                if f.is_zero(&den) != 0 {
                    return None;
                }
                let y = f.mul(&num, &f.invert(&den));
                let p = self.xge_from_affine(&x, &y);
                if self.xge_validate(&p) { Some(p) } else { None }
            }
            MontModel::Iso448 { .. } => {
                // x = 4v(u^2 - 1)/(u^4 + 4u^3 + (4A-2)u^2 + 4u + 1)
                // y = (u^4 - 4u^3 - (4A+2)u^2 - 4u + 1)
                //   / (u^4 + 2Au^3 + 6u^2 + 2Au + 1)
                let u2 = f.sqr(u);
                let u3 = f.mul(&u2, u);
                let u4 = f.sqr(&u2);
                let a4 = f.dbl(&f.dbl(&self.m_a));
                let a2 = f.dbl(&self.m_a);
                let four = |x: &Fe| f.dbl(&f.dbl(x));
                let dx = {
                    let t = f.add(&u4, &four(&u3));
                    let t = f.add(&t, &f.mul(&f.sub(&a4, &f.dbl(&f.one)), &u2));
                    f.add(&f.add(&t, &four(u)), &f.one)
                };
                let dy = {
                    let t = f.add(&u4, &f.mul(&a2, &u3));
                    let t = f.add(&t, &f.mul(&f.from_word(6), &u2));
                    f.add(&f.add(&t, &f.mul(&a2, u)), &f.one)
                };
                if f.is_zero(&dx) != 0 || f.is_zero(&dy) != 0 {
                    return None;
                }
                let x = {
                    let n = f.mul(&four(v), &f.sub(&u2, &f.one));
                    f.mul(&n, &f.invert(&dx))
                };
                let y = {
                    let t = f.sub(&u4, &four(&u3));
                    let t = f.sub(&t, &f.mul(&f.add(&a4, &f.dbl(&f.one)), &u2));
                    let n = f.add(&f.sub(&t, &four(u)), &f.one);
                    f.mul(&n, &f.invert(&dy))
                };
                let p = self.xge_from_affine(&x, &y);
                if self.xge_validate(&p) { Some(p) } else { None }
            }
        }
    }

    // ------------------------------------------------------------ hashing

    /// Maps a field element to the curve through the Montgomery model.
    /// Exceptional conversions collapse to the identity.
    pub fn point_from_uniform(&self, u: &Fe) -> Xge {
        let (mx, my) = elligator2(&self.fe, &self.m_a, &self.m_b, &self.m_z, u);
        match self.from_mont(&mx, &my) {
            Some(p) => p,
            None => self.xge_zero(),
        }
    }

    /// Inverse map attempt under a 2-bit hint (one bit steers the
    /// Elligator branch, one the isogeny pre-division sign).
    pub fn point_to_uniform(&self, p: &Xge, hint: u8) -> Option<Fe> {
        let m = match &self.model {
            MontModel::Iso { .. } => self.to_mont(p)?,
            MontModel::Iso448 { dinv } => {
                // psi(phi(Q)) = [deg]Q: divide by the degree first, then
                // run the forward isogeny
                let q0 = self.mul(p, dinv);
                self.to_mont(&q0)?
            }
        };
        let (u, ok) = elligator2_invert(&self.fe, &self.m_a, &self.m_z, &m.0, &m.1, hint);
        if ok == 0 {
            return None;
        }
        let q = self.point_from_uniform(&u);
        if self.xge_equal(&q, p) { Some(u) } else { None }
    }

    /// Derives a point from a `2*field_size` uniform byte string.
    pub fn point_from_hash(&self, bytes: &[u8]) -> Option<Xge> {
        if bytes.len() != 2 * self.fe.size {
            return None;
        }
        let u1 = self.fe.from_bytes_le_reduce(&bytes[..self.fe.size])?;
        let u2 = self.fe.from_bytes_le_reduce(&bytes[self.fe.size..])?;
        let p = self.xge_add(&self.point_from_uniform(&u1), &self.point_from_uniform(&u2));
        if self.xge_is_zero(&p) { None } else { Some(p) }
    }

    /// Encodes a point as a uniform-looking byte string by rejection
    /// sampling over the inverse map.
    pub fn point_to_hash(&self, p: &Xge, entropy: &[u8; 32], out: &mut [u8]) -> bool {
        debug_assert_eq!(out.len(), 2 * self.fe.size);
        if self.xge_is_zero(p) {
            return false;
        }
        let mut drbg = HmacDrbg::new(self.hash, entropy);
        let mut buf = vec![0u8; self.fe.size + 1];
        for _ in 0..256 {
            drbg.generate(&mut buf);
            let Some(u1) = self.fe.from_bytes_le_reduce(&buf[..self.fe.size]) else {
                continue;
            };
            let q1 = self.point_from_uniform(&u1);
            let q2 = self.xge_sub(p, &q1);
            if self.xge_is_zero(&q2) {
                continue;
            }
            let hint = buf[self.fe.size] & 3;
            if let Some(u2) = self.point_to_uniform(&q2, hint) {
                self.fe.to_bytes_le(&u1, &mut out[..self.fe.size]);
                self.fe.to_bytes_le(&u2, &mut out[self.fe.size..]);
                return true;
            }
        }
        false
    }
}

fn lift(l: &[Limb]) -> Fe {
    let mut f = Fe::ZERO;
    f.0[..l.len()].copy_from_slice(l);
    f
}
