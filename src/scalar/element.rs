use zeroize::Zeroize;

use crate::primitives::{
    Limb, add_n, bitlen_var, cnd_select, eq_mask, get_bit, lt_mask, mask_of, mul, sub_n,
    zero_mask,
};
use crate::rng::HmacDrbg;

/// Limb capacity of a scalar; nine limbs cover the P-521 order.
pub(crate) const MAX_SC_LIMBS: usize = 9;

/// Wide reduction buffer: `(limbs + 1) * 2` for the largest order.
pub(crate) const MAX_REDUCE_LIMBS: usize = (MAX_SC_LIMBS + 1) * 2;

/// A scalar, canonical value `< n`, plain little-endian limbs.
#[derive(Clone, Copy, Debug)]
pub struct Sc(pub(crate) [Limb; MAX_SC_LIMBS]);

impl Sc {
    pub(crate) const ZERO: Sc = Sc([0; MAX_SC_LIMBS]);
}

impl Zeroize for Sc {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Descriptor for the scalar ring modulo one curve order.
pub struct ScalarField {
    pub(crate) limbs: usize,
    pub(crate) bits: usize,
    /// Canonical byte length of an encoded scalar.
    pub(crate) size: usize,
    pub(crate) n: [Limb; MAX_SC_LIMBS],
    /// Barrett constant `⌊b^(2k) / n⌋`, `k` limbs plus one.
    mu: [Limb; MAX_SC_LIMBS + 1],
    /// `⌊n / 2⌋` for the high-half test.
    nh: [Limb; MAX_SC_LIMBS],
}

impl ScalarField {
    pub(crate) fn new(bits: usize, n: &[Limb], mu: &[Limb]) -> ScalarField {
        let limbs = n.len();
        debug_assert!(limbs <= MAX_SC_LIMBS && mu.len() == limbs + 1);
        let mut nl = [0; MAX_SC_LIMBS];
        nl[..limbs].copy_from_slice(n);
        let mut mul_ = [0; MAX_SC_LIMBS + 1];
        mul_[..limbs + 1].copy_from_slice(mu);
        let mut nh = nl;
        shr1(&mut nh[..limbs]);
        ScalarField { limbs, bits, size: bits.div_ceil(8), n: nl, mu: mul_, nh }
    }

    /// Canonical encoded length in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Order bit length.
    pub fn bits(&self) -> usize {
        self.bits
    }

    // ---------------------------------------------------------- reduction

    /// Barrett reduction of a `2k`-limb value (HAC 14.42).
    fn barrett(&self, x: &[Limb]) -> Sc {
        let k = self.limbs;
        debug_assert_eq!(x.len(), 2 * k);
        // q1 = x >> b^(k-1), k+1 limbs
        let q1 = &x[k - 1..];
        // q2 = q1 * mu
        let mut q2 = [0; MAX_REDUCE_LIMBS + 2];
        mul(&mut q2[..2 * k + 2], q1, &self.mu[..k + 1]);
        // q3 = q2 >> b^(k+1)
        let q3 = &q2[k + 1..2 * k + 2];
        // r = (x mod b^(k+1)) - q3 * n mod b^(k+1); non-negative, < 3n
        let mut q3n = [0; MAX_REDUCE_LIMBS + 2];
        mul(&mut q3n[..2 * k + 1], q3, &self.n[..k]);
        let mut r = [0; MAX_SC_LIMBS + 1];
        sub_n(&mut r[..k + 1], &x[..k + 1], &q3n[..k + 1]);
        // at most two subtractions of n
        let mut n1 = [0; MAX_SC_LIMBS + 1];
        n1[..k].copy_from_slice(&self.n[..k]);
        for _ in 0..2 {
            let mut s = [0; MAX_SC_LIMBS + 1];
            sub_n(&mut s[..k + 1], &r[..k + 1], &n1[..k + 1]);
            let geq = !lt_mask(&r[..k + 1], &n1[..k + 1]);
            let mut t = [0; MAX_SC_LIMBS + 1];
            cnd_select(&mut t[..k + 1], &r[..k + 1], &s[..k + 1], geq);
            r = t;
        }
        let mut out = Sc::ZERO;
        out.0[..k].copy_from_slice(&r[..k]);
        out
    }

    /// Reduces an `xn`-limb value mod `n`, absorbing from the top when
    /// the value exceeds the double-width window.
    pub(crate) fn reduce_wide(&self, x: &[Limb]) -> Sc {
        let k = self.limbs;
        let xn = x.len();
        let mut buf = [0; MAX_REDUCE_LIMBS];
        if xn <= 2 * k {
            buf[..xn].copy_from_slice(x);
            return self.barrett(&buf[..2 * k]);
        }
        let mut r = self.barrett(&x[xn - 2 * k..]);
        for i in (0..xn - 2 * k).rev() {
            // r = r * b + x[i]
            let mut t = [0; MAX_REDUCE_LIMBS];
            t[0] = x[i];
            t[1..k + 1].copy_from_slice(&r.0[..k]);
            r = self.barrett(&t[..2 * k]);
        }
        r
    }

    /// Single conditional subtraction; valid for values `< 2n`.
    fn reduce_weak(&self, a: &[Limb]) -> Sc {
        let k = self.limbs;
        let mut s = [0; MAX_SC_LIMBS];
        sub_n(&mut s[..k], &a[..k], &self.n[..k]);
        let geq = !lt_mask(&a[..k], &self.n[..k]);
        let mut r = Sc::ZERO;
        cnd_select(&mut r.0[..k], &a[..k], &s[..k], geq);
        r
    }

    // ---------------------------------------------------------- ring ops

    pub fn add(&self, a: &Sc, b: &Sc) -> Sc {
        let k = self.limbs;
        let mut t = [0; MAX_SC_LIMBS];
        let c = add_n(&mut t[..k], &a.0[..k], &b.0[..k]);
        let mut s = [0; MAX_SC_LIMBS];
        sub_n(&mut s[..k], &t[..k], &self.n[..k]);
        let geq = !lt_mask(&t[..k], &self.n[..k]);
        let mut r = Sc::ZERO;
        cnd_select(&mut r.0[..k], &t[..k], &s[..k], mask_of(c) | geq);
        r
    }

    pub fn sub(&self, a: &Sc, b: &Sc) -> Sc {
        let k = self.limbs;
        let mut t = [0; MAX_SC_LIMBS];
        let brw = sub_n(&mut t[..k], &a.0[..k], &b.0[..k]);
        let mut s = [0; MAX_SC_LIMBS];
        add_n(&mut s[..k], &t[..k], &self.n[..k]);
        let mut r = Sc::ZERO;
        cnd_select(&mut r.0[..k], &t[..k], &s[..k], mask_of(brw));
        r
    }

    pub fn neg(&self, a: &Sc) -> Sc {
        self.sub(&Sc::ZERO, a)
    }

    pub fn mul(&self, a: &Sc, b: &Sc) -> Sc {
        let k = self.limbs;
        let mut t = [0; MAX_REDUCE_LIMBS];
        mul(&mut t[..2 * k], &a.0[..k], &b.0[..k]);
        self.barrett(&t[..2 * k])
    }

    pub fn sqr(&self, a: &Sc) -> Sc {
        self.mul(a, a)
    }

    /// `round(a * b / 2^shift)` for a public `shift`. Constant time.
    pub(crate) fn mul_shift(&self, a: &Sc, b: &Sc, shift: usize) -> Sc {
        let k = self.limbs;
        let mut t = [0; MAX_REDUCE_LIMBS];
        mul(&mut t[..2 * k], &a.0[..k], &b.0[..k]);
        let rbit = (t[(shift - 1) / 64] >> ((shift - 1) % 64)) & 1;
        let wl = shift / 64;
        let wb = (shift % 64) as u32;
        let mut r = Sc::ZERO;
        for i in 0..k {
            let lo = if i + wl < 2 * k { t[i + wl] } else { 0 };
            let hi = if wb > 0 && i + wl + 1 < 2 * k { t[i + wl + 1] } else { 0 };
            r.0[i] = if wb == 0 { lo } else { (lo >> wb) | (hi << (64 - wb)) };
        }
        let mut rb = [0; MAX_SC_LIMBS];
        rb[0] = rbit;
        let mut out = Sc::ZERO;
        add_n(&mut out.0[..k], &r.0[..k], &rb[..k]);
        out
    }

    /// Fermat inversion, `a^(n-2)`. Maps zero to zero. Constant time.
    pub fn invert(&self, a: &Sc) -> Sc {
        let k = self.limbs;
        let mut e = [0; MAX_SC_LIMBS];
        let two = {
            let mut t = [0; MAX_SC_LIMBS];
            t[0] = 2;
            t
        };
        sub_n(&mut e[..k], &self.n[..k], &two[..k]);
        let mut r = self.from_word(1);
        for i in (0..self.bits).rev() {
            r = self.mul(&r, &r);
            if get_bit(&e[..k], i) == 1 {
                r = self.mul(&r, a);
            }
        }
        r
    }

    /// Binary extended-gcd inversion; variable time, public inputs only.
    pub fn invert_var(&self, a: &Sc) -> Sc {
        let k = self.limbs;
        if self.is_zero(a) != 0 {
            return Sc::ZERO;
        }
        let mut u = [0; MAX_SC_LIMBS];
        u[..k].copy_from_slice(&a.0[..k]);
        let mut v = self.n;
        let mut x1 = self.from_word(1);
        let mut x2 = Sc::ZERO;
        while !limbs_are_one(&u[..k]) && !limbs_are_one(&v[..k]) {
            while u[0] & 1 == 0 {
                shr1(&mut u[..k]);
                self.half(&mut x1);
            }
            while v[0] & 1 == 0 {
                shr1(&mut v[..k]);
                self.half(&mut x2);
            }
            if crate::primitives::cmp_var(&u[..k], &v[..k]) != core::cmp::Ordering::Less {
                let mut d = [0; MAX_SC_LIMBS];
                sub_n(&mut d[..k], &u[..k], &v[..k]);
                u[..k].copy_from_slice(&d[..k]);
                x1 = self.sub(&x1, &x2);
            } else {
                let mut d = [0; MAX_SC_LIMBS];
                sub_n(&mut d[..k], &v[..k], &u[..k]);
                v[..k].copy_from_slice(&d[..k]);
                x2 = self.sub(&x2, &x1);
            }
        }
        if limbs_are_one(&u[..k]) { x1 } else { x2 }
    }

    /// Halves a scalar mod `n` in place (`n` is odd).
    fn half(&self, a: &mut Sc) {
        let k = self.limbs;
        let odd = mask_of(a.0[0] & 1);
        let mut t = [0; MAX_SC_LIMBS];
        let c = add_n(&mut t[..k], &a.0[..k], &self.n[..k]);
        let mut sel = [0; MAX_SC_LIMBS];
        cnd_select(&mut sel[..k], &a.0[..k], &t[..k], odd);
        let carry = c & (odd & 1);
        shr1(&mut sel[..k]);
        sel[k - 1] |= carry << 63;
        a.0 = [0; MAX_SC_LIMBS];
        a.0[..k].copy_from_slice(&sel[..k]);
    }

    // ---------------------------------------------------------- predicates

    pub fn is_zero(&self, a: &Sc) -> Limb {
        zero_mask(&a.0[..self.limbs])
    }

    pub fn equal(&self, a: &Sc, b: &Sc) -> Limb {
        eq_mask(&a.0[..self.limbs], &b.0[..self.limbs])
    }

    /// All-ones when `a > n/2`.
    pub fn is_high(&self, a: &Sc) -> Limb {
        lt_mask(&self.nh[..self.limbs], &a.0[..self.limbs])
    }

    /// Negates `a` when it is above `n/2`. Returns the canonical value
    /// and the sign bit (1 when negated).
    pub fn minimize(&self, a: &Sc) -> (Sc, Limb) {
        let high = self.is_high(a);
        (self.cnd_neg(a, high), high & 1)
    }

    pub(crate) fn cnd_neg(&self, a: &Sc, mask: Limb) -> Sc {
        let n = self.neg(a);
        let mut r = Sc::ZERO;
        cnd_select(&mut r.0[..self.limbs], &a.0[..self.limbs], &n.0[..self.limbs], mask);
        r
    }

    pub(crate) fn select(&self, a: &Sc, b: &Sc, mask: Limb) -> Sc {
        let mut r = Sc::ZERO;
        cnd_select(&mut r.0[..self.limbs], &a.0[..self.limbs], &b.0[..self.limbs], mask);
        r
    }

    pub fn bitlen_var(&self, a: &Sc) -> usize {
        bitlen_var(&a.0[..self.limbs])
    }

    pub(crate) fn bit(&self, a: &Sc, i: usize) -> Limb {
        get_bit(&a.0[..self.limbs], i)
    }

    /// `w`-bit window of `a` starting at bit `i`.
    pub(crate) fn window(&self, a: &Sc, i: usize, w: usize) -> Limb {
        crate::primitives::get_bits(&a.0[..self.limbs], i, w)
    }

    // ---------------------------------------------------------- conversion

    pub fn from_word(&self, w: u64) -> Sc {
        let mut wide = [0; MAX_SC_LIMBS];
        wide[0] = w;
        self.reduce_wide(&wide[..self.limbs])
    }

    /// Strict big-endian import: rejects wrong lengths and values `>= n`.
    pub fn import_be(&self, bytes: &[u8]) -> Option<Sc> {
        if bytes.len() != self.size {
            return None;
        }
        let mut l = [0; MAX_SC_LIMBS];
        for (i, &b) in bytes.iter().rev().enumerate() {
            l[i / 8] |= (b as Limb) << (8 * (i % 8));
        }
        if lt_mask(&l[..self.limbs], &self.n[..self.limbs]) == 0 {
            return None;
        }
        Some(Sc(l))
    }

    /// Strict little-endian import.
    pub fn import_le(&self, bytes: &[u8]) -> Option<Sc> {
        if bytes.len() != self.size {
            return None;
        }
        let mut be = [0u8; MAX_SC_LIMBS * 8];
        for (i, &b) in bytes.iter().rev().enumerate() {
            be[i] = b;
        }
        self.import_be(&be[..self.size])
    }

    /// Reducing big-endian import of arbitrary width (up to the wide
    /// buffer), for hash outputs.
    pub fn import_reduce_be(&self, bytes: &[u8]) -> Sc {
        debug_assert!(bytes.len() <= MAX_REDUCE_LIMBS * 8);
        let mut l = [0; MAX_REDUCE_LIMBS];
        for (i, &b) in bytes.iter().rev().enumerate() {
            l[i / 8] |= (b as Limb) << (8 * (i % 8));
        }
        let xn = bytes.len().div_ceil(8).max(self.limbs);
        self.reduce_wide(&l[..xn])
    }

    /// Reducing little-endian import of arbitrary width.
    pub fn import_reduce_le(&self, bytes: &[u8]) -> Sc {
        debug_assert!(bytes.len() <= MAX_REDUCE_LIMBS * 8);
        let mut l = [0; MAX_REDUCE_LIMBS];
        for (i, &b) in bytes.iter().enumerate() {
            l[i / 8] |= (b as Limb) << (8 * (i % 8));
        }
        let xn = bytes.len().div_ceil(8).max(self.limbs);
        self.reduce_wide(&l[..xn])
    }

    /// Weak reducing import used where `bits(n)` is byte-aligned and the
    /// value is known `< 2n` (field x-coordinates folded into scalars).
    pub(crate) fn import_weak(&self, l: &[Limb]) -> Sc {
        self.reduce_weak(l)
    }

    pub fn export_be(&self, a: &Sc, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.size);
        for (i, o) in out.iter_mut().rev().enumerate() {
            *o = (a.0[i / 8] >> (8 * (i % 8))) as u8;
        }
    }

    pub fn export_le(&self, a: &Sc, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.size);
        for (i, o) in out.iter_mut().enumerate() {
            *o = (a.0[i / 8] >> (8 * (i % 8))) as u8;
        }
    }

    /// Samples a non-zero scalar by DRBG rejection.
    pub(crate) fn random(&self, drbg: &mut HmacDrbg) -> Sc {
        let mut buf = [0u8; MAX_SC_LIMBS * 8];
        loop {
            drbg.generate(&mut buf[..self.size]);
            let mut l = [0; MAX_SC_LIMBS];
            for (i, &b) in buf[..self.size].iter().enumerate() {
                l[i / 8] |= (b as Limb) << (8 * (i % 8));
            }
            if self.bits % 8 != 0 {
                let top = self.bits % 64;
                l[self.limbs - 1] &= if top == 0 { !0 } else { (1u64 << top) - 1 };
            }
            if lt_mask(&l[..self.limbs], &self.n[..self.limbs]) == 0 {
                continue;
            }
            let s = Sc(l);
            if self.is_zero(&s) != 0 {
                continue;
            }
            buf.zeroize();
            return s;
        }
    }
}

fn limbs_are_one(a: &[Limb]) -> bool {
    a[0] == 1 && a[1..].iter().all(|&x| x == 0)
}

/// In-place right shift by one bit.
pub(crate) fn shr1(a: &mut [Limb]) {
    for i in 0..a.len() {
        let hi = if i + 1 < a.len() { a[i + 1] << 63 } else { 0 };
        a[i] = (a[i] >> 1) | hi;
    }
}
