use crate::primitives::{
    Limb, adc, add_n, cnd_select, cnd_swap, cmp_var, eq_mask, get_bit, lt_mask, mac, mask_of,
    nonzero_mask, sub_n, zero_mask,
};

/// Limb capacity of a field element; nine limbs cover P-521.
pub(crate) const MAX_FE_LIMBS: usize = 9;

/// A prime field element in Montgomery form.
///
/// The active limb count is a property of the owning [`PrimeField`];
/// limbs beyond it are always zero. Values are kept canonical (fully
/// reduced), so limb-wise equality is value equality.
#[derive(Clone, Copy, Debug)]
pub struct Fe(pub(crate) [Limb; MAX_FE_LIMBS]);

impl Fe {
    pub(crate) const ZERO: Fe = Fe([0; MAX_FE_LIMBS]);
}

/// Square-root strategy, fixed per field at build time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum SqrtKind {
    /// `p ≡ 3 (mod 4)`: a single power `(p+1)/4`.
    P3Mod4,
    /// `p ≡ 5 (mod 8)`: Atkin's algorithm.
    P5Mod8,
    /// Anything else: Tonelli–Shanks (public inputs only).
    TonelliShanks,
}

/// Tonelli–Shanks precomputation: `p - 1 = q * 2^s` and a generator of
/// the 2-Sylow subgroup.
#[derive(Clone, Copy)]
struct TsParams {
    q: [Limb; MAX_FE_LIMBS],
    qbits: usize,
    s: usize,
    /// `z^q` for the smallest quadratic non-residue `z`, in Montgomery form.
    c: Fe,
}

/// Descriptor for one prime field.
///
/// Holds the backend tables (modulus, Montgomery constants) and provides
/// every field operation. One instance per curve context.
pub struct PrimeField {
    pub(crate) limbs: usize,
    pub(crate) bits: usize,
    /// Canonical byte length of an encoded element.
    pub(crate) size: usize,
    pub(crate) p: [Limb; MAX_FE_LIMBS],
    n0: Limb,
    r2: Fe,
    /// Montgomery representation of 1.
    pub(crate) one: Fe,
    sqrt: SqrtKind,
    ts: Option<TsParams>,
}

impl PrimeField {
    /// Builds a field from its backend tables.
    pub(crate) fn new(bits: usize, p: &[Limb], n0: Limb, r2: &[Limb]) -> PrimeField {
        let limbs = p.len();
        debug_assert!(limbs <= MAX_FE_LIMBS);
        let mut pl = [0; MAX_FE_LIMBS];
        pl[..limbs].copy_from_slice(p);
        let mut r2l = [0; MAX_FE_LIMBS];
        r2l[..limbs].copy_from_slice(r2);
        let mut f = PrimeField {
            limbs,
            bits,
            size: bits.div_ceil(8),
            p: pl,
            n0,
            r2: Fe(r2l),
            one: Fe::ZERO,
            sqrt: SqrtKind::P3Mod4,
            ts: None,
        };
        let mut one = [0; MAX_FE_LIMBS];
        one[0] = 1;
        f.one = f.mont_mul(&Fe(one), &f.r2);
        f.sqrt = match pl[0] & 7 {
            3 | 7 => SqrtKind::P3Mod4,
            5 => SqrtKind::P5Mod8,
            _ => SqrtKind::TonelliShanks,
        };
        if f.sqrt == SqrtKind::TonelliShanks {
            f.ts = Some(f.ts_params());
        }
        f
    }

    /// Canonical encoded length in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Modulus bit length.
    pub fn bits(&self) -> usize {
        self.bits
    }

    // ---------------------------------------------------------- arithmetic

    /// CIOS Montgomery multiplication over the active limb count.
    fn mont_mul(&self, a: &Fe, b: &Fe) -> Fe {
        let l = self.limbs;
        let mut t = [0 as Limb; MAX_FE_LIMBS + 2];
        for i in 0..l {
            let ai = a.0[i];
            let mut c = 0;
            for j in 0..l {
                let (lo, hi) = mac(t[j], ai, b.0[j], c);
                t[j] = lo;
                c = hi;
            }
            let (lo, hi) = adc(t[l], c, 0);
            t[l] = lo;
            t[l + 1] = t[l + 1].wrapping_add(hi);

            let m = t[0].wrapping_mul(self.n0);
            let mut c = 0;
            for j in 0..l {
                let (lo, hi) = mac(t[j], m, self.p[j], c);
                t[j] = lo;
                c = hi;
            }
            let (lo, hi) = adc(t[l], c, 0);
            t[l] = lo;
            t[l + 1] = t[l + 1].wrapping_add(hi);

            for j in 0..=l {
                t[j] = t[j + 1];
            }
            t[l + 1] = 0;
        }
        let mut r = Fe::ZERO;
        let mut sub = [0; MAX_FE_LIMBS];
        sub_n(&mut sub[..l], &t[..l], &self.p[..l]);
        let geq = !lt_mask(&t[..l], &self.p[..l]);
        let m = nonzero_mask(t[l]) | geq;
        cnd_select(&mut r.0[..l], &t[..l], &sub[..l], m);
        r
    }

    pub fn mul(&self, a: &Fe, b: &Fe) -> Fe {
        self.mont_mul(a, b)
    }

    pub fn sqr(&self, a: &Fe) -> Fe {
        self.mont_mul(a, a)
    }

    pub fn add(&self, a: &Fe, b: &Fe) -> Fe {
        let l = self.limbs;
        let mut t = [0; MAX_FE_LIMBS];
        let c = add_n(&mut t[..l], &a.0[..l], &b.0[..l]);
        let mut sub = [0; MAX_FE_LIMBS];
        sub_n(&mut sub[..l], &t[..l], &self.p[..l]);
        let geq = !lt_mask(&t[..l], &self.p[..l]);
        let m = mask_of(c) | geq;
        let mut r = Fe::ZERO;
        cnd_select(&mut r.0[..l], &t[..l], &sub[..l], m);
        r
    }

    pub fn sub(&self, a: &Fe, b: &Fe) -> Fe {
        let l = self.limbs;
        let mut t = [0; MAX_FE_LIMBS];
        let brw = sub_n(&mut t[..l], &a.0[..l], &b.0[..l]);
        let mut add = [0; MAX_FE_LIMBS];
        add_n(&mut add[..l], &t[..l], &self.p[..l]);
        let mut r = Fe::ZERO;
        cnd_select(&mut r.0[..l], &t[..l], &add[..l], mask_of(brw));
        r
    }

    pub fn neg(&self, a: &Fe) -> Fe {
        self.sub(&Fe::ZERO, a)
    }

    /// Negates when `mask` is all-ones.
    pub(crate) fn cnd_neg(&self, a: &Fe, mask: Limb) -> Fe {
        let n = self.neg(a);
        let mut r = Fe::ZERO;
        cnd_select(&mut r.0[..self.limbs], &a.0[..self.limbs], &n.0[..self.limbs], mask);
        r
    }

    pub(crate) fn select(&self, a: &Fe, b: &Fe, mask: Limb) -> Fe {
        let mut r = Fe::ZERO;
        cnd_select(&mut r.0[..self.limbs], &a.0[..self.limbs], &b.0[..self.limbs], mask);
        r
    }

    pub(crate) fn swap(&self, a: &mut Fe, b: &mut Fe, mask: Limb) {
        cnd_swap(&mut a.0[..self.limbs], &mut b.0[..self.limbs], mask);
    }

    /// Doubles `a`.
    pub fn dbl(&self, a: &Fe) -> Fe {
        self.add(a, a)
    }

    pub fn is_zero(&self, a: &Fe) -> Limb {
        zero_mask(&a.0[..self.limbs])
    }

    pub fn equal(&self, a: &Fe, b: &Fe) -> Limb {
        eq_mask(&a.0[..self.limbs], &b.0[..self.limbs])
    }

    /// Low bit of the canonical representative.
    pub fn is_odd(&self, a: &Fe) -> Limb {
        let plain = self.from_mont(a);
        plain.0[0] & 1
    }

    // ---------------------------------------------------------- conversion

    pub(crate) fn to_mont(&self, a: &Fe) -> Fe {
        self.mont_mul(a, &self.r2)
    }

    fn from_mont(&self, a: &Fe) -> Fe {
        let mut one = Fe::ZERO;
        one.0[0] = 1;
        self.mont_mul(a, &one)
    }

    /// Builds an element from a small non-negative integer.
    pub fn from_word(&self, w: u64) -> Fe {
        let mut a = Fe::ZERO;
        a.0[0] = w;
        self.to_mont(&a)
    }

    /// Builds an element from a small signed integer (for map parameters).
    pub fn from_int(&self, v: i64) -> Fe {
        let a = self.from_word(v.unsigned_abs());
        if v < 0 { self.neg(&a) } else { a }
    }

    // ---------------------------------------------------------- byte io

    fn limbs_from_le(&self, bytes: &[u8]) -> [Limb; MAX_FE_LIMBS] {
        let mut l = [0; MAX_FE_LIMBS];
        for (i, &b) in bytes.iter().enumerate() {
            l[i / 8] |= (b as Limb) << (8 * (i % 8));
        }
        l
    }

    /// Strict little-endian import: rejects values `>= p`.
    pub fn from_bytes_le(&self, bytes: &[u8]) -> Option<Fe> {
        if bytes.len() != self.size {
            return None;
        }
        let l = self.limbs_from_le(bytes);
        if lt_mask(&l[..self.limbs], &self.p[..self.limbs]) == 0 {
            return None;
        }
        let mut hi = 0;
        for &x in &l[self.limbs..] {
            hi |= x;
        }
        if hi != 0 {
            return None;
        }
        Some(self.to_mont(&Fe(l)))
    }

    /// Strict big-endian import: rejects values `>= p`.
    pub fn from_bytes_be(&self, bytes: &[u8]) -> Option<Fe> {
        if bytes.len() != self.size {
            return None;
        }
        let mut le = [0u8; MAX_FE_LIMBS * 8];
        for (i, &b) in bytes.iter().rev().enumerate() {
            le[i] = b;
        }
        self.from_bytes_le(&le[..self.size])
    }

    /// Reducing little-endian import: masks the bits beyond `bits` and
    /// folds the value into range. Used for uniform map inputs and
    /// Montgomery u-coordinates.
    pub fn from_bytes_le_reduce(&self, bytes: &[u8]) -> Option<Fe> {
        if bytes.len() != self.size {
            return None;
        }
        let mut raw = [0u8; MAX_FE_LIMBS * 8];
        raw[..self.size].copy_from_slice(bytes);
        if self.bits % 8 != 0 {
            raw[self.size - 1] &= (1u8 << (self.bits % 8)) - 1;
        }
        let l = self.limbs_from_le(&raw[..self.size]);
        // value < 2^bits < 2p for every supported field
        let mut sub = [0; MAX_FE_LIMBS];
        sub_n(&mut sub[..self.limbs], &l[..self.limbs], &self.p[..self.limbs]);
        let geq = !lt_mask(&l[..self.limbs], &self.p[..self.limbs]);
        let mut r = Fe::ZERO;
        cnd_select(&mut r.0[..self.limbs], &l[..self.limbs], &sub[..self.limbs], geq);
        Some(self.to_mont(&r))
    }

    /// Reducing big-endian import.
    pub fn from_bytes_be_reduce(&self, bytes: &[u8]) -> Option<Fe> {
        if bytes.len() != self.size {
            return None;
        }
        let mut le = [0u8; MAX_FE_LIMBS * 8];
        for (i, &b) in bytes.iter().rev().enumerate() {
            le[i] = b;
        }
        self.from_bytes_le_reduce(&le[..self.size])
    }

    /// Canonical little-endian export.
    pub fn to_bytes_le(&self, a: &Fe, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.size);
        let plain = self.from_mont(a);
        for (i, o) in out.iter_mut().enumerate() {
            *o = (plain.0[i / 8] >> (8 * (i % 8))) as u8;
        }
    }

    /// Canonical big-endian export.
    pub fn to_bytes_be(&self, a: &Fe, out: &mut [u8]) {
        self.to_bytes_le(a, out);
        out.reverse();
    }

    // ---------------------------------------------------------- powering

    /// Raises `a` to a public exponent given as limbs and bit length.
    fn pow_pub(&self, a: &Fe, e: &[Limb], ebits: usize) -> Fe {
        let mut r = self.one;
        for i in (0..ebits).rev() {
            r = self.sqr(&r);
            if get_bit(e, i) == 1 {
                r = self.mul(&r, a);
            }
        }
        r
    }

    /// Fermat inversion, `a^(p-2)`. Maps zero to zero.
    pub fn invert(&self, a: &Fe) -> Fe {
        let mut e = [0; MAX_FE_LIMBS];
        let two = {
            let mut t = [0; MAX_FE_LIMBS];
            t[0] = 2;
            t
        };
        sub_n(&mut e[..self.limbs], &self.p[..self.limbs], &two[..self.limbs]);
        self.pow_pub(a, &e[..self.limbs], self.bits)
    }

    /// Euler's criterion; all-ones when `a` is a square (or zero).
    pub fn is_square(&self, a: &Fe) -> Limb {
        // (p - 1) / 2
        let mut e = [0; MAX_FE_LIMBS];
        let one = {
            let mut t = [0; MAX_FE_LIMBS];
            t[0] = 1;
            t
        };
        sub_n(&mut e[..self.limbs], &self.p[..self.limbs], &one[..self.limbs]);
        shr1(&mut e[..self.limbs]);
        let l = self.pow_pub(a, &e[..self.limbs], self.bits);
        self.equal(&l, &self.one) | self.is_zero(a)
    }

    /// Square root. Returns the root and an all-ones mask on success.
    ///
    /// The Tonelli–Shanks branch iterates on its operand and is reserved
    /// for public inputs (point decompression).
    pub fn sqrt(&self, a: &Fe) -> (Fe, Limb) {
        let s = match self.sqrt {
            SqrtKind::P3Mod4 => {
                // a^((p+1)/4)
                let mut e = [0; MAX_FE_LIMBS];
                let one = {
                    let mut t = [0; MAX_FE_LIMBS];
                    t[0] = 1;
                    t
                };
                add_n(&mut e[..self.limbs], &self.p[..self.limbs], &one[..self.limbs]);
                shr1(&mut e[..self.limbs]);
                shr1(&mut e[..self.limbs]);
                self.pow_pub(a, &e[..self.limbs], self.bits)
            }
            SqrtKind::P5Mod8 => {
                // Atkin: t = 2a, b = t^((p-5)/8), i = t b^2, r = a b (i - 1)
                let t = self.dbl(a);
                let mut e = [0; MAX_FE_LIMBS];
                let five = {
                    let mut w = [0; MAX_FE_LIMBS];
                    w[0] = 5;
                    w
                };
                sub_n(&mut e[..self.limbs], &self.p[..self.limbs], &five[..self.limbs]);
                shr1(&mut e[..self.limbs]);
                shr1(&mut e[..self.limbs]);
                shr1(&mut e[..self.limbs]);
                let b = self.pow_pub(&t, &e[..self.limbs], self.bits);
                let i = self.mul(&t, &self.sqr(&b));
                self.mul(&self.mul(a, &b), &self.sub(&i, &self.one))
            }
            SqrtKind::TonelliShanks => self.sqrt_ts_var(a),
        };
        let ok = self.equal(&self.sqr(&s), a);
        (self.select(&Fe::ZERO, &s, ok), ok)
    }

    fn ts_params(&self) -> TsParams {
        let mut q = [0; MAX_FE_LIMBS];
        let one = {
            let mut t = [0; MAX_FE_LIMBS];
            t[0] = 1;
            t
        };
        sub_n(&mut q[..self.limbs], &self.p[..self.limbs], &one[..self.limbs]);
        let mut s = 0;
        while q[0] & 1 == 0 {
            shr1(&mut q[..self.limbs]);
            s += 1;
        }
        let qbits = crate::primitives::bitlen_var(&q[..self.limbs]);
        // smallest quadratic non-residue
        let mut z = 2;
        let c = loop {
            let cand = self.from_word(z);
            if self.is_square(&cand) == 0 {
                break self.pow_pub(&cand, &q[..self.limbs], qbits);
            }
            z += 1;
        };
        TsParams { q, qbits, s, c }
    }

    /// Tonelli–Shanks; variable time, public inputs only.
    fn sqrt_ts_var(&self, a: &Fe) -> Fe {
        let ts = self.ts.as_ref().expect("tonelli-shanks parameters");
        let mut c = ts.c;
        let mut t = self.pow_pub(a, &ts.q[..self.limbs], ts.qbits);
        // (q + 1) / 2
        let mut e = [0; MAX_FE_LIMBS];
        let one = {
            let mut w = [0; MAX_FE_LIMBS];
            w[0] = 1;
            w
        };
        add_n(&mut e[..self.limbs], &ts.q[..self.limbs], &one[..self.limbs]);
        shr1(&mut e[..self.limbs]);
        let mut r = self.pow_pub(a, &e[..self.limbs], ts.qbits);
        let mut m = ts.s;
        while self.equal(&t, &self.one) == 0 && self.is_zero(&t) == 0 {
            let mut tt = t;
            let mut i = 0;
            while self.equal(&tt, &self.one) == 0 {
                tt = self.sqr(&tt);
                i += 1;
                if i == m {
                    // non-residue; the caller's verification square fails
                    return Fe::ZERO;
                }
            }
            let mut b = c;
            for _ in 0..m - i - 1 {
                b = self.sqr(&b);
            }
            m = i;
            c = self.sqr(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }
        r
    }

    /// `sqrt(u / v)`. Returns the root and a success mask.
    pub fn isqrt(&self, u: &Fe, v: &Fe) -> (Fe, Limb) {
        let r = self.mul(u, &self.invert(v));
        let (s, mut ok) = self.sqrt(&r);
        // sqrt(0/0) is rejected: demand v != 0
        ok &= !self.is_zero(v);
        (s, ok)
    }

    /// Jacobi symbol of the canonical representative; variable time,
    /// public inputs only. Returns 1, 0 or -1.
    pub fn jacobi_var(&self, a: &Fe) -> i32 {
        let l = self.limbs;
        let plain = self.from_mont(a);
        let mut x = [0; MAX_FE_LIMBS];
        x[..l].copy_from_slice(&plain.0[..l]);
        let mut y = [0; MAX_FE_LIMBS];
        y[..l].copy_from_slice(&self.p[..l]);
        let mut j = 1i32;
        while zero_mask(&x[..l]) != mask_of(1) {
            let tz = crate::primitives::trailing_zeros_var(&x[..l]);
            shr_var(&mut x[..l], tz);
            if tz & 1 == 1 {
                let m = y[0] & 7;
                if m == 3 || m == 5 {
                    j = -j;
                }
            }
            if cmp_var(&x[..l], &y[..l]) == core::cmp::Ordering::Less {
                if x[0] & 3 == 3 && y[0] & 3 == 3 {
                    j = -j;
                }
                core::mem::swap(&mut x, &mut y);
            }
            // x >= y, both odd: the difference is even and the loop
            // strips it next round
            let mut d = [0; MAX_FE_LIMBS];
            sub_n(&mut d[..l], &x[..l], &y[..l]);
            x[..l].copy_from_slice(&d[..l]);
        }
        if limbs_are_one(&y[..l]) { j } else { 0 }
    }
}

fn limbs_are_one(a: &[Limb]) -> bool {
    a[0] == 1 && a[1..].iter().all(|&x| x == 0)
}

/// In-place right shift by one bit.
fn shr1(a: &mut [Limb]) {
    for i in 0..a.len() {
        let hi = if i + 1 < a.len() { a[i + 1] << 63 } else { 0 };
        a[i] = (a[i] >> 1) | hi;
    }
}

/// In-place right shift by `bits` (any amount). Variable time.
fn shr_var(a: &mut [Limb], bits: usize) {
    let l = a.len();
    let wl = bits / 64;
    let wb = (bits % 64) as u32;
    for i in 0..l {
        let lo = if i + wl < l { a[i + wl] } else { 0 };
        let hi = if wb > 0 && i + wl + 1 < l { a[i + wl + 1] } else { 0 };
        a[i] = if wb == 0 { lo } else { (lo >> wb) | (hi << (64 - wb)) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::consts::{p25519, p256, secp256k1};

    fn fields() -> Vec<PrimeField> {
        vec![
            PrimeField::new(p256::FIELD_BITS, &p256::FIELD_P, p256::FIELD_N0, &p256::FIELD_R2),
            PrimeField::new(
                secp256k1::FIELD_BITS,
                &secp256k1::FIELD_P,
                secp256k1::FIELD_N0,
                &secp256k1::FIELD_R2,
            ),
            PrimeField::new(
                p25519::FIELD_BITS,
                &p25519::FIELD_P,
                p25519::FIELD_N0,
                &p25519::FIELD_R2,
            ),
        ]
    }

    fn pseudo(f: &PrimeField, seed: u64) -> Fe {
        let mut x = seed | 1;
        let mut b = vec![0u8; f.size];
        for v in b.iter_mut() {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            *v = x as u8;
        }
        f.from_bytes_le_reduce(&b).unwrap()
    }

    #[test]
    fn ring_identities() {
        for f in fields() {
            for i in 0..16 {
                let a = pseudo(&f, 3 + i);
                let b = pseudo(&f, 1000 + i);
                assert!(f.equal(&f.sub(&f.add(&a, &b), &b), &a) != 0, "(a+b)-b");
                assert!(f.equal(&f.add(&a, &f.neg(&a)), &Fe::ZERO) != 0, "a + (-a)");
                assert!(f.equal(&f.mul(&a, &f.one), &a) != 0, "a * 1");
                let ab = f.mul(&a, &b);
                assert!(f.equal(&ab, &f.mul(&b, &a)) != 0, "commutativity");
                if f.is_zero(&a) == 0 {
                    let inv = f.invert(&a);
                    assert!(f.equal(&f.mul(&a, &inv), &f.one) != 0, "a * a^-1");
                }
            }
        }
    }

    #[test]
    fn sqrt_and_residuosity() {
        for f in fields() {
            for i in 0..16 {
                let a = pseudo(&f, 77 + i);
                let sq = f.sqr(&a);
                assert!(f.is_square(&sq) != 0);
                let (root, ok) = f.sqrt(&sq);
                assert!(ok != 0, "square of a value must have a root");
                let same = f.equal(&root, &a) | f.equal(&root, &f.neg(&a));
                assert!(same != 0, "root must be +-a");
                // jacobi agrees with the constant-time criterion
                let j = f.jacobi_var(&sq);
                assert!(j == 1 || f.is_zero(&sq) != 0);
                let (_r2, ok2) = f.sqrt(&a);
                let expect = f.is_square(&a) != 0;
                assert_eq!(ok2 != 0, expect, "sqrt success must track is_square");
                if f.is_zero(&a) == 0 {
                    assert_eq!(f.jacobi_var(&a) == 1, expect, "jacobi must agree");
                }
            }
        }
    }

    #[test]
    fn byte_roundtrip() {
        for f in fields() {
            let a = pseudo(&f, 99);
            let mut le = vec![0u8; f.size];
            f.to_bytes_le(&a, &mut le);
            let back = f.from_bytes_le(&le).expect("canonical bytes import");
            assert!(f.equal(&back, &a) != 0);
            let mut be = vec![0u8; f.size];
            f.to_bytes_be(&a, &mut be);
            let back = f.from_bytes_be(&be).unwrap();
            assert!(f.equal(&back, &a) != 0);
        }
    }

    #[test]
    fn strict_import_rejects_modulus() {
        for f in fields() {
            let mut le = vec![0u8; f.size];
            for (i, o) in le.iter_mut().enumerate() {
                *o = (f.p[i / 8] >> (8 * (i % 8))) as u8;
            }
            assert!(f.from_bytes_le(&le).is_none(), "p itself must be rejected");
        }
    }
}
