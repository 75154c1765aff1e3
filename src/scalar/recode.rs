//! Signed-digit scalar recodings.
//!
//! Three forms feed the scalar-multiplication ladders:
//!
//! - a constant-time fixed-window signed recode (width 4) for the
//!   secret-path ladders,
//! - width-`w` NAF for variable-time multi-scalar multiplication,
//! - the joint sparse form for Shamir pairs.

use crate::primitives::{Limb, add_n, sub_n, zero_mask};
use crate::scalar::{MAX_SC_LIMBS, Sc, ScalarField, shr1};

/// Window steps for the widest supported order (`ceil(521/4) + 1`).
pub(crate) const MAX_WND_STEPS: usize = 132;

/// Digit positions for NAF/JSF over the widest order, plus slack.
pub(crate) const MAX_NAF_LEN: usize = 528;

/// Constant-time signed fixed-window recode, width 4.
///
/// Emits `ceil(bits/4) + 1` digits in `[-8, 8]` with
/// `sum d_i * 16^i == a`. The digit stream depends only on `bits`.
pub(crate) fn recode_wnd4(
    sc: &ScalarField,
    a: &Sc,
    bits: usize,
    digits: &mut [i8; MAX_WND_STEPS],
) -> usize {
    let steps = bits.div_ceil(4) + 1;
    debug_assert!(steps <= MAX_WND_STEPS);
    let mut carry: i8 = 0;
    for (i, d) in digits.iter_mut().enumerate().take(steps) {
        let w = sc.window(a, i * 4, 4) as i8;
        let t = w + carry;
        carry = (t + 8) >> 4;
        *d = t - (carry << 4);
    }
    debug_assert_eq!(carry, 0);
    steps
}

/// Width-`w` non-adjacent form; variable time, public scalars only.
///
/// Digits are zero or odd in `(-2^(w-1), 2^(w-1))`. Returns the digit
/// count.
pub(crate) fn wnaf_var(
    sc: &ScalarField,
    a: &Sc,
    w: u32,
    out: &mut [i8; MAX_NAF_LEN],
) -> usize {
    let l = sc.limbs;
    let mut k = [0 as Limb; MAX_SC_LIMBS];
    k[..l].copy_from_slice(&a.0[..l]);
    let mut len = 0;
    while zero_mask(&k[..l]) == 0 {
        let d;
        if k[0] & 1 == 1 {
            let mut z = (k[0] & ((1 << w) - 1)) as i64;
            if z >= 1 << (w - 1) {
                z -= 1 << w;
            }
            if z >= 0 {
                sub_small(&mut k[..l], z as Limb);
            } else {
                add_small(&mut k[..l], (-z) as Limb);
            }
            d = z as i8;
        } else {
            d = 0;
        }
        out[len] = d;
        len += 1;
        shr1(&mut k[..l]);
    }
    len
}

/// Joint sparse form of two scalars; variable time, public scalars only.
///
/// Fills two digit streams in `{-1, 0, 1}` of common length, LSB first.
pub(crate) fn jsf_var(
    sc: &ScalarField,
    a: &Sc,
    b: &Sc,
    out1: &mut [i8; MAX_NAF_LEN],
    out2: &mut [i8; MAX_NAF_LEN],
) -> usize {
    let l = sc.limbs;
    let mut k1 = [0 as Limb; MAX_SC_LIMBS];
    let mut k2 = [0 as Limb; MAX_SC_LIMBS];
    k1[..l].copy_from_slice(&a.0[..l]);
    k2[..l].copy_from_slice(&b.0[..l]);
    let mut d1: i64 = 0;
    let mut d2: i64 = 0;
    let mut len = 0;
    while zero_mask(&k1[..l]) == 0 || d1 != 0 || zero_mask(&k2[..l]) == 0 || d2 != 0 {
        let l1 = ((k1[0] & 7) as i64 + d1) & 7;
        let l2 = ((k2[0] & 7) as i64 + d2) & 7;
        let mut u1 = if l1 & 1 == 0 { 0 } else { 2 - (l1 & 3) };
        if (l1 & 7 == 3 || l1 & 7 == 5) && l2 & 3 == 2 {
            u1 = -u1;
        }
        let mut u2 = if l2 & 1 == 0 { 0 } else { 2 - (l2 & 3) };
        if (l2 & 7 == 3 || l2 & 7 == 5) && l1 & 3 == 2 {
            u2 = -u2;
        }
        if 2 * d1 == 1 + u1 {
            d1 = 1 - d1;
        }
        if 2 * d2 == 1 + u2 {
            d2 = 1 - d2;
        }
        out1[len] = u1 as i8;
        out2[len] = u2 as i8;
        len += 1;
        shr1(&mut k1[..l]);
        shr1(&mut k2[..l]);
    }
    len
}

fn sub_small(a: &mut [Limb], v: Limb) {
    let mut s = [0; MAX_SC_LIMBS];
    s[0] = v;
    let mut r = [0; MAX_SC_LIMBS];
    let brw = sub_n(&mut r[..a.len()], a, &s[..a.len()]);
    debug_assert_eq!(brw, 0);
    a.copy_from_slice(&r[..a.len()]);
}

fn add_small(a: &mut [Limb], v: Limb) {
    let mut s = [0; MAX_SC_LIMBS];
    s[0] = v;
    let mut r = [0; MAX_SC_LIMBS];
    add_n(&mut r[..a.len()], a, &s[..a.len()]);
    a.copy_from_slice(&r[..a.len()]);
}
