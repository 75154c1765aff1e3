//! Scalar field arithmetic.
//!
//! Scalars are integers modulo the group order `n` of a curve. This
//! module implements the shared, descriptor-driven arithmetic: Barrett
//! reduction, modular ring operations, constant-time inversion, the
//! `mul_shift` primitive used by endomorphism splitting, and the
//! signed-digit recodings (fixed window, wNAF, JSF) consumed by the
//! scalar-multiplication ladders.
//!
//! ## Representation
//!
//! A scalar is a canonical value `< n` in a fixed `[u64; 9]` buffer,
//! plain (non-Montgomery) form, little-endian limbs. Wide intermediate
//! values pass through a `(limbs + 1) * 2`-limb reduction buffer.
//!
//! ## Security properties
//!
//! - Ring operations, `mul_shift`, `minimize` and Fermat inversion are
//!   constant-time.
//! - The recodings used by variable-time multi-scalar multiplication
//!   (`wnaf_var`, `jsf_var`) and the extended-gcd inversion are
//!   variable-time and must only see public scalars.

mod element;
mod recode;

pub use element::{Sc, ScalarField};
pub(crate) use element::{MAX_SC_LIMBS, shr1};
pub(crate) use recode::*;
