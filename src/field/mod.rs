//! Prime field arithmetic.
//!
//! This module implements arithmetic in the prime fields underlying the
//! supported curves. A single descriptor-driven implementation serves
//! every field: the per-curve backend tables (modulus, Montgomery
//! constants, byte sizes) live in `curves::consts` and are produced by
//! the backend generator, while the code here is shared.
//!
//! ## Representation
//!
//! Field elements are held in Montgomery form in a fixed `[u64; 9]`
//! buffer (nine limbs cover the largest field, P-521). The active limb
//! count is a public per-field constant; upper limbs are always zero.
//!
//! ## Design goals
//!
//! - **Constant-time execution**: no secret-dependent branches or
//!   memory access. Iteration counts derive from public parameters.
//! - **Canonical values**: every exposed operation returns a fully
//!   reduced representative, so equality of limbs is equality of values.
//! - **Explicit variable-time escapes**: the Jacobi symbol and the
//!   Tonelli–Shanks square root branch on their operands and carry the
//!   `_var` marking; they are reserved for public inputs.
//!
//! ## Implemented operations
//!
//! - Addition, subtraction, negation, conditional negation
//! - Montgomery multiplication and squaring (CIOS)
//! - Fermat inversion, exponentiation by public exponents
//! - Square roots: `p ≡ 3 (mod 4)` powers, Atkin for `p ≡ 5 (mod 8)`,
//!   Tonelli–Shanks otherwise
//! - Quadratic residuosity: Euler's criterion (constant time) and a
//!   variable-time Jacobi symbol
//! - Strict and reducing byte import, both endiannesses

mod core;

pub use core::*;
