//! Elliptic-curve cryptography for Nebula
//!
//! This crate implements the elliptic-curve core used across the Nebula
//! ecosystem: layered arithmetic over three curve families and the
//! signature and key-agreement protocols built on top of them.
//!
//! The focus is on **clarity, predictability, and auditability**. The
//! arithmetic stack enforces a strict constant-time discipline on every
//! secret-dependent path; variable-time routines are explicitly named
//! and reserved for public data.
//!
//! # Module overview
//!
//! - `primitives`
//!   Limb-vector arithmetic: carry chains, schoolbook multiplication,
//!   constant-time selection and comparison. The foundation of the
//!   field and scalar layers.
//!
//! - `field` / `scalar`
//!   Prime-field elements in Montgomery form and scalars modulo the
//!   group order (Barrett reduction, signed-digit recodings, the GLV
//!   `mul_shift` primitive). Both are descriptor-driven: one shared
//!   implementation, per-curve generated constant tables.
//!
//! - `group`
//!   Short Weierstrass (affine/Jacobian), Montgomery (x-only ladder)
//!   and twisted Edwards (extended coordinates) groups, with unified
//!   addition laws, blinded fixed-window and endomorphism ladders,
//!   variable-time multi-scalar multiplication, and the hash-to-curve
//!   maps (SSWU, SVDW, Elligator 2) with their inverses.
//!
//! - `curves`
//!   The registry: eleven curves looked up by ASCII identifier, each
//!   materializing a context with precomputed tables and blinding
//!   state.
//!
//! - `signatures`
//!   ECDSA (with DER encoding and public-key recovery), legacy Schnorr,
//!   BIP-Schnorr with tagged hashes, EdDSA (Ed25519/Ed448/Ed1174), and
//!   batch verification for the Schnorr variants.
//!
//! - `keys`
//!   Montgomery key exchange (X25519/X448), clamping, and point
//!   conversion utilities.
//!
//! - `rng`
//!   HMAC-DRBG over the curve's pinned hash. All entropy is supplied by
//!   the caller; the core performs no I/O.
//!
//! - `encoding`
//!   Strict and lax ASN.1 DER readers and a canonical writer for ECDSA
//!   signatures.
//!
//! # Design goals
//!
//! - No secret-dependent branches or memory access on signing paths
//! - Secret intermediates cleansed on every exit path
//! - Minimal and explicit APIs; contexts owned by the caller
//! - Stable, well-defined byte formats at every boundary

mod error;
mod primitives;

pub mod curves;
pub mod encoding;
pub mod field;
pub mod group;
pub mod hash;
pub mod keys;
pub mod rng;
pub mod scalar;
pub mod signatures;

pub use error::Error;
