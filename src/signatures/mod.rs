//! Digital signature schemes.
//!
//! This module groups the signature protocols built on the group layer:
//!
//! - `ecdsa` — ECDSA with low-S normalization, public-key recovery and
//!   an HMAC-DRBG nonce loop.
//! - `schnorr_legacy` — the legacy Schnorr construction for curves with
//!   `p ≡ 3 (mod 4)` (square-y nonces, field-element `r`).
//! - `schnorr` — the BIP-Schnorr variant with tagged hashes and x-only
//!   public keys, plus batch verification.
//! - `eddsa` — Ed25519 / Ed448 / Ed1174 with pre-hash and context
//!   variants, cofactor-aware single and batch verification.
//!
//! Each submodule is explicit and self-contained; no shared high-level
//! signing abstraction is imposed across schemes.

pub mod ecdsa;
pub mod eddsa;
pub mod schnorr;
pub mod schnorr_legacy;
