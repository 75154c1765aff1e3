//! Deterministic random bit generation.
//!
//! The signing paths need an auditable, seedable generator; following
//! SP 800-90A this module provides an HMAC-DRBG over the curve's
//! pinned hash. The DRBG performs no I/O: all seed material is supplied
//! by the caller (nonce derivation seeds, batch-verification seeds,
//! context randomization entropy).

mod core;

pub use core::*;
