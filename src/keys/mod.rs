//! Key types and key agreement.
//!
//! This module hosts the Montgomery key-exchange functions (X25519,
//! X448) and the conversion utilities between Montgomery and Edwards
//! key representations. Only key structure and derivation live here;
//! signing protocols are under `signatures`.

mod core;

pub use core::*;
