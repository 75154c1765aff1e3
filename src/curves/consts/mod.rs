//! Generated per-curve backend constant tables.

pub(crate) mod p192;
pub(crate) mod p224;
pub(crate) mod p251;
pub(crate) mod p25519;
pub(crate) mod p256;
pub(crate) mod p384;
pub(crate) mod p448;
pub(crate) mod p521;
pub(crate) mod secp256k1;
