//! Hash collaborators.
//!
//! The curve layer consumes hashing through a small wrapper so each
//! curve can pin its hash function: SHA-256, SHA-384, SHA-512 from
//! `sha2`, and fixed-length SHAKE-256 from `sha3` for Ed448.

use sha2::{Digest, Sha256, Sha384, Sha512};
use sha3::digest::{ExtendableOutput, Update as XofUpdate, XofReader};
use sha3::Shake256;

/// Hash function pinned by a curve.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HashKind {
    Sha256,
    Sha384,
    Sha512,
    /// SHAKE-256 consumed at a fixed output length.
    Shake256,
}

impl HashKind {
    /// Digest length in bytes; for SHAKE-256 the fixed length the
    /// Edwards protocols use (114, two adjusted field sizes).
    pub fn output_size(self) -> usize {
        match self {
            HashKind::Sha256 => 32,
            HashKind::Sha384 => 48,
            HashKind::Sha512 => 64,
            HashKind::Shake256 => 114,
        }
    }

    /// The fixed-size hash backing this curve's HMAC-DRBG.
    pub(crate) fn drbg_kind(self) -> HashKind {
        match self {
            HashKind::Shake256 => HashKind::Sha512,
            k => k,
        }
    }
}

enum Inner {
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Shake256(Shake256),
}

/// Incremental hasher over the pinned function.
pub struct Hasher {
    inner: Inner,
}

impl Hasher {
    pub fn new(kind: HashKind) -> Hasher {
        let inner = match kind {
            HashKind::Sha256 => Inner::Sha256(Sha256::new()),
            HashKind::Sha384 => Inner::Sha384(Sha384::new()),
            HashKind::Sha512 => Inner::Sha512(Sha512::new()),
            HashKind::Shake256 => Inner::Shake256(Shake256::default()),
        };
        Hasher { inner }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            Inner::Sha256(h) => Digest::update(h, data),
            Inner::Sha384(h) => Digest::update(h, data),
            Inner::Sha512(h) => Digest::update(h, data),
            Inner::Shake256(h) => XofUpdate::update(h, data),
        }
    }

    /// Writes the digest into `out`. For the fixed hashes `out` must be
    /// the digest size; SHAKE-256 fills any length.
    pub fn finalize_into(self, out: &mut [u8]) {
        match self.inner {
            Inner::Sha256(h) => out.copy_from_slice(&h.finalize()),
            Inner::Sha384(h) => out.copy_from_slice(&h.finalize()),
            Inner::Sha512(h) => out.copy_from_slice(&h.finalize()),
            Inner::Shake256(h) => h.finalize_xof().read(out),
        }
    }
}

/// One-shot helper.
pub(crate) fn hash_into(kind: HashKind, parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Hasher::new(kind);
    for p in parts {
        h.update(p);
    }
    h.finalize_into(out);
}
