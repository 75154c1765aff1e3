use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroize;

use crate::hash::HashKind;

const MAX_HLEN: usize = 64;

/// HMAC-DRBG (SP 800-90A) over SHA-256, SHA-384 or SHA-512.
///
/// No personalization string; reseeding folds material through the
/// same update path. State is wiped on drop.
pub struct HmacDrbg {
    kind: HashKind,
    hlen: usize,
    k: [u8; MAX_HLEN],
    v: [u8; MAX_HLEN],
}

fn mac_into(kind: HashKind, key: &[u8], parts: &[&[u8]], out: &mut [u8]) {
    match kind {
        HashKind::Sha256 => {
            let mut m = Hmac::<Sha256>::new_from_slice(key).expect("hmac accepts any key size");
            for p in parts {
                m.update(p);
            }
            out.copy_from_slice(&m.finalize().into_bytes());
        }
        HashKind::Sha384 => {
            let mut m = Hmac::<Sha384>::new_from_slice(key).expect("hmac accepts any key size");
            for p in parts {
                m.update(p);
            }
            out.copy_from_slice(&m.finalize().into_bytes());
        }
        HashKind::Sha512 => {
            let mut m = Hmac::<Sha512>::new_from_slice(key).expect("hmac accepts any key size");
            for p in parts {
                m.update(p);
            }
            out.copy_from_slice(&m.finalize().into_bytes());
        }
        HashKind::Shake256 => unreachable!("drbg_kind never selects shake"),
    }
}

impl HmacDrbg {
    /// Creates a DRBG seeded with `seed`. `kind` is mapped to the
    /// fixed-size hash backing the curve (SHAKE-256 curves use SHA-512).
    pub fn new(kind: HashKind, seed: &[u8]) -> HmacDrbg {
        let kind = kind.drbg_kind();
        let hlen = kind.output_size();
        let mut d = HmacDrbg { kind, hlen, k: [0; MAX_HLEN], v: [0; MAX_HLEN] };
        d.v[..hlen].fill(0x01);
        d.update(seed);
        d
    }

    fn update(&mut self, seed: &[u8]) {
        let h = self.hlen;
        let mut t = [0u8; MAX_HLEN];
        mac_into(self.kind, &self.k[..h], &[&self.v[..h], &[0x00], seed], &mut t[..h]);
        self.k[..h].copy_from_slice(&t[..h]);
        mac_into(self.kind, &self.k[..h], &[&self.v[..h]], &mut t[..h]);
        self.v[..h].copy_from_slice(&t[..h]);
        if !seed.is_empty() {
            mac_into(self.kind, &self.k[..h], &[&self.v[..h], &[0x01], seed], &mut t[..h]);
            self.k[..h].copy_from_slice(&t[..h]);
            mac_into(self.kind, &self.k[..h], &[&self.v[..h]], &mut t[..h]);
            self.v[..h].copy_from_slice(&t[..h]);
        }
        t.zeroize();
    }

    /// Mixes fresh seed material into the state.
    pub fn reseed(&mut self, seed: &[u8]) {
        self.update(seed);
    }

    /// Fills `out` with deterministic output.
    pub fn generate(&mut self, out: &mut [u8]) {
        let h = self.hlen;
        let mut off = 0;
        let mut t = [0u8; MAX_HLEN];
        while off < out.len() {
            mac_into(self.kind, &self.k[..h], &[&self.v[..h]], &mut t[..h]);
            self.v[..h].copy_from_slice(&t[..h]);
            let take = h.min(out.len() - off);
            out[off..off + take].copy_from_slice(&self.v[..take]);
            off += take;
        }
        self.update(&[]);
        t.zeroize();
    }
}

impl Drop for HmacDrbg {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = HmacDrbg::new(HashKind::Sha256, b"seed material");
        let mut b = HmacDrbg::new(HashKind::Sha256, b"seed material");
        let mut x = [0u8; 40];
        let mut y = [0u8; 40];
        a.generate(&mut x);
        b.generate(&mut y);
        assert_eq!(x, y);
        a.generate(&mut x);
        assert_ne!(x, y, "stream must advance");
    }

    #[test]
    fn reseed_diverges() {
        let mut a = HmacDrbg::new(HashKind::Sha512, b"seed");
        let mut b = HmacDrbg::new(HashKind::Sha512, b"seed");
        b.reseed(b"extra");
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        a.generate(&mut x);
        b.generate(&mut y);
        assert_ne!(x, y);
    }
}
