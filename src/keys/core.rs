//! Montgomery key exchange (RFC 7748 semantics).

use rand::RngCore;
use zeroize::Zeroize;

use crate::error::Error;
use crate::group::edwards::EdwardsCurve;
use crate::group::montgomery::MontCurve;
use crate::primitives::Limb;

/// Generates a clamped private key from caller-supplied randomness.
pub fn privkey_generate(curve: &MontCurve, rng: &mut dyn RngCore) -> Vec<u8> {
    let mut k = vec![0u8; curve.fe.size];
    rng.fill_bytes(&mut k);
    (curve.clamp)(&mut k);
    k
}

/// Derives the public u-coordinate for a private key.
pub fn pubkey_create(curve: &MontCurve, priv_key: &[u8]) -> Result<Vec<u8>, Error> {
    if priv_key.len() != curve.fe.size {
        return Err(Error::InvalidEncoding);
    }
    let mut k = priv_key.to_vec();
    (curve.clamp)(&mut k);
    let p = curve.ladder(&curve.gu, &k);
    k.zeroize();
    let u = curve.pge_normalize(&p);
    let mut out = vec![0u8; curve.fe.size];
    curve.export_x(&u, &mut out);
    Ok(out)
}

/// Computes the shared secret `x(priv * peer)`. An all-zero output
/// (small-order peer point) is rejected.
pub fn derive(curve: &MontCurve, peer: &[u8], priv_key: &[u8]) -> Result<Vec<u8>, Error> {
    if priv_key.len() != curve.fe.size {
        return Err(Error::InvalidEncoding);
    }
    let u = curve.import_x(peer).ok_or(Error::InvalidEncoding)?;
    let mut k = priv_key.to_vec();
    (curve.clamp)(&mut k);
    let p = curve.ladder(&u, &k);
    k.zeroize();
    if curve.pge_is_zero(&p) {
        return Err(Error::InvalidKey);
    }
    let x = curve.pge_normalize(&p);
    let mut out = vec![0u8; curve.fe.size];
    curve.export_x(&x, &mut out);
    Ok(out)
}

/// Whether a public key lies in the small subgroup.
pub fn pubkey_is_small(curve: &MontCurve, peer: &[u8]) -> bool {
    match curve.import_x(peer) {
        Some(u) => {
            let p = crate::group::montgomery::Pge { x: u, z: curve.fe.one };
            curve.is_small(&p)
        }
        None => false,
    }
}

/// Whether a public key is torsion-free (lies in the prime-order
/// subgroup).
pub fn pubkey_is_torsion_free(curve: &MontCurve, peer: &[u8]) -> bool {
    match curve.import_x(peer) {
        Some(u) => curve.is_torsion_free_var(&u),
        None => false,
    }
}

/// Converts a Montgomery public key to the companion Edwards form.
/// `sign` selects the v-coordinate branch.
pub fn pubkey_to_edwards(
    mont: &MontCurve,
    ed: &EdwardsCurve,
    peer: &[u8],
    sign: u8,
) -> Option<Vec<u8>> {
    let u = mont.import_x(peer)?;
    let m = mont.mge_set_x(&u, sign as Limb)?;
    let p = ed.from_mont(&m.x, &m.y)?;
    let mut out = vec![0u8; ed.adj_size];
    ed.export(&p, &mut out);
    Some(out)
}

/// Converts an Edwards public key to the companion Montgomery form.
pub fn pubkey_from_edwards(
    ed: &EdwardsCurve,
    mont: &MontCurve,
    pubkey: &[u8],
) -> Option<Vec<u8>> {
    let p = ed.import(pubkey)?;
    let (u, _v) = ed.to_mont(&p)?;
    let mut out = vec![0u8; mont.fe.size];
    mont.export_x(&u, &mut out);
    Some(out)
}
