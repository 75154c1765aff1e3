//! Curve registry and context construction.
//!
//! Curves are looked up by ASCII identifier and materialize as one of
//! three context shapes (short Weierstrass, Montgomery, twisted
//! Edwards). Contexts bundle the field and scalar descriptors, the
//! generator with its precomputed tables, the hash the curve pins, the
//! map parameters, and the blinding state.

pub(crate) mod consts;

use crate::error::Error;
use crate::group::edwards::EdwardsCurve;
use crate::group::montgomery::MontCurve;
use crate::group::weierstrass::Curve;
use crate::hash::HashKind;
use crate::scalar::ScalarField;

/// Registry identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CurveId {
    P192,
    P224,
    P256,
    P384,
    P521,
    Secp256k1,
    X25519,
    X448,
    Ed25519,
    Ed448,
    Ed1174,
}

impl CurveId {
    /// Parses an ASCII registry name.
    pub fn from_name(name: &str) -> Option<CurveId> {
        Some(match name {
            "P192" => CurveId::P192,
            "P224" => CurveId::P224,
            "P256" => CurveId::P256,
            "P384" => CurveId::P384,
            "P521" => CurveId::P521,
            "SECP256K1" => CurveId::Secp256k1,
            "X25519" => CurveId::X25519,
            "X448" => CurveId::X448,
            "ED25519" => CurveId::Ed25519,
            "ED448" => CurveId::Ed448,
            "ED1174" => CurveId::Ed1174,
            _ => return None,
        })
    }
}

/// A constructed curve context of any shape.
pub enum Context {
    Weierstrass(Box<Curve>),
    Montgomery(Box<MontCurve>),
    Edwards(Box<EdwardsCurve>),
}

/// Builds the context for a registry name; unknown names fail.
pub fn create(name: &str) -> Result<Context, Error> {
    let id = CurveId::from_name(name).ok_or(Error::UnknownCurve)?;
    Ok(match id {
        CurveId::P192 | CurveId::P224 | CurveId::P256 | CurveId::P384 | CurveId::P521
        | CurveId::Secp256k1 => Context::Weierstrass(Box::new(weierstrass(id).expect("wei id"))),
        CurveId::X25519 | CurveId::X448 => {
            Context::Montgomery(Box::new(montgomery(id).expect("mont id")))
        }
        CurveId::Ed25519 | CurveId::Ed448 | CurveId::Ed1174 => {
            Context::Edwards(Box::new(edwards(id).expect("edwards id")))
        }
    })
}

macro_rules! field_of {
    ($m:ident) => {
        crate::field::PrimeField::new(
            consts::$m::FIELD_BITS,
            &consts::$m::FIELD_P,
            consts::$m::FIELD_N0,
            &consts::$m::FIELD_R2,
        )
    };
}

macro_rules! scalar_of {
    ($m:ident) => {
        ScalarField::new(consts::$m::ORDER_BITS, &consts::$m::ORDER, &consts::$m::ORDER_MU)
    };
}

/// Builds a short Weierstrass context; `None` for non-Weierstrass ids.
pub fn weierstrass(id: CurveId) -> Option<Curve> {
    macro_rules! wei {
        ($m:ident, $hash:expr) => {
            Curve::build(
                id,
                field_of!($m),
                scalar_of!($m),
                $hash,
                &consts::$m::CURVE_A,
                &consts::$m::CURVE_B,
                &consts::$m::CURVE_GX,
                &consts::$m::CURVE_GY,
                consts::$m::MAP_Z,
                None,
            )
        };
    }
    Some(match id {
        CurveId::P192 => wei!(p192, HashKind::Sha256),
        CurveId::P224 => wei!(p224, HashKind::Sha256),
        CurveId::P256 => wei!(p256, HashKind::Sha256),
        CurveId::P384 => wei!(p384, HashKind::Sha384),
        CurveId::P521 => wei!(p521, HashKind::Sha512),
        CurveId::Secp256k1 => {
            use consts::secp256k1 as k;
            Curve::build(
                id,
                field_of!(secp256k1),
                scalar_of!(secp256k1),
                HashKind::Sha256,
                &k::CURVE_A,
                &k::CURVE_B,
                &k::CURVE_GX,
                &k::CURVE_GY,
                k::MAP_Z,
                Some((
                    &k::ENDO_LAMBDA,
                    &k::ENDO_BETA,
                    &k::ENDO_MINUS_B1,
                    &k::ENDO_MINUS_B2,
                    &k::ENDO_G1,
                    &k::ENDO_G2,
                    k::ENDO_SHIFT,
                )),
            )
        }
        _ => return None,
    })
}

/// Builds a Montgomery context; `None` for other ids.
pub fn montgomery(id: CurveId) -> Option<MontCurve> {
    Some(match id {
        CurveId::X25519 => MontCurve::build(
            id,
            field_of!(p25519),
            scalar_of!(p25519),
            HashKind::Sha256,
            consts::p25519::MONT_A,
            consts::p25519::MONT_B,
            consts::p25519::MONT_GU,
            consts::p25519::MAP_Z,
            consts::p25519::COFACTOR,
            clamp25519,
        ),
        CurveId::X448 => MontCurve::build(
            id,
            field_of!(p448),
            scalar_of!(p448),
            HashKind::Sha512,
            consts::p448::MONT_A,
            consts::p448::MONT_B,
            consts::p448::MONT_GU,
            consts::p448::MAP_Z,
            consts::p448::COFACTOR,
            clamp_x448,
        ),
        _ => return None,
    })
}

/// Builds a twisted Edwards context; `None` for other ids.
pub fn edwards(id: CurveId) -> Option<EdwardsCurve> {
    Some(match id {
        CurveId::Ed25519 => EdwardsCurve::build(
            id,
            field_of!(p25519),
            scalar_of!(p25519),
            HashKind::Sha512,
            &consts::p25519::EDWARDS_D,
            -1,
            &consts::p25519::EDWARDS_GX,
            &consts::p25519::EDWARDS_GY,
            Some(consts::p25519::MONT_A),
            1,
            consts::p25519::MAP_Z,
            consts::p25519::COFACTOR,
            false,
            b"SigEd25519 no Ed25519 collisions",
            clamp25519,
        ),
        CurveId::Ed448 => EdwardsCurve::build(
            id,
            field_of!(p448),
            scalar_of!(p448),
            HashKind::Shake256,
            &consts::p448::EDWARDS_D,
            1,
            &consts::p448::EDWARDS_GX,
            &consts::p448::EDWARDS_GY,
            Some(consts::p448::MONT_A),
            consts::p448::ISOGENY_DEGREE,
            consts::p448::MAP_Z,
            consts::p448::COFACTOR,
            true,
            b"SigEd448",
            clamp_ed448,
        ),
        CurveId::Ed1174 => EdwardsCurve::build(
            id,
            field_of!(p251),
            scalar_of!(p251),
            HashKind::Sha512,
            &consts::p251::EDWARDS_D,
            1,
            &consts::p251::EDWARDS_GX,
            &consts::p251::EDWARDS_GY,
            None,
            1,
            consts::p251::MAP_Z,
            consts::p251::COFACTOR,
            false,
            b"SigEd1174",
            clamp1174,
        ),
        _ => return None,
    })
}

/// RFC 7748 clamp for 32-byte Curve25519/Ed25519 scalars.
pub(crate) fn clamp25519(k: &mut [u8]) {
    k[0] &= 248;
    k[31] &= 127;
    k[31] |= 64;
}

/// RFC 7748 clamp for 56-byte X448 scalars.
pub(crate) fn clamp_x448(k: &mut [u8]) {
    k[0] &= 252;
    k[55] |= 128;
}

/// RFC 8032 clamp for 57-byte Ed448 scalars (top byte cleared).
pub(crate) fn clamp_ed448(k: &mut [u8]) {
    k[0] &= 252;
    k[55] |= 128;
    k[56] = 0;
}

/// Cofactor-4 clamp for 32-byte Curve1174 scalars.
pub(crate) fn clamp1174(k: &mut [u8]) {
    k[0] &= 252;
    k[31] &= 3;
    k[31] |= 2;
}
