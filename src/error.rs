use thiserror::Error;

/// Failure taxonomy of the public APIs.
///
/// Routines that see secret material never reveal, through timing or
/// error detail, which condition fired; the variants exist for callers
/// handling public inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ASCII identifier names no registered curve.
    #[error("unknown curve identifier")]
    UnknownCurve,
    /// Wrong length, bad point encoding, out-of-range value.
    #[error("malformed encoding")]
    InvalidEncoding,
    /// Zero scalar, identity point or small-order key where the
    /// operation requires freedom.
    #[error("invalid or weak key")]
    InvalidKey,
    /// An algebraic signature check failed.
    #[error("invalid signature")]
    InvalidSignature,
}
