//! Error types for the FROST-BIP340 participant core.
//!
//! Mirrors the five error kinds this crate's specification distinguishes:
//! argument validation, precondition violations, type mismatches, verification
//! failures (returned as `bool`, not an `Error`), and degenerate curve
//! conditions (folded into `Precondition`, matching the spec's own wording).

use core::fmt;

#[cfg(not(feature = "std"))]
use crate::utils::{String, ToString};

/// The crate-wide result type, parametrised only by the success value: the
/// ciphersuite is fixed to secp256k1 / SHA-256 / BIP340, so there is no
/// per-ciphersuite type parameter to thread through (contrast the teacher
/// crate's `FrostResult<C, T>`).
pub type FrostResult<T> = Result<T, Error>;

/// Errors raised by the participant-side FROST protocol core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Non-integer or out-of-range inputs, duplicate participant indices, or
    /// element-count mismatches against the expected threshold/cohort size.
    InvalidArgument(String),
    /// An operation was called before its phase, or a degenerate curve
    /// condition (identity group commitment or public key) was encountered
    /// during signing.
    Precondition(String),
    /// A proof or share arrived with the wrong shape after deserialization
    /// (wrong arity, or a scalar where a group element was expected).
    TypeMismatch(String),
    /// A Feldman share failed its verification equation.
    ShareVerification,
    /// (De)serialization of a protocol message failed.
    SerializationError,
    DeserializationError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::Precondition(msg) => write!(f, "precondition violation: {msg}"),
            Error::TypeMismatch(msg) => write!(f, "type mismatch: {msg}"),
            Error::ShareVerification => write!(f, "share verification failed"),
            Error::SerializationError => write!(f, "failed to serialize protocol message"),
            Error::DeserializationError => write!(f, "failed to deserialize protocol message"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
