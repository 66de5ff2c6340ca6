//! Participant-side FROST threshold Schnorr signatures over secp256k1,
//! compatible with BIP340 x-only signatures.
//!
//! This crate implements the participant half of the FROST protocol: key
//! generation (with Feldman verifiable secret sharing and a Schnorr proof of
//! knowledge per dealer), two-round threshold signing, proactive share
//! refresh, share repair, and threshold increase/decrease. A reference
//! [`aggregator`] is included so the whole protocol can be exercised and
//! tested end-to-end; production deployments may supply their own as long as
//! it reproduces the same hash framings.
//!
//! Curve and field arithmetic is not reimplemented here: [`primitives`] names
//! the concrete `ark-secp256k1` / `ark-ff` / `ark-ec` types this crate builds
//! on and provides the byte-level conversions (SEC compression, tagged
//! hashing, parity checks) the protocol layer needs on top of them.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod aggregator;
pub mod error;
pub mod lagrange;
pub mod matrix;
pub mod parameters;
pub mod participant;
pub mod polynomial;
pub mod primitives;
pub mod proof_of_knowledge;
pub mod share;
pub mod sign;
pub mod utils;

pub use error::{Error, FrostResult};
pub use parameters::ThresholdParameters;
pub use participant::Participant;
