//! Signing-round types: nonce generation (round 1) lives here; the partial
//! signature computation itself is a [`crate::participant::Participant`]
//! method, since it needs the participant's long-lived aggregate share.

pub mod nonce;

pub use nonce::NoncePair;
