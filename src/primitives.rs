//! Concrete curve and field primitives this crate builds on.
//!
//! Per the specification, curve-point arithmetic and modular inversion are
//! external collaborators: this module does no more than name the concrete
//! `ark-secp256k1` / `ark-ff` / `ark-ec` types and provide the handful of
//! byte-level conversions (SEC compression, index encoding, parity checks)
//! that the protocol layer needs on top of them.

use ark_ec::{CurveGroup, Group};
use ark_ff::{BigInteger, PrimeField, Zero};

use crate::utils::Vec;

/// The secp256k1 scalar field, modulo the group order `Q`.
pub type Scalar = ark_secp256k1::Fr;
/// The secp256k1 group, in projective (Jacobian) coordinates.
pub type Point = ark_secp256k1::Projective;

/// The context string domain-separating FROST-BIP340 proofs of knowledge
/// from any other Schnorr proof scheme sharing the same curve.
pub const CONTEXT_STRING: &[u8] = b"FROST-BIP340";

/// The BIP340 tag for the Schnorr challenge hash.
pub const BIP340_CHALLENGE_TAG: &[u8] = b"BIP0340/challenge";

/// Returns the generator `G` of the secp256k1 group.
pub fn generator() -> Point {
    Point::generator()
}

/// Encodes a participant index (1..=255) as the single big-endian byte the
/// wire format and hash framings use. Callers must have already validated
/// that `index` fits in a `u8` (see [`crate::parameters::ThresholdParameters`]).
pub fn index_byte(index: u32) -> u8 {
    index as u8
}

/// Maps a participant index into the scalar field, the same way a Lagrange
/// coefficient or polynomial evaluation point does.
pub fn scalar_from_index(index: u32) -> Scalar {
    Scalar::from(index as u64)
}

/// Reduces a SHA-256 digest (or any 32-byte big-endian integer) into the
/// scalar field. Used for the PoK challenge and the binding value, both of
/// which the spec describes as "interpreted big-endian as an integer".
pub fn scalar_from_be_bytes(bytes: &[u8]) -> Scalar {
    Scalar::from_be_bytes_mod_order(bytes)
}

/// `true` if the affine y-coordinate of `point` is odd, per BIP340 parity
/// rules. Callers must not pass the identity point.
pub fn is_odd_y(point: &Point) -> bool {
    let affine = point.into_affine();
    affine.y.into_bigint().is_odd()
}

/// `true` if `point` is the group identity ("point at infinity").
pub fn is_identity(point: &Point) -> bool {
    point.into_affine().is_zero()
}

/// 33-byte SEC (compressed) serialization: a one-byte parity prefix
/// (`0x02` even-y, `0x03` odd-y) followed by the 32-byte big-endian
/// x-coordinate. The identity point has no affine coordinates; it is
/// encoded as 33 zero bytes, a convention internal to this crate (it is
/// never produced on a path a correct caller can reach).
pub fn sec_bytes(point: &Point) -> [u8; 33] {
    let mut out = [0u8; 33];
    let affine = point.into_affine();
    if affine.is_zero() {
        return out;
    }
    out[0] = if affine.y.into_bigint().is_odd() { 0x03 } else { 0x02 };
    let x_bytes = affine.x.into_bigint().to_bytes_be();
    let start = 33 - x_bytes.len();
    out[start..].copy_from_slice(&x_bytes);
    out
}

/// 32-byte x-only serialization of a non-identity point, per BIP340.
pub fn xonly_bytes(point: &Point) -> [u8; 32] {
    let sec = sec_bytes(point);
    let mut out = [0u8; 32];
    out.copy_from_slice(&sec[1..]);
    out
}

/// Concatenates the SEC encodings of a sequence of points, in order. Used to
/// build the hash inputs for nonce-commitment bundles and binding values.
pub fn concat_sec(points: &[Point]) -> Vec<u8> {
    let mut out = Vec::with_capacity(points.len() * 33);
    for p in points {
        out.extend_from_slice(&sec_bytes(p));
    }
    out
}

/// `SHA256(SEC33(point))`, the out-of-band commit-reveal hash a transport
/// may use to let signers commit to a nonce pair before revealing it (spec
/// §6). The participant core never calls this itself; it exists so a
/// transport layer can reproduce the byte-exact framing.
pub fn nonce_commitment_hash(point: &Point) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    Sha256::digest(sec_bytes(point)).into()
}

/// BIP340 tagged hash: `SHA256(SHA256(tag) || SHA256(tag) || data)`.
pub fn tagged_hash(tag: &[u8], data: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let tag_hash = Sha256::digest(tag);
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    hasher.update(data);
    hasher.finalize().into()
}
