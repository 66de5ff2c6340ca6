//! Reference aggregator (SPEC_FULL §4.10): computes the group commitment,
//! binding values and BIP340 challenge, and combines partial signatures into
//! a verifiable `(R, z)` signature.
//!
//! The participant-side protocol this crate specifies treats the aggregator
//! as an external collaborator; this module is a non-networked reference
//! implementation of that collaborator's interface, included so the crate
//! is independently testable end-to-end and so the exact hash framings in
//! SPEC_FULL §6 have one canonical home. A production deployment is free to
//! swap in its own aggregator as long as it reproduces the same framings.

use ark_ff::Zero;
use sha2::{Digest, Sha256};

use crate::error::{Error, FrostResult};
use crate::primitives::{
    concat_sec, generator, index_byte, is_identity, is_odd_y, scalar_from_be_bytes, sec_bytes,
    tagged_hash, xonly_bytes, Point, Scalar, BIP340_CHALLENGE_TAG,
};
use crate::utils::{ToString, Vec};

/// A signer's published nonce commitment pair `(D_i, E_i)`.
pub type CommitmentPair = (Point, Point);

/// A BIP340-style signature: an x-only nonce commitment and a scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub group_commitment: Point,
    pub z: Scalar,
}

impl Signature {
    /// The 64-byte `(xonly(R), z)` BIP340 encoding.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&xonly_bytes(&self.group_commitment));
        out[32..].copy_from_slice(&self.z.into_bigint_be());
        out
    }
}

trait ScalarBytes {
    fn into_bigint_be(self) -> [u8; 32];
}

impl ScalarBytes for Scalar {
    fn into_bigint_be(self) -> [u8; 32] {
        use ark_ff::{BigInteger, PrimeField};
        let bytes = self.into_bigint().to_bytes_be();
        let mut out = [0u8; 32];
        let start = 32 - bytes.len();
        out[start..].copy_from_slice(&bytes);
        out
    }
}

/// Orders commitment pairs and their indices consistently before hashing,
/// since every participant must hash the same byte string to agree on R,
/// rho_i and c.
fn ordered_commitment_points(commitment_pairs: &[CommitmentPair]) -> Vec<Point> {
    let mut points = Vec::with_capacity(commitment_pairs.len() * 2);
    for (d, e) in commitment_pairs {
        points.push(*d);
        points.push(*e);
    }
    points
}

/// Computes this signer's binding value `rho_i = H_1(i || m || B)`, a plain
/// (non-tagged) SHA-256 over the index byte, the message, and every signer's
/// `(D, E)` pair in `indices` order.
pub fn binding_value(
    index: u32,
    message: &[u8],
    commitment_pairs: &[CommitmentPair],
    indices: &[u32],
) -> FrostResult<Scalar> {
    if commitment_pairs.len() != indices.len() {
        return Err(Error::InvalidArgument(
            "commitment pair count must match the index count".to_string(),
        ));
    }
    let mut hasher = Sha256::new();
    hasher.update([index_byte(index)]);
    hasher.update(message);
    hasher.update(concat_sec(&ordered_commitment_points(commitment_pairs)));
    let digest: [u8; 32] = hasher.finalize().into();
    Ok(scalar_from_be_bytes(&digest))
}

/// Computes the group commitment `R = sum_i (D_i + rho_i * E_i)`.
pub fn group_commitment(
    message: &[u8],
    commitment_pairs: &[CommitmentPair],
    indices: &[u32],
) -> FrostResult<Point> {
    if commitment_pairs.len() != indices.len() {
        return Err(Error::InvalidArgument(
            "commitment pair count must match the index count".to_string(),
        ));
    }
    let mut r = Point::zero();
    for (&i, &(d, e)) in indices.iter().zip(commitment_pairs.iter()) {
        let rho_i = binding_value(i, message, commitment_pairs, indices)?;
        r += d + e * rho_i;
    }
    Ok(r)
}

/// Computes the BIP340 challenge `c = tagged_hash("BIP0340/challenge",
/// xonly(R) || xonly(Y) || m)`, reduced into the scalar field.
pub fn challenge_hash(group_commitment: &Point, public_key: &Point, message: &[u8]) -> Scalar {
    let mut data = Vec::with_capacity(64 + message.len());
    data.extend_from_slice(&xonly_bytes(group_commitment));
    data.extend_from_slice(&xonly_bytes(public_key));
    data.extend_from_slice(message);
    let digest = tagged_hash(BIP340_CHALLENGE_TAG, &data);
    scalar_from_be_bytes(&digest)
}

/// Sums a set of partial signatures into the final `(R, z)`.
pub fn combine(partial_signatures: &[Scalar], group_commitment: Point) -> Signature {
    let z = partial_signatures
        .iter()
        .fold(Scalar::zero(), |acc, z_i| acc + *z_i);
    Signature { group_commitment, z }
}

/// Full BIP340 verification of a combined signature against an x-only
/// public key. Never called by the participant-side signing path itself;
/// provided so end-to-end tests can check the protocol actually produces
/// valid signatures.
pub fn verify(signature: &Signature, public_key: &Point, message: &[u8]) -> FrostResult<bool> {
    if is_identity(&signature.group_commitment) || is_identity(public_key) {
        return Err(Error::Precondition(
            "group commitment and public key must not be the identity".to_string(),
        ));
    }

    let c = challenge_hash(&signature.group_commitment, public_key, message);

    // BIP340 verifies against the even-Y normalization of the public key:
    // if Y has odd y, the "effective" key used throughout signing is -Y.
    let even_public_key = if is_odd_y(public_key) { -*public_key } else { *public_key };

    let expected_r = generator() * signature.z - even_public_key * c;
    if is_identity(&expected_r) {
        return Ok(false);
    }
    if is_odd_y(&expected_r) {
        return Ok(false);
    }
    Ok(sec_bytes(&expected_r)[1..] == sec_bytes(&signature.group_commitment)[1..])
}
