//! Schnorr proof of knowledge of a participant's secret coefficient `a_{i,0}`
//! (spec §4.2), binding the participant's index and the `"FROST-BIP340"`
//! context string into the challenge.

use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::primitives::{generator, index_byte, scalar_from_be_bytes, sec_bytes, Point, Scalar, CONTEXT_STRING};

/// A Schnorr proof of knowledge: `(R_i, mu_i)`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProofOfKnowledge {
    /// The nonce commitment `R_i = k * G`.
    pub commitment: Point,
    /// `mu_i = k + a_{i,0} * c_i`.
    pub response: Scalar,
}

impl Zeroize for ProofOfKnowledge {
    fn zeroize(&mut self) {
        self.response.zeroize();
        self.commitment = Point::zero();
    }
}

impl Drop for ProofOfKnowledge {
    fn drop(&mut self) {
        self.zeroize();
    }
}

fn challenge(index: u32, secret_commitment: &Point, nonce_commitment: &Point) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update([index_byte(index)]);
    hasher.update(CONTEXT_STRING);
    hasher.update(sec_bytes(secret_commitment));
    hasher.update(sec_bytes(nonce_commitment));
    let digest: [u8; 32] = hasher.finalize().into();
    scalar_from_be_bytes(&digest)
}

impl ProofOfKnowledge {
    /// Proves knowledge of `secret`, whose commitment `secret * G` is
    /// `secret_commitment`, binding in `index`.
    pub fn prove(index: u32, secret: &Scalar, secret_commitment: &Point, mut rng: impl RngCore + CryptoRng) -> Self {
        use ark_ff::UniformRand;

        let k = Scalar::rand(&mut rng);
        let nonce_commitment = generator() * k;
        let c = challenge(index, secret_commitment, &nonce_commitment);
        let response = k + *secret * c;

        ProofOfKnowledge {
            commitment: nonce_commitment,
            response,
        }
    }

    /// Verifies this proof against a peer's claimed secret commitment and
    /// index. `R_l =? mu_l * G + (-c_l) * phi_{l,0}`: the field negation of
    /// `c_l` stands in for "(Q - c_l)" without ever negating the group
    /// element directly.
    pub fn verify(&self, index: u32, secret_commitment: &Point) -> bool {
        let c = challenge(index, secret_commitment, &self.commitment);
        let expected = generator() * self.response + *secret_commitment * (-c);
        self.commitment == expected
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitives::generator;
    use ark_ff::UniformRand;
    use rand::rngs::OsRng;

    #[test]
    fn valid_proof_verifies() {
        let secret = Scalar::rand(&mut OsRng);
        let secret_commitment = generator() * secret;
        let proof = ProofOfKnowledge::prove(1, &secret, &secret_commitment, &mut OsRng);
        assert!(proof.verify(1, &secret_commitment));
    }

    #[test]
    fn flipped_response_byte_fails_verification() {
        let secret = Scalar::rand(&mut OsRng);
        let secret_commitment = generator() * secret;
        let mut proof = ProofOfKnowledge::prove(3, &secret, &secret_commitment, &mut OsRng);
        proof.response += Scalar::from(1u64);
        assert!(!proof.verify(3, &secret_commitment));
    }

    #[test]
    fn flipped_commitment_fails_verification() {
        let secret = Scalar::rand(&mut OsRng);
        let secret_commitment = generator() * secret;
        let mut proof = ProofOfKnowledge::prove(3, &secret, &secret_commitment, &mut OsRng);
        proof.commitment += generator();
        assert!(!proof.verify(3, &secret_commitment));
    }

    #[test]
    fn wrong_index_fails_verification() {
        let secret = Scalar::rand(&mut OsRng);
        let secret_commitment = generator() * secret;
        let proof = ProofOfKnowledge::prove(3, &secret, &secret_commitment, &mut OsRng);
        assert!(!proof.verify(4, &secret_commitment));
    }
}
