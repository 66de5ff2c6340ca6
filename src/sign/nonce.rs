//! Round-1 nonce generation for the signing protocol (spec §4.6).
//!
//! Adapted from the teacher crate's `sign::precomputation` module, but
//! specialised to the single-use `(d_i, e_i)` pair the specification's data
//! model describes (invariant 6, spec §3) rather than a batch of
//! precomputed commitment shares for scheduling ahead of time.

use ark_ff::UniformRand;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::primitives::{generator, Point, Scalar};

/// A hiding/binding nonce pair `(d_i, e_i)`, sampled uniformly for one
/// signing session and used at most once.
#[derive(Debug, CanonicalSerialize, CanonicalDeserialize, Zeroize)]
pub struct NoncePair(pub(crate) Scalar, pub(crate) Scalar);

impl Drop for NoncePair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl NoncePair {
    /// Samples `(d_i, e_i) <- ZZ_q x ZZ_q` uniformly.
    pub fn new(mut rng: impl RngCore + CryptoRng) -> Self {
        NoncePair(Scalar::rand(&mut rng), Scalar::rand(&mut rng))
    }

    /// Computes the public commitment pair `(D_i, E_i) = (d_i * G, e_i * G)`
    /// to publish to the aggregator.
    pub fn commitment_pair(&self) -> (Point, Point) {
        let g = generator();
        (g * self.0, g * self.1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn commitment_pair_matches_generator_multiplication() {
        let nonce_pair = NoncePair::new(&mut OsRng);
        let (d, e) = nonce_pair.commitment_pair();
        let g = generator();
        assert_eq!(d, g * nonce_pair.0);
        assert_eq!(e, g * nonce_pair.1);
    }
}
