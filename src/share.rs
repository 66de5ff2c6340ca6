//! Feldman verifiable secret sharing: coefficient commitment bundles and the
//! share-check equation (spec §4.3).

use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::error::{Error, FrostResult};
use crate::primitives::{generator, scalar_from_index, Point, Scalar};
use crate::utils::{ToString, Vec};

/// The public commitments `(phi_0, ..., phi_{t-1})` a dealer broadcasts
/// alongside its proof of knowledge, tagged with the dealer's index so a
/// verifier can look it up among several.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerifiableSecretSharingCommitment {
    /// The dealer's participant index.
    pub index: u32,
    /// `phi_0 .. phi_{t-1}`.
    pub points: Vec<Point>,
}

impl VerifiableSecretSharingCommitment {
    /// `phi_0 = a_0 * G`, the dealer's contribution to the joint public key.
    pub fn secret_commitment(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Checks that `y == f(at_index)` against these commitments, per the
    /// Feldman equation `y * G =? sum_k (at_index^k) * phi_k`. Rejects a
    /// commitment count that doesn't match the expected threshold.
    pub fn verify_share(&self, at_index: u32, y: &Scalar, threshold: usize) -> FrostResult<bool> {
        if self.points.len() != threshold {
            return Err(Error::InvalidArgument(
                "coefficient commitment count must match the threshold".to_string(),
            ));
        }

        let i = scalar_from_index(at_index);
        let mut power = Scalar::from(1u64);
        let mut expected = Point::zero();
        for commitment in self.points.iter() {
            expected += *commitment * power;
            power *= i;
        }

        Ok(generator() * *y == expected)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::polynomial::Coefficients;
    use rand::rngs::OsRng;

    #[test]
    fn valid_share_verifies_for_every_evaluator() {
        let coefficients = Coefficients::sample_dkg(3, &mut OsRng);
        let commitment = VerifiableSecretSharingCommitment {
            index: 1,
            points: coefficients.commit(),
        };
        let shares = coefficients.generate_shares(5);
        for i in 1..=5u32 {
            let y = shares[(i - 1) as usize];
            assert!(commitment.verify_share(i, &y, 3).unwrap());
        }
    }

    #[test]
    fn tampered_share_fails_verification() {
        let coefficients = Coefficients::sample_dkg(3, &mut OsRng);
        let commitment = VerifiableSecretSharingCommitment {
            index: 1,
            points: coefficients.commit(),
        };
        let mut y = coefficients.evaluate(Scalar::from(2u64));
        y += Scalar::from(1u64);
        assert!(!commitment.verify_share(2, &y, 3).unwrap());
    }

    #[test]
    fn wrong_commitment_count_is_rejected() {
        let coefficients = Coefficients::sample_dkg(3, &mut OsRng);
        let commitment = VerifiableSecretSharingCommitment {
            index: 1,
            points: coefficients.commit(),
        };
        let y = coefficients.evaluate(Scalar::from(2u64));
        assert!(commitment.verify_share(2, &y, 4).is_err());
    }
}
