//! The polynomial & share engine (spec §4.1): a degree-`(t-1)` polynomial
//! over the secp256k1 scalar field, its three sampling flavors (fresh DKG,
//! proactive refresh, threshold-increase overlay), Horner evaluation, and
//! Feldman coefficient commitments.

use ark_ff::{UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::primitives::{generator, Point, Scalar};
use crate::utils::Vec;

/// A participant's secret polynomial coefficients `(a_0, ..., a_{t-1})`.
///
/// `Zeroize`s its backing vector on drop, matching the teacher crate's
/// handling of every type that carries scalar secret material.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Coefficients(pub Vec<Scalar>);

impl Zeroize for Coefficients {
    fn zeroize(&mut self) {
        for c in self.0.iter_mut() {
            c.zeroize();
        }
    }
}

impl Drop for Coefficients {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Coefficients {
    /// Samples `t` coefficients uniformly from `ZZ_q` for a fresh DKG round.
    /// The constant term, `a_0`, is this participant's secret contribution
    /// to the joint public key.
    pub fn sample_dkg(t: usize, mut rng: impl RngCore + CryptoRng) -> Self {
        Coefficients((0..t).map(|_| Scalar::rand(&mut rng)).collect())
    }

    /// Samples a refresh polynomial: `t` coefficients with `a_0` fixed at
    /// zero, so aggregating it into an existing share re-randomizes that
    /// share without moving the joint secret (invariant 3, spec §3).
    pub fn sample_refresh(t: usize, mut rng: impl RngCore + CryptoRng) -> Self {
        let mut coefficients = Vec::with_capacity(t);
        coefficients.push(Scalar::zero());
        for _ in 1..t {
            coefficients.push(Scalar::rand(&mut rng));
        }
        Coefficients(coefficients)
    }

    /// Samples the threshold-increase overlay polynomial: `new_t - 1`
    /// coefficients (degree `new_t - 2`), matching the reference
    /// implementation's sampled coefficient count (see SPEC_FULL §9).
    pub fn sample_threshold_increase(new_t: usize, mut rng: impl RngCore + CryptoRng) -> Self {
        Coefficients((0..new_t - 1).map(|_| Scalar::rand(&mut rng)).collect())
    }

    /// Evaluates `f(x)` via Horner's method, highest-degree coefficient
    /// first. `ark_ff`'s `Scalar` arithmetic reduces modulo `Q` on every
    /// operation, so no explicit reduction step is needed.
    pub fn evaluate(&self, x: Scalar) -> Scalar {
        let mut y = Scalar::zero();
        for coefficient in self.0.iter().rev() {
            y = y * x + *coefficient;
        }
        y
    }

    /// Evaluates `f(1), f(2), ..., f(n)`: the ordered sequence of shares
    /// to distribute, one per participant index.
    pub fn generate_shares(&self, n: u32) -> Vec<Scalar> {
        (1..=n)
            .map(|i| self.evaluate(Scalar::from(i as u64)))
            .collect()
    }

    /// Computes the Feldman coefficient commitments `phi_k = a_k * G`.
    pub fn commit(&self) -> Vec<Point> {
        let g = generator();
        self.0.iter().map(|a| g * *a).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
