//! The per-participant FROST-BIP340 state machine (spec §3, §4).
//!
//! A [`Participant`] plays every cryptographic role across the protocol's
//! phases: dealer (DKG/refresh/threshold-increase), signer (two-round
//! signing), verifier (Feldman share and proof-of-knowledge checks), and
//! repair helper/recoverer. Phase-dependent fields are `Option`-typed and
//! preconditions are checked explicitly against them, in the style the
//! teacher crate uses for its own `Option`-heavy `Participant<C>` (see
//! DESIGN.md).

use ark_ff::{Field, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

#[cfg(not(feature = "std"))]
use alloc::format;

use crate::aggregator;
use crate::error::{Error, FrostResult};
use crate::lagrange::{lagrange_coefficient, lagrange_coefficient_at_zero};
use crate::parameters::ThresholdParameters;
use crate::polynomial::Coefficients;
use crate::primitives::{generator, is_identity, is_odd_y, scalar_from_index, Point, Scalar};
use crate::proof_of_knowledge::ProofOfKnowledge;
use crate::share::VerifiableSecretSharingCommitment;
use crate::sign::NoncePair;
use crate::utils::{ToString, Vec};

/// A participant in the FROST-BIP340 protocol.
pub struct Participant {
    /// This participant's index, fixed at construction.
    pub index: u32,
    parameters: ThresholdParameters,
    coefficients: Option<Coefficients>,
    commitment_bundle: Option<VerifiableSecretSharingCommitment>,
    proof_of_knowledge: Option<ProofOfKnowledge>,
    shares: Option<Vec<Scalar>>,
    aggregate_share: Option<Scalar>,
    nonce_pair: Option<NoncePair>,
    nonce_commitment_pair: Option<(Point, Point)>,
    public_key: Option<Point>,
    repair_shares: Option<Vec<Scalar>>,
    aggregate_repair_share: Option<Scalar>,
}

impl Drop for Participant {
    fn drop(&mut self) {
        if let Some(c) = self.coefficients.as_mut() {
            c.zeroize();
        }
        if let Some(s) = self.shares.as_mut() {
            for share in s.iter_mut() {
                share.zeroize();
            }
        }
        if let Some(s) = self.aggregate_share.as_mut() {
            s.zeroize();
        }
        if let Some(r) = self.repair_shares.as_mut() {
            for share in r.iter_mut() {
                share.zeroize();
            }
        }
        if let Some(s) = self.aggregate_repair_share.as_mut() {
            s.zeroize();
        }
    }
}

impl Participant {
    /// Constructs a new participant at `index` within a cohort described by
    /// `parameters`. No cryptographic material is generated yet.
    pub fn new(parameters: ThresholdParameters, index: u32) -> FrostResult<Self> {
        if index == 0 || index > parameters.n {
            return Err(Error::InvalidArgument(
                "participant index must be in 1..=n".to_string(),
            ));
        }
        Ok(Participant {
            index,
            parameters,
            coefficients: None,
            commitment_bundle: None,
            proof_of_knowledge: None,
            shares: None,
            aggregate_share: None,
            nonce_pair: None,
            nonce_commitment_pair: None,
            public_key: None,
            repair_shares: None,
            aggregate_repair_share: None,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.parameters.t
    }

    pub fn participants(&self) -> u32 {
        self.parameters.n
    }

    /// This participant's broadcastable coefficient commitment bundle, once
    /// a keygen/refresh/threshold-increase round has computed it.
    pub fn commitment_bundle(&self) -> Option<&VerifiableSecretSharingCommitment> {
        self.commitment_bundle.as_ref()
    }

    /// This participant's proof of knowledge of `a_{i,0}`, once computed.
    /// `None` after a refresh round, since `a_{i,0} == 0` there and there is
    /// nothing to prove.
    pub fn proof_of_knowledge(&self) -> Option<&ProofOfKnowledge> {
        self.proof_of_knowledge.as_ref()
    }

    pub fn aggregate_share(&self) -> Option<&Scalar> {
        self.aggregate_share.as_ref()
    }

    /// `f_i(1), ..., f_i(n)`, this participant's per-recipient shares from
    /// the current polynomial. Position `j - 1` is the share delivered to
    /// participant `j` (spec data model: `shares`).
    pub fn shares(&self) -> Option<&[Scalar]> {
        self.shares.as_deref()
    }

    pub fn public_key(&self) -> Option<&Point> {
        self.public_key.as_ref()
    }

    fn compute_commitments_and_pok(&mut self, prove: bool, rng: impl RngCore + CryptoRng) {
        let coefficients = self.coefficients.as_ref().expect("coefficients just set");
        let points = coefficients.commit();
        self.commitment_bundle = Some(VerifiableSecretSharingCommitment {
            index: self.index,
            points,
        });
        self.proof_of_knowledge = if prove {
            let secret_commitment = *self
                .commitment_bundle
                .as_ref()
                .unwrap()
                .secret_commitment()
                .expect("non-empty commitment bundle");
            Some(ProofOfKnowledge::prove(
                self.index,
                &coefficients.0[0],
                &secret_commitment,
                rng,
            ))
        } else {
            None
        };
    }

    /// Initializes a fresh DKG round: samples a degree-`(t-1)` polynomial,
    /// computes its coefficient commitments, and proves knowledge of the
    /// constant term (spec §4.1, §4.2).
    pub fn init_keygen(&mut self, mut rng: impl RngCore + CryptoRng) {
        self.coefficients = Some(Coefficients::sample_dkg(self.parameters.t as usize, &mut rng));
        self.compute_commitments_and_pok(true, rng);
    }

    /// Initializes a proactive refresh round: samples a polynomial with
    /// `a_{i,0} = 0` so the joint secret is unchanged, and computes
    /// commitments (no proof of knowledge: there is nothing to prove about
    /// a known-zero secret).
    pub fn init_refresh(&mut self, mut rng: impl RngCore + CryptoRng) {
        self.coefficients = Some(Coefficients::sample_refresh(self.parameters.t as usize, &mut rng));
        self.compute_commitments_and_pok(false, rng);
    }

    /// Initializes a threshold-increase round (spec §4.8). Requires
    /// `new_t > self.threshold()`. Updates `self.parameters.t` to `new_t`.
    pub fn init_threshold_increase(&mut self, new_t: u32, mut rng: impl RngCore + CryptoRng) -> FrostResult<()> {
        if new_t <= self.parameters.t {
            return Err(Error::InvalidArgument(
                "new threshold must be greater than the current threshold".to_string(),
            ));
        }
        self.coefficients = Some(Coefficients::sample_threshold_increase(new_t as usize, &mut rng));
        self.compute_commitments_and_pok(true, rng);
        self.parameters.t = new_t;
        Ok(())
    }

    /// Generates `f_i(1), ..., f_i(n)` from the current polynomial.
    pub fn generate_shares(&mut self) -> FrostResult<&[Scalar]> {
        let coefficients = self.coefficients.as_ref().ok_or_else(|| {
            Error::Precondition("polynomial coefficients must be initialized".to_string())
        })?;
        self.shares = Some(coefficients.generate_shares(self.parameters.n));
        Ok(self.shares.as_ref().unwrap())
    }

    /// Verifies that `y` equals `f_l(self.index)` against peer `l`'s
    /// coefficient commitments (spec §4.3).
    pub fn verify_share(
        &self,
        y: &Scalar,
        commitments: &VerifiableSecretSharingCommitment,
    ) -> FrostResult<bool> {
        commitments.verify_share(self.index, y, self.parameters.t as usize)
    }

    /// Aggregates this participant's own share and the shares received from
    /// every other participant into `s_i` (spec §4.4). Called again after a
    /// refresh round, the new aggregate adds onto the existing one.
    pub fn aggregate_shares(&mut self, other_shares: &[Scalar]) -> FrostResult<()> {
        let shares = self
            .shares
            .as_ref()
            .ok_or_else(|| Error::Precondition("participant's shares have not been initialized".to_string()))?;
        let own_index = (self.index - 1) as usize;
        let own_share = *shares
            .get(own_index)
            .ok_or_else(|| Error::InvalidArgument("participant index is out of range".to_string()))?;

        if other_shares.len() != (self.parameters.n - 1) as usize {
            return Err(Error::InvalidArgument(format!(
                "expected exactly {} other shares, received {}",
                self.parameters.n - 1,
                other_shares.len()
            )));
        }

        let mut aggregate = own_share;
        for share in other_shares {
            aggregate += share;
        }

        self.aggregate_share = Some(match self.aggregate_share {
            Some(existing) => existing + aggregate,
            None => aggregate,
        });
        Ok(())
    }

    /// Derives the joint public key `Y = phi_{i,0} + sum_l phi_{l,0}`,
    /// starting from this participant's own secret commitment (spec §4.4).
    pub fn derive_public_key(&mut self, other_secret_commitments: &[Point]) -> FrostResult<Point> {
        let own_commitment = *self
            .commitment_bundle
            .as_ref()
            .ok_or_else(|| Error::Precondition("coefficient commitments have not been initialized".to_string()))?
            .secret_commitment()
            .ok_or_else(|| Error::Precondition("coefficient commitments are empty".to_string()))?;

        let mut public_key = own_commitment;
        for commitment in other_secret_commitments {
            public_key += commitment;
        }
        self.public_key = Some(public_key);
        Ok(public_key)
    }

    /// Generates this session's single-use nonce pair `(d_i, e_i)` and its
    /// commitment `(D_i, E_i)` (spec §4.6, round 1).
    pub fn generate_nonce_pair(&mut self, rng: impl RngCore + CryptoRng) -> (Point, Point) {
        let nonce_pair = NoncePair::new(rng);
        let commitment_pair = nonce_pair.commitment_pair();
        self.nonce_pair = Some(nonce_pair);
        self.nonce_commitment_pair = Some(commitment_pair);
        commitment_pair
    }

    /// Produces this participant's partial signature `z_i` (spec §4.6,
    /// round 2). Consumes the round-1 nonce pair: it is discarded after this
    /// call regardless of success, honoring invariant 6 (spec §3) that a
    /// nonce pair is used in at most one signing session.
    pub fn sign(
        &mut self,
        message: &[u8],
        commitment_pairs: &[(Point, Point)],
        indices: &[u32],
    ) -> FrostResult<Scalar> {
        let nonce_pair = self.nonce_pair.take().ok_or_else(|| {
            Error::Precondition("nonce pair has not been initialized".to_string())
        })?;
        self.nonce_commitment_pair = None;

        let public_key = self
            .public_key
            .ok_or_else(|| Error::Precondition("public key has not been initialized".to_string()))?;
        if is_identity(&public_key) {
            return Err(Error::Precondition("public key is the point at infinity".to_string()));
        }
        let aggregate_share = self
            .aggregate_share
            .ok_or_else(|| Error::Precondition("aggregate share has not been initialized".to_string()))?;

        let group_commitment = aggregator::group_commitment(message, commitment_pairs, indices)?;
        if is_identity(&group_commitment) {
            return Err(Error::Precondition("group commitment is the point at infinity".to_string()));
        }

        let challenge = aggregator::challenge_hash(&group_commitment, &public_key, message);
        let binding_value = aggregator::binding_value(self.index, message, commitment_pairs, indices)?;
        let lambda = lagrange_coefficient_at_zero(self.index, indices)?;

        let (mut d, mut e) = (nonce_pair.0, nonce_pair.1);
        if is_odd_y(&group_commitment) {
            d = -d;
            e = -e;
        }

        let mut s = aggregate_share;
        if is_odd_y(&public_key) {
            s = -s;
        }

        Ok(d + e * binding_value + lambda * s * challenge)
    }

    /// Generates this helper's masked repair share for a peer who lost
    /// `s_lost_index` (spec §4.7). `cohort` is this helper's full repair
    /// cohort, excluding `lost_index`.
    pub fn generate_repair_shares(
        &mut self,
        cohort: &[u32],
        lost_index: u32,
        mut rng: impl RngCore + CryptoRng,
    ) -> FrostResult<()> {
        use ark_ff::UniformRand;

        if cohort.contains(&lost_index) {
            return Err(Error::InvalidArgument(
                "repair cohort must not include the participant being recovered".to_string(),
            ));
        }
        let aggregate_share = self
            .aggregate_share
            .ok_or_else(|| Error::Precondition("aggregate share has not been initialized".to_string()))?;

        let lambda = lagrange_coefficient(self.index, cohort, lost_index)?;
        let random_shares: Vec<Scalar> = (0..self.parameters.t - 1)
            .map(|_| Scalar::rand(&mut rng))
            .collect();
        let sum: Scalar = random_shares.iter().fold(Scalar::zero(), |acc, r| acc + r);
        let final_share = lambda * aggregate_share - sum;

        let mut shares = random_shares;
        shares.push(final_share);
        self.repair_shares = Some(shares);
        Ok(())
    }

    /// This helper's own retained repair-share slot (index 0): the only one
    /// that is not sent to another cohort member.
    pub fn repair_shares(&self) -> Option<&[Scalar]> {
        self.repair_shares.as_deref()
    }

    /// Aggregates this recipient's retained slot plus the slots received
    /// from every other helper into `aggregate_repair_share` (spec §4.7).
    /// `other_shares` must contain exactly `t - 1` elements: the retained
    /// first slot is not part of that count (see SPEC_FULL §9).
    pub fn aggregate_repair_shares(&mut self, other_shares: &[Scalar]) -> FrostResult<()> {
        let repair_shares = self
            .repair_shares
            .as_ref()
            .ok_or_else(|| Error::Precondition("participant's repair shares have not been initialized".to_string()))?;

        if other_shares.len() != (self.parameters.t - 1) as usize {
            return Err(Error::InvalidArgument(format!(
                "expected exactly {} other repair shares, received {}",
                self.parameters.t - 1,
                other_shares.len()
            )));
        }

        let mut aggregate = repair_shares[0];
        for share in other_shares {
            aggregate += share;
        }
        self.aggregate_repair_share = Some(aggregate);
        Ok(())
    }

    pub fn aggregate_repair_share(&self) -> Option<&Scalar> {
        self.aggregate_repair_share.as_ref()
    }

    /// Reconstructs this participant's lost aggregate share from `t`
    /// aggregate repair shares, one from each cohort helper (spec §4.7).
    /// Refuses if this participant already holds an aggregate share.
    pub fn repair_share(&mut self, aggregate_repair_shares: &[Scalar]) -> FrostResult<()> {
        if self.aggregate_share.is_some() {
            return Err(Error::Precondition(
                "participant's share has not been lost".to_string(),
            ));
        }
        if aggregate_repair_shares.len() != self.parameters.t as usize {
            return Err(Error::InvalidArgument(format!(
                "expected exactly {} aggregate repair shares, received {}",
                self.parameters.t,
                aggregate_repair_shares.len()
            )));
        }
        let sum = aggregate_repair_shares
            .iter()
            .fold(Scalar::zero(), |acc, s| acc + s);
        self.aggregate_share = Some(sum);
        Ok(())
    }

    /// Decrements the threshold by one after a share `(revealed_index,
    /// revealed_share)` has been publicly revealed (spec §4.8).
    pub fn decrement_threshold(&mut self, revealed_index: u32, revealed_share: Scalar) -> FrostResult<()> {
        let aggregate_share = self
            .aggregate_share
            .ok_or_else(|| Error::Precondition("participant's share has not been initialized".to_string()))?;

        self.parameters.t -= 1;

        let numerator = aggregate_share - revealed_share;
        let denominator = scalar_from_index(self.index) - scalar_from_index(revealed_index);
        let quotient = numerator
            * denominator
                .inverse()
                .ok_or_else(|| Error::InvalidArgument("revealed index must differ from this participant's index".to_string()))?;
        self.aggregate_share = Some(revealed_share - scalar_from_index(revealed_index) * quotient);
        Ok(())
    }

    /// Folds in this participant's increment-overlay shares after every
    /// participant has run [`Participant::init_threshold_increase`] and
    /// exchanged shares (spec §4.8). Checks `aggregate_share` against an
    /// explicit unset sentinel (`Option::None`), never a falsy/zero value
    /// (see SPEC_FULL §9).
    pub fn increase_threshold(&mut self, other_shares: &[Scalar]) -> FrostResult<()> {
        let shares = self
            .shares
            .as_ref()
            .ok_or_else(|| Error::Precondition("participant's shares have not been initialized".to_string()))?;
        if self.aggregate_share.is_none() {
            return Err(Error::Precondition(
                "participant's aggregate share has not been initialized".to_string(),
            ));
        }

        let own_share = shares[(self.index - 1) as usize];
        let sum_others = other_shares.iter().fold(Scalar::zero(), |acc, s| acc + s);
        let delta = own_share + sum_others;

        let aggregate_share = self.aggregate_share.as_mut().unwrap();
        *aggregate_share += delta * scalar_from_index(self.index);
        Ok(())
    }

    /// `Y_i = s_i * G`, the public verification share any peer can
    /// recompute from coefficient commitments to cross-check this
    /// participant's aggregate share.
    pub fn public_verification_share(&self) -> FrostResult<Point> {
        let aggregate_share = self
            .aggregate_share
            .ok_or_else(|| Error::Precondition("aggregate share has not been initialized".to_string()))?;
        Ok(generator() * aggregate_share)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aggregator;
    use rand::rngs::OsRng;

    fn run_dkg(n: u32, t: u32) -> (ThresholdParameters, Vec<Participant>) {
        let parameters = ThresholdParameters::new(n, t).unwrap();
        let mut participants: Vec<Participant> = (1..=n)
            .map(|i| Participant::new(parameters, i).unwrap())
            .collect();

        for p in participants.iter_mut() {
            p.init_keygen(&mut OsRng);
            p.generate_shares().unwrap();
        }

        let bundles: Vec<VerifiableSecretSharingCommitment> = participants
            .iter()
            .map(|p| p.commitment_bundle().unwrap().clone())
            .collect();
        let poks: Vec<(u32, ProofOfKnowledgeRef)> = participants
            .iter()
            .map(|p| (p.index, ProofOfKnowledgeRef(p.proof_of_knowledge().unwrap().clone())))
            .collect();

        for bundle in bundles.iter() {
            let (_, pok) = poks.iter().find(|(i, _)| *i == bundle.index).unwrap();
            assert!(pok.0.verify(bundle.index, bundle.secret_commitment().unwrap()));
        }

        for verifier in participants.iter() {
            for dealer in bundles.iter() {
                let y = {
                    let dealer_participant = &participants[(dealer.index - 1) as usize];
                    dealer_participant.shares.as_ref().unwrap()[(verifier.index - 1) as usize]
                };
                assert!(dealer.verify_share(verifier.index, &y, t as usize).unwrap());
            }
        }

        for i in 0..participants.len() {
            let my_index = participants[i].index;
            let other_shares: Vec<Scalar> = (0..participants.len())
                .filter(|&j| participants[j].index != my_index)
                .map(|j| participants[j].shares.as_ref().unwrap()[(my_index - 1) as usize])
                .collect();
            participants[i].aggregate_shares(&other_shares).unwrap();
        }

        for i in 0..participants.len() {
            let others: Vec<Point> = bundles
                .iter()
                .filter(|b| b.index != participants[i].index)
                .map(|b| *b.secret_commitment().unwrap())
                .collect();
            participants[i].derive_public_key(&others).unwrap();
        }

        (parameters, participants)
    }

    #[derive(Clone)]
    struct ProofOfKnowledgeRef(ProofOfKnowledge);

    #[test]
    fn dkg_then_sign_then_verify() {
        let (_params, mut participants) = run_dkg(3, 2);
        let signers_idx = [0usize, 1usize];
        let message = b"hello";

        let commitment_pairs: Vec<(Point, Point)> = signers_idx
            .iter()
            .map(|&i| participants[i].generate_nonce_pair(&mut OsRng))
            .collect();
        let indices: Vec<u32> = signers_idx.iter().map(|&i| participants[i].index).collect();

        let partials: Vec<Scalar> = signers_idx
            .iter()
            .map(|&i| {
                participants[i]
                    .sign(message, &commitment_pairs, &indices)
                    .unwrap()
            })
            .collect();

        let group_commitment = aggregator::group_commitment(message, &commitment_pairs, &indices).unwrap();
        let signature = aggregator::combine(&partials, group_commitment);
        let public_key = *participants[0].public_key().unwrap();
        assert!(aggregator::verify(&signature, &public_key, message).unwrap());
    }

    #[test]
    fn nonce_pair_cannot_be_reused() {
        let (_params, mut participants) = run_dkg(3, 2);
        let signers_idx = [0usize, 1usize];
        let message = b"hello";

        let commitment_pairs: Vec<(Point, Point)> = signers_idx
            .iter()
            .map(|&i| participants[i].generate_nonce_pair(&mut OsRng))
            .collect();
        let indices: Vec<u32> = signers_idx.iter().map(|&i| participants[i].index).collect();

        participants[0].sign(message, &commitment_pairs, &indices).unwrap();
        assert!(participants[0].sign(message, &commitment_pairs, &indices).is_err());
    }

    #[test]
    fn threshold_decrement_then_single_signer() {
        let (_params, mut participants) = run_dkg(3, 2);
        let revealed_index = participants[2].index;
        let revealed_share = *participants[2].aggregate_share().unwrap();

        for p in participants.iter_mut().take(2) {
            p.decrement_threshold(revealed_index, revealed_share).unwrap();
        }
        assert_eq!(participants[0].threshold(), 1);

        let message = b"solo";
        let commitment_pairs = vec![participants[0].generate_nonce_pair(&mut OsRng)];
        let indices = vec![participants[0].index];
        let partial = participants[0].sign(message, &commitment_pairs, &indices).unwrap();

        let group_commitment = aggregator::group_commitment(message, &commitment_pairs, &indices).unwrap();
        let signature = aggregator::combine(&[partial], group_commitment);
        let public_key = *participants[0].public_key().unwrap();
        assert!(aggregator::verify(&signature, &public_key, message).unwrap());
    }

    #[test]
    fn repair_recovers_lost_share() {
        let (_params, mut participants) = run_dkg(5, 3);
        let lost_index = participants[3].index;
        let original_share = *participants[3].aggregate_share().unwrap();

        let helpers_idx = [0usize, 1usize, 2usize];
        let cohort: Vec<u32> = helpers_idx.iter().map(|&i| participants[i].index).collect();

        for &i in helpers_idx.iter() {
            participants[i]
                .generate_repair_shares(&cohort, lost_index, &mut OsRng)
                .unwrap();
        }

        // Distribute: helper h keeps repair_shares[0]; every other helper
        // receives one of helper h's remaining slots, one per recipient.
        let mut per_helper_aggregates = Vec::new();
        for (slot, &recipient_i) in helpers_idx.iter().enumerate() {
            let mut received = Vec::new();
            for &sender_i in helpers_idx.iter() {
                if sender_i == recipient_i {
                    continue;
                }
                let sender_shares = participants[sender_i].repair_shares().unwrap();
                // the sender distributes its non-kept slots, one per other
                // cohort member, in cohort order excluding itself.
                let mut dest_order: Vec<usize> = helpers_idx
                    .iter()
                    .cloned()
                    .filter(|&j| j != sender_i)
                    .collect();
                let pos = dest_order.iter().position(|&j| j == recipient_i).unwrap();
                received.push(sender_shares[1 + pos]);
                let _ = slot;
                dest_order.clear();
            }
            per_helper_aggregates.push(received);
        }

        for (k, &i) in helpers_idx.iter().enumerate() {
            participants[i]
                .aggregate_repair_shares(&per_helper_aggregates[k])
                .unwrap();
        }

        let aggregates: Vec<Scalar> = helpers_idx
            .iter()
            .map(|&i| *participants[i].aggregate_repair_share().unwrap())
            .collect();

        participants[3].repair_share(&aggregates).unwrap();
        assert_eq!(*participants[3].aggregate_share().unwrap(), original_share);
    }
}
