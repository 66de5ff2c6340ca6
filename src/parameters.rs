//! The only configuration surface this crate has: the threshold/cohort size
//! pair every participant is constructed with.

use crate::error::{Error, FrostResult};
use crate::utils::ToString;

/// `(t, n)`: any `t` of `n` participants can jointly sign; fewer than `t`
/// cannot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ThresholdParameters {
    /// The threshold, `t`.
    pub t: u32,
    /// The total number of participants, `n`.
    pub n: u32,
}

impl ThresholdParameters {
    /// Builds a new set of threshold parameters, rejecting anything that
    /// can't possibly run the protocol: `t` must be at least 1, at most `n`,
    /// and `n` must fit the single-byte index encoding (`n <= 255`).
    pub fn new(n: u32, t: u32) -> FrostResult<Self> {
        if n == 0 || n > 255 {
            return Err(Error::InvalidArgument(
                "participant count must be in 1..=255 to fit the single-byte index encoding"
                    .to_string(),
            ));
        }
        if t == 0 || t > n {
            return Err(Error::InvalidArgument(
                "threshold must be in 1..=n".to_string(),
            ));
        }
        Ok(ThresholdParameters { t, n })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_zero_threshold() {
        assert!(ThresholdParameters::new(3, 0).is_err());
    }

    #[test]
    fn rejects_threshold_above_n() {
        assert!(ThresholdParameters::new(3, 4).is_err());
    }

    #[test]
    fn rejects_too_many_participants() {
        assert!(ThresholdParameters::new(256, 2).is_err());
    }

    #[test]
    fn accepts_valid_parameters() {
        let params = ThresholdParameters::new(5, 3).unwrap();
        assert_eq!(params.n, 5);
        assert_eq!(params.t, 3);
    }
}
