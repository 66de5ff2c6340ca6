//! Lagrange coefficients (spec §4.5), used both for share reconstruction
//! (repair, threshold change) and for weighting partial signatures.

use ark_ff::{Field, Zero};

use crate::error::{Error, FrostResult};
use crate::primitives::{scalar_from_index, Scalar};
use crate::utils::{ToString, Vec};

/// Computes `lambda_i(x) = prod_{j in indices, j != i} (x - j) * (i - j)^-1`.
///
/// Rejects a cohort containing `my_index` more than once, or containing a
/// duplicate index anywhere: a repeated index drives a `(p_i - p_j)` factor
/// to zero, which has no inverse.
pub fn lagrange_coefficient(my_index: u32, indices: &[u32], x: u32) -> FrostResult<Scalar> {
    let mut seen = Vec::with_capacity(indices.len());
    for &j in indices {
        if seen.contains(&j) {
            return Err(Error::InvalidArgument(
                "participant indices must be unique".to_string(),
            ));
        }
        seen.push(j);
    }

    let my_index_field = scalar_from_index(my_index);
    let x_field = scalar_from_index(x);

    let mut numerator = Scalar::from(1u64);
    let mut denominator = Scalar::from(1u64);

    for &j in indices {
        if j == my_index {
            continue;
        }
        let j_field = scalar_from_index(j);
        numerator *= x_field - j_field;
        denominator *= my_index_field - j_field;
    }

    if denominator.is_zero() {
        return Err(Error::InvalidArgument(
            "duplicate participant indices: Lagrange denominator is zero".to_string(),
        ));
    }

    Ok(numerator * denominator.inverse().expect("checked non-zero above"))
}

/// `lagrange_coefficient` evaluated at `x = 0`, the common case for
/// reconstructing a polynomial's constant term.
pub fn lagrange_coefficient_at_zero(my_index: u32, indices: &[u32]) -> FrostResult<Scalar> {
    lagrange_coefficient(my_index, indices, 0)
}
