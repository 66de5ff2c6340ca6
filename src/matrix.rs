//! The Vandermonde matrix primitive (spec §4.9), used to recover coefficient
//! commitments from a set of public verification shares.

use ark_ff::{Field, Zero};

use crate::error::{Error, FrostResult};
use crate::primitives::{scalar_from_index, Point, Scalar};
use crate::utils::{ToString, Vec};

/// A square matrix of scalar field elements, row-major.
#[derive(Clone, Debug)]
pub struct Matrix {
    rows: Vec<Vec<Scalar>>,
}

impl Matrix {
    /// Builds the alpha x alpha Vandermonde matrix `V[r][k] = indices[r]^k`.
    pub fn vandermonde(indices: &[u32]) -> Self {
        let alpha = indices.len();
        let rows = indices
            .iter()
            .map(|&p| {
                let p = scalar_from_index(p);
                let mut row = Vec::with_capacity(alpha);
                let mut power = Scalar::from(1u64);
                for _ in 0..alpha {
                    row.push(power);
                    power *= p;
                }
                row
            })
            .collect();
        Matrix { rows }
    }

    fn dim(&self) -> usize {
        self.rows.len()
    }

    /// Inverts this matrix over the scalar field via Gauss-Jordan
    /// elimination with an augmented identity matrix.
    pub fn inverse(&self) -> FrostResult<Matrix> {
        let n = self.dim();
        let mut a = self.rows.clone();
        let mut inv: Vec<Vec<Scalar>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { Scalar::from(1u64) } else { Scalar::zero() })
                    .collect()
            })
            .collect();

        for col in 0..n {
            // Find a pivot row with a non-zero entry in this column.
            let pivot_row = (col..n).find(|&r| !a[r][col].is_zero()).ok_or_else(|| {
                Error::InvalidArgument("Vandermonde matrix is singular: duplicate indices".to_string())
            })?;
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let pivot_inv = a[col][col].inverse().expect("checked non-zero above");
            for v in a[col].iter_mut() {
                *v *= pivot_inv;
            }
            for v in inv[col].iter_mut() {
                *v *= pivot_inv;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor.is_zero() {
                    continue;
                }
                for k in 0..n {
                    let a_col_k = a[col][k];
                    a[row][k] -= factor * a_col_k;
                    let inv_col_k = inv[col][k];
                    inv[row][k] -= factor * inv_col_k;
                }
            }
        }

        Ok(Matrix { rows: inv })
    }

    /// Multiplies this matrix by a column of group elements, realising the
    /// linear combination as `sum_k scalar * point` additions.
    pub fn mul_point_column(&self, column: &[Point]) -> FrostResult<Vec<Point>> {
        if column.len() != self.dim() {
            return Err(Error::InvalidArgument(
                "point column length must match the matrix dimension".to_string(),
            ));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(column.iter())
                    .fold(Point::zero(), |acc, (scalar, point)| acc + *point * *scalar)
            })
            .collect())
    }
}

/// Reconstructs `(phi_0, ..., phi_{alpha-1})` from public verification
/// shares `Y_1..Y_alpha` at participant indices `p_1..p_alpha` (spec §4.9).
pub fn derive_coefficient_commitments(shares: &[Point], indices: &[u32]) -> FrostResult<Vec<Point>> {
    if shares.len() != indices.len() {
        return Err(Error::InvalidArgument(
            "verification share count must match the index count".to_string(),
        ));
    }
    let vandermonde = Matrix::vandermonde(indices);
    let inverse = vandermonde.inverse()?;
    inverse.mul_point_column(shares)
}
