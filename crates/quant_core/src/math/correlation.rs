//! Correlation matrices with Cholesky decomposition.
//!
//! Given `n` independent standard normals `Z = [Z1, ..., Zn]`, correlated
//! normals `W` are produced as
//!
//! ```text
//! W = L * Z
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the correlation
//! matrix `C = L * L^T`.
//!
//! ## Usage
//!
//! ```
//! use quant_core::math::correlation::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::from_rows(&[
//!     vec![1.0, 0.5],
//!     vec![0.5, 1.0],
//! ]).unwrap();
//!
//! let cholesky = corr.cholesky().unwrap();
//!
//! let z = [0.5, 0.8];
//! let mut w = [0.0; 2];
//! cholesky.transform_into(&z, &mut w);
//! assert_eq!(w[0], 0.5);
//! ```

use crate::types::CorrelationError;

/// Tolerance for unit diagonal and symmetry checks.
const MATRIX_TOLERANCE: f64 = 1e-10;

/// Validated `n × n` correlation matrix, stored row-major.
///
/// Construction checks the shape, a unit diagonal, symmetry and that every
/// entry lies in `[-1, 1]`. Positive definiteness is only checked by
/// [`cholesky`](Self::cholesky).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order
    data: Vec<f64>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl CorrelationMatrix {
    /// Create a new correlation matrix from a flat row-major array.
    ///
    /// # Validation
    ///
    /// - Must have exactly dim*dim elements
    /// - Diagonal elements must be 1.0
    /// - Must be symmetric
    /// - Off-diagonal elements must be finite and in [-1, 1]
    pub fn new(data: &[f64], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !((diag - 1.0).abs() <= MATRIX_TOLERANCE) {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if !val_ij.is_finite() || !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange { i, j, value: val_ij });
                }

                if !((val_ij - val_ji).abs() <= MATRIX_TOLERANCE) {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Create a correlation matrix from nested rows.
    ///
    /// Every row must have as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, CorrelationError> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(CorrelationError::InvalidDimensions {
                    expected: dim,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(&data, dim)
    }

    /// Uncorrelated `dim × dim` matrix.
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Compute the Cholesky decomposition (lower triangular L with C = L * L^T).
    ///
    /// Diagonal: `L[i][i] = sqrt(C[i][i] - Σ_k L[i][k]²)`;
    /// off-diagonal: `L[i][j] = (C[i][j] - Σ_k L[i][k]·L[j][k]) / L[j][j]`.
    ///
    /// # Errors
    ///
    /// `CorrelationError::NotPositiveDefinite` as soon as a diagonal pivot is
    /// non-positive (or NaN), instead of letting NaN leak into the factor.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += lower[i * n + k] * lower[j * n + k];
                }

                if i == j {
                    let pivot = self.get(i, i) - sum;
                    if !(pivot > 0.0) {
                        return Err(CorrelationError::NotPositiveDefinite { index: i, pivot });
                    }
                    lower[i * n + i] = pivot.sqrt();
                } else {
                    lower[i * n + j] = (self.get(i, j) - sum) / lower[j * n + j];
                }
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

impl TryFrom<Vec<Vec<f64>>> for CorrelationMatrix {
    type Error = CorrelationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<CorrelationMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CorrelationMatrix) -> Self {
        matrix.data.chunks(matrix.dim.max(1)).map(<[f64]>::to_vec).collect()
    }
}

/// Lower-triangular `L` with `L·Lᵀ` equal to the factorised matrix.
///
/// Maps independent standard normals onto correlated ones.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    /// Lower triangular matrix elements (row-major)
    data: Vec<f64>,
    /// Matrix dimension
    dim: usize,
}

impl CholeskyFactor {
    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    ///
    /// Returns zero for upper triangular elements (j > i).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Computes `W = L * Z` into `out` without allocating.
    ///
    /// `correlated[i] = Σ_{k≤i} L[i][k]·z[k]`. Only the first `dim` entries of
    /// `z` and `out` are touched.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than `dim`.
    #[inline]
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        let n = self.dim;
        for (i, slot) in out[..n].iter_mut().enumerate() {
            let row = &self.data[i * n..i * n + i + 1];
            *slot = row.iter().zip(&z[..=i]).map(|(l, zk)| l * zk).sum();
        }
    }

    /// Multiplies the factor by its transpose, recovering the correlation matrix.
    pub fn reconstruct(&self) -> Vec<Vec<f64>> {
        let n = self.dim;
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| (0..=i.min(j)).map(|k| self.get(i, k) * self.get(j, k)).sum())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cholesky_2x2_reconstructs_original() {
        let rows = vec![vec![1.0, 0.5], vec![0.5, 1.0]];
        let corr = CorrelationMatrix::from_rows(&rows).unwrap();
        let chol = corr.cholesky().unwrap();

        let rebuilt = chol.reconstruct();
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(rebuilt[i][j], rows[i][j], epsilon = 1e-9);
            }
        }
        assert_relative_eq!(chol.get(1, 0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(chol.get(1, 1), 0.75_f64.sqrt(), epsilon = 1e-15);
        assert_eq!(chol.get(0, 1), 0.0);
    }

    #[test]
    fn test_cholesky_3x3_reconstructs_original() {
        let rows = vec![
            vec![1.0, 0.3, -0.2],
            vec![0.3, 1.0, 0.4],
            vec![-0.2, 0.4, 1.0],
        ];
        let chol = CorrelationMatrix::from_rows(&rows).unwrap().cholesky().unwrap();
        let rebuilt = chol.reconstruct();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rebuilt[i][j], rows[i][j], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_identity_factor_is_identity() {
        let chol = CorrelationMatrix::identity(3).cholesky().unwrap();
        let z = [0.1, -0.7, 1.3];
        let mut w = [0.0; 3];
        chol.transform_into(&z, &mut w);
        assert_eq!(w, z);
    }

    #[test]
    fn test_transform_matches_definition() {
        let corr = CorrelationMatrix::from_rows(&[vec![1.0, 0.6], vec![0.6, 1.0]]).unwrap();
        let chol = corr.cholesky().unwrap();
        let z = [1.0, 2.0];
        let mut w = [0.0; 2];
        chol.transform_into(&z, &mut w);
        assert_relative_eq!(w[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(w[1], 0.6 * 1.0 + 0.8 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_not_positive_definite_rejected() {
        // Pairwise valid but jointly inconsistent correlations
        let rows = vec![
            vec![1.0, 0.9, -0.9],
            vec![0.9, 1.0, 0.9],
            vec![-0.9, 0.9, 1.0],
        ];
        let corr = CorrelationMatrix::from_rows(&rows).unwrap();
        assert!(matches!(
            corr.cholesky(),
            Err(CorrelationError::NotPositiveDefinite { index: 2, .. })
        ));
    }

    #[test]
    fn test_perfect_correlation_rejected() {
        let corr = CorrelationMatrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        assert!(matches!(
            corr.cholesky(),
            Err(CorrelationError::NotPositiveDefinite { index: 1, .. })
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            CorrelationMatrix::new(&[1.0, 0.5, 0.5], 2),
            Err(CorrelationError::InvalidDimensions { expected: 4, got: 3 })
        ));
        assert!(matches!(
            CorrelationMatrix::from_rows(&[vec![1.0, 0.5], vec![0.4, 1.0]]),
            Err(CorrelationError::NotSymmetric { i: 0, j: 1 })
        ));
        assert!(matches!(
            CorrelationMatrix::from_rows(&[vec![0.9, 0.0], vec![0.0, 1.0]]),
            Err(CorrelationError::InvalidDiagonal { index: 0, .. })
        ));
        assert!(matches!(
            CorrelationMatrix::from_rows(&[vec![1.0, 1.5], vec![1.5, 1.0]]),
            Err(CorrelationError::OutOfRange { i: 0, j: 1, .. })
        ));
        assert!(matches!(
            CorrelationMatrix::from_rows(&[vec![1.0, 0.0], vec![0.0]]),
            Err(CorrelationError::InvalidDimensions { .. })
        ));
        assert!(CorrelationMatrix::from_rows(&[vec![1.0, f64::NAN], vec![f64::NAN, 1.0]]).is_err());
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![1.0, -0.25], vec![-0.25, 1.0]];
        let corr = CorrelationMatrix::try_from(rows.clone()).unwrap();
        assert_eq!(Vec::<Vec<f64>>::from(corr), rows);
    }
}
