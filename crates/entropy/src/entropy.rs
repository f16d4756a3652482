//! Differential entropy of a multivariate gaussian given its covariance matrix.
//!
//! The entropy of `N(mu, K)` with `K` a (k, k) covariance matrix is
//! `0.5 * ln det(K) + 0.5 * k * ln(2 pi e)`. Only the log-determinant term is
//! computed here: the second term only depends on the dimension and cancels
//! out in entropy comparisons as well as in the mutual information
//! `H(A) + H(V\A) - H(V)` since `|A| + |V\A| = |V|`.
//! Natural logarithm is used and the entropy of an empty (0, 0) matrix is `0`.
use crate::errors::{EntropyError, Result};
use crate::utils::{check_square, masked_submatrix, principal_submatrix};
use linfa::Float;
use linfa_linalg::{cholesky::*, eigh::*, LinalgError};
use log::debug;
use ndarray::{ArrayBase, Data, Ix1, Ix2};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Default lower bound applied to eigenvalues by [LogDetMethod::EigenValues]
pub const EIGEN_FLOOR: f64 = 1e-9;

/// Method used to compute the log-determinant of a covariance matrix
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum LogDetMethod {
    /// Cholesky decomposition `K = L.L^T`, `ln det(K) = 2 * sum(ln(L_ii))`.
    /// A matrix which is not positive definite gets a `-inf` entropy.
    Cholesky,
    /// Symmetric eigen decomposition, eigenvalues lower than `floor` are
    /// raised to `floor` so that singular matrices get a finite entropy.
    EigenValues {
        /// Lower bound of the eigenvalues
        floor: f64,
    },
}

impl Default for LogDetMethod {
    fn default() -> Self {
        LogDetMethod::Cholesky
    }
}

impl LogDetMethod {
    /// Eigen decomposition method with the default [EIGEN_FLOOR]
    pub fn eigen() -> Self {
        LogDetMethod::EigenValues { floor: EIGEN_FLOOR }
    }

    /// Log-determinant of the square matrix `cov`.
    ///
    /// Returns `-inf` when the matrix is not positive definite (Cholesky)
    /// and the empty matrix has a log-determinant of `0`.
    pub fn log_det<F: Float>(&self, cov: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<F> {
        let n = check_square(cov)?;
        if n == 0 {
            return Ok(F::zero());
        }
        let logdet = match self {
            LogDetMethod::Cholesky => match cov.cholesky() {
                Ok(chol) => chol.diag().mapv(|v| v.ln()).sum() * F::cast(2.),
                Err(LinalgError::NotPositiveDefinite) => {
                    debug!("Covariance matrix ({n}, {n}) is not positive definite");
                    F::neg_infinity()
                }
                Err(err) => return Err(EntropyError::from(err)),
            },
            LogDetMethod::EigenValues { floor } => {
                let floor = F::cast(*floor);
                let (vals, _) = cov.to_owned().eigh_into()?;
                vals.mapv(|v| if v < floor { floor } else { v })
                    .mapv(|v| v.ln())
                    .sum()
            }
        };
        if logdet.is_nan() {
            debug!("Covariance matrix ({n}, {n}) log-determinant is NaN");
            return Ok(F::neg_infinity());
        }
        Ok(logdet)
    }

    /// Entropy `0.5 * ln det(cov)` of a gaussian with covariance `cov`
    pub fn entropy<F: Float>(&self, cov: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<F> {
        Ok(F::cast(0.5) * self.log_det(cov)?)
    }
}

/// Entropy of a gaussian with covariance `cov` using Cholesky log-determinant.
///
/// ```
/// use infosel_entropy::compute_entropy;
/// use ndarray::array;
///
/// let cov = array![[2., 0.], [0., 2.]];
/// let h = compute_entropy(&cov).expect("square matrix");
/// assert!((h - 2f64.ln()).abs() < 1e-12);
/// ```
pub fn compute_entropy<F: Float>(cov: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<F> {
    LogDetMethod::Cholesky.entropy(cov)
}

/// Entropy of the gaussian restricted to the `true` components of `mask`
pub fn subset_entropy<F: Float>(
    cov: &ArrayBase<impl Data<Elem = F>, Ix2>,
    mask: &ArrayBase<impl Data<Elem = bool>, Ix1>,
    method: LogDetMethod,
) -> Result<F> {
    method.entropy(&masked_submatrix(cov, mask)?)
}

/// Entropy of the gaussian restricted to the given `indices`
pub fn indices_entropy<F: Float>(
    cov: &ArrayBase<impl Data<Elem = F>, Ix2>,
    indices: &[usize],
    method: LogDetMethod,
) -> Result<F> {
    let n = check_square(cov)?;
    if let Some(&i) = indices.iter().find(|&&i| i >= n) {
        return Err(EntropyError::DimensionMismatchError {
            expected: n,
            actual: i + 1,
        });
    }
    method.entropy(&principal_submatrix(cov, indices))
}

/// The dimension dependent term `0.5 * k * ln(2 pi e)` of the gaussian entropy
pub fn gaussian_entropy_constant<F: Float>(k: usize) -> F {
    let two_pi_e = F::cast(2. * std::f64::consts::PI * std::f64::consts::E);
    F::cast(0.5) * F::cast(k) * two_pi_e.ln()
}

/// Full differential entropy (nats) of a gaussian with covariance `cov`
pub fn full_gaussian_entropy<F: Float>(cov: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<F> {
    let k = check_square(cov)?;
    Ok(compute_entropy(cov)? + gaussian_entropy_constant(k))
}
