//! This library computes the differential entropy of multivariate gaussian
//! distributions from their covariance matrix, as needed by information-based
//! sample selection over [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process)
//! posterior covariances.
//!
//! The entropy is computed up to the dimension dependent constant `0.5 * k * ln(2 pi e)`,
//! that is as `0.5 * ln det(K)`, using a numerically stable log-determinant
//! (see [LogDetMethod]). Entropies of principal submatrices are obtained with
//! [subset_entropy] (boolean mask) or [indices_entropy] (index list).
//!
//! ```
//! use infosel_entropy::{indices_entropy, LogDetMethod};
//! use ndarray::array;
//!
//! let cov = array![[1.0, 0.5, 0.0], [0.5, 1.0, 0.0], [0.0, 0.0, 2.0]];
//! let h = indices_entropy(&cov, &[0, 2], LogDetMethod::Cholesky).expect("entropy");
//! assert!((h - 0.5 * 2f64.ln()).abs() < 1e-12);
//! ```
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod entropy;
mod errors;
pub mod utils;

pub use entropy::*;
pub use errors::*;
