use thiserror::Error;

/// A result type for entropy computations
pub type Result<T> = std::result::Result<T, EntropyError>;

/// An error when computing the entropy of a covariance matrix
#[derive(Error, Debug)]
pub enum EntropyError {
    /// When a matrix expected to be square is not
    #[error("Shape error: expected a square matrix, got ({nrows}, {ncols})")]
    ShapeError {
        /// Number of rows of the given matrix
        nrows: usize,
        /// Number of columns of the given matrix
        ncols: usize,
    },
    /// When a subset selection does not match the covariance size
    #[error("Dimension mismatch error: expected {expected}, got {actual}")]
    DimensionMismatchError {
        /// Size of the covariance matrix
        expected: usize,
        /// Size of the given selection
        actual: usize,
    },
    /// When linear algebra computation fails
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
}
