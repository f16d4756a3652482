use thiserror::Error;

/// A result type for greedy sample selection
pub type Result<T> = std::result::Result<T, SelectionError>;

/// An error when using [`GreedySelector`](crate::GreedySelector)
#[derive(Error, Debug)]
pub enum SelectionError {
    /// When entropy computation fails (non square covariance, ...)
    #[error(transparent)]
    EntropyError(#[from] infosel_entropy::EntropyError),
    /// When the sizes of the covariance, the candidates or the sampled mask disagree
    #[error("Dimension mismatch error: {what} has size {actual}, expected {expected}")]
    DimensionMismatchError {
        /// Name of the offending input
        what: &'static str,
        /// Expected size (i.e. number of candidates)
        expected: usize,
        /// Actual size
        actual: usize,
    },
    /// When the utility name is unknown
    #[error("Unsupported utility error: {0}")]
    UnsupportedUtilityError(String),
    /// When error due to a bad value
    #[error("InvalidValue error: {0}")]
    InvalidValueError(String),
}
