use crate::errors::{Result, SelectionError};
use crate::utility::UtilityMode;
use infosel_entropy::LogDetMethod;
use linfa::{Float, ParamGuard};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// A set of validated greedy selection parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct GreedyValidParams<F: Float> {
    /// Number of selection rounds (i.e. max number of selected samples)
    pub(crate) num_samples: usize,
    /// Information criterion maximized at each round
    pub(crate) utility: UtilityMode,
    /// When true, only one output type can be measured at a given location
    pub(crate) heterotopic: bool,
    /// Tolerance used to decide two candidates share the same location
    pub(crate) colocation_tol: F,
    /// Log-determinant computation used for entropies
    pub(crate) logdet: LogDetMethod,
}

impl<F: Float> Default for GreedyValidParams<F> {
    fn default() -> GreedyValidParams<F> {
        GreedyValidParams {
            num_samples: 1,
            utility: UtilityMode::Entropy,
            heterotopic: true,
            colocation_tol: F::zero(),
            logdet: LogDetMethod::Cholesky,
        }
    }
}

impl<F: Float> GreedyValidParams<F> {
    /// Get the number of selection rounds
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Get the utility criterion
    pub fn utility(&self) -> UtilityMode {
        self.utility
    }

    /// Get the heterotopic flag
    pub fn heterotopic(&self) -> bool {
        self.heterotopic
    }

    /// Get the co-location tolerance
    pub fn colocation_tol(&self) -> F {
        self.colocation_tol
    }

    /// Get the log-determinant method
    pub fn logdet(&self) -> LogDetMethod {
        self.logdet
    }
}

#[derive(Clone, Debug, Default)]
/// The set of parameters that can be specified for the execution of
/// the [greedy selection](crate::GreedySelector).
pub struct GreedyParams<F: Float>(GreedyValidParams<F>);

impl<F: Float> GreedyParams<F> {
    /// A constructor for parameters given the number of samples to select
    pub fn new(num_samples: usize) -> GreedyParams<F> {
        Self(GreedyValidParams {
            num_samples,
            ..Default::default()
        })
    }

    /// Set the number of selection rounds.
    pub fn num_samples(mut self, num_samples: usize) -> Self {
        self.0.num_samples = num_samples;
        self
    }

    /// Set the utility criterion.
    pub fn utility(mut self, utility: UtilityMode) -> Self {
        self.0.utility = utility;
        self
    }

    /// Set the heterotopic flag.
    ///
    /// When true, selecting a candidate also marks as sampled every candidate
    /// located at the same place whatever its output type.
    pub fn heterotopic(mut self, heterotopic: bool) -> Self {
        self.0.heterotopic = heterotopic;
        self
    }

    /// Set the co-location tolerance (default 0, i.e. exact equality of coordinates).
    pub fn colocation_tol(mut self, colocation_tol: F) -> Self {
        self.0.colocation_tol = colocation_tol;
        self
    }

    /// Set the log-determinant method.
    pub fn logdet(mut self, logdet: LogDetMethod) -> Self {
        self.0.logdet = logdet;
        self
    }
}

impl<F: Float> From<GreedyValidParams<F>> for GreedyParams<F> {
    fn from(valid: GreedyValidParams<F>) -> Self {
        GreedyParams(valid)
    }
}

impl<F: Float> ParamGuard for GreedyParams<F> {
    type Checked = GreedyValidParams<F>;
    type Error = SelectionError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let tol = self.0.colocation_tol;
        if !tol.is_finite() || tol < F::zero() {
            return Err(SelectionError::InvalidValueError(format!(
                "`colocation_tol` should be a non negative finite value, got {tol}"
            )));
        }
        if let LogDetMethod::EigenValues { floor } = self.0.logdet {
            if !(floor.is_finite() && floor > 0.) {
                return Err(SelectionError::InvalidValueError(format!(
                    "eigenvalue floor should be a positive finite value, got {floor}"
                )));
            }
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
