//! Utility criteria used to score a candidate sample
use crate::errors::SelectionError;
use linfa::Float;
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Information criterion maximized by the greedy selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serializable", serde(rename_all = "snake_case"))]
pub enum UtilityMode {
    /// Entropy `H(A)` of the selected set `A`
    #[default]
    Entropy,
    /// Mutual information `H(A) + H(V\A) - H(V)` between the selected set `A`
    /// and the remaining candidates `V\A`
    MutualInformation,
}

impl UtilityMode {
    /// Name of the utility
    pub fn name(&self) -> &'static str {
        match self {
            UtilityMode::Entropy => "entropy",
            UtilityMode::MutualInformation => "mutual_information",
        }
    }

    /// Whether the entropy of the unselected candidates is required
    pub fn needs_complement(&self) -> bool {
        matches!(self, UtilityMode::MutualInformation)
    }

    /// Utility value given the entropy of the tentative selection,
    /// the entropy of its complement and the joint entropy of all candidates.
    ///
    /// NaN values (`-inf + inf` with degenerate covariances) are mapped to `-inf`.
    pub fn value<F: Float>(&self, entropy: F, entropy_rest: F, joint_entropy: F) -> F {
        let ut = match self {
            UtilityMode::Entropy => entropy,
            UtilityMode::MutualInformation => entropy + entropy_rest - joint_entropy,
        };
        if ut.is_nan() {
            F::neg_infinity()
        } else {
            ut
        }
    }
}

impl fmt::Display for UtilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for UtilityMode {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entropy" => Ok(UtilityMode::Entropy),
            "mutual_information" | "mi" => Ok(UtilityMode::MutualInformation),
            _ => Err(SelectionError::UnsupportedUtilityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_from_str() {
        assert_eq!(UtilityMode::Entropy, "entropy".parse().unwrap());
        assert_eq!(
            UtilityMode::MutualInformation,
            "mutual_information".parse().unwrap()
        );
        assert_eq!(UtilityMode::MutualInformation, "MI".parse().unwrap());
        assert!(matches!(
            "variance".parse::<UtilityMode>(),
            Err(SelectionError::UnsupportedUtilityError(name)) if name == "variance"
        ));
    }

    #[test]
    fn test_utility_display() {
        for mode in [UtilityMode::Entropy, UtilityMode::MutualInformation] {
            assert_eq!(mode, mode.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_utility_value() {
        assert_eq!(1.0, UtilityMode::Entropy.value(1.0, 2.0, 4.0));
        assert_eq!(-1.0, UtilityMode::MutualInformation.value(1.0, 2.0, 4.0));
        assert_eq!(
            f64::NEG_INFINITY,
            UtilityMode::MutualInformation.value(f64::NEG_INFINITY, f64::INFINITY, 0.)
        );
        assert_eq!(
            f64::INFINITY,
            UtilityMode::MutualInformation.value(1.0, 2.0, f64::NEG_INFINITY)
        );
    }
}
