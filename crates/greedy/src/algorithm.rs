use crate::candidates::CandidateSet;
use crate::errors::{Result, SelectionError};
use crate::parameters::{GreedyParams, GreedyValidParams};
use crate::utility::UtilityMode;

use infosel_entropy::utils::{check_square, complement_indices, mask_indices};
use infosel_entropy::{indices_entropy, LogDetMethod};
use linfa::{Float, ParamGuard};
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, DataMut, Ix1, Ix2};
use rayon::prelude::*;
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Outcome of one greedy selection round
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serializable",
    serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))
)]
pub struct SelectionRound<F: Float> {
    /// Index of the selected candidate
    pub index: usize,
    /// Utility of the selection once the candidate is added
    #[cfg_attr(feature = "serializable", serde(with = "crate::utils::non_finite"))]
    pub utility: F,
    /// Candidates marked as sampled during the round (selected one and
    /// co-located ones when heterotopic)
    pub masked: Vec<usize>,
}

/// Ordered result of the greedy selection: first selected is the one with the
/// highest utility at the first round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serializable",
    serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))
)]
pub struct SelectionResult<F: Float> {
    /// Utility of the initially sampled set
    #[cfg_attr(feature = "serializable", serde(with = "crate::utils::non_finite"))]
    baseline: F,
    /// Selection rounds in order
    rounds: Vec<SelectionRound<F>>,
}

impl<F: Float> SelectionResult<F> {
    /// Selected candidate indices in selection order
    pub fn indices(&self) -> Vec<usize> {
        self.rounds.iter().map(|r| r.index).collect()
    }

    /// Utility values at selection time
    pub fn utilities(&self) -> Array1<F> {
        self.rounds.iter().map(|r| r.utility).collect()
    }

    /// Utility of the initially sampled set (0 when nothing was sampled)
    pub fn baseline(&self) -> F {
        self.baseline
    }

    /// Utility increase brought by each round
    pub fn marginal_gains(&self) -> Array1<F> {
        let mut previous = self.baseline;
        self.rounds
            .iter()
            .map(|r| {
                let gain = r.utility - previous;
                previous = r.utility;
                gain
            })
            .collect()
    }

    /// Selection rounds details
    pub fn rounds(&self) -> &[SelectionRound<F>] {
        &self.rounds
    }

    /// Number of selected samples
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether no sample was selected
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Output types of the selected samples
    pub fn output_types(&self, candidates: &CandidateSet<F>) -> Array1<usize> {
        self.rounds
            .iter()
            .map(|r| candidates.output_type(r.index))
            .collect()
    }

    /// Locations of the selected samples as a (len, 2) matrix
    pub fn locations(&self, candidates: &CandidateSet<F>) -> Array2<F> {
        candidates.locations().select(Axis(0), &self.indices())
    }
}

/// Greedy selection of the samples maximizing an information criterion
/// computed from the covariance matrix of the candidates.
///
/// At each round, every candidate not yet sampled is tentatively added to the
/// sampled set, the utility of the resulting set is computed and the candidate
/// with the highest utility is selected (lowest index on ties).
#[derive(Clone, Debug)]
pub struct GreedySelector<F: Float> {
    params: GreedyValidParams<F>,
}

impl<F: Float> GreedySelector<F> {
    /// Selection parameters for `num_samples` rounds
    pub fn params(num_samples: usize) -> GreedyParams<F> {
        GreedyParams::new(num_samples)
    }

    /// Constructor from validated parameters
    pub fn new(params: GreedyValidParams<F>) -> Self {
        GreedySelector { params }
    }

    /// Selection parameters
    pub fn parameters(&self) -> &GreedyValidParams<F> {
        &self.params
    }

    /// Select at most `num_samples` candidates given the `covariance` (n, n) of the
    /// n `candidates`, the `sampled` mask being updated with the masked candidates
    /// of every round.
    ///
    /// The selection stops early when every candidate is sampled. On error,
    /// `sampled` is left untouched.
    pub fn select(
        &self,
        candidates: &CandidateSet<F>,
        sampled: &mut ArrayBase<impl DataMut<Elem = bool>, Ix1>,
        covariance: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<SelectionResult<F>> {
        let n = check_square(covariance)?;
        if candidates.len() != n {
            return Err(SelectionError::DimensionMismatchError {
                what: "candidates",
                expected: n,
                actual: candidates.len(),
            });
        }
        if sampled.len() != n {
            return Err(SelectionError::DimensionMismatchError {
                what: "sampled mask",
                expected: n,
                actual: sampled.len(),
            });
        }

        let cov = covariance.view();
        let utility = self.params.utility;
        let logdet = self.params.logdet;
        let joint_entropy = if utility.needs_complement() {
            indices_entropy(&cov, &(0..n).collect::<Vec<_>>(), logdet)?
        } else {
            F::zero()
        };
        if !joint_entropy.is_finite() {
            warn!("Joint entropy of the {n} candidates is not finite ({joint_entropy})");
        }
        info!(
            "Greedy selection of {} samples among {} candidates ({} already sampled), utility={}, heterotopic={}",
            self.params.num_samples,
            n,
            sampled.iter().filter(|&&s| s).count(),
            utility,
            self.params.heterotopic
        );

        let mut mask = sampled.to_owned();
        let baseline = set_utility(
            &cov,
            &mask_indices(&mask),
            &complement_indices(&mask),
            utility,
            logdet,
            joint_entropy,
        )?;

        let now = Instant::now();
        let mut rounds = Vec::with_capacity(self.params.num_samples);
        for i in 0..self.params.num_samples {
            let utilities = evaluate_candidates(&cov, &mask, utility, logdet, joint_entropy)?;
            let Some((best, best_utility)) = argmax(&utilities) else {
                warn!(
                    "No candidate left to sample, stop after {} rounds out of {}",
                    i, self.params.num_samples
                );
                break;
            };
            if best_utility == F::neg_infinity() {
                warn!("Round {i}: all candidate utilities are degenerate, select candidate {best}");
            }

            let masked = if self.params.heterotopic {
                candidates
                    .colocated(best, self.params.colocation_tol)
                    .into_iter()
                    .filter(|&j| !mask[j])
                    .collect()
            } else {
                vec![best]
            };
            for &j in masked.iter() {
                mask[j] = true;
            }
            debug!(
                "Round {i}: select candidate {best} (type {}) utility={best_utility}, masked={masked:?}",
                candidates.output_type(best)
            );
            rounds.push(SelectionRound {
                index: best,
                utility: best_utility,
                masked,
            });
        }
        sampled.assign(&mask);
        info!(
            "Selected {} samples in {} ms",
            rounds.len(),
            now.elapsed().as_millis()
        );

        Ok(SelectionResult { baseline, rounds })
    }
}

/// Greedy selection of at most `num_samples` candidates with default entropy computation.
///
/// Returns the selected candidate indices in selection order, `sampled` being
/// updated with the selected (and co-located when `heterotopic`) candidates.
///
/// ```
/// use infosel_greedy::{select_samples, CandidateSet, UtilityMode};
/// use ndarray::{array, Array1, Array2};
///
/// // two locations, two output types
/// let candidates = CandidateSet::from_locations(&array![[0., 0.], [1., 1.]], 2).unwrap();
/// let cov = Array2::<f64>::eye(4);
/// let mut sampled = Array1::from_elem(4, false);
/// let selected = select_samples(&candidates, &mut sampled, &cov, 2, UtilityMode::Entropy, true)
///     .expect("selection");
/// assert_eq!(vec![0, 1], selected);
/// assert!(sampled.iter().all(|&s| s));
/// ```
pub fn select_samples<F: Float>(
    candidates: &CandidateSet<F>,
    sampled: &mut ArrayBase<impl DataMut<Elem = bool>, Ix1>,
    covariance: &ArrayBase<impl Data<Elem = F>, Ix2>,
    num_samples: usize,
    utility: UtilityMode,
    heterotopic: bool,
) -> Result<Vec<usize>> {
    let params = GreedySelector::params(num_samples)
        .utility(utility)
        .heterotopic(heterotopic)
        .check()?;
    let result = GreedySelector::new(params).select(candidates, sampled, covariance)?;
    Ok(result.indices())
}

/// Utility of the set `selected` given its complement `rest`
fn set_utility<F: Float>(
    cov: &ArrayView2<F>,
    selected: &[usize],
    rest: &[usize],
    utility: UtilityMode,
    logdet: LogDetMethod,
    joint_entropy: F,
) -> Result<F> {
    let entropy = indices_entropy(cov, selected, logdet)?;
    let entropy_rest = if utility.needs_complement() {
        indices_entropy(cov, rest, logdet)?
    } else {
        F::zero()
    };
    Ok(utility.value(entropy, entropy_rest, joint_entropy))
}

/// Utilities `(j, utility)` of adding each unsampled candidate j to the sampled set,
/// in ascending order of j.
///
/// Each evaluation works on its own copy of the selected indices so the
/// mask is never toggled.
fn evaluate_candidates<F: Float>(
    cov: &ArrayView2<F>,
    sampled: &ArrayBase<impl Data<Elem = bool>, Ix1>,
    utility: UtilityMode,
    logdet: LogDetMethod,
    joint_entropy: F,
) -> Result<Vec<(usize, F)>> {
    let selected = mask_indices(sampled);
    let unselected = complement_indices(sampled);
    unselected
        .par_iter()
        .map(|&j| -> Result<(usize, F)> {
            let mut tentative = selected.clone();
            tentative.insert(tentative.partition_point(|&i| i < j), j);
            let rest: Vec<usize> = if utility.needs_complement() {
                unselected.iter().copied().filter(|&i| i != j).collect()
            } else {
                vec![]
            };
            let ut = set_utility(cov, &tentative, &rest, utility, logdet, joint_entropy)?;
            Ok((j, ut))
        })
        .collect()
}

/// First `(index, utility)` reaching the max utility, None if empty
fn argmax<F: Float>(utilities: &[(usize, F)]) -> Option<(usize, F)> {
    utilities.iter().fold(None, |best, &(j, ut)| match best {
        Some((_, best_ut)) if ut <= best_ut => best,
        _ => Some((j, ut)),
    })
}
