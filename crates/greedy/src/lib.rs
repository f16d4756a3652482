//! This library implements greedy information-based sample selection
//! (a.k.a. sensor placement) over the candidate locations of a multi-output
//! [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process) field.
//!
//! Given the GP posterior covariance of n candidate samples, each candidate being a
//! (2D location, output type) pair, the [GreedySelector] picks samples one at a time,
//! each round choosing the candidate maximizing the selected set utility:
//! * [UtilityMode::Entropy]: entropy `H(A)` of the selected set,
//! * [UtilityMode::MutualInformation]: mutual information `H(A) + H(V\A) - H(V)`
//!   between the selected set and the remaining candidates.
//!
//! When the selection is heterotopic, only one output type can be measured at a given
//! location: selecting a candidate marks every co-located candidate as sampled.
//!
//! Entropies are computed with [infosel_entropy].
//!
//! ```
//! use infosel_greedy::{CandidateSet, GreedySelector, UtilityMode};
//! use linfa::ParamGuard;
//! use ndarray::{array, Array1, Array2};
//!
//! // 3 locations, 2 output types: 6 candidates
//! let locations = array![[0., 0.], [0., 1.], [1., 0.]];
//! let candidates = CandidateSet::from_locations(&locations, 2).expect("candidates");
//! let cov = Array2::from_diag(&array![1., 2., 3., 3., 2., 1.]);
//! let mut sampled = Array1::from_elem(candidates.len(), false);
//!
//! let selector = GreedySelector::params(2)
//!     .utility(UtilityMode::MutualInformation)
//!     .heterotopic(true)
//!     .check()
//!     .map(GreedySelector::new)
//!     .expect("valid parameters");
//! let res = selector.select(&candidates, &mut sampled, &cov).expect("selection");
//! assert_eq!(2, res.len());
//! ```
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod algorithm;
mod candidates;
mod errors;
mod parameters;
mod utility;
pub mod utils;

pub use algorithm::*;
pub use candidates::*;
pub use errors::*;
pub use parameters::*;
pub use utility::*;
