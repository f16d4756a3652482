//! `infosel` selects, among the candidate samples of a multi-output Gaussian Process
//! field, the subset which maximizes an information criterion (entropy or mutual
//! information) computed from the GP posterior covariance.
//!
//! This crate gathers:
//! * [entropy]: differential entropy of gaussians from covariance matrices,
//! * [greedy]: greedy heterotopic sample selection.
//!
//! It also provides the `infosel` command line which runs the selection on
//! covariance and location arrays stored as numpy `.npy` files.
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub use infosel_entropy as entropy;
pub use infosel_greedy as greedy;
