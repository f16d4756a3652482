use crate::errors::{Result, SelectionError};
use linfa::Float;
use ndarray::{concatenate, Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// An ordered set of n candidate samples, each being a pair (2D location, output type).
///
/// The candidate ordering indexes the rows/columns of the covariance matrix
/// and the components of the sampled mask used by the selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct CandidateSet<F: Float> {
    /// (n, 2) spatial coordinates
    locations: Array2<F>,
    /// (n,) output type indices
    output_types: Array1<usize>,
}

impl<F: Float> CandidateSet<F> {
    /// Constructor given (n, 2) locations and the n corresponding output types
    pub fn new(
        locations: &ArrayBase<impl Data<Elem = F>, Ix2>,
        output_types: &ArrayBase<impl Data<Elem = usize>, Ix1>,
    ) -> Result<Self> {
        if locations.ncols() != 2 {
            return Err(SelectionError::InvalidValueError(format!(
                "candidate locations should be 2D coordinates, got {} columns",
                locations.ncols()
            )));
        }
        if output_types.len() != locations.nrows() {
            return Err(SelectionError::DimensionMismatchError {
                what: "output types",
                expected: locations.nrows(),
                actual: output_types.len(),
            });
        }
        Ok(CandidateSet {
            locations: locations.to_owned(),
            output_types: output_types.to_owned(),
        })
    }

    /// Candidates obtained by measuring each of the m `locations` for every one
    /// of the `num_outputs` output types.
    ///
    /// Candidates are ordered by output type first: candidate `t * m + k` is
    /// the output type `t` at location `k`.
    pub fn from_locations(
        locations: &ArrayBase<impl Data<Elem = F>, Ix2>,
        num_outputs: usize,
    ) -> Result<Self> {
        if num_outputs == 0 {
            return Err(SelectionError::InvalidValueError(
                "number of outputs should be at least 1".to_string(),
            ));
        }
        let m = locations.nrows();
        let views = vec![locations.view(); num_outputs];
        let stacked = concatenate(Axis(0), &views).map_err(|e| {
            SelectionError::InvalidValueError(format!("cannot stack locations: {e}"))
        })?;
        let output_types = Array1::from_shape_fn(m * num_outputs, |i| i / m.max(1));
        Self::new(&stacked, &output_types)
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.output_types.len()
    }

    /// Whether there is no candidate
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate locations as a (n, 2) matrix
    pub fn locations(&self) -> &Array2<F> {
        &self.locations
    }

    /// Candidate output types
    pub fn output_types(&self) -> &Array1<usize> {
        &self.output_types
    }

    /// Location of the ith candidate
    pub fn location(&self, i: usize) -> ArrayView1<F> {
        self.locations.row(i)
    }

    /// Output type of the ith candidate
    pub fn output_type(&self, i: usize) -> usize {
        self.output_types[i]
    }

    /// Number of output types (i.e. max output type + 1)
    pub fn num_outputs(&self) -> usize {
        self.output_types.iter().max().map_or(0, |t| t + 1)
    }

    /// Candidates as a (n, 3) matrix `[output type, x, y]`
    pub fn features(&self) -> Array2<F> {
        let n = self.len();
        Array2::from_shape_fn((n, 3), |(i, j)| match j {
            0 => F::cast(self.output_types[i]),
            _ => self.locations[[i, j - 1]],
        })
    }

    /// Whether candidates `i` and `j` share the same location
    /// (each coordinate within `tol`, `tol = 0` meaning exact equality)
    pub fn is_colocated(&self, i: usize, j: usize, tol: F) -> bool {
        let (a, b) = (self.locations.row(i), self.locations.row(j));
        (a[0] - b[0]).abs() <= tol && (a[1] - b[1]).abs() <= tol
    }

    /// Indices (ascending) of the candidates sharing the location of candidate `i`,
    /// `i` included
    pub fn colocated(&self, i: usize, tol: F) -> Vec<usize> {
        (0..self.len())
            .filter(|&j| j == i || self.is_colocated(i, j, tol))
            .collect()
    }

    /// Split candidate indices into the ones of `target` output type and the other ones
    pub fn split_by_output(&self, target: usize) -> (Vec<usize>, Vec<usize>) {
        (0..self.len()).partition(|&i| self.output_types[i] == target)
    }

    /// Candidate subset given by `indices` (in the given order).
    /// *Panics* if an index is out of bounds.
    pub fn subset(&self, indices: &[usize]) -> CandidateSet<F> {
        CandidateSet {
            locations: self.locations.select(Axis(0), indices),
            output_types: indices.iter().map(|&i| self.output_types[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_candidates_new() {
        let locs = array![[0., 0.], [1., 0.]];
        let cands = CandidateSet::new(&locs, &array![0, 1]).unwrap();
        assert_eq!(2, cands.len());
        assert_eq!(2, cands.num_outputs());
        assert_eq!(array![1., 0.], cands.location(1));

        assert!(matches!(
            CandidateSet::new(&locs, &array![0]),
            Err(SelectionError::DimensionMismatchError {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert!(matches!(
            CandidateSet::new(&array![[0., 0., 0.]], &array![0]),
            Err(SelectionError::InvalidValueError(_))
        ));
    }

    #[test]
    fn test_candidates_from_locations() {
        let locs = array![[0., 0.], [1., 2.], [3., 4.]];
        let cands = CandidateSet::from_locations(&locs, 2).unwrap();
        assert_eq!(6, cands.len());
        assert_eq!(&array![0, 0, 0, 1, 1, 1], cands.output_types());
        assert_eq!(array![1., 2.], cands.location(4));
        assert_eq!(
            array![
                [0., 0., 0.],
                [0., 1., 2.],
                [0., 3., 4.],
                [1., 0., 0.],
                [1., 1., 2.],
                [1., 3., 4.]
            ],
            cands.features()
        );
        assert!(CandidateSet::from_locations(&locs, 0).is_err());
    }

    #[test]
    fn test_candidates_colocated() {
        let locs = array![[0., 0.], [1., 2.], [1.05, 2.]];
        let cands = CandidateSet::from_locations(&locs, 3).unwrap();
        assert_eq!(vec![1, 4, 7], cands.colocated(4, 0.));
        assert_eq!(vec![1, 2, 4, 5, 7, 8], cands.colocated(4, 0.1));
        assert!(!cands.is_colocated(0, 1, 0.));
    }

    #[test]
    fn test_candidates_split_and_subset() {
        let locs = array![[0., 0.], [1., 2.]];
        let cands = CandidateSet::from_locations(&locs, 3).unwrap();
        let (target, allies) = cands.split_by_output(1);
        assert_eq!(vec![2, 3], target);
        assert_eq!(vec![0, 1, 4, 5], allies);

        let sub = cands.subset(&target);
        assert_eq!(&array![1, 1], sub.output_types());
        assert_eq!(&locs, sub.locations());
    }
}
