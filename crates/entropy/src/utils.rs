//! Covariance slicing and shape checking helpers
use crate::errors::{EntropyError, Result};
use linfa::Float;
use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2};

/// Check that the given matrix is square and return its size
pub fn check_square<F: Float>(cov: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<usize> {
    let (nrows, ncols) = cov.dim();
    if nrows != ncols {
        return Err(EntropyError::ShapeError { nrows, ncols });
    }
    Ok(nrows)
}

/// Indices (in ascending order) of the `true` components of the mask
pub fn mask_indices(mask: &ArrayBase<impl Data<Elem = bool>, Ix1>) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &m)| if m { Some(i) } else { None })
        .collect()
}

/// Indices (in ascending order) of the `false` components of the mask
pub fn complement_indices(mask: &ArrayBase<impl Data<Elem = bool>, Ix1>) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &m)| if m { None } else { Some(i) })
        .collect()
}

/// Extract the principal submatrix of `cov` restricted to `indices`
/// (rows and columns), preserving the order of `indices`.
/// *Panics* if an index is out of bounds.
pub fn principal_submatrix<F: Float>(
    cov: &ArrayBase<impl Data<Elem = F>, Ix2>,
    indices: &[usize],
) -> Array2<F> {
    let m = indices.len();
    Array2::from_shape_fn((m, m), |(i, j)| cov[[indices[i], indices[j]]])
}

/// Extract the principal submatrix of `cov` restricted to the `true` components of `mask`
pub fn masked_submatrix<F: Float>(
    cov: &ArrayBase<impl Data<Elem = F>, Ix2>,
    mask: &ArrayBase<impl Data<Elem = bool>, Ix1>,
) -> Result<Array2<F>> {
    let n = check_square(cov)?;
    if mask.len() != n {
        return Err(EntropyError::DimensionMismatchError {
            expected: n,
            actual: mask.len(),
        });
    }
    Ok(principal_submatrix(cov, &mask_indices(mask)))
}
