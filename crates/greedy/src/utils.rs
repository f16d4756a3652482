//! Scaling helpers used to prepare GP inputs and outputs before computing
//! the candidates covariance.
use crate::errors::{Result, SelectionError};
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Zero mean, unit variance scaling of (n, nx) data, statistics being computed
/// on the training data and re-applied to any other data set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct NormalizedData<F: Float> {
    /// mean vector computed from data
    pub mean: Array1<F>,
    /// standard deviation vector computed from data (zero std replaced by one)
    pub std: Array1<F>,
}

impl<F: Float> NormalizedData<F> {
    /// Learn mean and standard deviation of the columns of `x`
    pub fn new(x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<NormalizedData<F>> {
        let mean = x.mean_axis(Axis(0)).ok_or_else(|| {
            SelectionError::InvalidValueError("cannot normalize empty data".to_string())
        })?;
        let mut std = x.std_axis(Axis(0), F::zero());
        std.mapv_inplace(|v| if v == F::zero() { F::one() } else { v });
        Ok(NormalizedData { mean, std })
    }

    /// Dimension of data points
    pub fn ncols(&self) -> usize {
        self.mean.len()
    }

    /// Apply the scaling to `x`
    pub fn normalize(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
        self.check_ncols(x.ncols())?;
        Ok((x - &self.mean) / &self.std)
    }

    /// Revert the scaling of `x`
    pub fn denormalize(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
        self.check_ncols(x.ncols())?;
        Ok(x * &self.std + &self.mean)
    }

    fn check_ncols(&self, ncols: usize) -> Result<()> {
        if ncols != self.ncols() {
            return Err(SelectionError::DimensionMismatchError {
                what: "data columns",
                expected: self.ncols(),
                actual: ncols,
            });
        }
        Ok(())
    }
}

/// Scaling of (n, ny) outputs by the max value of each column of the training data
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct MaxScaling<F: Float> {
    /// max values of the training data columns
    pub max: Array1<F>,
}

impl<F: Float> MaxScaling<F> {
    /// Learn the max of the columns of `y`
    pub fn new(y: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<MaxScaling<F>> {
        if y.nrows() == 0 {
            return Err(SelectionError::InvalidValueError(
                "cannot scale empty data".to_string(),
            ));
        }
        let max = y.fold_axis(Axis(0), F::neg_infinity(), |&m, &v| if v > m { v } else { m });
        if let Some(m) = max.iter().find(|&&m| m == F::zero()) {
            return Err(SelectionError::InvalidValueError(format!(
                "cannot scale data by a null max value ({m})"
            )));
        }
        Ok(MaxScaling { max })
    }

    /// Apply the scaling to `y`
    pub fn scale(&self, y: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
        if y.ncols() != self.max.len() {
            return Err(SelectionError::DimensionMismatchError {
                what: "data columns",
                expected: self.max.len(),
                actual: y.ncols(),
            });
        }
        Ok(y / &self.max)
    }
}

/// Serde helper for float fields which may be infinite or NaN (degenerate
/// utilities), stored as the `"inf"`, `"-inf"` or `"nan"` strings since JSON
/// numbers have no representation for them.
#[cfg(feature = "serializable")]
pub mod non_finite {
    use linfa::Float;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<F> {
        Number(F),
        Text(String),
    }

    /// Serialize `value` as a number when finite, as a string otherwise
    pub fn serialize<F, S>(value: &F, serializer: S) -> Result<S::Ok, S::Error>
    where
        F: Float + Serialize,
        S: Serializer,
    {
        if value.is_finite() {
            value.serialize(serializer)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > F::zero() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    /// Deserialize a number or one of the `"inf"`, `"-inf"`, `"nan"` strings
    pub fn deserialize<'de, F, D>(deserializer: D) -> Result<F, D::Error>
    where
        F: Float + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        match Repr::<F>::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(F::infinity()),
                "-inf" => Ok(F::neg_infinity()),
                "nan" => Ok(F::nan()),
                other => Err(<D::Error as de::Error>::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"nan\"",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_normalized_data() {
        let x = array![[1., 2.], [3., 2.]];
        let norm = NormalizedData::new(&x).unwrap();
        assert_eq!(2, norm.ncols());
        assert_eq!(array![2., 2.], norm.mean);
        assert_eq!(array![1., 1.], norm.std);
        assert_eq!(array![[-1., 0.], [1., 0.]], norm.normalize(&x).unwrap());

        let xtest = array![[5., 0.]];
        let xnorm = norm.normalize(&xtest).unwrap();
        assert_eq!(array![[3., -2.]], xnorm);
        assert_abs_diff_eq!(xtest, norm.denormalize(&xnorm).unwrap(), epsilon = 1e-12);
        assert!(norm.normalize(&array![[1.]]).is_err());
    }

    #[test]
    fn test_max_scaling() {
        let y = array![[1., 4.], [2., -1.]];
        let scaling = MaxScaling::new(&y).unwrap();
        assert_eq!(array![2., 4.], scaling.max);
        assert_eq!(array![[0.5, 1.], [1., -0.25]], scaling.scale(&y).unwrap());
        assert!(MaxScaling::new(&array![[0., 1.]]).is_err());
        assert!(MaxScaling::<f64>::new(&Array2::zeros((0, 2))).is_err());
    }

    #[cfg(feature = "serializable")]
    #[test]
    fn test_non_finite_json() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Value {
            #[serde(with = "super::non_finite")]
            v: f64,
        }

        let json = |v: f64| serde_json::to_string(&Value { v }).unwrap();
        assert_eq!(r#"{"v":1.5}"#, json(1.5));
        assert_eq!(r#"{"v":"inf"}"#, json(f64::INFINITY));
        assert_eq!(r#"{"v":"-inf"}"#, json(f64::NEG_INFINITY));
        assert_eq!(r#"{"v":"nan"}"#, json(f64::NAN));

        let load = |s: &str| serde_json::from_str::<Value>(s).map(|val| val.v);
        assert_eq!(1.5, load(r#"{"v":1.5}"#).unwrap());
        assert_eq!(f64::INFINITY, load(r#"{"v":"inf"}"#).unwrap());
        assert_eq!(f64::NEG_INFINITY, load(r#"{"v":"-inf"}"#).unwrap());
        assert!(load(r#"{"v":"nan"}"#).unwrap().is_nan());
        assert!(load(r#"{"v":"infinity"}"#).is_err());
        assert!(load(r#"{"v":null}"#).is_err());
    }
}
