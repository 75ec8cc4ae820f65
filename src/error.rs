use thiserror::Error;

/// Errors produced when building or parsing a [`WeightBag`](crate::weights::WeightBag) at a
/// checked boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    /// A weight is negative, infinite, or NaN
    #[error("weight {value} at index {index} must be finite and non-negative")]
    InvalidWeight { index: usize, value: f64 },
    /// The input ended before the leading count
    #[error("expected a weight count, found end of input")]
    MissingCount,
    /// The leading count is not a non-negative integer
    #[error("invalid weight count `{0}`")]
    InvalidCount(String),
    /// The input ended after `found` of `expected` values
    #[error("expected {expected} weights, found end of input after {found}")]
    MissingValue { expected: usize, found: usize },
    /// The value at `index` is not a floating-point number
    #[error("invalid weight `{token}` at index {index}")]
    InvalidValue { index: usize, token: String },
    /// Unconsumed input follows the last value
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

/// Check that every weight is finite and non-negative
pub(crate) fn validate(weights: &[f64]) -> Result<(), WeightsError> {
    match weights
        .iter()
        .position(|w| !(w.is_finite() && *w >= 0.0))
    {
        Some(index) => Err(WeightsError::InvalidWeight {
            index,
            value: weights[index],
        }),
        None => Ok(()),
    }
}
