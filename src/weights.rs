use std::{fmt, ops::Index, slice, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ds::SumTree,
    error::{validate, WeightsError},
    util::debug_assert_index,
};

/// A fixed-length sequence of non-negative weights with `O(log n)` point updates and
/// cumulative lookups
///
/// Two bags are equal when they have the same length and element-wise equal weights.
///
/// ### Textual form
/// A bag is written as its length followed by each weight, separated by single spaces:
/// ```
/// # use discrete_distribution::weights::WeightBag;
/// let weights = WeightBag::new(&[1.2, 3.4, 5.6]);
/// assert_eq!(weights.to_string(), "3 1.2 3.4 5.6");
/// assert_eq!("3 1.2 3.4 5.6".parse::<WeightBag>().unwrap(), weights);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct WeightBag {
    tree: SumTree,
}

impl WeightBag {
    /// Construct a `WeightBag` from a slice of weights
    ///
    /// Every weight must be finite and non-negative; this is only checked in debug builds.
    /// Use [`try_new`](WeightBag::try_new) for untrusted input.
    pub fn new(weights: &[f64]) -> Self {
        Self {
            tree: SumTree::new(weights),
        }
    }

    /// Construct a `WeightBag` after checking that every weight is finite and non-negative
    pub fn try_new(weights: &[f64]) -> Result<Self, WeightsError> {
        validate(weights)?;
        Ok(Self::new(weights))
    }

    /// Returns the number of weights
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Get the sum of all weights in constant time
    pub fn sum(&self) -> f64 {
        self.tree.sum()
    }

    /// Get a slice view of the weights in index order
    pub fn as_slice(&self) -> &[f64] {
        self.tree.leaves()
    }

    pub fn iter(&self) -> slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    /// Copy the weights out into a `Vec`
    pub fn weights(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Replace the weight at `ix`
    ///
    /// `ix` must be in range and `weight` must be finite and non-negative; both are only checked
    /// in debug builds.
    pub fn update(&mut self, ix: usize, weight: f64) {
        self.tree.update(ix, weight);
    }

    /// Find the index whose cumulative interval contains `probe`
    ///
    /// See [`SumTree::find`] for how zero weights and out-of-range probes are resolved.
    pub fn find(&self, probe: f64) -> usize {
        self.tree.find(probe)
    }

    /// Parse a bag from the start of `input` and return it with the unconsumed remainder
    ///
    /// Reads a count `n` followed by exactly `n` whitespace-separated weights. Anything after the
    /// last weight, including whitespace, is left in the remainder.
    pub fn parse_prefix(input: &str) -> Result<(Self, &str), WeightsError> {
        parse_weights(input)
            .map(|(weights, rest)| (Self::new(&weights), rest))
            .inspect_err(|e| log::debug!("failed to parse weights: {e}"))
    }
}

/// Split the next whitespace-delimited token off the front of `input`
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some(input.split_at(end))
}

fn parse_weights(input: &str) -> Result<(Vec<f64>, &str), WeightsError> {
    let (token, mut rest) = next_token(input).ok_or(WeightsError::MissingCount)?;
    let count: usize = token
        .parse()
        .map_err(|_| WeightsError::InvalidCount(token.to_owned()))?;

    // a count larger than the input can possibly hold must not drive the allocation
    let mut weights = Vec::with_capacity(count.min(rest.len() / 2));
    for index in 0..count {
        let (token, tail) = next_token(rest).ok_or(WeightsError::MissingValue {
            expected: count,
            found: index,
        })?;
        let value = token.parse::<f64>().map_err(|_| WeightsError::InvalidValue {
            index,
            token: token.to_owned(),
        })?;
        weights.push(value);
        rest = tail;
    }

    validate(&weights)?;
    Ok((weights, rest))
}

impl fmt::Display for WeightBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.len())?;
        for w in self {
            write!(f, " {w}")?;
        }
        Ok(())
    }
}

impl FromStr for WeightBag {
    type Err = WeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (bag, rest) = Self::parse_prefix(s)?;
        let rest = rest.trim();
        if !rest.is_empty() {
            log::debug!("trailing input after weights: `{rest}`");
            return Err(WeightsError::TrailingInput(rest.to_owned()));
        }
        Ok(bag)
    }
}

impl Index<usize> for WeightBag {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        debug_assert_index!(index, self.len());
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a WeightBag {
    type Item = &'a f64;
    type IntoIter = slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<f64> for WeightBag {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(&iter.into_iter().collect::<Vec<_>>())
    }
}

impl From<&[f64]> for WeightBag {
    fn from(weights: &[f64]) -> Self {
        Self::new(weights)
    }
}

impl<const N: usize> From<[f64; N]> for WeightBag {
    fn from(weights: [f64; N]) -> Self {
        Self::new(&weights)
    }
}

impl TryFrom<Vec<f64>> for WeightBag {
    type Error = WeightsError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_new(&weights)
    }
}

impl From<WeightBag> for Vec<f64> {
    fn from(bag: WeightBag) -> Self {
        bag.weights()
    }
}
