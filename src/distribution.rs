use std::{fmt, str::FromStr};

use rand::{distributions::Distribution, Rng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::WeightsError, prob::DynamicDistribution, weights::WeightBag};

/// A categorical distribution over `0..n` whose weights can be updated between draws
///
/// Drawing and updating both cost `O(log n)`. The sampler holds no random state of its own:
/// every draw takes the generator by reference.
///
/// ### Example
/// ```
/// use discrete_distribution::distribution::CategoricalSampler;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut sampler = CategoricalSampler::new(&[1.0, 0.0]);
/// assert_eq!(sampler.draw(&mut rng), 0);
///
/// sampler.update(0, 0.0);
/// sampler.update(1, 1.0);
/// assert_eq!(sampler.draw(&mut rng), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct CategoricalSampler {
    weights: WeightBag,
}

impl CategoricalSampler {
    /// Construct a sampler from a slice of weights
    pub fn new(weights: &[f64]) -> Self {
        Self {
            weights: WeightBag::new(weights),
        }
    }

    /// Smallest index the sampler can produce
    pub fn min(&self) -> usize {
        0
    }

    /// Largest index the sampler can produce
    ///
    /// The sampler must not be empty.
    pub fn max(&self) -> usize {
        debug_assert!(!self.weights.is_empty(), "`max` of an empty sampler");
        self.weights.len().saturating_sub(1)
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Get the total weight in constant time
    ///
    /// A Gillespie driver uses this as the rate of its exponential waiting time, and must stop
    /// before drawing once it reaches zero.
    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }

    /// Get the weight of the outcome at `ix`
    pub fn weight(&self, ix: usize) -> f64 {
        self.weights[ix]
    }

    /// Replace the weight of the outcome at `ix`
    pub fn update(&mut self, ix: usize, weight: f64) {
        self.weights.update(ix, weight);
    }

    /// Get the weights parameterizing the distribution
    pub fn param(&self) -> &WeightBag {
        &self.weights
    }

    /// Replace the weights parameterizing the distribution
    pub fn set_param(&mut self, weights: WeightBag) {
        log::trace!(
            "replacing sampler weights: {} outcomes -> {}",
            self.weights.len(),
            weights.len()
        );
        self.weights = weights;
    }

    /// Consume the sampler and return its weights
    pub fn into_param(self) -> WeightBag {
        self.weights
    }

    /// No-op: draws are independent of each other
    pub fn reset(&mut self) {}

    /// Draw an index with probability proportional to its weight
    ///
    /// Never returns an index whose weight is zero. The sampler must not be empty and its
    /// [`sum`](CategoricalSampler::sum) must be positive.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        debug_assert!(
            self.sum() > 0.0,
            "draw from a sampler with total weight {}",
            self.sum()
        );
        // `Standard` for f64 yields 53 random bits in [0, 1)
        let u: f64 = rng.gen();
        self.weights.find(u * self.sum())
    }

    /// Draw an index and convert it to the integer type `I`
    ///
    /// Fails when the drawn index does not fit in `I`.
    pub fn draw_as<I, R>(&self, rng: &mut R) -> Result<I, I::Error>
    where
        I: TryFrom<usize>,
        R: Rng + ?Sized,
    {
        I::try_from(self.draw(rng))
    }
}

impl Distribution<usize> for CategoricalSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.draw(rng)
    }
}

impl DynamicDistribution<usize> for CategoricalSampler {
    fn update(&mut self, index: usize, weight: f64) {
        CategoricalSampler::update(self, index, weight);
    }

    fn sum(&self) -> f64 {
        CategoricalSampler::sum(self)
    }

    fn reset(&mut self) {
        CategoricalSampler::reset(self);
    }
}

impl From<WeightBag> for CategoricalSampler {
    fn from(weights: WeightBag) -> Self {
        Self { weights }
    }
}

impl FromIterator<f64> for CategoricalSampler {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<WeightBag>())
    }
}

impl fmt::Display for CategoricalSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.weights, f)
    }
}

impl FromStr for CategoricalSampler {
    type Err = WeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<WeightBag>().map(Self::from)
    }
}
