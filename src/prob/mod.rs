use rand::distributions::Distribution;

/// Trait for discrete distributions whose weights can be changed in place between draws
///
/// ### Type parameters
/// - `T`: The type returned by sampling the distribution
pub trait DynamicDistribution<T>: Distribution<T> {
    /// Replace the weight of the outcome at `index`
    fn update(&mut self, index: usize, weight: f64);

    /// Total weight, i.e. the normalizing constant of the distribution
    fn sum(&self) -> f64;

    /// Clear any state carried between draws
    fn reset(&mut self) {}
}
