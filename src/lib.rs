/// Categorical sampler with in-place weight updates
pub mod distribution;

/// Data structures
pub mod ds;

/// Error types for checked construction and parsing
pub mod error;

/// Dynamic probability distributions
pub mod prob;

/// Weight sequences backed by a sum tree
pub mod weights;

mod util;
