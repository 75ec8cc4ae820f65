/// Asserts in debug builds that a weight is finite and non-negative, and panics
/// with a helpful message if not
///
/// ### Example
/// ```ignore
/// let weight = -1.0;
/// debug_assert_weight!(weight);
/// ```
/// This will panic with the message "Invalid value for \`weight\`. Must be finite and non-negative, got -1."
macro_rules! debug_assert_weight {
    ($var:expr) => {
        debug_assert!(
            $var.is_finite() && $var >= 0.0,
            "Invalid value for `{}`. Must be finite and non-negative, got {}.",
            stringify!($var),
            $var,
        );
    };
}

/// Asserts in debug builds that `ix` is a valid position in a sequence of length `len`
macro_rules! debug_assert_index {
    ($ix:expr, $len:expr) => {
        debug_assert!(
            $ix < $len,
            "Index `{}` out of range: {} >= {}.",
            stringify!($ix),
            $ix,
            $len,
        );
    };
}

pub(crate) use debug_assert_index;
pub(crate) use debug_assert_weight;

/// Number of leaf slots in a perfect binary tree holding `n` leaves
pub(crate) fn leaf_capacity(n: usize) -> usize {
    n.max(1).next_power_of_two()
}
