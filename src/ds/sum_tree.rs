use crate::util::{debug_assert_index, debug_assert_weight, leaf_capacity};

/// A binary tree data structure where each parent node is the sum of its child nodes
///
/// The tree is perfect and laid out heap-style over a flat `Vec`: node `i` has children `2i + 1`
/// and `2i + 2`, and the `capacity` leaves occupy the tail of the vector. Only the first `len`
/// leaves are user-visible; the remaining `capacity - len` leaves are zero padding.
#[derive(Debug, Clone)]
pub struct SumTree {
    tree: Vec<f64>,
    len: usize,
    capacity: usize,
}

impl SumTree {
    /// Build a `SumTree` from a sequence of weights in one bottom-up pass
    pub fn new(weights: &[f64]) -> Self {
        let len = weights.len();
        let capacity = leaf_capacity(len);
        let first_leaf = capacity - 1;

        let mut tree = vec![0.0; 2 * capacity - 1];
        for (slot, &w) in tree[first_leaf..].iter_mut().zip(weights) {
            debug_assert_weight!(w);
            *slot = w;
        }
        for ix in (0..first_leaf).rev() {
            tree[ix] = tree[2 * ix + 1] + tree[2 * ix + 2];
        }

        log::trace!(
            "built sum tree with {} leaves (capacity {}), total {}",
            len,
            capacity,
            tree[0]
        );

        Self {
            tree,
            len,
            capacity,
        }
    }

    /// Number of user-visible leaves
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the sum of all values stored
    pub fn sum(&self) -> f64 {
        self.tree[0]
    }

    /// Contiguous view of the user-visible leaves in index order
    pub fn leaves(&self) -> &[f64] {
        let first_leaf = self.capacity - 1;
        &self.tree[first_leaf..first_leaf + self.len]
    }

    /// Update the value at a provided index
    ///
    /// Every ancestor is recomputed as the sum of its two children, never shifted by a delta, so
    /// the root is always the tree-ordered sum of the current leaves.
    pub fn update(&mut self, ix: usize, value: f64) {
        debug_assert_index!(ix, self.len);
        debug_assert_weight!(value);

        let mut ix = ix + self.capacity - 1;
        self.tree[ix] = value;

        while ix > 0 {
            ix = (ix - 1) / 2;
            self.tree[ix] = self.tree[2 * ix + 1] + self.tree[2 * ix + 2];
        }
    }

    /// Find the index `i` whose cumulative interval `[C(i), C(i) + w(i))` contains `probe`, where
    /// `C(i)` is the sum of the values before `i`
    ///
    /// Zero-weight leaves are never returned. A negative probe resolves to the first non-zero
    /// leaf, and a probe at or above [`sum`](SumTree::sum) resolves to the last non-zero leaf.
    /// If every leaf is zero the result is `0`.
    ///
    /// The tree must not be empty.
    pub fn find(&self, probe: f64) -> usize {
        debug_assert!(!self.is_empty(), "`find` called on an empty tree");

        // `max` also maps NaN and -0.0 onto the leftmost descent
        let mut val = probe.max(0.0);
        // `sum - left` can round below `right`, so overshoot never enters the subtracting descent
        if val >= self.sum() {
            return self.last_non_zero();
        }

        let mut ix = 0;
        while ix < self.capacity - 1 {
            let left = 2 * ix + 1;
            let right = left + 1;
            ix = if val < self.tree[left] {
                left
            } else if self.tree[right] > 0.0 {
                val -= self.tree[left];
                right
            } else {
                // rounding carried `val` past the left subtree, and the right one is all zeros
                left
            };
        }

        ix - (self.capacity - 1)
    }

    /// Rightmost leaf with a non-zero value, or `0` if every leaf is zero
    fn last_non_zero(&self) -> usize {
        let mut ix = 0;
        while ix < self.capacity - 1 {
            let right = 2 * ix + 2;
            ix = if self.tree[right] > 0.0 { right } else { right - 1 };
        }

        ix - (self.capacity - 1)
    }
}

impl Default for SumTree {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl PartialEq for SumTree {
    /// Trees are equal when their leaves are; internal sums are not compared
    fn eq(&self, other: &Self) -> bool {
        self.leaves() == other.leaves()
    }
}
