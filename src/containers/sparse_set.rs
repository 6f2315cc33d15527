//! A sparse-set over the index universe `[0, n)`, used to represent the
//! current domain of a variable as a subset of its original domain.
//!
//! Removal and restoration are O(1) swaps against a backing permutation: the
//! first [`SparseSet::len`] entries of the permutation are the members of the
//! set. The representation follows the sparse-set domain encoding of de
//! Saint-Marcq et al., "Sparse-sets for domain implementation" (TRICS 2013).

use crate::tenner_assert_simple;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SparseSet {
    /// The number of indices currently in the set.
    size: usize,
    /// A permutation of `0..n`; the first [`size`][SparseSet::size] entries
    /// are the members of the set.
    values: Vec<usize>,
    /// For each index of the universe, its position in
    /// [`values`][SparseSet::values].
    positions: Vec<usize>,
}

impl SparseSet {
    /// Create a set containing the full universe `0..universe`.
    pub(crate) fn full(universe: usize) -> Self {
        SparseSet {
            size: universe,
            values: (0..universe).collect(),
            positions: (0..universe).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.size
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.positions[index] < self.size
    }

    /// Swaps the entries at positions `i` and `j` of
    /// [`values`][SparseSet::values] and updates
    /// [`positions`][SparseSet::positions] accordingly.
    fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.positions[self.values[i]] = i;
        self.positions[self.values[j]] = j;
    }

    /// Remove `index` from the set. The index must currently be a member.
    pub(crate) fn remove(&mut self, index: usize) {
        tenner_assert_simple!(self.contains(index), "removed an index twice");

        self.size -= 1;
        self.swap(self.positions[index], self.size);
    }

    /// Restore a previously removed `index`. The index must currently not be
    /// a member.
    pub(crate) fn restore(&mut self, index: usize) {
        tenner_assert_simple!(index < self.values.len());
        tenner_assert_simple!(!self.contains(index), "restored a present index");

        self.swap(self.positions[index], self.size);
        self.size += 1;
    }
}
