use std::fmt;

use crate::containers::SparseSet;
use crate::containers::StorageKey;
use crate::tenner_assert_simple;

/// The id of a [`Variable`][crate::engine::Variable] within the
/// [`Csp`][crate::engine::Csp] that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u32);

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId(index as u32)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A named domain-bearing cell of a CSP.
///
/// A variable carries its original domain, fixed at creation, and a current
/// domain which propagators shrink through [`Variable::prune`] and the search
/// driver grows back through [`Variable::restore`]. The current domain is
/// always a subset of the original domain.
///
/// While a variable is assigned, its *effective* current domain is the
/// singleton of the assigned value: [`Variable::domain`],
/// [`Variable::domain_size`] and [`Variable::contains`] all honour the
/// assignment. Pruning and restoring keep operating on the underlying domain
/// so that the undo trail of the search driver stays symmetric.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    original_domain: Box<[i32]>,
    /// Indices into [`original_domain`][Variable::original_domain] which are
    /// still part of the current domain.
    current_domain: SparseSet,
    assignment: Option<i32>,
}

impl Variable {
    /// Create an unassigned variable over `domain`. The domain must be
    /// non-empty and free of duplicates.
    pub(crate) fn new(name: impl Into<String>, domain: Vec<i32>) -> Variable {
        tenner_assert_simple!(!domain.is_empty(), "a variable needs a non-empty domain");
        tenner_assert_simple!(
            (0..domain.len()).all(|i| !domain[i + 1..].contains(&domain[i])),
            "domains are sets of distinct values"
        );

        let universe = domain.len();
        Variable {
            name: name.into(),
            original_domain: domain.into_boxed_slice(),
            current_domain: SparseSet::full(universe),
            assignment: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain the variable was created with, in creation order.
    pub fn original_domain(&self) -> &[i32] {
        &self.original_domain
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn assigned_value(&self) -> Option<i32> {
        self.assignment
    }

    /// Assign `value` to the variable. The value must be in the current
    /// domain and the variable must be unassigned.
    pub fn assign(&mut self, value: i32) {
        tenner_assert_simple!(!self.is_assigned(), "assigned {} twice", self.name);
        tenner_assert_simple!(
            self.contains(value),
            "assigned {} a value outside its current domain",
            self.name
        );

        self.assignment = Some(value);
    }

    /// Undo the current assignment.
    pub fn unassign(&mut self) {
        tenner_assert_simple!(self.is_assigned(), "unassigned the unassigned {}", self.name);

        self.assignment = None;
    }

    /// The values of the effective current domain, in original-domain order.
    pub fn domain(&self) -> impl Iterator<Item = i32> + '_ {
        self.original_domain
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(index, value)| match self.assignment {
                Some(assigned) => value == assigned,
                None => self.current_domain.contains(index),
            })
            .map(|(_, value)| value)
    }

    /// The size of the effective current domain.
    pub fn domain_size(&self) -> usize {
        match self.assignment {
            Some(_) => 1,
            None => self.current_domain.len(),
        }
    }

    /// Whether `value` is in the effective current domain.
    pub fn contains(&self, value: i32) -> bool {
        match self.assignment {
            Some(assigned) => value == assigned,
            None => self
                .index_of(value)
                .is_some_and(|index| self.current_domain.contains(index)),
        }
    }

    /// Whether `value` has been pruned from the underlying current domain,
    /// regardless of any assignment. Values outside the original domain are
    /// not considered pruned.
    pub(crate) fn is_pruned(&self, value: i32) -> bool {
        self.index_of(value)
            .is_some_and(|index| !self.current_domain.contains(index))
    }

    /// Remove `value` from the current domain. The value must not already be
    /// pruned.
    pub fn prune(&mut self, value: i32) {
        let index = self
            .index_of(value)
            .expect("pruned a value outside the original domain");
        self.current_domain.remove(index);
    }

    /// Restore a previously pruned `value` to the current domain.
    pub fn restore(&mut self, value: i32) {
        let index = self
            .index_of(value)
            .expect("restored a value outside the original domain");
        self.current_domain.restore(index);
    }

    fn index_of(&self, value: i32) -> Option<usize> {
        self.original_domain.iter().position(|&v| v == value)
    }
}
