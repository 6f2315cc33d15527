use fnv::FnvHashMap;

use crate::containers::StorageKey;
use crate::engine::VariableId;
use crate::tenner_assert_eq_simple;
use crate::tenner_assert_simple;

/// The id of a [`Constraint`] within the [`Csp`][crate::engine::Csp] that
/// owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u32);

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(index as u32)
    }
}

/// A named relation over an ordered scope of variables, defined by an
/// explicit table of satisfying tuples.
///
/// Tuple values correspond positionally to the scope. Next to the table
/// itself, the constraint maintains an index from (scope position, value) to
/// the tuples containing that value at that position, so that membership and
/// support queries do not scan the full table.
#[derive(Debug, Clone)]
pub struct Constraint {
    name: String,
    scope: Box<[VariableId]>,
    tuples: Vec<Box<[i32]>>,
    /// Maps (scope position, value) to the indices into
    /// [`tuples`][Constraint::tuples] whose component at that position equals
    /// the value.
    support: FnvHashMap<(usize, i32), Vec<usize>>,
}

impl Constraint {
    /// Create a constraint over `scope` with an empty satisfying-tuple table.
    /// The scope must be non-empty and free of duplicate variables.
    pub fn new(name: impl Into<String>, scope: Vec<VariableId>) -> Constraint {
        tenner_assert_simple!(!scope.is_empty(), "a constraint needs a non-empty scope");
        tenner_assert_simple!(
            (0..scope.len()).all(|i| !scope[i + 1..].contains(&scope[i])),
            "constraint scopes hold distinct variables"
        );

        Constraint {
            name: name.into(),
            scope: scope.into_boxed_slice(),
            tuples: Vec::new(),
            support: FnvHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered scope of the constraint.
    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    /// The number of satisfying tuples currently in the table.
    pub fn num_satisfying_tuples(&self) -> usize {
        self.tuples.len()
    }

    /// Extend the satisfying-tuple table. Each tuple must have one component
    /// per scope variable.
    pub fn add_satisfying_tuples(&mut self, tuples: impl IntoIterator<Item = Vec<i32>>) {
        for tuple in tuples {
            tenner_assert_eq_simple!(
                tuple.len(),
                self.scope.len(),
                "tuple arity must match the scope of {}",
                self.name
            );

            let index = self.tuples.len();
            for (position, &value) in tuple.iter().enumerate() {
                self.support
                    .entry((position, value))
                    .or_default()
                    .push(index);
            }
            self.tuples.push(tuple.into_boxed_slice());
        }
    }

    /// Whether `values` (positionally matching the scope) is a satisfying
    /// tuple.
    pub fn is_satisfied_by(&self, values: &[i32]) -> bool {
        tenner_assert_eq_simple!(values.len(), self.scope.len());

        self.supported_tuples(0, values[0])
            .any(|tuple| tuple == values)
    }

    /// The position of `variable` in the scope, if it occurs there.
    pub(crate) fn position_of(&self, variable: VariableId) -> Option<usize> {
        self.scope.iter().position(|&v| v == variable)
    }

    /// The satisfying tuples whose component at `position` equals `value`.
    pub(crate) fn supported_tuples(
        &self,
        position: usize,
        value: i32,
    ) -> impl Iterator<Item = &'_ [i32]> {
        self.support
            .get(&(position, value))
            .into_iter()
            .flatten()
            .map(|&index| &*self.tuples[index])
    }
}
