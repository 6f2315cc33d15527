use log::debug;

use crate::containers::KeyedVec;
use crate::engine::Constraint;
use crate::engine::ConstraintId;
use crate::engine::Variable;
use crate::engine::VariableId;
use crate::tenner_assert_simple;

/// A constraint satisfaction problem: the owner of all [`Variable`]s and
/// [`Constraint`]s of one puzzle instance.
///
/// Variables and constraints are stored in arenas behind typed ids, and
/// constraints refer to variables through [`VariableId`]s. A watch list per
/// variable records which constraints have the variable in scope, so that
/// propagators can cheaply select the constraints affected by an assignment
/// or pruning.
#[derive(Debug, Default)]
pub struct Csp {
    name: String,
    pub(crate) variables: KeyedVec<VariableId, Variable>,
    pub(crate) constraints: KeyedVec<ConstraintId, Constraint>,
    /// For every variable, the constraints whose scope contains it.
    watch_lists: KeyedVec<VariableId, Vec<ConstraintId>>,
}

impl Csp {
    pub fn new(name: impl Into<String>) -> Csp {
        Csp {
            name: name.into(),
            ..Csp::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a new variable over `domain` and return its id.
    pub fn new_variable(&mut self, name: impl Into<String>, domain: Vec<i32>) -> VariableId {
        let id = self.variables.push(Variable::new(name, domain));
        let watch_id = self.watch_lists.push(Vec::new());
        tenner_assert_simple!(id == watch_id);

        id
    }

    /// Register `constraint` and return its id. Every variable in its scope
    /// must belong to this CSP.
    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        let id = self.constraints.push(constraint);
        for &variable in self.constraints[id].scope() {
            self.watch_lists[variable].push(id);
        }
        debug!(
            "registered constraint {} with {} satisfying tuples",
            self.constraints[id].name(),
            self.constraints[id].num_satisfying_tuples()
        );

        id
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut Variable {
        &mut self.variables[id]
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id]
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> {
        self.variables.keys()
    }

    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> {
        self.constraints.keys()
    }

    /// The constraints whose scope contains `variable`, in registration
    /// order.
    pub fn constraints_with_variable(&self, variable: VariableId) -> &[ConstraintId] {
        &self.watch_lists[variable]
    }

    /// The number of unassigned variables in the scope of `constraint`.
    pub fn num_unassigned_in_scope(&self, constraint: ConstraintId) -> usize {
        self.unassigned_in_scope(constraint).count()
    }

    /// The unassigned variables in the scope of `constraint`, in scope order.
    pub fn unassigned_in_scope(
        &self,
        constraint: ConstraintId,
    ) -> impl Iterator<Item = VariableId> + '_ {
        self.constraints[constraint]
            .scope()
            .iter()
            .copied()
            .filter(|&variable| !self.variables[variable].is_assigned())
    }

    /// Check a fully assigned constraint against its satisfying-tuple table.
    pub fn is_currently_satisfied(&self, constraint: ConstraintId) -> bool {
        let constraint = &self.constraints[constraint];
        let values: Vec<i32> = constraint
            .scope()
            .iter()
            .map(|&variable| {
                self.variables[variable]
                    .assigned_value()
                    .expect("full-tuple checks require a fully assigned scope")
            })
            .collect();

        constraint.is_satisfied_by(&values)
    }

    /// Whether `value` for `variable` has support in `constraint`: some
    /// satisfying tuple assigns `value` to `variable` and assigns every other
    /// scope variable a value in its current domain.
    pub fn has_support(&self, constraint: ConstraintId, variable: VariableId, value: i32) -> bool {
        let constraint = &self.constraints[constraint];
        let position = constraint
            .position_of(variable)
            .expect("support queries are for variables in the scope");

        constraint.supported_tuples(position, value).any(|tuple| {
            tuple
                .iter()
                .zip(constraint.scope())
                .enumerate()
                .all(|(other, (&tuple_value, &scope_variable))| {
                    other == position || self.variables[scope_variable].contains(tuple_value)
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Csp;
    use crate::engine::Constraint;

    #[test]
    fn watch_lists_follow_constraint_scopes() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1]);
        let y = csp.new_variable("y", vec![0, 1]);
        let z = csp.new_variable("z", vec![0, 1]);

        let mut ne_xy = Constraint::new("ne_xy", vec![x, y]);
        ne_xy.add_satisfying_tuples(vec![vec![0, 1], vec![1, 0]]);
        let ne_xy = csp.add_constraint(ne_xy);

        let mut ne_yz = Constraint::new("ne_yz", vec![y, z]);
        ne_yz.add_satisfying_tuples(vec![vec![0, 1], vec![1, 0]]);
        let ne_yz = csp.add_constraint(ne_yz);

        assert_eq!(csp.constraints_with_variable(x), &[ne_xy]);
        assert_eq!(csp.constraints_with_variable(y), &[ne_xy, ne_yz]);
        assert_eq!(csp.constraints_with_variable(z), &[ne_yz]);
    }

    #[test]
    fn unassigned_scope_queries_track_assignments() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1]);
        let y = csp.new_variable("y", vec![0, 1]);

        let mut ne = Constraint::new("ne", vec![x, y]);
        ne.add_satisfying_tuples(vec![vec![0, 1], vec![1, 0]]);
        let ne = csp.add_constraint(ne);

        assert_eq!(csp.num_unassigned_in_scope(ne), 2);

        csp.variable_mut(x).assign(0);
        assert_eq!(csp.num_unassigned_in_scope(ne), 1);
        assert_eq!(csp.unassigned_in_scope(ne).collect::<Vec<_>>(), vec![y]);

        csp.variable_mut(y).assign(1);
        assert_eq!(csp.num_unassigned_in_scope(ne), 0);
        assert!(csp.is_currently_satisfied(ne));
    }

    #[test]
    fn support_respects_current_domains() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1, 2]);
        let y = csp.new_variable("y", vec![0, 1, 2]);

        let mut sum = Constraint::new("sum_is_2", vec![x, y]);
        sum.add_satisfying_tuples(vec![vec![0, 2], vec![1, 1], vec![2, 0]]);
        let sum = csp.add_constraint(sum);

        assert!(csp.has_support(sum, x, 0));

        // Once 2 leaves the domain of y, x = 0 loses its only support.
        csp.variable_mut(y).prune(2);
        assert!(!csp.has_support(sum, x, 0));
        assert!(csp.has_support(sum, x, 1));
    }
}
