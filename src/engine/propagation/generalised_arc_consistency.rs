use std::collections::VecDeque;

use log::debug;

use crate::basic_types::Propagation;
use crate::containers::KeyedVec;
use crate::engine::propagation::Propagator;
use crate::engine::ConstraintId;
use crate::engine::Csp;
use crate::engine::VariableId;
use crate::tenner_assert_moderate;

/// Generalised arc consistency: prunes every value of every variable that
/// lacks a supporting tuple in some constraint containing the variable.
///
/// A worklist of constraints is seeded with all constraints (root
/// invocation) or the constraints touching the newly assigned variable.
/// Whenever a value is pruned, every constraint watching the pruned variable
/// is re-enqueued unless it is already pending. A domain wipeout terminates
/// the propagation immediately, reporting the prunings accumulated so far;
/// otherwise the worklist is drained to a fixpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralisedArcConsistency;

impl Propagator for GeneralisedArcConsistency {
    fn name(&self) -> &str {
        "GAC"
    }

    fn propagate(&self, csp: &mut Csp, newly_assigned: Option<VariableId>) -> Propagation {
        let mut queue: VecDeque<ConstraintId> = match newly_assigned {
            Some(variable) => csp.constraints_with_variable(variable).iter().copied().collect(),
            None => csp.constraint_ids().collect(),
        };

        let mut pending: KeyedVec<ConstraintId, bool> = KeyedVec::default();
        pending.resize(csp.num_constraints(), false);
        for &constraint in &queue {
            pending[constraint] = true;
        }

        let mut pruned: Vec<(VariableId, i32)> = Vec::new();
        while let Some(constraint) = queue.pop_front() {
            pending[constraint] = false;

            let scope = csp.constraint(constraint).scope().to_vec();
            for variable in scope {
                let values: Vec<i32> = csp.variable(variable).domain().collect();
                for value in values {
                    // An assigned variable keeps reporting its assigned value
                    // even after that value was pruned from the underlying
                    // domain; skip it rather than prune twice.
                    if csp.variable(variable).is_pruned(value) {
                        continue;
                    }

                    if csp.has_support(constraint, variable, value) {
                        continue;
                    }

                    tenner_assert_moderate!(
                        !pruned.contains(&(variable, value)),
                        "pruned the same (variable, value) pair twice"
                    );
                    csp.variable_mut(variable).prune(value);
                    pruned.push((variable, value));

                    if csp.variable(variable).domain_size() == 0 {
                        debug!(
                            "GAC wiped out the domain of {} via {}",
                            csp.variable(variable).name(),
                            csp.constraint(constraint).name()
                        );
                        return Propagation::inconsistent(pruned);
                    }

                    for &affected in csp.constraints_with_variable(variable) {
                        if !pending[affected] {
                            pending[affected] = true;
                            queue.push_back(affected);
                        }
                    }
                }
            }
        }

        Propagation::consistent(pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::GeneralisedArcConsistency;
    use crate::engine::propagation::Propagator;
    use crate::engine::Constraint;
    use crate::engine::Csp;
    use crate::engine::VariableId;

    /// x < y over explicit tuples.
    fn less_than(csp: &mut Csp, name: &str, a: VariableId, b: VariableId) {
        let mut constraint = Constraint::new(name, vec![a, b]);
        let tuples = csp
            .variable(a)
            .original_domain()
            .iter()
            .flat_map(|&left| {
                csp.variable(b)
                    .original_domain()
                    .iter()
                    .filter(move |&&right| left < right)
                    .map(move |&right| vec![left, right])
            })
            .collect::<Vec<_>>();
        constraint.add_satisfying_tuples(tuples);
        let _ = csp.add_constraint(constraint);
    }

    #[test]
    fn unsupported_values_are_pruned_at_the_root() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1, 2]);
        let y = csp.new_variable("y", vec![0, 1, 2]);
        less_than(&mut csp, "lt", x, y);

        let propagation = GeneralisedArcConsistency.propagate(&mut csp, None);

        assert!(propagation.is_consistent());
        // x = 2 has no y > 2; y = 0 has no x < 0.
        assert_eq!(csp.variable(x).domain().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(csp.variable(y).domain().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(propagation.pruned().len(), 2);
    }

    #[test]
    fn propagation_reaches_a_fixpoint() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1, 2, 3]);
        let y = csp.new_variable("y", vec![0, 1, 2, 3]);
        let z = csp.new_variable("z", vec![0, 1, 2, 3]);
        less_than(&mut csp, "lt_xy", x, y);
        less_than(&mut csp, "lt_yz", y, z);

        let first = GeneralisedArcConsistency.propagate(&mut csp, None);
        assert!(first.is_consistent());
        assert!(!first.pruned().is_empty());

        // Re-running on the propagator's own output prunes nothing further.
        let second = GeneralisedArcConsistency.propagate(&mut csp, None);
        assert!(second.is_consistent());
        assert!(second.pruned().is_empty());
    }

    #[test]
    fn chained_pruning_requeues_affected_constraints() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1, 2]);
        let y = csp.new_variable("y", vec![0, 1, 2]);
        let z = csp.new_variable("z", vec![0, 1, 2]);
        less_than(&mut csp, "lt_xy", x, y);
        less_than(&mut csp, "lt_yz", y, z);

        let propagation = GeneralisedArcConsistency.propagate(&mut csp, None);

        assert!(propagation.is_consistent());
        // x < y < z over {0, 1, 2} forces x = 0, y = 1, z = 2.
        assert_eq!(csp.variable(x).domain().collect::<Vec<_>>(), vec![0]);
        assert_eq!(csp.variable(y).domain().collect::<Vec<_>>(), vec![1]);
        assert_eq!(csp.variable(z).domain().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn wipeout_stops_propagation_and_reports_prunings() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![1, 2]);
        let y = csp.new_variable("y", vec![0, 1]);
        less_than(&mut csp, "lt", x, y);

        // No pair in {1, 2} x {0, 1} satisfies x < y, so the table is empty
        // and the first examined variable loses its whole domain.
        let propagation = GeneralisedArcConsistency.propagate(&mut csp, None);

        assert!(!propagation.is_consistent());
        assert!(!propagation.pruned().is_empty());
    }

    #[test]
    fn no_pair_is_pruned_twice_in_one_invocation() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1, 2, 3]);
        let y = csp.new_variable("y", vec![0, 1, 2, 3]);
        let z = csp.new_variable("z", vec![0, 1, 2, 3]);
        less_than(&mut csp, "lt_xy", x, y);
        less_than(&mut csp, "lt_yz", y, z);
        less_than(&mut csp, "lt_xz", x, z);

        let propagation = GeneralisedArcConsistency.propagate(&mut csp, None);
        assert!(propagation.is_consistent());

        let mut seen = propagation.pruned().to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), propagation.pruned().len());
    }
}
