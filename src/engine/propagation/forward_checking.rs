use log::debug;

use crate::basic_types::Propagation;
use crate::engine::propagation::Propagator;
use crate::engine::ConstraintId;
use crate::engine::Csp;
use crate::engine::VariableId;

/// Forward checking: examines every constraint with exactly one unassigned
/// scope variable and prunes the values of that variable which cannot
/// complete the constraint.
///
/// The root invocation examines all constraints of the CSP; after an
/// assignment only the constraints touching the newly assigned variable are
/// considered. Inconsistency is reported iff an examined constraint empties
/// the current domain of its lone unassigned variable; the prunings
/// accumulated up to that point are still returned so the caller can undo
/// them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl Propagator for ForwardChecking {
    fn name(&self) -> &str {
        "FC"
    }

    fn propagate(&self, csp: &mut Csp, newly_assigned: Option<VariableId>) -> Propagation {
        let candidates: Vec<ConstraintId> = match newly_assigned {
            Some(variable) => csp.constraints_with_variable(variable).to_vec(),
            None => csp.constraint_ids().collect(),
        };

        let mut pruned = Vec::new();
        for constraint_id in candidates {
            if csp.num_unassigned_in_scope(constraint_id) != 1 {
                continue;
            }

            let unassigned = csp
                .unassigned_in_scope(constraint_id)
                .next()
                .expect("the scope holds exactly one unassigned variable");
            let scope = csp.constraint(constraint_id).scope().to_vec();
            let position = csp
                .constraint(constraint_id)
                .position_of(unassigned)
                .expect("the unassigned variable is in the scope");

            // The slot at `position` is a placeholder which is overwritten by
            // each candidate value below.
            let mut tuple: Vec<i32> = scope
                .iter()
                .map(|&variable| csp.variable(variable).assigned_value().unwrap_or_default())
                .collect();

            let values: Vec<i32> = csp.variable(unassigned).domain().collect();
            for value in values {
                tuple[position] = value;
                if !csp.constraint(constraint_id).is_satisfied_by(&tuple) {
                    csp.variable_mut(unassigned).prune(value);
                    pruned.push((unassigned, value));
                }
            }

            if csp.variable(unassigned).domain_size() == 0 {
                debug!(
                    "forward checking wiped out the domain of {} via {}",
                    csp.variable(unassigned).name(),
                    csp.constraint(constraint_id).name()
                );
                return Propagation::inconsistent(pruned);
            }
        }

        Propagation::consistent(pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardChecking;
    use crate::engine::propagation::Propagator;
    use crate::engine::Constraint;
    use crate::engine::Csp;
    use crate::engine::VariableId;

    fn not_equal(csp: &mut Csp, name: &str, a: VariableId, b: VariableId) {
        let mut constraint = Constraint::new(name, vec![a, b]);
        let tuples = csp
            .variable(a)
            .original_domain()
            .iter()
            .flat_map(|&left| {
                csp.variable(b)
                    .original_domain()
                    .iter()
                    .filter(move |&&right| left != right)
                    .map(move |&right| vec![left, right])
            })
            .collect::<Vec<_>>();
        constraint.add_satisfying_tuples(tuples);
        let _ = csp.add_constraint(constraint);
    }

    #[test]
    fn constraints_with_two_unassigned_variables_are_skipped() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1]);
        let y = csp.new_variable("y", vec![0, 1]);
        not_equal(&mut csp, "ne", x, y);

        let propagation = ForwardChecking.propagate(&mut csp, None);
        assert!(propagation.is_consistent());
        assert!(propagation.pruned().is_empty());
        assert_eq!(csp.variable(x).domain_size(), 2);
        assert_eq!(csp.variable(y).domain_size(), 2);
    }

    #[test]
    fn the_sole_unassigned_variable_is_pruned() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0, 1, 2]);
        let y = csp.new_variable("y", vec![0, 1, 2]);
        not_equal(&mut csp, "ne", x, y);

        csp.variable_mut(x).assign(1);
        let propagation = ForwardChecking.propagate(&mut csp, Some(x));

        assert!(propagation.is_consistent());
        assert_eq!(propagation.pruned(), &[(y, 1)]);
        assert_eq!(csp.variable(y).domain().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn wipeout_is_reported_with_the_prunings_so_far() {
        let mut csp = Csp::new("test");
        let x = csp.new_variable("x", vec![0]);
        let y = csp.new_variable("y", vec![0]);
        not_equal(&mut csp, "ne", x, y);

        csp.variable_mut(x).assign(0);
        let propagation = ForwardChecking.propagate(&mut csp, Some(x));

        assert!(!propagation.is_consistent());
        assert_eq!(propagation.pruned(), &[(y, 0)]);
    }

    #[test]
    fn root_invocation_examines_all_constraints() {
        let mut csp = Csp::new("test");
        // A singleton-domain variable makes ne(x, y) a one-unassigned
        // constraint before any search assignment happens.
        let x = csp.new_variable("x", vec![4]);
        let y = csp.new_variable("y", vec![3, 4]);
        not_equal(&mut csp, "ne", x, y);
        csp.variable_mut(x).assign(4);

        let propagation = ForwardChecking.propagate(&mut csp, None);
        assert!(propagation.is_consistent());
        assert_eq!(propagation.pruned(), &[(y, 4)]);
        assert_eq!(csp.variable(y).domain().collect::<Vec<_>>(), vec![3]);
    }
}
