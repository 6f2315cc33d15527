use log::debug;

use crate::basic_types::Propagation;
use crate::engine::propagation::Propagator;
use crate::engine::Csp;
use crate::engine::VariableId;

/// Plain backtracking: no inference at all, only consistency checks of
/// constraints whose scope became fully assigned.
///
/// The root invocation trivially succeeds. After an assignment, every
/// constraint touching the newly assigned variable with no unassigned scope
/// variables left is checked against its satisfying-tuple table; a failed
/// check reports inconsistency. Nothing is ever pruned.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracking;

impl Propagator for Backtracking {
    fn name(&self) -> &str {
        "BT"
    }

    fn propagate(&self, csp: &mut Csp, newly_assigned: Option<VariableId>) -> Propagation {
        let Some(variable) = newly_assigned else {
            return Propagation::consistent(Vec::new());
        };

        for &constraint in csp.constraints_with_variable(variable) {
            if csp.num_unassigned_in_scope(constraint) > 0 {
                continue;
            }

            if !csp.is_currently_satisfied(constraint) {
                debug!(
                    "constraint {} rejects the current assignment",
                    csp.constraint(constraint).name()
                );
                return Propagation::inconsistent(Vec::new());
            }
        }

        Propagation::consistent(Vec::new())
    }
}
