use crate::engine::VariableId;

/// The result of invoking a propagator: a consistency verdict together with
/// every (variable, value) pair the propagator pruned, in pruning order.
///
/// The prunings are reported even when the verdict is inconsistent, because
/// the search driver is responsible for restoring them when it backtracks
/// past the assignment that triggered the propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Propagation {
    consistent: bool,
    pruned: Vec<(VariableId, i32)>,
}

impl Propagation {
    /// The propagation completed without emptying any domain.
    pub fn consistent(pruned: Vec<(VariableId, i32)>) -> Propagation {
        Propagation {
            consistent: true,
            pruned,
        }
    }

    /// The propagation proved the current partial assignment unextendable,
    /// either through a failed constraint check or a domain wipeout.
    pub fn inconsistent(pruned: Vec<(VariableId, i32)>) -> Propagation {
        Propagation {
            consistent: false,
            pruned,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.consistent
    }

    /// The (variable, value) pairs removed by this propagation, in order.
    pub fn pruned(&self) -> &[(VariableId, i32)] {
        &self.pruned
    }

    pub fn into_pruned(self) -> Vec<(VariableId, i32)> {
        self.pruned
    }
}
