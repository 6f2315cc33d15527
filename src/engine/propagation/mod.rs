//! The propagators a search driver can pair with a [`Csp`].
//!
//! A propagator is invoked once before search starts, with no newly assigned
//! variable, and once after every assignment, with the assigned variable. It
//! returns a [`Propagation`]: the consistency verdict plus every
//! (variable, value) pair it pruned, which the driver must restore when it
//! backtracks past the triggering assignment.
//!
//! Propagators are stateless; all state lives in the domains and assignments
//! of the [`Csp`] itself.

mod backtracking;
mod forward_checking;
mod generalised_arc_consistency;

pub use backtracking::Backtracking;
pub use forward_checking::ForwardChecking;
pub use generalised_arc_consistency::GeneralisedArcConsistency;

use crate::basic_types::Propagation;
use crate::engine::Csp;
use crate::engine::VariableId;

/// A stateless propagation strategy over a [`Csp`].
pub trait Propagator {
    /// A short name for logging and statistics.
    fn name(&self) -> &str;

    /// Prune values that cannot take part in any solution extending the
    /// current partial assignment.
    ///
    /// `newly_assigned` is the variable the search driver assigned most
    /// recently, or `None` for the root invocation before search starts.
    ///
    /// A propagator never prunes a value that is already absent from a
    /// current domain, and never prunes the same (variable, value) pair
    /// twice within one invocation.
    fn propagate(&self, csp: &mut Csp, newly_assigned: Option<VariableId>) -> Propagation;
}
