use std::fmt;

use log::debug;
use log::info;

use crate::basic_types::Solution;
use crate::engine::propagation::Propagator;
use crate::engine::Csp;
use crate::engine::VariableId;
use crate::tenner_assert_extreme;

/// The outcome of [`solve`].
#[derive(Debug, Clone)]
pub enum SearchResult {
    /// A total assignment satisfying every constraint was found.
    Satisfiable(Solution),
    /// The search space was exhausted without finding a solution.
    Unsatisfiable,
}

/// Counters accumulated over one [`solve`] call, reported through [`info!`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// The number of value assignments tried.
    pub decisions: u64,
    /// The number of assignments rejected by the propagator.
    pub failures: u64,
    /// The number of (variable, value) prunings performed by the propagator.
    pub prunings: u64,
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decisions={} failures={} prunings={}",
            self.decisions, self.failures, self.prunings
        )
    }
}

/// Search for the first solution of `csp` using chronological backtracking
/// paired with `propagator`.
///
/// The propagator is invoked once at the root, before any search assignment,
/// and once after every assignment with the assigned variable. On backtrack
/// the prunings of the corresponding propagation are restored and the
/// variable is unassigned again, so the CSP is returned in the state it was
/// given in regardless of the outcome.
///
/// Variables that enter the search assigned (such as the fixed cells of a
/// puzzle model) are unassigned first and re-assigned through the ordinary
/// search loop, which is what lets a propagator without inference still
/// detect contradictions among them.
pub fn solve<P: Propagator + ?Sized>(csp: &mut Csp, propagator: &P) -> SearchResult {
    let mut statistics = SearchStatistics::default();

    let preassigned: Vec<(VariableId, i32)> = csp
        .variable_ids()
        .filter_map(|id| csp.variable(id).assigned_value().map(|value| (id, value)))
        .collect();
    for &(variable, _) in &preassigned {
        csp.variable_mut(variable).unassign();
    }

    debug!(
        "solving {} ({} variables, {} constraints) with {}",
        csp.name(),
        csp.num_variables(),
        csp.num_constraints(),
        propagator.name()
    );

    let root = propagator.propagate(csp, None);
    statistics.prunings += root.pruned().len() as u64;

    let solution = if root.is_consistent() {
        search(csp, propagator, &mut statistics)
    } else {
        None
    };

    restore(csp, root.into_pruned());
    for (variable, value) in preassigned {
        csp.variable_mut(variable).assign(value);
    }

    info!("search statistics: {statistics}");

    match solution {
        Some(solution) => SearchResult::Satisfiable(solution),
        None => SearchResult::Unsatisfiable,
    }
}

fn search<P: Propagator + ?Sized>(
    csp: &mut Csp,
    propagator: &P,
    statistics: &mut SearchStatistics,
) -> Option<Solution> {
    let Some(variable) = select_unassigned(csp) else {
        tenner_assert_extreme!(
            csp.constraint_ids().all(|id| csp.is_currently_satisfied(id)),
            "a leaf of the search tree must satisfy every constraint"
        );
        return Some(Solution::from_assignment(csp));
    };

    let values: Vec<i32> = csp.variable(variable).domain().collect();
    for value in values {
        statistics.decisions += 1;
        csp.variable_mut(variable).assign(value);

        let propagation = propagator.propagate(csp, Some(variable));
        statistics.prunings += propagation.pruned().len() as u64;

        let solution = if propagation.is_consistent() {
            search(csp, propagator, statistics)
        } else {
            statistics.failures += 1;
            None
        };

        restore(csp, propagation.into_pruned());
        csp.variable_mut(variable).unassign();

        if solution.is_some() {
            return solution;
        }
    }

    None
}

/// The unassigned variable with the smallest current domain, if any.
fn select_unassigned(csp: &Csp) -> Option<VariableId> {
    csp.variable_ids()
        .filter(|&id| !csp.variable(id).is_assigned())
        .min_by_key(|&id| csp.variable(id).domain_size())
}

/// Undo `pruned` in reverse pruning order.
fn restore(csp: &mut Csp, pruned: Vec<(VariableId, i32)>) {
    for (variable, value) in pruned.into_iter().rev() {
        csp.variable_mut(variable).restore(value);
    }
}
