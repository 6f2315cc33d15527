//! # Tenner solver
//! A constraint propagation engine paired with CSP models of the Tenner Grid
//! puzzle.
//!
//! The engine is built around explicit-relation constraints: every
//! [`Constraint`] lists its satisfying tuples outright, which keeps the
//! propagators fully generic over the relation being enforced. Three
//! propagation strategies are provided:
//!
//! * [`Backtracking`][propagation::Backtracking]: no inference, only
//!   consistency checks of fully assigned constraints;
//! * [`ForwardChecking`][propagation::ForwardChecking]: prunes the lone
//!   unassigned variable of nearly-assigned constraints;
//! * [`GeneralisedArcConsistency`][propagation::GeneralisedArcConsistency]:
//!   full GAC enforcement over a constraint worklist.
//!
//! A propagator reports its verdict together with every pruned
//! (variable, value) pair, and the [`solve`][search::solve] driver restores
//! those prunings when it backtracks.
//!
//! # Example
//! Solving a CSP starts with creating its variables and constraints:
//! ```rust
//! use tenner_solver::propagation::GeneralisedArcConsistency;
//! use tenner_solver::search::{solve, SearchResult};
//! use tenner_solver::{Constraint, Csp};
//!
//! let mut csp = Csp::new("example");
//! let x = csp.new_variable("x", vec![0, 1, 2]);
//! let y = csp.new_variable("y", vec![0, 1, 2]);
//!
//! // x != y, as an explicit relation.
//! let mut not_equal = Constraint::new("ne(x,y)", vec![x, y]);
//! not_equal.add_satisfying_tuples(
//!     (0..3).flat_map(|a| (0..3).filter(move |&b| a != b).map(move |b| vec![a, b])),
//! );
//! csp.add_constraint(not_equal);
//!
//! match solve(&mut csp, &GeneralisedArcConsistency) {
//!     SearchResult::Satisfiable(solution) => {
//!         assert_ne!(solution.value(x), solution.value(y));
//!     }
//!     SearchResult::Unsatisfiable => panic!("x != y over 0..3 is satisfiable"),
//! }
//! ```
//!
//! The [`models::tenner`] module builds ready-made CSPs for Tenner Grid
//! boards in two encodings; see its documentation for the puzzle rules and
//! the board text format.

pub mod asserts;
mod basic_types;
mod containers;
mod engine;
pub mod models;

pub use basic_types::Propagation;
pub use basic_types::Solution;
pub use engine::propagation;
pub use engine::search;
pub use engine::Constraint;
pub use engine::ConstraintId;
pub use engine::Csp;
pub use engine::Variable;
pub use engine::VariableId;
