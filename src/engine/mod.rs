//! The CSP engine: variables, constraints, the [`Csp`] aggregate, the
//! propagators and the backtracking search driver.

mod constraint;
mod csp;
pub mod propagation;
pub mod search;
mod variable;

pub use constraint::Constraint;
pub use constraint::ConstraintId;
pub use csp::Csp;
pub use variable::Variable;
pub use variable::VariableId;
