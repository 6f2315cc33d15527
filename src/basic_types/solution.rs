use crate::containers::KeyedVec;
use crate::engine::Csp;
use crate::engine::VariableId;
use crate::tenner_assert_simple;

/// A total assignment of the variables of a [`Csp`], captured at the moment
/// search found it. A [`Solution`] stays valid after the search driver has
/// unwound its assignments.
#[derive(Debug, Clone)]
pub struct Solution {
    values: KeyedVec<VariableId, i32>,
}

impl Solution {
    /// Capture the current assignment of `csp`. Every variable must be
    /// assigned.
    pub(crate) fn from_assignment(csp: &Csp) -> Solution {
        let mut values = KeyedVec::default();
        for variable_id in csp.variable_ids() {
            let variable = csp.variable(variable_id);
            tenner_assert_simple!(
                variable.is_assigned(),
                "solutions can only be captured from total assignments"
            );
            let _ = values.push(variable.assigned_value().unwrap_or_default());
        }

        Solution { values }
    }

    /// The value the solution assigns to `variable`.
    pub fn value(&self, variable: VariableId) -> i32 {
        self.values[variable]
    }
}
