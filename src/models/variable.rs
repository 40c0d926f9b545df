//! Decision variables and guards.
//!
//! A decision variable is a named discrete choice whose options each carry
//! a utility reward collected by the planner when that option is selected.
//! A [`Guard`] binds one variable to one option and gates an episode, a
//! goal group or another variable: the gated object only exists in a
//! solution that makes exactly that assignment.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

index_handle!(
    /// Handle of a [`DecisionVariable`] inside its [`Problem`](super::Problem).
    VariableId
);

/// Assignment of one option to one decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guard {
    /// Guarding variable.
    pub variable: VariableId,
    /// Option label the variable must take.
    pub value: String,
}

impl Guard {
    /// Creates a new guard.
    pub fn new(variable: VariableId, value: impl Into<String>) -> Self {
        Self {
            variable,
            value: value.into(),
        }
    }
}

/// A named discrete choice.
///
/// The domain maps option label → utility. Labels are unique; options are
/// kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionVariable {
    /// Registry handle.
    pub id: VariableId,
    /// Variable name.
    pub name: String,
    /// Option label → utility reward.
    pub domain: IndexMap<String, f64>,
    /// Guards gating this variable itself.
    pub guards: Vec<Guard>,
}

impl DecisionVariable {
    /// Creates a variable with an empty domain.
    pub fn new(id: VariableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            domain: IndexMap::new(),
            guards: Vec::new(),
        }
    }

    /// Adds (or re-prices) an option and returns the guard selecting it.
    pub fn add_option(&mut self, label: impl Into<String>, utility: f64) -> Guard {
        let label = label.into();
        self.domain.insert(label.clone(), utility);
        Guard::new(self.id, label)
    }

    /// Guard selecting an existing option.
    ///
    /// Returns `None` if the label is not in the domain.
    pub fn assignment(&self, label: &str) -> Option<Guard> {
        self.domain
            .contains_key(label)
            .then(|| Guard::new(self.id, label))
    }

    /// Utility of an option.
    pub fn utility(&self, label: &str) -> Option<f64> {
        self.domain.get(label).copied()
    }

    /// Number of options.
    pub fn option_count(&self) -> usize {
        self.domain.len()
    }

    /// Adds a guard gating this variable.
    pub fn add_guard(&mut self, guard: Guard) {
        self.guards.push(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_option_returns_guard() {
        let mut var = DecisionVariable::new(VariableId(3), "Choice_Lunch-03/16");
        let guard = var.add_option("Cafe", 42.0);

        assert_eq!(guard, Guard::new(VariableId(3), "Cafe"));
        assert_eq!(var.utility("Cafe"), Some(42.0));
        assert_eq!(var.option_count(), 1);
    }

    #[test]
    fn test_duplicate_label_keeps_single_option() {
        let mut var = DecisionVariable::new(VariableId(0), "v");
        var.add_option("A", 1.0);
        var.add_option("A", 2.0);

        assert_eq!(var.option_count(), 1);
        assert_eq!(var.utility("A"), Some(2.0));
    }

    #[test]
    fn test_assignment_lookup() {
        let mut var = DecisionVariable::new(VariableId(1), "IncludeOrNot_Park");
        var.add_option("Visit", 0.0);
        var.add_option("NotVisit", 0.0);

        assert_eq!(
            var.assignment("Visit"),
            Some(Guard::new(VariableId(1), "Visit"))
        );
        assert!(var.assignment("Maybe").is_none());
        let labels: Vec<&str> = var.domain.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Visit", "NotVisit"]);
    }
}
