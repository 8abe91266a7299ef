//! Item constraints: `(slot, operator, value)` triples carried by dialogue acts

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Comparison kind of an item constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equality
    #[default]
    Eq,
    /// Inequality
    Ne,
    /// Strictly less than
    Lt,
    /// Strictly greater than
    Gt,
    /// Inclusive range
    Between,
}

impl Operator {
    /// Symbol used when rendering a constraint
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Between => " between ",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single constraint on a slot
///
/// Constraints are plain values: two constraints are equal when slot,
/// operator and value are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConstraint {
    /// Slot name (opaque to the policy)
    pub slot: String,
    /// Comparison kind
    #[serde(default)]
    pub op: Operator,
    /// Constraint value
    #[serde(default)]
    pub value: Value,
}

impl ItemConstraint {
    /// Create a constraint with an explicit operator
    pub fn new(slot: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            slot: slot.into(),
            op,
            value: value.into(),
        }
    }

    /// Create an equality constraint
    pub fn eq(slot: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(slot, Operator::Eq, value)
    }

    /// Value as a string slice, if it is a JSON string
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

impl fmt::Display for ItemConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{}{}'{}'", self.slot, self.op, s),
            other => write!(f, "{}{}{}", self.slot, self.op, other),
        }
    }
}
