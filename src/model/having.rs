// src/model/having.rs
use std::fmt;

/// Comparison applied by a post-aggregation metric predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HavingOperation {
    EqualTo,
    GreaterThan,
    LessThan,
    NotEqualTo,
}

impl HavingOperation {
    /// Resolve an operation from its request name or alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<HavingOperation> {
        match name.to_lowercase().as_str() {
            "equalto" | "equals" | "eq" => Some(HavingOperation::EqualTo),
            "greaterthan" | "greater" | "gt" => Some(HavingOperation::GreaterThan),
            "lessthan" | "less" | "lt" => Some(HavingOperation::LessThan),
            "notequalto" | "notequals" | "noteq" => Some(HavingOperation::NotEqualTo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HavingOperation::EqualTo => "eq",
            HavingOperation::GreaterThan => "gt",
            HavingOperation::LessThan => "lt",
            HavingOperation::NotEqualTo => "noteq",
        }
    }
}

impl fmt::Display for HavingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate restricting which aggregated rows are retained.
///
/// The metric it applies to is the key of the request's having map, not part
/// of the predicate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Having {
    pub operation: HavingOperation,
    pub values: Vec<f64>,
}

impl Having {
    pub fn new(operation: HavingOperation, values: Vec<f64>) -> Self {
        Self { operation, values }
    }
}
