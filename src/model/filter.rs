// src/model/filter.rs
use std::fmt;

/// Comparison applied by a pre-aggregation dimension filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperation {
    In,
    NotIn,
    Contains,
    StartsWith,
    Eq,
}

impl FilterOperation {
    /// Resolve an operation from its request name, case-insensitively.
    pub fn from_name(name: &str) -> Option<FilterOperation> {
        match name.to_lowercase().as_str() {
            "in" => Some(FilterOperation::In),
            "notin" => Some(FilterOperation::NotIn),
            "contains" => Some(FilterOperation::Contains),
            "startswith" => Some(FilterOperation::StartsWith),
            "eq" => Some(FilterOperation::Eq),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperation::In => "in",
            FilterOperation::NotIn => "notin",
            FilterOperation::Contains => "contains",
            FilterOperation::StartsWith => "startswith",
            FilterOperation::Eq => "eq",
        }
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate restricting which raw rows contribute to aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiFilter {
    /// Api name of the dimension being filtered.
    pub dimension: String,
    /// The dimension field the values are matched against.
    pub field: String,
    pub operation: FilterOperation,
    pub values: Vec<String>,
}

impl ApiFilter {
    pub fn new(
        dimension: impl Into<String>,
        field: impl Into<String>,
        operation: FilterOperation,
        values: Vec<String>,
    ) -> Self {
        Self {
            dimension: dimension.into(),
            field: field.into(),
            operation,
            values,
        }
    }
}
