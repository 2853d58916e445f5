// src/model/metric.rs
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::model::granularity::TimeGrain;

/// Binary function applied by an arithmetic metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticFunction {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl ArithmeticFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticFunction::Plus => "plus",
            ArithmeticFunction::Minus => "minus",
            ArithmeticFunction::Multiply => "multiply",
            ArithmeticFunction::Divide => "divide",
        }
    }
}

/// How a logical metric's value is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricExpression {
    /// Integer sum over a physical field.
    LongSum { field: String },
    /// Floating-point sum over a physical field.
    DoubleSum { field: String },
    /// Row count.
    Count,
    /// Combine other logical metrics arithmetically.
    Arithmetic {
        function: ArithmeticFunction,
        operands: Vec<String>,
    },
    /// Average of a dependent metric re-aggregated at an inner grain.
    AggregationAverage {
        dependent: String,
        inner_grain: TimeGrain,
    },
    /// Distinct-count across dimension values.
    Cardinality { dimensions: Vec<String> },
    /// Approximate distinct-count sketch over a physical field.
    SketchCount { field: String, sketch_size: i64 },
    /// Approximate quantile over a physical field.
    Quantile { field: String, fraction: f64 },
    /// Monotone row number, no inputs.
    RowNum,
}

/// A named, possibly derived, quantitative measure.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalMetric {
    pub name: String,
    pub long_name: String,
    pub category: String,
    pub description: String,
    pub expression: MetricExpression,
}

impl LogicalMetric {
    pub fn new(name: impl Into<String>, expression: MetricExpression) -> Self {
        let name = name.into();
        Self {
            long_name: name.clone(),
            category: String::new(),
            description: String::new(),
            name,
            expression,
        }
    }
}

/// Shared name-to-metric dictionary.
///
/// Same lifecycle as [`DimensionDictionary`](crate::model::DimensionDictionary):
/// written by the metrics loader while makers already hold an `Arc` to it,
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct MetricDictionary {
    metrics: RwLock<IndexMap<String, Arc<LogicalMetric>>>,
}

impl MetricDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric under its lower-cased name, returning the previously
    /// registered entry if one existed.
    pub fn add(&self, metric: Arc<LogicalMetric>) -> Option<Arc<LogicalMetric>> {
        let key = metric.name.to_lowercase();
        self.metrics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, metric)
    }

    /// Case-insensitive lookup by metric name.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<LogicalMetric>> {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name.to_lowercase())
            .cloned()
    }

    /// Registered metric names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|m| m.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
