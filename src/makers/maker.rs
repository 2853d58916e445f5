//! Metric makers: named components that know how to build one kind of
//! logical metric.
//!
//! Every maker validates the number of dependent names handed to
//! [`MetricMaker::make`], and makers that derive from other logical metrics
//! resolve each dependent against the shared metric dictionary before
//! producing anything.

use std::fmt::Debug;
use std::sync::Arc;

use crate::model::granularity::TimeGrain;
use crate::model::metric::{
    ArithmeticFunction, LogicalMetric, MetricDictionary, MetricExpression,
};
use crate::model::DimensionDictionary;

/// Error raised while a maker builds a metric.
#[derive(Debug, thiserror::Error)]
pub enum MakerError {
    #[error("maker '{kind}' expects {expected} dependent(s), got {actual}")]
    DependentCountMismatch {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("dependent metric '{0}' is not in the metric dictionary")]
    UnknownDependentMetric(String),

    #[error("dependent dimension '{0}' is not in the dimension dictionary")]
    UnknownDependentDimension(String),
}

/// A named, constructed component that builds one kind of logical metric.
pub trait MetricMaker: Debug + Send + Sync {
    /// Short identifier used in logs and errors.
    fn kind(&self) -> &'static str;

    /// Number of dependent names `make` expects.
    fn dependent_count(&self) -> usize;

    /// Build the logical metric `name` from its dependents.
    ///
    /// Depending on the maker, dependents are physical field names, logical
    /// metric names, or dimension api names.
    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError>;
}

fn check_dependent_count(
    kind: &'static str,
    expected: usize,
    dependents: &[String],
) -> Result<(), MakerError> {
    if dependents.len() != expected {
        return Err(MakerError::DependentCountMismatch {
            kind,
            expected,
            actual: dependents.len(),
        });
    }
    Ok(())
}

fn check_metrics_exist(
    metrics: &MetricDictionary,
    dependents: &[String],
) -> Result<(), MakerError> {
    for dependent in dependents {
        if metrics.find_by_name(dependent).is_none() {
            return Err(MakerError::UnknownDependentMetric(dependent.clone()));
        }
    }
    Ok(())
}

/// Builds a plain row count.
#[derive(Debug)]
pub struct CountMaker;

impl MetricMaker for CountMaker {
    fn kind(&self) -> &'static str {
        "count"
    }

    fn dependent_count(&self) -> usize {
        0
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 0, dependents)?;
        Ok(LogicalMetric::new(name, MetricExpression::Count))
    }
}

/// Builds an integer sum over one physical field.
#[derive(Debug)]
pub struct LongSumMaker;

impl MetricMaker for LongSumMaker {
    fn kind(&self) -> &'static str {
        "longSum"
    }

    fn dependent_count(&self) -> usize {
        1
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 1, dependents)?;
        Ok(LogicalMetric::new(
            name,
            MetricExpression::LongSum {
                field: dependents[0].clone(),
            },
        ))
    }
}

/// Builds a floating-point sum over one physical field.
#[derive(Debug)]
pub struct DoubleSumMaker;

impl MetricMaker for DoubleSumMaker {
    fn kind(&self) -> &'static str {
        "doubleSum"
    }

    fn dependent_count(&self) -> usize {
        1
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 1, dependents)?;
        Ok(LogicalMetric::new(
            name,
            MetricExpression::DoubleSum {
                field: dependents[0].clone(),
            },
        ))
    }
}

/// Combines two or more existing logical metrics arithmetically.
#[derive(Debug)]
pub struct ArithmeticMaker {
    metrics: Arc<MetricDictionary>,
    function: ArithmeticFunction,
}

impl ArithmeticMaker {
    pub fn new(metrics: Arc<MetricDictionary>, function: ArithmeticFunction) -> Self {
        Self { metrics, function }
    }
}

impl MetricMaker for ArithmeticMaker {
    fn kind(&self) -> &'static str {
        "arithmetic"
    }

    fn dependent_count(&self) -> usize {
        2
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        // Operand count is a floor: plus/multiply chain beyond two operands.
        if dependents.len() < self.dependent_count() {
            return Err(MakerError::DependentCountMismatch {
                kind: self.kind(),
                expected: self.dependent_count(),
                actual: dependents.len(),
            });
        }
        check_metrics_exist(&self.metrics, dependents)?;
        Ok(LogicalMetric::new(
            name,
            MetricExpression::Arithmetic {
                function: self.function,
                operands: dependents.to_vec(),
            },
        ))
    }
}

/// Averages an existing logical metric re-aggregated at an inner grain.
#[derive(Debug)]
pub struct AggregationAverageMaker {
    metrics: Arc<MetricDictionary>,
    inner_grain: TimeGrain,
}

impl AggregationAverageMaker {
    pub fn new(metrics: Arc<MetricDictionary>, inner_grain: TimeGrain) -> Self {
        Self {
            metrics,
            inner_grain,
        }
    }
}

impl MetricMaker for AggregationAverageMaker {
    fn kind(&self) -> &'static str {
        "aggregationAverage"
    }

    fn dependent_count(&self) -> usize {
        1
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 1, dependents)?;
        check_metrics_exist(&self.metrics, dependents)?;
        Ok(LogicalMetric::new(
            name,
            MetricExpression::AggregationAverage {
                dependent: dependents[0].clone(),
                inner_grain: self.inner_grain,
            },
        ))
    }
}

/// Counts distinct value combinations across dimensions.
#[derive(Debug)]
pub struct CardinalityMaker {
    dimensions: Arc<DimensionDictionary>,
}

impl CardinalityMaker {
    pub fn new(dimensions: Arc<DimensionDictionary>) -> Self {
        Self { dimensions }
    }
}

impl MetricMaker for CardinalityMaker {
    fn kind(&self) -> &'static str {
        "cardinality"
    }

    fn dependent_count(&self) -> usize {
        1
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        // Dependents are dimension api names; at least one is required.
        if dependents.is_empty() {
            return Err(MakerError::DependentCountMismatch {
                kind: self.kind(),
                expected: self.dependent_count(),
                actual: 0,
            });
        }
        for dependent in dependents {
            if self.dimensions.find_by_api_name(dependent).is_none() {
                return Err(MakerError::UnknownDependentDimension(dependent.clone()));
            }
        }
        Ok(LogicalMetric::new(
            name,
            MetricExpression::Cardinality {
                dimensions: dependents.to_vec(),
            },
        ))
    }
}

/// Builds an approximate distinct-count sketch over one physical field.
#[derive(Debug)]
pub struct SketchCountMaker {
    sketch_size: i64,
}

impl SketchCountMaker {
    /// Default number of sketch entries when configuration names none.
    pub const DEFAULT_SKETCH_SIZE: i64 = 16384;

    pub fn new(sketch_size: i64) -> Self {
        Self { sketch_size }
    }
}

impl MetricMaker for SketchCountMaker {
    fn kind(&self) -> &'static str {
        "sketchCount"
    }

    fn dependent_count(&self) -> usize {
        1
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 1, dependents)?;
        Ok(LogicalMetric::new(
            name,
            MetricExpression::SketchCount {
                field: dependents[0].clone(),
                sketch_size: self.sketch_size,
            },
        ))
    }
}

/// Builds an approximate quantile over one physical field.
#[derive(Debug)]
pub struct QuantileMaker {
    fraction: f64,
}

impl QuantileMaker {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }
}

impl MetricMaker for QuantileMaker {
    fn kind(&self) -> &'static str {
        "quantile"
    }

    fn dependent_count(&self) -> usize {
        1
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 1, dependents)?;
        Ok(LogicalMetric::new(
            name,
            MetricExpression::Quantile {
                field: dependents[0].clone(),
                fraction: self.fraction,
            },
        ))
    }
}

/// Emits a parameter-free row-number metric.
#[derive(Debug)]
pub struct RowNumMaker;

impl MetricMaker for RowNumMaker {
    fn kind(&self) -> &'static str {
        "rowNum"
    }

    fn dependent_count(&self) -> usize {
        0
    }

    fn make(&self, name: &str, dependents: &[String]) -> Result<LogicalMetric, MakerError> {
        check_dependent_count(self.kind(), 0, dependents)?;
        Ok(LogicalMetric::new(name, MetricExpression::RowNum))
    }
}
