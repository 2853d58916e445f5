//! Builds named metric makers from configuration templates.
//!
//! The original system resolved maker classes reflectively and bound
//! constructor parameters by declared type and name at runtime. Here the
//! same dispatch is a static lookup table: each known maker kind maps to a
//! typed builder function, and [`ParamResolver`] carries the binding rules
//! (shared-dictionary injection, time-grain resolution, integer and float
//! parsing) that builders apply to their declared parameters.
//!
//! Per-template failures (unknown kind, missing or malformed parameter) are
//! logged and skipped so the rest of the dictionary still builds. A
//! duplicate maker name is different: it means two loaders are racing or
//! configuration is inconsistent, and it aborts the whole build.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::makers::maker::{
    AggregationAverageMaker, ArithmeticMaker, CardinalityMaker, CountMaker, DoubleSumMaker,
    LongSumMaker, MetricMaker, QuantileMaker, RowNumMaker, SketchCountMaker,
};
use crate::makers::template::MakerTemplate;
use crate::model::granularity::TimeGrain;
use crate::model::metric::ArithmeticFunction;
use crate::model::{DimensionDictionary, MetricDictionary};

/// Recoverable, per-template construction failure.
#[derive(Debug, thiserror::Error)]
pub enum MakerBuildError {
    #[error("no maker kind '{0}' is registered")]
    UnknownKind(String),

    #[error("maker '{maker}' is missing required parameter '{param}'")]
    MissingParameter { maker: String, param: String },

    #[error("maker '{maker}' parameter '{param}' has invalid value '{value}' (expected {expected})")]
    InvalidParameter {
        maker: String,
        param: String,
        value: String,
        expected: &'static str,
    },
}

/// Fatal dictionary-level failure; aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum MakerDictionaryError {
    #[error("maker '{0}' is already registered; duplicate loaders are running against one dictionary")]
    DuplicateMaker(String),
}

/// Resolves one template's declared parameters during construction.
///
/// Accessors mirror the binding rules in priority order: shared-dictionary
/// injection, then literal lookup by parameter name with typed parsing.
/// Required accessors fail the template when the literal is absent; the
/// `opt_*` variants are for parameters a maker explicitly defaults.
pub struct ParamResolver<'a> {
    template: &'a MakerTemplate,
    metrics: &'a Arc<MetricDictionary>,
    dimensions: &'a Arc<DimensionDictionary>,
}

impl<'a> ParamResolver<'a> {
    pub fn new(
        template: &'a MakerTemplate,
        metrics: &'a Arc<MetricDictionary>,
        dimensions: &'a Arc<DimensionDictionary>,
    ) -> Self {
        Self {
            template,
            metrics,
            dimensions,
        }
    }

    /// Inject the shared metric dictionary.
    pub fn metric_dictionary(&self) -> Arc<MetricDictionary> {
        Arc::clone(self.metrics)
    }

    /// Inject the shared dimension dictionary.
    pub fn dimension_dictionary(&self) -> Arc<DimensionDictionary> {
        Arc::clone(self.dimensions)
    }

    fn literal(&self, param: &str) -> Result<&str, MakerBuildError> {
        self.template
            .params
            .get(param)
            .map(String::as_str)
            .ok_or_else(|| MakerBuildError::MissingParameter {
                maker: self.template.name.clone(),
                param: param.to_string(),
            })
    }

    fn invalid(&self, param: &str, value: &str, expected: &'static str) -> MakerBuildError {
        MakerBuildError::InvalidParameter {
            maker: self.template.name.clone(),
            param: param.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// Resolve a literal against the known time grains.
    pub fn grain(&self, param: &str) -> Result<TimeGrain, MakerBuildError> {
        let value = self.literal(param)?;
        TimeGrain::from_name(value).ok_or_else(|| self.invalid(param, value, "a time grain"))
    }

    pub fn opt_grain(&self, param: &str) -> Result<Option<TimeGrain>, MakerBuildError> {
        match self.template.params.get(param) {
            None => Ok(None),
            Some(value) => TimeGrain::from_name(value)
                .map(Some)
                .ok_or_else(|| self.invalid(param, value, "a time grain")),
        }
    }

    /// Parse a literal as an integer.
    pub fn integer(&self, param: &str) -> Result<i64, MakerBuildError> {
        let value = self.literal(param)?;
        value
            .parse()
            .map_err(|_| self.invalid(param, value, "an integer"))
    }

    pub fn opt_integer(&self, param: &str) -> Result<Option<i64>, MakerBuildError> {
        match self.template.params.get(param) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(param, value, "an integer")),
        }
    }

    /// Parse a literal as a float.
    pub fn float(&self, param: &str) -> Result<f64, MakerBuildError> {
        let value = self.literal(param)?;
        value
            .parse()
            .map_err(|_| self.invalid(param, value, "a float"))
    }

    pub fn opt_float(&self, param: &str) -> Result<Option<f64>, MakerBuildError> {
        match self.template.params.get(param) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(param, value, "a float")),
        }
    }
}

/// Builds one maker from its resolved parameters.
pub type MakerBuilder = fn(&ParamResolver<'_>) -> Result<Arc<dyn MetricMaker>, MakerBuildError>;

/// The registry of known maker kinds.
///
/// This table is the statically-typed stand-in for resolving a class path:
/// each kind names a builder whose body declares, in order, the parameters
/// the maker's constructor takes.
pub fn maker_builders() -> IndexMap<&'static str, MakerBuilder> {
    let mut builders: IndexMap<&'static str, MakerBuilder> = IndexMap::new();
    builders.insert("count", |_| Ok(Arc::new(CountMaker)));
    builders.insert("longSum", |_| Ok(Arc::new(LongSumMaker)));
    builders.insert("doubleSum", |_| Ok(Arc::new(DoubleSumMaker)));
    builders.insert("rowNum", |_| Ok(Arc::new(RowNumMaker)));
    builders.insert("aggregationAverage", |resolver| {
        Ok(Arc::new(AggregationAverageMaker::new(
            resolver.metric_dictionary(),
            resolver.grain("innerGrain")?,
        )))
    });
    builders.insert("cardinality", |resolver| {
        Ok(Arc::new(CardinalityMaker::new(
            resolver.dimension_dictionary(),
        )))
    });
    builders.insert("sketchCount", |resolver| {
        let sketch_size = resolver
            .opt_integer("sketchSize")?
            .unwrap_or(SketchCountMaker::DEFAULT_SKETCH_SIZE);
        Ok(Arc::new(SketchCountMaker::new(sketch_size)))
    });
    builders.insert("quantile", |resolver| {
        Ok(Arc::new(QuantileMaker::new(resolver.float("fraction")?)))
    });
    builders.insert("arithmeticPlus", |resolver| {
        Ok(Arc::new(ArithmeticMaker::new(
            resolver.metric_dictionary(),
            ArithmeticFunction::Plus,
        )))
    });
    builders.insert("arithmeticMinus", |resolver| {
        Ok(Arc::new(ArithmeticMaker::new(
            resolver.metric_dictionary(),
            ArithmeticFunction::Minus,
        )))
    });
    builders.insert("arithmeticMultiply", |resolver| {
        Ok(Arc::new(ArithmeticMaker::new(
            resolver.metric_dictionary(),
            ArithmeticFunction::Multiply,
        )))
    });
    builders.insert("arithmeticDivide", |resolver| {
        Ok(Arc::new(ArithmeticMaker::new(
            resolver.metric_dictionary(),
            ArithmeticFunction::Divide,
        )))
    });
    builders
}

/// Maps lower-cased maker names to built maker instances.
///
/// Built once during a single synchronous initialization pass, read-only
/// afterwards. Registration is write-once per key.
#[derive(Debug, Default)]
pub struct MakerDictionary {
    name_to_maker: IndexMap<String, Arc<dyn MetricMaker>>,
}

impl MakerDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one maker per template and register it by name.
    ///
    /// Templates whose kind is unknown or whose parameters do not resolve
    /// are logged and skipped; the remaining templates still build. A
    /// duplicate name aborts the whole build.
    pub fn from_templates<I>(
        templates: I,
        metrics: &Arc<MetricDictionary>,
        dimensions: &Arc<DimensionDictionary>,
    ) -> Result<Self, MakerDictionaryError>
    where
        I: IntoIterator<Item = MakerTemplate>,
    {
        let builders = maker_builders();
        let mut dictionary = Self::new();

        for template in templates {
            let builder = match builders.get(template.kind.as_str()) {
                Some(builder) => builder,
                None => {
                    let error = MakerBuildError::UnknownKind(template.kind.clone());
                    warn!(maker = %template.name, %error, "skipping maker template");
                    continue;
                }
            };
            let resolver = ParamResolver::new(&template, metrics, dimensions);
            match builder(&resolver) {
                Ok(maker) => dictionary.add(&template.name, maker)?,
                Err(error) => {
                    warn!(maker = %template.name, %error, "skipping maker template");
                }
            }
        }

        Ok(dictionary)
    }

    /// Register a maker under a case-insensitive name, write-once.
    pub fn add(
        &mut self,
        name: &str,
        maker: Arc<dyn MetricMaker>,
    ) -> Result<(), MakerDictionaryError> {
        let key = name.to_lowercase();
        if self.name_to_maker.contains_key(&key) {
            return Err(MakerDictionaryError::DuplicateMaker(key));
        }
        self.name_to_maker.insert(key, maker);
        Ok(())
    }

    /// Case-insensitive lookup by registered name.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn MetricMaker>> {
        self.name_to_maker.get(&name.to_lowercase()).cloned()
    }

    /// Snapshot of all registered makers. An instance registered under
    /// several names appears once.
    pub fn find_all(&self) -> Vec<Arc<dyn MetricMaker>> {
        let mut makers: Vec<Arc<dyn MetricMaker>> = Vec::new();
        for maker in self.name_to_maker.values() {
            if !makers.iter().any(|seen| Arc::ptr_eq(seen, maker)) {
                makers.push(Arc::clone(maker));
            }
        }
        makers
    }

    pub fn len(&self) -> usize {
        self.name_to_maker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_maker.is_empty()
    }
}
