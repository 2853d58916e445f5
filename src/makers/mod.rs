//! Declarative construction of named metric makers.

mod dictionary;
mod maker;
mod template;

pub use dictionary::{
    maker_builders, MakerBuildError, MakerBuilder, MakerDictionary, MakerDictionaryError,
    ParamResolver,
};
pub use maker::{
    AggregationAverageMaker, ArithmeticMaker, CardinalityMaker, CountMaker, DoubleSumMaker,
    LongSumMaker, MakerError, MetricMaker, QuantileMaker, RowNumMaker, SketchCountMaker,
};
pub use template::MakerTemplate;
