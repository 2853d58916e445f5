#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use strata::makers::{
        AggregationAverageMaker, ArithmeticMaker, CardinalityMaker, CountMaker, LongSumMaker,
        MakerError, MetricMaker, QuantileMaker, SketchCountMaker,
    };
    use strata::model::{
        ArithmeticFunction, Dimension, DimensionDictionary, LogicalMetric, MetricDictionary,
        MetricExpression, TimeGrain,
    };

    fn metric_dictionary_with(names: &[&str]) -> Arc<MetricDictionary> {
        let dictionary = MetricDictionary::new();
        for name in names {
            dictionary.add(Arc::new(LogicalMetric::new(*name, MetricExpression::Count)));
        }
        Arc::new(dictionary)
    }

    fn dimension_dictionary_with(names: &[&str]) -> Arc<DimensionDictionary> {
        let dictionary = DimensionDictionary::new();
        for name in names {
            dictionary.add(Arc::new(Dimension {
                api_name: name.to_string(),
                long_name: name.to_string(),
                category: String::new(),
                description: String::new(),
                fields: vec![],
                key_value_store: name.to_string(),
                search_provider: name.to_string(),
            }));
        }
        Arc::new(dictionary)
    }

    #[test]
    fn test_long_sum_maker_builds_a_sum_over_the_field() {
        let metric = LongSumMaker
            .make("added", &["added_raw".to_string()])
            .unwrap();
        assert_eq!(metric.name, "added");
        assert_eq!(
            metric.expression,
            MetricExpression::LongSum {
                field: "added_raw".to_string()
            }
        );
    }

    #[test]
    fn test_count_maker_rejects_dependents() {
        let result = CountMaker.make("rows", &["anything".to_string()]);
        assert!(matches!(
            result,
            Err(MakerError::DependentCountMismatch {
                expected: 0,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_arithmetic_maker_resolves_operands_against_the_dictionary() {
        let metrics = metric_dictionary_with(&["added", "deleted"]);
        let maker = ArithmeticMaker::new(Arc::clone(&metrics), ArithmeticFunction::Minus);

        let metric = maker
            .make("delta", &["added".to_string(), "deleted".to_string()])
            .unwrap();
        assert_eq!(
            metric.expression,
            MetricExpression::Arithmetic {
                function: ArithmeticFunction::Minus,
                operands: vec!["added".to_string(), "deleted".to_string()],
            }
        );
    }

    #[test]
    fn test_arithmetic_maker_rejects_unknown_operand() {
        let metrics = metric_dictionary_with(&["added"]);
        let maker = ArithmeticMaker::new(metrics, ArithmeticFunction::Plus);

        let result = maker.make("broken", &["added".to_string(), "missing".to_string()]);
        assert!(matches!(
            result,
            Err(MakerError::UnknownDependentMetric(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_arithmetic_maker_requires_two_operands() {
        let metrics = metric_dictionary_with(&["added"]);
        let maker = ArithmeticMaker::new(metrics, ArithmeticFunction::Plus);
        assert!(maker.make("broken", &["added".to_string()]).is_err());
    }

    #[test]
    fn test_aggregation_average_maker_carries_the_inner_grain() {
        let metrics = metric_dictionary_with(&["added"]);
        let maker = AggregationAverageMaker::new(metrics, TimeGrain::Day);

        let metric = maker.make("dailyAvgAdded", &["added".to_string()]).unwrap();
        assert_eq!(
            metric.expression,
            MetricExpression::AggregationAverage {
                dependent: "added".to_string(),
                inner_grain: TimeGrain::Day,
            }
        );
    }

    #[test]
    fn test_cardinality_maker_resolves_dimensions() {
        let dimensions = dimension_dictionary_with(&["country", "page"]);
        let maker = CardinalityMaker::new(dimensions);

        let metric = maker
            .make("uniqueCountries", &["country".to_string()])
            .unwrap();
        assert_eq!(
            metric.expression,
            MetricExpression::Cardinality {
                dimensions: vec!["country".to_string()]
            }
        );

        let unknown = maker.make("broken", &["user".to_string()]);
        assert!(matches!(
            unknown,
            Err(MakerError::UnknownDependentDimension(name)) if name == "user"
        ));
    }

    #[test]
    fn test_sketch_count_maker_carries_sketch_size() {
        let maker = SketchCountMaker::new(4096);
        let metric = maker.make("uniqueUsers", &["user_id".to_string()]).unwrap();
        assert_eq!(
            metric.expression,
            MetricExpression::SketchCount {
                field: "user_id".to_string(),
                sketch_size: 4096,
            }
        );
    }

    #[test]
    fn test_quantile_maker_carries_fraction() {
        let maker = QuantileMaker::new(0.95);
        let metric = maker.make("p95Latency", &["latency".to_string()]).unwrap();
        assert_eq!(
            metric.expression,
            MetricExpression::Quantile {
                field: "latency".to_string(),
                fraction: 0.95,
            }
        );
    }

    #[test]
    fn test_maker_kinds_are_stable_identifiers() {
        assert_eq!(CountMaker.kind(), "count");
        assert_eq!(LongSumMaker.kind(), "longSum");
        assert_eq!(SketchCountMaker::new(16).kind(), "sketchCount");
    }
}
