#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use strata::makers::{
        MakerDictionary, MakerDictionaryError, MakerTemplate, MetricMaker, RowNumMaker,
    };
    use strata::model::{DimensionDictionary, MetricDictionary};

    fn dictionaries() -> (Arc<MetricDictionary>, Arc<DimensionDictionary>) {
        (
            Arc::new(MetricDictionary::new()),
            Arc::new(DimensionDictionary::new()),
        )
    }

    #[test]
    fn test_partial_success_when_one_kind_is_unknown() {
        let (metrics, dimensions) = dictionaries();
        let templates = vec![
            MakerTemplate::new("longSum", "longSum"),
            MakerTemplate::new("noSuchThing", "definitelyNotAMaker"),
            MakerTemplate::new("count", "count"),
        ];

        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.find_by_name("longSum").is_some());
        assert!(dictionary.find_by_name("count").is_some());
        assert!(dictionary.find_by_name("noSuchThing").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (metrics, dimensions) = dictionaries();
        let templates = vec![MakerTemplate::new("LongSum", "longSum")];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert!(dictionary.find_by_name("longsum").is_some());
        assert!(dictionary.find_by_name("LONGSUM").is_some());
        assert!(dictionary.find_by_name("LongSum").is_some());
    }

    #[test]
    fn test_duplicate_names_abort_the_build() {
        let (metrics, dimensions) = dictionaries();
        // Names differing only by case collide.
        let templates = vec![
            MakerTemplate::new("Foo", "longSum"),
            MakerTemplate::new("foo", "count"),
        ];

        let result = MakerDictionary::from_templates(templates, &metrics, &dimensions);
        assert!(matches!(
            result,
            Err(MakerDictionaryError::DuplicateMaker(name)) if name == "foo"
        ));
    }

    #[test]
    fn test_grain_parameter_binding() {
        let (metrics, dimensions) = dictionaries();
        let templates = vec![
            MakerTemplate::new("dailyAvg", "aggregationAverage").with_param("innerGrain", "DAY"),
        ];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        let maker = dictionary.find_by_name("dailyAvg").unwrap();
        assert_eq!(maker.kind(), "aggregationAverage");
    }

    #[test]
    fn test_integer_parameter_binding() {
        let (metrics, dimensions) = dictionaries();
        let templates =
            vec![MakerTemplate::new("sketch", "sketchCount").with_param("sketchSize", "5")];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert!(dictionary.find_by_name("sketch").is_some());
    }

    #[test]
    fn test_float_parameter_binding() {
        let (metrics, dimensions) = dictionaries();
        let templates =
            vec![MakerTemplate::new("p99", "quantile").with_param("fraction", "0.99")];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert!(dictionary.find_by_name("p99").is_some());
    }

    #[test]
    fn test_optional_parameter_falls_back_to_default() {
        let (metrics, dimensions) = dictionaries();
        // sketchSize is declared optional by its builder; omitting it builds
        // with the default size instead of failing the template.
        let templates = vec![MakerTemplate::new("sketch", "sketchCount")];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert!(dictionary.find_by_name("sketch").is_some());
    }

    #[test]
    fn test_missing_required_parameter_skips_the_template() {
        let (metrics, dimensions) = dictionaries();
        let templates = vec![
            MakerTemplate::new("dailyAvg", "aggregationAverage"), // no innerGrain
            MakerTemplate::new("count", "count"),
        ];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert!(dictionary.find_by_name("dailyAvg").is_none());
        assert!(dictionary.find_by_name("count").is_some());
    }

    #[test]
    fn test_malformed_parameter_skips_the_template() {
        let (metrics, dimensions) = dictionaries();
        let templates = vec![
            MakerTemplate::new("dailyAvg", "aggregationAverage")
                .with_param("innerGrain", "fortnight"),
            MakerTemplate::new("sketch", "sketchCount").with_param("sketchSize", "lots"),
            MakerTemplate::new("count", "count"),
        ];
        let dictionary =
            MakerDictionary::from_templates(templates, &metrics, &dimensions).unwrap();

        assert_eq!(dictionary.len(), 1);
        assert!(dictionary.find_by_name("count").is_some());
    }

    #[test]
    fn test_find_all_collapses_shared_instances() {
        let mut dictionary = MakerDictionary::new();
        let shared: Arc<dyn MetricMaker> = Arc::new(RowNumMaker);
        dictionary.add("first", Arc::clone(&shared)).unwrap();
        dictionary.add("second", shared).unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.find_all().len(), 1);
    }

    #[test]
    fn test_add_rejects_existing_name() {
        let mut dictionary = MakerDictionary::new();
        dictionary.add("rowNum", Arc::new(RowNumMaker)).unwrap();
        let result = dictionary.add("ROWNUM", Arc::new(RowNumMaker));
        assert!(result.is_err());
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_template_deserializes_from_json() {
        let json = r#"{
            "name": "dailyAvgAdded",
            "type": "aggregationAverage",
            "params": {"innerGrain": "day"}
        }"#;
        let template: MakerTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.name, "dailyAvgAdded");
        assert_eq!(template.kind, "aggregationAverage");
        assert_eq!(template.params.get("innerGrain").map(String::as_str), Some("day"));
    }
}
