/// Tests for power table assembly

#[cfg(test)]
mod tests {
    use crate::assemble::power::{ColumnGroup, assemble_power_table};
    use crate::error::TableError;
    use crate::labels::DisplayLabels;
    use crate::record::MemorySource;
    use crate::table::Key;
    use crate::types::RateValue;

    const LNORM: [&str; 3] = ["meanlog=0.2, sdlog=1", "meanlog=0.6, sdlog=1", "meanlog=0.9, sdlog=1"];
    const NORM: [&str; 3] = ["mean=2, sd=1", "mean=3, sd=1", "mean=4, sd=1"];

    /// A power record JSON document with one entry per (label, period_1 rate)
    fn power_json(method: &str, target: &str, scenario: u32, entries: &[(&str, &str)]) -> String {
        let power: Vec<String> = entries
            .iter()
            .map(|(label, rate)| format!(r#""{}": {{"rejection_rate": {{"period_1": {}}}}}"#, label, rate))
            .collect();
        format!(
            r#"{{"method": "{}", "target": "{}", "scenario": {}, "side": "two-sided", "power": {{{}}}}}"#,
            method,
            target,
            scenario,
            power.join(", ")
        )
    }

    fn family(labels: &[&'static str], rates: &[&'static str]) -> Vec<(&'static str, &'static str)> {
        labels.iter().copied().zip(rates.iter().copied()).collect()
    }

    /// Two columns (Pruritus and Pain, scenario 1) of nparLD
    fn two_column_source() -> (MemorySource, Vec<ColumnGroup>) {
        let rates = ["0.19482", "0.5", "0.7"];
        let source = MemorySource::new()
            .with("pru/lnorm", power_json("nparld", "Pruritus", 1, &family(&LNORM, &rates)))
            .with("pru/norm", power_json("nparld", "Pruritus", 1, &family(&NORM, &["0.31601", "0.8", "0.9"])))
            .with("pain/lnorm", power_json("nparld", "Pain", 1, &family(&LNORM, &["0.1", "0.2", "0.3"])))
            .with("pain/norm", power_json("nparld", "Pain", 1, &family(&NORM, &["0.4", "0.5", "0.6"])));
        let groups = vec![ColumnGroup::pair("pru/lnorm", "pru/norm"), ColumnGroup::pair("pain/lnorm", "pain/norm")];
        (source, groups)
    }

    #[test]
    fn test_end_to_end_values() {
        let (source, groups) = two_column_source();
        let table = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap();

        assert_eq!(table.period(), "period_1");
        assert_eq!(table.n_rows(), 6);
        assert_eq!(table.n_columns(), 2);

        let pruritus = Key::new(["nparLD", "Pruritus", "Scenario 1"]);
        assert_eq!(table.get(&Key::new(["mu_log", "0.2"]), &pruritus), Some(&RateValue::Float(0.1948)));
        assert_eq!(table.get(&Key::new(["mu_norm", "2"]), &pruritus), Some(&RateValue::Float(0.316)));
        let pain = Key::new(["nparLD", "Pain", "Scenario 1"]);
        assert_eq!(table.get(&Key::new(["mu_norm", "4"]), &pain), Some(&RateValue::Float(0.6)));
    }

    #[test]
    fn test_rows_follow_canonical_order() {
        // Normal record listed first, labels reversed within each record
        let rev_norm: Vec<&str> = NORM.iter().rev().copied().collect();
        let rev_lnorm: Vec<&str> = LNORM.iter().rev().copied().collect();
        let source = MemorySource::new()
            .with("norm", power_json("nparld", "Pain", 2, &family(&rev_norm, &["0.1", "0.2", "0.3"])))
            .with("lnorm", power_json("nparld", "Pain", 2, &family(&rev_lnorm, &["0.4", "0.5", "0.6"])));
        let groups = vec![ColumnGroup::new(["norm", "lnorm"])];

        let table = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap();
        let rows: Vec<String> = table.rows().iter().map(|k| k.to_string()).collect();
        assert_eq!(
            rows,
            vec!["mu_log / 0.2", "mu_log / 0.6", "mu_log / 0.9", "mu_norm / 2", "mu_norm / 3", "mu_norm / 4"]
        );
        // the "mean=4" rate was listed first
        let column = table.columns()[0].clone();
        assert_eq!(table.get(&Key::new(["mu_norm", "4"]), &column), Some(&RateValue::Float(0.1)));
    }

    #[test]
    fn test_columns_follow_group_order() {
        let (source, mut groups) = two_column_source();
        groups.reverse();
        let table = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap();
        assert_eq!(table.columns()[0], Key::new(["nparLD", "Pain", "Scenario 1"]));
        assert_eq!(table.columns()[1], Key::new(["nparLD", "Pruritus", "Scenario 1"]));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let (source, groups) = two_column_source();
        let labels = DisplayLabels::default();
        let first = assemble_power_table(&source, &groups, "period_1", &labels).unwrap();
        let second = assemble_power_table(&source, &groups, "period_1", &labels).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_label_order_mismatch_between_groups() {
        let swapped = ["mean=3, sd=1", "mean=2, sd=1", "mean=4, sd=1"];
        let source = MemorySource::new()
            .with("a/lnorm", power_json("nparld", "Pruritus", 1, &family(&LNORM, &["0.1", "0.2", "0.3"])))
            .with("a/norm", power_json("nparld", "Pruritus", 1, &family(&NORM, &["0.1", "0.2", "0.3"])))
            .with("b/lnorm", power_json("nparld", "Pain", 1, &family(&LNORM, &["0.1", "0.2", "0.3"])))
            .with("b/norm", power_json("nparld", "Pain", 1, &family(&swapped, &["0.1", "0.2", "0.3"])));
        let groups = vec![ColumnGroup::pair("a/lnorm", "a/norm"), ColumnGroup::pair("b/lnorm", "b/norm")];

        let err = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap_err();
        match err {
            TableError::RowLabelMismatch { group, expected, found } => {
                assert_eq!(group, 1);
                assert_eq!(expected[3], "mean=2, sd=1");
                assert_eq!(found[3], "mean=3, sd=1");
            }
            other => panic!("expected RowLabelMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_label_in_later_group() {
        let source = MemorySource::new()
            .with("a", power_json("nparld", "Pruritus", 1, &family(&NORM, &["0.1", "0.2", "0.3"])))
            .with("b", power_json("nparld", "Pain", 1, &family(&NORM[..2], &["0.1", "0.2"])));
        let groups = vec![ColumnGroup::new(["a"]), ColumnGroup::new(["b"])];
        let err = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap_err();
        assert!(matches!(err, TableError::RowLabelMismatch { group: 1, .. }));
    }

    #[test]
    fn test_scenario_disagreement_within_group() {
        let source = MemorySource::new()
            .with("lnorm", power_json("nparld", "Pain", 1, &family(&LNORM, &["0.1", "0.2", "0.3"])))
            .with("norm", power_json("nparld", "Pain", 2, &family(&NORM, &["0.1", "0.2", "0.3"])));
        let groups = vec![ColumnGroup::pair("lnorm", "norm")];

        let err = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap_err();
        assert_eq!(
            err,
            TableError::InconsistentColumnMetadata {
                group: 0,
                field: "scenario",
                first_source: "lnorm".to_string(),
                first: "1".to_string(),
                other_source: "norm".to_string(),
                other: "2".to_string(),
            }
        );
    }

    #[test]
    fn test_method_disagreement_within_group() {
        let source = MemorySource::new()
            .with("lnorm", power_json("nparld", "Pain", 1, &family(&LNORM, &["0.1", "0.2", "0.3"])))
            .with("norm", power_json("univariate-matched-gpc", "Pain", 1, &family(&NORM, &["0.1", "0.2", "0.3"])));
        let groups = vec![ColumnGroup::pair("lnorm", "norm")];
        let err = assemble_power_table(&source, &groups, "period_1", &DisplayLabels::default()).unwrap_err();
        assert!(matches!(err, TableError::InconsistentColumnMetadata { field: "method", .. }));
    }

    #[test]
    fn test_unknown_and_duplicate_labels() {
        let source = MemorySource::new()
            .with("odd", power_json("nparld", "Pain", 1, &[("mean=5, sd=1", "0.1")]))
            .with("n1", power_json("nparld", "Pain", 1, &[("mean=2, sd=1", "0.1")]))
            .with("n2", power_json("nparld", "Pain", 1, &[("mean=2, sd=1", "0.2")]));
        let labels = DisplayLabels::default();

        let err = assemble_power_table(&source, &[ColumnGroup::new(["odd"])], "period_1", &labels).unwrap_err();
        assert!(matches!(err, TableError::UnknownEffectLabel { ref label, .. } if label == "mean=5, sd=1"));

        let err = assemble_power_table(&source, &[ColumnGroup::new(["n1", "n2"])], "period_1", &labels).unwrap_err();
        assert!(matches!(err, TableError::DuplicateEffectLabel { group: 0, .. }));
    }

    #[test]
    fn test_missing_period_is_malformed() {
        let (source, groups) = two_column_source();
        let err = assemble_power_table(&source, &groups, "period_2", &DisplayLabels::default()).unwrap_err();
        match err {
            TableError::MalformedRecord { source_id, reason } => {
                assert_eq!(source_id, "pru/lnorm");
                assert!(reason.contains("period_2"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_alpha_record_in_power_group() {
        let alpha = r#"{"method": "nparld", "target": "Pain", "side": "two-sided",
            "alpha_error": {"rejection_rate": {"period_1": 0.05}}}"#;
        let source = MemorySource::new().with("alpha", alpha);
        let err = assemble_power_table(&source, &[ColumnGroup::new(["alpha"])], "period_1", &DisplayLabels::default())
            .unwrap_err();
        assert_eq!(err, TableError::malformed("alpha", "missing `scenario`"));
    }

    #[test]
    fn test_empty_layouts() {
        let source = MemorySource::new();
        let labels = DisplayLabels::default();
        let err = assemble_power_table(&source, &[], "period_1", &labels).unwrap_err();
        assert!(matches!(err, TableError::EmptyLayout { .. }));

        let groups = vec![ColumnGroup::new(Vec::<String>::new())];
        let err = assemble_power_table(&source, &groups, "period_1", &labels).unwrap_err();
        assert_eq!(err, TableError::EmptyLayout { what: "column group 0".to_string() });
    }

    #[test]
    fn test_placeholders_and_integers_survive() {
        let entries = [("mean=2, sd=1", "1"), ("mean=3, sd=1", "\"not applicable\"")];
        let source = MemorySource::new().with("n", power_json("prioritized-matched-gpc", "Pain", 3, &entries));
        let table = assemble_power_table(&source, &[ColumnGroup::new(["n"])], "period_1", &DisplayLabels::default())
            .unwrap();
        assert_eq!(table.cell(0, 0), Some(&RateValue::Integer(1)));
        assert_eq!(table.cell(1, 0), Some(&RateValue::Text("not applicable".to_string())));
        assert_eq!(table.columns()[0], Key::new(["prioritized matched GPC", "Pain", "Scenario 3"]));
    }
}
