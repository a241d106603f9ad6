/// Tests for config module
#[cfg(test)]
mod tests {
    use crate::assemble::{ColumnGroup, RowGroup};
    use crate::cli::CliArgs;
    use crate::config::{TableJob, build_report_plan, parse_layout, validate_layout};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const LAYOUT: &str = r#"
input_dir = "raw"

[labels]
lognormal_symbol = "$\\mu_{log}$"

[labels.methods]
nparld = "nparLD (ATS)"

[[alpha_error_table]]
number = 7
caption = "Type I error"

[[alpha_error_table.row]]
label = "nparLD two-sided Period 1"
period = "period_1"
sources = ["nparld/pruritus/no_effect.json", "nparld/pain/no_effect.json"]

[[power_table]]
number = 1
caption = "Power, period 1"
period = "period_1"

[[power_table.segment]]
dir = "nparld"
columns = [
    ["pruritus/scenario_1/lnorm.json", "pruritus/scenario_1/norm.json"],
    ["pain/scenario_1/lnorm.json", "pain/scenario_1/norm.json"],
]
"#;

    fn args(layout: PathBuf) -> CliArgs {
        CliArgs {
            layout,
            input_dir: None,
            output_dir: PathBuf::from("results"),
            tables: vec![],
            no_preview: false,
            console_width: None,
        }
    }

    fn write_layout(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("report.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_layout() {
        let layout = parse_layout(LAYOUT).expect("layout parses");
        assert_eq!(layout.input_dir, Some(PathBuf::from("raw")));
        assert_eq!(layout.labels.lognormal_symbol, "$\\mu_{log}$");
        assert_eq!(layout.labels.normal_symbol, "mu_norm");
        assert_eq!(layout.power_tables[0].segments[0].columns.len(), 2);
        assert_eq!(layout.alpha_error_tables[0].rows[0].sources.len(), 2);
        assert!(validate_layout(&layout).is_ok());
    }

    #[test]
    fn test_plan_orders_tables_by_number() {
        let temp_dir = TempDir::new().unwrap();
        let layout = write_layout(temp_dir.path(), LAYOUT);

        let plan = build_report_plan(&args(layout)).expect("plan builds");
        assert_eq!(plan.input_dir, temp_dir.path().join("raw"));
        assert!(plan.preview);

        let numbers: Vec<u32> = plan.tables.iter().map(|t| t.number()).collect();
        assert_eq!(numbers, vec![1, 7]);

        match &plan.tables[0] {
            TableJob::Power { period, segments, .. } => {
                assert_eq!(period, "period_1");
                assert_eq!(segments[0].dir, Some(PathBuf::from("nparld")));
                assert_eq!(
                    segments[0].groups[1],
                    ColumnGroup::pair("pain/scenario_1/lnorm.json", "pain/scenario_1/norm.json")
                );
            }
            other => panic!("expected power table, got {:?}", other),
        }
        match &plan.tables[1] {
            TableJob::AlphaError { rows, caption, .. } => {
                assert_eq!(caption, "Type I error");
                assert_eq!(
                    rows[0],
                    RowGroup::new(
                        "nparLD two-sided Period 1",
                        "period_1",
                        ["nparld/pruritus/no_effect.json", "nparld/pain/no_effect.json"]
                    )
                );
            }
            other => panic!("expected alpha error table, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let layout = write_layout(temp_dir.path(), LAYOUT);

        let mut cli = args(layout);
        cli.input_dir = Some(PathBuf::from("/data/sim"));
        cli.tables = vec![7];
        cli.no_preview = true;

        let plan = build_report_plan(&cli).unwrap();
        assert_eq!(plan.input_dir, PathBuf::from("/data/sim"));
        assert_eq!(plan.tables.len(), 1);
        assert_eq!(plan.tables[0].kind(), "alpha_error");
        assert!(!plan.preview);
    }

    #[test]
    fn test_unknown_table_number() {
        let temp_dir = TempDir::new().unwrap();
        let mut cli = args(write_layout(temp_dir.path(), LAYOUT));
        cli.tables = vec![3];
        let err = build_report_plan(&cli).unwrap_err();
        assert!(err.contains("Table 3"), "unexpected error: {}", err);
    }

    #[test]
    fn test_duplicate_table_numbers_rejected() {
        let content = LAYOUT.replace("number = 7", "number = 1");
        let layout = parse_layout(&content).unwrap();
        let err = validate_layout(&layout).unwrap_err();
        assert!(err.contains("Table number 1"));
    }

    #[test]
    fn test_unknown_method_override_rejected() {
        let content = LAYOUT.replace("nparld = \"nparLD (ATS)\"", "wilcoxon = \"Wilcoxon\"");
        let layout = parse_layout(&content).unwrap();
        let err = validate_layout(&layout).unwrap_err();
        assert!(err.contains("wilcoxon"));
    }

    #[test]
    fn test_empty_layouts_rejected() {
        assert!(validate_layout(&parse_layout("").unwrap()).is_err());

        let no_rows = "[[alpha_error_table]]\nnumber = 2\n";
        assert!(validate_layout(&parse_layout(no_rows).unwrap()).unwrap_err().contains("no rows"));

        let no_columns = "[[power_table]]\nnumber = 1\nperiod = \"period_1\"\n[[power_table.segment]]\ncolumns = []\n";
        assert!(validate_layout(&parse_layout(no_columns).unwrap()).unwrap_err().contains("no columns"));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        assert!(parse_layout("[[power_table]]\nnumber = 1\nperiod = \"p\"\ncolour = \"red\"\n").is_err());
    }

    #[test]
    fn test_missing_layout_file() {
        let err = build_report_plan(&args(PathBuf::from("/nonexistent/report.toml"))).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }
}
