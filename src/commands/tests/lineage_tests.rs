use std::io::Write;

use tempfile::NamedTempFile;

use crate::commands::config::{load_or_default, read_config, LineageFlowConfig};
use crate::commands::lineage::{query_builder, resolve_cutoff};
use crate::lineage_engine::query::{Direction, Granularity, TimeCutoff};

#[test]
fn test_resolve_cutoff_with_explicit_date_and_time() {
    let cutoff = resolve_cutoff(Some("2024-01-01"), Some("08:30:00")).unwrap();
    assert_eq!(cutoff.to_string(), "2024-01-01 08:30:00");
}

#[test]
fn test_resolve_cutoff_defaults_missing_time_to_now() {
    // Only the date part is pinned; the time half comes from the clock.
    let cutoff = resolve_cutoff(Some("2024-01-01"), None).unwrap();
    assert!(cutoff.to_string().starts_with("2024-01-01 "));
}

#[test]
fn test_resolve_cutoff_rejects_malformed_date() {
    assert!(resolve_cutoff(Some("tomorrow"), Some("08:30:00")).is_err());
}

#[test]
fn test_read_config_from_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "name: governance\nversion: \"2.0.0\"\nwarehouse: /tmp/warehouse.db\nschema: ANALYTICS.GOVERNANCE\nobject_table: OBJ_LINEAGE\nmax_depth: 12\n"
    )
    .unwrap();

    let config = read_config(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.name, "governance");
    assert_eq!(config.version, "2.0.0");
    assert_eq!(config.profile, "default");
    assert_eq!(config.warehouse.as_deref(), Some("/tmp/warehouse.db"));
    assert_eq!(config.schema.as_deref(), Some("ANALYTICS.GOVERNANCE"));
    assert_eq!(config.object_table, "OBJ_LINEAGE");
    assert_eq!(config.column_table, "LINEAGE_COLUMN");
    assert_eq!(config.max_depth, Some(12));
}

#[test]
fn test_read_config_missing_explicit_path_fails() {
    let result = read_config(Some("/nonexistent/lineageflow_project.yaml".into()));
    assert!(result.is_err());
}

#[test]
fn test_load_or_default_requires_explicit_path_to_exist() {
    let result = load_or_default(Some("/nonexistent/lineageflow_project.yaml".into()));
    assert!(result.is_err());
}

#[test]
fn test_query_builder_applies_config() {
    let config = LineageFlowConfig {
        schema: Some("ANALYTICS.GOVERNANCE".to_string()),
        object_table: "OBJ_LINEAGE".to_string(),
        max_depth: Some(12),
        ..LineageFlowConfig::default()
    };

    let builder = query_builder(&config, None);
    assert_eq!(
        builder.table_name(Granularity::Object),
        "ANALYTICS.GOVERNANCE.OBJ_LINEAGE"
    );
    assert_eq!(
        builder.table_name(Granularity::Column),
        "ANALYTICS.GOVERNANCE.LINEAGE_COLUMN"
    );
}

#[test]
fn test_command_line_depth_overrides_config() {
    let config = LineageFlowConfig {
        max_depth: Some(12),
        ..LineageFlowConfig::default()
    };

    let builder = query_builder(&config, Some(3));
    let sql = builder.build(
        Granularity::Object,
        "ORDERS",
        Direction::Forward,
        &TimeCutoff::parse("2024-01-01 00:00:00").unwrap(),
    );
    assert!(sql.contains("fl.level < 3"));
    assert!(!sql.contains("fl.level < 12"));
}
