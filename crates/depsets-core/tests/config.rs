use depsets_core::config::{dirs_path, GlobalConfig};
use tempfile::TempDir;

#[test]
fn test_global_config_defaults() {
    let config = GlobalConfig::default();
    assert_eq!(config.catalog.file_name, "dependency-sets.toml");
    assert!(config.catalog.siblings);
    assert_eq!(config.graph.output, "target/dependency-sets.dot");
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert_eq!(config.catalog.file_name, "dependency-sets.toml");
    assert!(config.catalog.siblings);
}

#[test]
fn test_partial_sections() {
    let config: GlobalConfig = toml::from_str(
        r#"
[catalog]
siblings = false

[graph]
output = "docs/sets.dot"
"#,
    )
    .unwrap();
    assert!(!config.catalog.siblings);
    assert_eq!(config.catalog.file_name, "dependency-sets.toml");
    assert_eq!(config.graph.output, "docs/sets.dot");
}

#[test]
fn test_load_from_missing_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(config.catalog.siblings);
}

#[test]
fn test_load_from_invalid_file_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[catalog\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse global config"));
}

#[test]
fn test_dirs_path_ends_with_depsets() {
    assert!(dirs_path().ends_with(".depsets"));
}
