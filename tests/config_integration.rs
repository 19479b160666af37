use spektr::config::Config;
use spektr::console::SortMode;
use spektr::error::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn parse_complete_config_file() {
    let file = config_file(
        r#"
[scan]
threads = 4
max_depth = 8
exclude = [".git", "vendor"]
channel_capacity = 64

[strategies]
enabled = ["rust", "node", "python"]
disabled = ["python"]

[console]
default_sort = "path-asc"
page_size = 30
tick_rate_ms = 50
"#,
    );

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.scan.threads, 4);
    assert_eq!(config.scan.max_depth, Some(8));
    assert_eq!(config.scan.exclude, vec![".git", "vendor"]);
    assert_eq!(config.registry().ids(), vec!["node", "rust"]);
    assert_eq!(config.sort_mode(), SortMode::PathAsc);
    assert_eq!(config.console.page_size, 30);

    let options = config.scan_options();
    assert_eq!(options.channel_capacity, 64);
}

#[test]
fn parse_partial_config_uses_defaults() {
    let file = config_file("[console]\npage_size = 5\n");

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.console.page_size, 5);
    assert_eq!(config.console.tick_rate_ms, 100);
    assert_eq!(config.scan.threads, 0);
    assert_eq!(config.scan.exclude, vec![".git", "node_modules"]);
    assert_eq!(config.registry().len(), 8);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let file = config_file("[scan\nthreads = ");

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn invalid_values_are_rejected() {
    let file = config_file("[console]\ndefault_sort = \"newest\"\n");

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}
