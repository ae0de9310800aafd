use sitequote_core::{AppConfig, ConfigError};
use std::io::Write;
use std::time::Duration;

#[test]
fn load_without_path_returns_defaults() {
    let config = AppConfig::load(None).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.latency(), Duration::ZERO);
}

#[test]
fn load_reads_every_key_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "log_level = \"error\"\nlog_dir = {:?}\nseed_path = \"demo.json\"\nlatency_ms = 250",
        log_dir.to_str().unwrap()
    )
    .unwrap();

    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.log_level, "error");
    assert_eq!(config.log_dir.as_deref(), Some(log_dir.as_path()));
    assert_eq!(config.seed_path.as_deref(), Some(std::path::Path::new("demo.json")));
    assert_eq!(config.latency(), Duration::from_millis(250));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AppConfig::load(Some(std::path::Path::new("/nonexistent/sitequote.toml")))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn excessive_latency_and_bad_level_are_invalid() {
    let err = AppConfig::from_toml_str("latency_ms = 60000").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "latency_ms", .. }));

    let err = AppConfig::from_toml_str("log_level = \"loud\"").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "log_level", .. }));
}
