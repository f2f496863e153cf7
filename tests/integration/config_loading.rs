use fsdrill::config::{ConfigLoader, DrillConfig};
use fsdrill::ApiError;
use std::fs;

fn write(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

/// Environment variables are process-wide, so every layer is checked in one test.
#[test]
fn layered_sources_apply_in_order() {
    let xdg = tempfile::tempdir().unwrap();
    let global_dir = xdg.path().join("fsdrill");
    fs::create_dir_all(&global_dir).unwrap();
    write(
        &global_dir,
        "config.toml",
        "[timing]\nauto_advance_ms = 900\nfeedback_ttl_ms = 2500\n\n[curriculum]\nname = \"quick\"\n",
    );
    std::env::set_var("XDG_CONFIG_HOME", xdg.path());

    let config = ConfigLoader::load().unwrap();
    assert_eq!(config.timing.auto_advance_ms, 900);
    assert_eq!(config.timing.feedback_ttl_ms, 2500);
    assert_eq!(config.curriculum.name, "quick");
    assert_eq!(config.logging.level, "info");

    let explicit_dir = tempfile::tempdir().unwrap();
    let explicit = write(
        explicit_dir.path(),
        "drill.toml",
        "[timing]\nauto_advance_ms = 700\n\n[logging]\nlevel = \"debug\"\n",
    );
    let config = ConfigLoader::load_from_file(&explicit).unwrap();
    assert_eq!(config.timing.auto_advance_ms, 700);
    assert_eq!(config.timing.feedback_ttl_ms, 2500);
    assert_eq!(config.logging.level, "debug");

    std::env::set_var("FSDRILL__TIMING__AUTO_ADVANCE_MS", "400");
    let from_env = ConfigLoader::load_from_file(&explicit);
    std::env::remove_var("FSDRILL__TIMING__AUTO_ADVANCE_MS");
    std::env::remove_var("XDG_CONFIG_HOME");

    let config = from_env.unwrap();
    assert_eq!(config.timing.auto_advance_ms, 400);
    assert_eq!(config.timing.timings().auto_advance.as_millis(), 400);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::load_from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.toml", "[curriculum]\nname = \"expert\"\n");
    assert!(ConfigLoader::load_from_file(&path).is_err());

    let path = write(dir.path(), "zero.toml", "[timing]\nfeedback_ttl_ms = 0\n");
    assert!(ConfigLoader::load_from_file(&path).is_err());

    let path = write(dir.path(), "log.toml", "[logging]\noutput = \"syslog\"\n");
    assert!(ConfigLoader::load_from_file(&path).is_err());
}

#[test]
fn rendered_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DrillConfig::default();
    config.timing.feedback_ttl_ms = 4200;
    let rendered = ConfigLoader::render(&config).unwrap();
    let path = write(dir.path(), "rendered.toml", &rendered);

    let loaded = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(loaded.timing.feedback_ttl_ms, 4200);
}
