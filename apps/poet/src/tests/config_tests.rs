use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_point_at_poetrydb() {
    let settings = settings_from_sources(None, no_env).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.base_url, "https://poetrydb.org");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let settings = settings_from_sources(
        Some("base_url = \"http://localhost:3000/\"\nlog_filter = \"debug\"\n"),
        no_env,
    )
    .expect("settings");
    assert_eq!(settings.base_url, "http://localhost:3000");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn env_overrides_file() {
    let vars: HashMap<&str, &str> = [("POET_BASE_URL", "http://mirror.test"), ("POET_LOG", "warn")]
        .into_iter()
        .collect();
    let settings = settings_from_sources(Some("base_url = \"http://localhost:3000\""), |key| {
        vars.get(key).map(|v| v.to_string())
    })
    .expect("settings");
    assert_eq!(settings.base_url, "http://mirror.test");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn invalid_file_is_an_error() {
    assert!(settings_from_sources(Some("base_url = ["), no_env).is_err());
}

#[test]
fn normalizes_blank_and_trailing_slash_base_urls() {
    assert_eq!(normalize_base_url("  "), "https://poetrydb.org");
    assert_eq!(
        normalize_base_url(" https://poetrydb.org/ "),
        "https://poetrydb.org"
    );
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("poet_missing_config_{suffix}.toml"));

    let settings = load_settings(&path).expect("settings");
    assert!(!settings.log_filter.is_empty());
}

#[test]
fn reads_config_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("poet_config_test_{suffix}.toml"));
    fs::write(&path, "log_filter = \"poet=trace\"\n").expect("write config");

    let settings = load_settings(&path);
    fs::remove_file(&path).expect("cleanup");

    // POET_LOG in the test environment would win over the file.
    if env::var("POET_LOG").is_err() {
        assert_eq!(settings.expect("settings").log_filter, "poet=trace");
    }
}
