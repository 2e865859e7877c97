// tests/config_test.rs
use git_semver_tag::config::{load_config, Config};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[tagger]
name = "CI"
email = "ci@example.com"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tagger.name, "CI");
    assert_eq!(config.tagger.email, "ci@example.com");
    assert_eq!(config.version.file, "VERSION");
}

#[test]
#[serial]
fn test_load_fixture() {
    let config = load_config(Some("tests/fixtures/semver-tag.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.tagger.name, "Release Bot");
    assert_eq!(config.version.file, "meta/VERSION");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = load_config(Some("/nonexistent/semver-tag.toml")).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tagger\nname = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("cannot parse"));
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("semver-tag.toml"),
        "[version]\nfile = \"RELEASE\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(temp_dir.path()).unwrap();
    let config = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    let config = config.unwrap();
    assert_eq!(config.version.file, "RELEASE");
    assert_eq!(config.tagger, Config::default().tagger);
}
