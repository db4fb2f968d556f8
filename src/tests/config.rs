use super::Config;
use crate::error::Error;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_is_not_an_error() {
    let loaded = Config::load_from(Path::new("definitely/not/here.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "tab_width = 2").unwrap();

    let config = Config::load_from(file.path()).unwrap().unwrap();
    assert_eq!(config.tab_width, 2);
    assert_eq!(config.bullet_cycle, vec!["*", "-", "+"]);
    assert!(config.auto_switch_bullet);
    assert!(config.wide_chars);
}

#[test]
fn test_custom_bullets() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bullet_cycle = [\"-\", \"*\"]\nauto_switch_bullet = false").unwrap();

    let config = Config::load_from(file.path()).unwrap().unwrap();
    assert_eq!(config.bullet_cycle, vec!["-", "*"]);
    assert!(!config.auto_switch_bullet);
}

#[test]
fn test_malformed_file_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "tab_width = \"wide\"").unwrap();

    assert!(matches!(
        Config::load_from(file.path()),
        Err(Error::Config(_))
    ));
}
