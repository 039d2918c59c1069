//! Settings persisted as TOML and edited by name.

use chewing_core::{CapsLockSync, Config, ConfigError, LogLevel, SettingValue, SETTINGS};

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chewing.toml");

    let mut config = Config::default();
    config.set("selKeys", "asdfghjkl;").unwrap();
    config.set("candPerPage", "8").unwrap();
    config.set("syncCapsLock", "ime").unwrap();
    config.set("forceLowercaseEnglish", "TRUE").unwrap();
    config.log_level = LogLevel::Info;
    config.save_toml(&path).unwrap();

    let loaded = Config::load_toml(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.sync_caps_lock, CapsLockSync::Ime);
    assert_eq!(loaded.get("candPerPage"), Some(SettingValue::Int(8)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_toml(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "cand_per_page = \"ten\"\n").unwrap();
    assert!(matches!(Config::load_toml(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_out_of_range_value() {
    let err = Config::from_toml_str("cand_per_page = 3\n").unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
}

#[test]
fn test_every_setting_survives_text_round_trip() {
    let config = Config::default();
    let mut copy = Config::default();
    for spec in SETTINGS {
        let text = config.get(spec.key).unwrap().to_string();
        copy.set(spec.key, &text).unwrap();
    }
    assert_eq!(copy, config);
}

#[test]
fn test_bool_false_written_as_text_reads_false() {
    let mut config = Config::default();
    config.set("easySymbolInput", "false").unwrap();
    assert_eq!(config.get("easySymbolInput").unwrap().to_string(), "0");
    assert!(!config.easy_symbol_input);
}
