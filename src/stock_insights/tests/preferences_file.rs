use std::{fs, path::Path, time::Duration};

use serial_test::serial;
use stock_insights::{
    config::{ClientConfig, ConfigError, DEFAULT_BASE_URL, ENV_API_URL, ENV_PREFS, ENV_TIMEOUT_SECS},
    preferences::{LANGUAGE_KEY, Language, PreferenceStore, THEME_KEY, Theme},
};
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults_and_save_creates_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.toml");

    let mut store = PreferenceStore::open(&path).unwrap();
    assert_eq!(store.language(), Language::EnglishGb);
    assert_eq!(store.theme(), Theme::Light);
    assert!(!path.exists());

    store.save().unwrap();
    let table: toml::Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(table.get(LANGUAGE_KEY).and_then(|v| v.as_str()), Some("en-GB"));
    assert_eq!(table.get(THEME_KEY).and_then(|v| v.as_str()), Some("light"));
}

#[test]
fn legacy_language_code_is_migrated_on_next_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "selectedLanguage = \"ar\"\n").unwrap();

    let mut store = PreferenceStore::open(&path).unwrap();
    assert_eq!(store.language(), Language::ArabicEg);

    store.set_theme(Theme::Dark).unwrap();
    let reopened = PreferenceStore::open(&path).unwrap();
    assert_eq!(reopened.language(), Language::ArabicEg);
    assert!(fs::read_to_string(&path).unwrap().contains("ar-EG"));
}

#[test]
fn theme_toggle_round_trips_through_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");

    let mut store = PreferenceStore::open(&path).unwrap();
    assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(PreferenceStore::open(&path).unwrap().theme(), Theme::Dark);

    let mut store = PreferenceStore::open(&path).unwrap();
    assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(PreferenceStore::open(&path).unwrap().theme(), Theme::Light);
}

#[test]
fn unrelated_keys_survive_a_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "favouriteSymbol = \"COMI\"\n").unwrap();

    let mut store = PreferenceStore::open(&path).unwrap();
    store.set_language(Language::ArabicEg).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("favouriteSymbol = \"COMI\""));
    assert!(text.contains("ar-EG"));
}

#[test]
fn corrupt_file_is_an_error_unless_opened_leniently() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "selectedLanguage = [unterminated").unwrap();

    assert!(PreferenceStore::open(&path).is_err());

    let mut store = PreferenceStore::open_or_default(&path);
    assert_eq!(store.theme(), Theme::Light);
    store.save().unwrap();
    assert!(PreferenceStore::open(&path).is_ok());
}

fn clear_env() {
    // SAFETY: every test touching these variables is #[serial].
    unsafe {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_TIMEOUT_SECS);
        std::env::remove_var(ENV_PREFS);
    }
}

#[test]
#[serial]
fn config_defaults_without_file_or_env() {
    clear_env();
    let config = ClientConfig::load(None).unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout(), None);
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let dir = tempdir().unwrap();
    let file = dir.path().join("client.toml");
    fs::write(
        &file,
        "base_url = \"http://file.example/api\"\ntimeout_secs = 30\n",
    )
    .unwrap();

    // SAFETY: serialized with the other env tests.
    unsafe {
        std::env::set_var(ENV_API_URL, "https://env.example/api/");
        std::env::set_var(ENV_PREFS, dir.path().join("p.toml"));
    }
    let config = ClientConfig::load(Some(file.as_path())).unwrap();
    clear_env();

    assert_eq!(config.base_url, "https://env.example/api");
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.preferences_path(), dir.path().join("p.toml"));
}

#[test]
#[serial]
fn invalid_timeout_env_is_rejected() {
    clear_env();
    // SAFETY: serialized with the other env tests.
    unsafe {
        std::env::set_var(ENV_TIMEOUT_SECS, "soon");
    }
    let result = ClientConfig::load(None);
    clear_env();

    assert!(matches!(result, Err(ConfigError::Env(_))));
}

#[test]
fn missing_config_file_is_a_read_error() {
    let err = ClientConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
