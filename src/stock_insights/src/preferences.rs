//! Persisted UI preferences: display language and colour theme.
//!
//! Preferences live in a small TOML key/value file. Two keys are owned here,
//! [`LANGUAGE_KEY`] and [`THEME_KEY`]; any other keys in the file are left
//! untouched on save.
//!
//! Reading is forgiving. Legacy short language codes (`en`, `ar`) are
//! migrated to their long forms, and unknown values fall back to the
//! defaults. The migrated value reaches disk on the next save.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Serialize;
use thiserror::Error;
use toml::{Table, Value};
use tracing::{debug, warn};

pub const LANGUAGE_KEY: &str = "selectedLanguage";
pub const THEME_KEY: &str = "stock-insights-theme";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to read preferences from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preferences in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported language code {0:?} (expected en-GB or ar-EG)")]
    UnknownLanguage(String),

    #[error("unsupported theme {0:?} (expected light or dark)")]
    UnknownTheme(String),
}

/// Writing direction of a [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-GB")]
    EnglishGb,
    #[serde(rename = "ar-EG")]
    ArabicEg,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::EnglishGb, Language::ArabicEg];

    pub const fn code(self) -> &'static str {
        match self {
            Language::EnglishGb => "en-GB",
            Language::ArabicEg => "ar-EG",
        }
    }

    /// Native name, as shown in a language picker.
    pub const fn native_name(self) -> &'static str {
        match self {
            Language::EnglishGb => "English",
            Language::ArabicEg => "العربية",
        }
    }

    pub const fn direction(self) -> TextDirection {
        match self {
            Language::EnglishGb => TextDirection::Ltr,
            Language::ArabicEg => TextDirection::Rtl,
        }
    }

    /// Resolves a stored code, migrating legacy short codes.
    ///
    /// Returns the language and whether the stored code was a legacy one.
    pub fn from_stored(code: &str) -> Option<(Language, bool)> {
        let code = code.trim();
        if let Some(lang) = Language::ALL.into_iter().find(|l| l.code().eq_ignore_ascii_case(code)) {
            return Some((lang, false));
        }
        match code.to_ascii_lowercase().as_str() {
            "en" => Some((Language::EnglishGb, true)),
            "ar" => Some((Language::ArabicEg, true)),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PreferenceError;

    /// Accepts long codes and the legacy short ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_stored(s)
            .map(|(lang, _)| lang)
            .ok_or_else(|| PreferenceError::UnknownLanguage(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(PreferenceError::UnknownTheme(s.to_string())),
        }
    }
}

/// Preferences bound to a file on disk. Every setter persists immediately.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    /// The whole file, so unrelated keys survive a save.
    table: Table,
    language: Language,
    theme: Theme,
}

impl PreferenceStore {
    /// Reads preferences from `path`. A missing file yields the defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let table = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str::<Table>(&text).map_err(|source| PreferenceError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(source) => return Err(PreferenceError::Read { path, source }),
        };
        Ok(Self::from_table(path, table))
    }

    /// Like [`open`](Self::open), but an unreadable or corrupt file is
    /// replaced by the defaults on the next save.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(err) => {
                warn!(error = %err, "ignoring unusable preference file");
                Self::from_table(path, Table::new())
            }
        }
    }

    fn from_table(path: PathBuf, table: Table) -> Self {
        let stored = |key: &str| table.get(key).and_then(Value::as_str).map(str::to_owned);

        let language = match stored(LANGUAGE_KEY) {
            Some(code) => match Language::from_stored(&code) {
                Some((lang, migrated)) => {
                    if migrated {
                        debug!(from = %code, to = lang.code(), "migrating legacy language code");
                    }
                    lang
                }
                None => {
                    debug!(code = %code, "unknown language code, using default");
                    Language::default()
                }
            },
            None => Language::default(),
        };
        let theme = stored(THEME_KEY)
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();

        Self { path, table, language, theme }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), PreferenceError> {
        self.language = language;
        self.save()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PreferenceError> {
        self.theme = theme;
        self.save()
    }

    /// Flips the theme and persists it. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, PreferenceError> {
        self.set_theme(self.theme.toggled())?;
        Ok(self.theme)
    }

    /// Writes both preferences, creating parent directories as needed.
    pub fn save(&mut self) -> Result<(), PreferenceError> {
        self.table
            .insert(LANGUAGE_KEY.into(), Value::String(self.language.code().into()));
        self.table
            .insert(THEME_KEY.into(), Value::String(self.theme.as_str().into()));
        let text = toml::to_string(&self.table)?;

        let write_err = |source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, text).map_err(write_err)?;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes_migrate() {
        assert_eq!(Language::from_stored("en"), Some((Language::EnglishGb, true)));
        assert_eq!(Language::from_stored("ar"), Some((Language::ArabicEg, true)));
        assert_eq!(Language::from_stored("ar-EG"), Some((Language::ArabicEg, false)));
        assert_eq!(Language::from_stored("fr"), None);
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Language::ArabicEg.direction(), TextDirection::Rtl);
        assert_eq!(Language::EnglishGb.direction().as_str(), "ltr");
    }

    #[test]
    fn theme_parsing_and_toggle() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn unknown_stored_values_fall_back_to_defaults() {
        let mut table = Table::new();
        table.insert(LANGUAGE_KEY.into(), Value::String("de".into()));
        table.insert(THEME_KEY.into(), Value::String("neon".into()));
        let store = PreferenceStore::from_table(PathBuf::from("unused.toml"), table);
        assert_eq!(store.language(), Language::EnglishGb);
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn non_string_values_are_ignored() {
        let mut table = Table::new();
        table.insert(THEME_KEY.into(), Value::Integer(1));
        let store = PreferenceStore::from_table(PathBuf::from("unused.toml"), table);
        assert_eq!(store.theme(), Theme::Light);
    }
}
