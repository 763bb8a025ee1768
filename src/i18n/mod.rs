//! Internationalization (i18n) module for the Eight Characters client.
//!
//! This module provides language detection, persistence, dictionary loading, and
//! translation lookup.
//!
//! # Overview
//!
//! - **Closed language set**: [`Language::Fi`] (the fallback) and [`Language::En`]
//! - **Language resolution**: persisted choice -> user locale (`LC_ALL`, `LC_MESSAGES`,
//!   `LANG`) -> fallback. English-prefixed locales map to English, everything else to Finnish
//! - **Fallback chain**: requested language -> Finnish -> the raw key; lookup never fails
//! - **Interpolation**: `{name}` tokens are replaced with supplied values, missing values
//!   become empty strings
//!
//! # Dictionaries
//!
//! `config/locales/{fi,en}.yml` are embedded at build time. A locales directory found in the
//! development tree or under `/usr/share/eightchars/locales` may override individual keys.
//!
//! # Usage
//!
//! ```rust
//! use eightchars::i18n::{Language, TextProvider};
//!
//! let text = TextProvider::embedded(Language::En);
//! assert_eq!(text.t("missing_key"), "missing_key");
//! let vars = [("city", "Helsinki".to_string()), ("timezone", "Europe/Helsinki".to_string())];
//! assert_eq!(text.t_vars("selected_city", &vars), "Helsinki (Europe/Helsinki) selected");
//! ```

mod detection;
mod loader;
pub mod translations;

pub use detection::{detect_system_locale, is_english_locale};
pub use loader::{load_dictionaries, load_locale_file};
pub use translations::{TranslationMap, interpolate, translate, translate_with_fallback};

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Supported UI languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Finnish; also the fallback language.
    #[default]
    Fi,
    /// English.
    En,
}

impl Language {
    /// Every supported language, in switcher order.
    pub const ALL: [Self; 2] = [Self::Fi, Self::En];

    /// Language used when a key or a language value is unknown.
    pub const FALLBACK: Self = Self::Fi;

    /// What: Normalise arbitrary input to the closed language set.
    ///
    /// Inputs:
    /// - `value`: Raw language value (settings file, CLI flag, switcher)
    ///
    /// Output:
    /// - `En` for "en" (case-insensitive, trimmed), otherwise the fallback
    #[must_use]
    pub fn normalize(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("en") {
            Self::En
        } else {
            Self::FALLBACK
        }
    }

    /// Two-letter code used on the wire and in `settings.conf`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fi => "fi",
            Self::En => "en",
        }
    }

    /// The other language of the pair.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Fi => Self::En,
            Self::En => Self::Fi,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What: Resolve the start-up language.
///
/// Inputs:
/// - `saved`: Persisted `language` value from `settings.conf` (empty = never chosen)
///
/// Output:
/// - The language to use for this session
///
/// Details:
/// - An explicit prior choice wins and is normalised
/// - Otherwise the user locale decides: `en*` -> English, anything else (or no locale) ->
///   the fallback language
#[must_use]
pub fn resolve_language(saved: &str) -> Language {
    if !saved.trim().is_empty() {
        return Language::normalize(saved);
    }
    match detect_system_locale() {
        Some(locale) if is_english_locale(&locale) => Language::En,
        Some(locale) => {
            tracing::debug!(locale = %locale, "non-English locale, using fallback language");
            Language::FALLBACK
        }
        None => Language::FALLBACK,
    }
}

/// What: Find the locales override directory in development and installed locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing locales directory found, or `None`
///
/// Details:
/// - Tries `CARGO_MANIFEST_DIR/config/locales` first, then `/usr/share/eightchars/locales`
#[must_use]
pub fn find_locales_dir() -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("locales");
    if dev_path.is_dir() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from("/usr/share/eightchars/locales");
    if installed_path.is_dir() {
        return Some(installed_path);
    }

    None
}

/// Resolves keys to localized strings and owns the active language.
///
/// The provider is owned by [`crate::state::AppState`]; only [`TextProvider::set_language`]
/// changes the language, and it persists the choice when a settings path is configured.
#[derive(Debug, Clone)]
pub struct TextProvider {
    /// Dictionary per language.
    dictionaries: HashMap<Language, TranslationMap>,
    /// Currently active language.
    language: Language,
    /// Where the language choice is persisted; `None` disables persistence.
    settings_path: Option<PathBuf>,
}

impl TextProvider {
    /// What: Create a provider from loaded dictionaries.
    ///
    /// Inputs:
    /// - `dictionaries`: Map of language -> translations
    /// - `language`: Initial language (already resolved)
    /// - `settings_path`: Settings file to persist language changes into
    #[must_use]
    pub const fn new(
        dictionaries: HashMap<Language, TranslationMap>,
        language: Language,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            dictionaries,
            language,
            settings_path,
        }
    }

    /// Provider over the embedded dictionaries with persistence disabled.
    #[must_use]
    pub fn embedded(language: Language) -> Self {
        Self::new(load_dictionaries(None), language, None)
    }

    /// The active language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// What: Switch the active language and persist the choice.
    ///
    /// Inputs:
    /// - `value`: Raw language value; unrecognised values normalise to the fallback
    ///
    /// Output:
    /// - The normalised language now active
    ///
    /// Details:
    /// - Persistence failures are logged; the in-memory switch always happens
    pub fn set_language(&mut self, value: &str) -> Language {
        let normalized = Language::normalize(value);
        if normalized != self.language {
            tracing::info!(from = %self.language, to = %normalized, "language switched");
        }
        self.language = normalized;
        if let Some(path) = &self.settings_path
            && let Err(e) = crate::config::save_language(path, normalized)
        {
            tracing::warn!(error = %e, path = %path.display(), "failed to persist language");
        }
        normalized
    }

    /// What: Translate `key` with variables in a specific (or the active) language.
    ///
    /// Inputs:
    /// - `key`: Dictionary key
    /// - `vars`: `{name}` substitutions
    /// - `language`: Language to use; `None` means the active language
    ///
    /// Output:
    /// - Localized string, the fallback-language string, or the key itself
    #[must_use]
    pub fn translate(&self, key: &str, vars: &[(&str, String)], language: Option<Language>) -> String {
        let lang = language.unwrap_or(self.language);
        let empty = TranslationMap::new();
        let primary = self.dictionaries.get(&lang).unwrap_or(&empty);
        let fallback = self
            .dictionaries
            .get(&Language::FALLBACK)
            .unwrap_or(&empty);
        let template = translate_with_fallback(key, primary, fallback);
        interpolate(&template, vars)
    }

    /// Translate `key` in the active language without variables.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translate(key, &[], None)
    }

    /// Translate `key` in the active language with `{name}` variables.
    #[must_use]
    pub fn t_vars(&self, key: &str, vars: &[(&str, String)]) -> String {
        self.translate(key, vars, None)
    }
}
