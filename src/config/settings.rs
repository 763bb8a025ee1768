use std::fs;
use std::path::Path;

use crate::i18n::Language;

/// Default service root when `api_base_url` is not configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
/// Default number of location suggestions requested per search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 8;
/// Default quiet period before a typed query is sent.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 180;

/// Content written when `settings.conf` does not exist yet.
pub const SETTINGS_SKELETON_CONTENT: &str = "\
# Eight Characters client settings
#
# Base URL of the chart service (no trailing slash)
api_base_url = http://127.0.0.1:8000
# Interface language: fi or en (empty = follow the system locale)
language =
# Number of city suggestions requested per search
search_limit = 8
# Quiet period in milliseconds before a typed city is searched
search_debounce_ms = 180
";

/// User-configurable settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the chart service.
    pub api_base_url: String,
    /// Persisted language choice; empty means "never chosen".
    pub language: String,
    /// Suggestion count requested per search.
    pub search_limit: u32,
    /// Debounce window for location search.
    pub search_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            language: String::new(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

/// Strip a trailing `#` or `//` comment from a value.
///
/// A comment marker only counts at the start of the value or after whitespace, so the
/// `//` of a URL scheme is kept.
fn strip_inline_comment(s: &str) -> &str {
    let s = s.trim();
    if s.starts_with('#') || s.starts_with("//") {
        return "";
    }
    let end = [" #", "\t#", " //", "\t//"]
        .iter()
        .filter_map(|marker| s.find(marker))
        .min()
        .unwrap_or(s.len());
    s[..end].trim()
}

/// Normalise a settings key: lowercase, `.`/`-`/space become `_`.
fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

impl Settings {
    /// Load settings from the default location, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&super::settings_path())
    }

    /// What: Load settings from an explicit file.
    ///
    /// Inputs:
    /// - `path`: Path to a `settings.conf`
    ///
    /// Output:
    /// - Parsed settings; missing file or unparsable values keep their defaults
    ///
    /// Details:
    /// - Lines starting with `#` or `//` are comments; inline comments are stripped
    /// - Unknown keys are ignored
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let mut out = Self::default();
        let Ok(content) = fs::read_to_string(path) else {
            return out;
        };
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
                continue;
            }
            let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
                continue;
            };
            let val = strip_inline_comment(raw_val);
            match normalize_key(raw_key).as_str() {
                "api_base_url" | "api_url" => {
                    if !val.is_empty() {
                        out.api_base_url = val.trim_end_matches('/').to_string();
                    }
                }
                "language" | "lang" => out.language = val.to_string(),
                "search_limit" => {
                    if let Ok(v) = val.parse::<u32>()
                        && v > 0
                    {
                        out.search_limit = v;
                    }
                }
                "search_debounce_ms" => {
                    if let Ok(v) = val.parse::<u64>() {
                        out.search_debounce_ms = v;
                    }
                }
                other => tracing::debug!(key = other, "ignoring unknown settings key"),
            }
        }
        out
    }
}

/// What: Persist the language choice into `settings.conf`.
///
/// Inputs:
/// - `path`: Settings file to update
/// - `language`: Language to record
///
/// Output:
/// - `Ok(())` on success, `Err(message)` when the file cannot be written
///
/// # Errors
/// - Returns `Err` when the parent directory cannot be created or the file cannot be written
///
/// Details:
/// - Replaces an existing `language` line in place, otherwise appends one
/// - Starts from the commented skeleton when the file is missing or empty
pub fn save_language(path: &Path, language: Language) -> Result<(), String> {
    save_string_key(path, "language", language.code())
}

/// Rewrite (or append) `key_norm = value` in the settings file at `path`.
fn save_string_key(path: &Path, key_norm: &str, value: &str) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    }

    let existing = fs::read_to_string(path).unwrap_or_default();
    let mut lines: Vec<String> = if existing.trim().is_empty() {
        SETTINGS_SKELETON_CONTENT
            .lines()
            .map(ToString::to_string)
            .collect()
    } else {
        existing.lines().map(ToString::to_string).collect()
    };

    let mut replaced = false;
    for line in &mut lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        if let Some((kraw, _)) = trimmed.split_once('=')
            && normalize_key(kraw) == key_norm
        {
            *line = format!("{key_norm} = {value}");
            replaced = true;
        }
    }
    if !replaced {
        lines.push(format!("{key_norm} = {value}"));
    }
    let mut new_content = lines.join("\n");
    new_content.push('\n');
    fs::write(path, new_content).map_err(|e| format!("cannot write {}: {e}", path.display()))
}
