//! Locale file loading and parsing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::i18n::Language;
use crate::i18n::translations::TranslationMap;

/// Finnish dictionary compiled into the binary.
const EMBEDDED_FI: &str = include_str!("../../config/locales/fi.yml");
/// English dictionary compiled into the binary.
const EMBEDDED_EN: &str = include_str!("../../config/locales/en.yml");

/// What: Load a locale YAML file and parse it into a `TranslationMap`.
///
/// Inputs:
/// - `language`: Language whose file should be read
/// - `locales_dir`: Path to locales directory
///
/// Output:
/// - `Result<TranslationMap, String>` containing translations or error
///
/// # Errors
/// - Returns `Err` when the locale file does not exist in the locales directory
/// - Returns `Err` when the locale file cannot be read (I/O error)
/// - Returns `Err` when the locale file is empty
/// - Returns `Err` when the YAML content cannot be parsed
///
/// Details:
/// - Loads file from `locales_dir/{code}.yml` (e.g. `fi.yml`)
pub fn load_locale_file(language: Language, locales_dir: &Path) -> Result<TranslationMap, String> {
    let file_path = locales_dir.join(format!("{}.yml", language.code()));

    if !file_path.exists() {
        return Err(format!("Locale file not found: {}", file_path.display()));
    }

    let contents = fs::read_to_string(&file_path)
        .map_err(|e| format!("Failed to read locale file {}: {e}", file_path.display()))?;

    if contents.trim().is_empty() {
        return Err(format!("Locale file is empty: {}", file_path.display()));
    }

    parse_locale_yaml(&contents).map_err(|e| {
        format!(
            "Failed to parse locale file {}: {}. Please check YAML syntax.",
            file_path.display(),
            e
        )
    })
}

/// What: Parse YAML content into a `TranslationMap`.
///
/// Inputs:
/// - `yaml_content`: YAML file content as string
///
/// Output:
/// - `Result<TranslationMap, String>` containing parsed translations
///
/// Details:
/// - Expects a top-level key naming the language (e.g., "fi:")
/// - Flattens nested structure below it into dot-notation keys
pub(crate) fn parse_locale_yaml(yaml_content: &str) -> Result<TranslationMap, String> {
    let doc: serde_norway::Value =
        serde_norway::from_str(yaml_content).map_err(|e| format!("Failed to parse YAML: {e}"))?;

    let mut translations = HashMap::new();

    if let Some(locale_obj) = doc.as_mapping() {
        for (_locale_key, locale_value) in locale_obj {
            flatten_yaml_value(locale_value, "", &mut translations);
        }
    }

    Ok(translations)
}

/// What: Recursively flatten YAML structure into dot-notation keys.
///
/// Inputs:
/// - `value`: Current YAML value
/// - `prefix`: Current key prefix
/// - `translations`: Map to populate
fn flatten_yaml_value(
    value: &serde_norway::Value,
    prefix: &str,
    translations: &mut TranslationMap,
) {
    match value {
        serde_norway::Value::Mapping(map) => {
            for (key, val) in map {
                if let Some(key_str) = key.as_str() {
                    let new_prefix = if prefix.is_empty() {
                        key_str.to_string()
                    } else {
                        format!("{prefix}.{key_str}")
                    };
                    flatten_yaml_value(val, &new_prefix, translations);
                }
            }
        }
        serde_norway::Value::String(s) => {
            translations.insert(prefix.to_string(), s.clone());
        }
        serde_norway::Value::Number(n) => {
            translations.insert(prefix.to_string(), n.to_string());
        }
        serde_norway::Value::Bool(b) => {
            translations.insert(prefix.to_string(), b.to_string());
        }
        _ => {}
    }
}

/// What: Build the dictionaries for every supported language.
///
/// Inputs:
/// - `locales_dir`: Optional directory with `fi.yml` / `en.yml` overrides
///
/// Output:
/// - Map from language to its translation map
///
/// Details:
/// - Embedded dictionaries are always loaded first so lookup never starts empty
/// - Keys found in an override file replace the embedded ones; a broken override is
///   logged and ignored
#[must_use]
pub fn load_dictionaries(locales_dir: Option<&Path>) -> HashMap<Language, TranslationMap> {
    let mut out = HashMap::new();
    for language in Language::ALL {
        let embedded = match language {
            Language::Fi => EMBEDDED_FI,
            Language::En => EMBEDDED_EN,
        };
        let mut map = parse_locale_yaml(embedded).unwrap_or_else(|e| {
            tracing::error!(language = language.code(), error = %e, "embedded dictionary is invalid");
            TranslationMap::new()
        });
        if let Some(dir) = locales_dir {
            match load_locale_file(language, dir) {
                Ok(overrides) => {
                    tracing::debug!(
                        "Loaded {} override keys for '{}' from {}",
                        overrides.len(),
                        language.code(),
                        dir.display()
                    );
                    map.extend(overrides);
                }
                Err(e) => tracing::debug!("No locale override for '{}': {}", language.code(), e),
            }
        }
        out.insert(language, map);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_locale_yaml() {
        let yaml = r#"
fi:
  back: "← Takaisin"
  chart:
    title: "Kartta"
"#;
        let result = parse_locale_yaml(yaml).expect("Failed to parse test locale YAML");
        assert_eq!(result.get("back"), Some(&"← Takaisin".to_string()));
        assert_eq!(result.get("chart.title"), Some(&"Kartta".to_string()));
    }

    #[test]
    fn test_parse_locale_yaml_invalid() {
        let yaml = "invalid: yaml: content: [";
        assert!(parse_locale_yaml(yaml).is_err());
    }

    #[test]
    /// What: Ensure both embedded dictionaries parse and carry the same key set.
    ///
    /// Inputs:
    /// - Embedded `fi.yml` and `en.yml`
    ///
    /// Output:
    /// - Both maps are non-empty and every Finnish key exists in English
    fn embedded_dictionaries_are_complete() {
        let dicts = load_dictionaries(None);
        let fi = &dicts[&Language::Fi];
        let en = &dicts[&Language::En];
        assert!(fi.contains_key("selected_city"));
        assert!(fi.contains_key("need_location"));
        for key in fi.keys() {
            assert!(en.contains_key(key), "English dictionary lacks '{key}'");
        }
        assert_eq!(en.get("back"), Some(&"← Back".to_string()));
    }

    #[test]
    fn test_load_locale_file_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let result = load_locale_file(Language::En, temp_dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not found"));
    }

    #[test]
    fn test_load_locale_file_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        fs::write(temp_dir.path().join("fi.yml"), "").expect("Failed to write empty locale");
        let result = load_locale_file(Language::Fi, temp_dir.path());
        assert!(result.unwrap_err().contains("empty"));
    }

    #[test]
    /// What: Verify override files replace individual embedded keys only.
    ///
    /// Inputs:
    /// - Temp locales dir containing `en.yml` with a custom `back` label
    ///
    /// Output:
    /// - `back` is overridden while other embedded keys survive
    fn overrides_merge_over_embedded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        fs::write(temp_dir.path().join("en.yml"), "en:\n  back: \"Return\"\n")
            .expect("Failed to write override locale");
        let dicts = load_dictionaries(Some(temp_dir.path()));
        let en = &dicts[&Language::En];
        assert_eq!(en.get("back"), Some(&"Return".to_string()));
        assert!(en.contains_key("pick_city"));
        assert_eq!(
            dicts[&Language::Fi].get("back"),
            Some(&"← Takaisin".to_string())
        );
    }
}
