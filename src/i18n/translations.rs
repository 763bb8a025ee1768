//! Translation map, lookup and `{name}` interpolation utilities.

use std::collections::HashMap;

/// Translation map: flat key -> translated template.
pub type TranslationMap = HashMap<String, String>;

/// What: Look up a translation in the translation map.
///
/// Inputs:
/// - `key`: Flat key (e.g., "pick_city")
/// - `translations`: Translation map to search
///
/// Output:
/// - `Option<String>` containing translation or None if not found
#[must_use]
pub fn translate(key: &str, translations: &TranslationMap) -> Option<String> {
    translations.get(key).cloned()
}

/// What: Look up a translation with fallback to the fallback-language map.
///
/// Inputs:
/// - `key`: Flat key
/// - `translations`: Primary translation map
/// - `fallback_translations`: Fallback translation map (Finnish)
///
/// Output:
/// - Translated template (from primary or fallback, or key itself if both missing)
///
/// Details:
/// - Empty templates count as missing, so a blank entry never hides the fallback
/// - Returns key itself if neither has a translation (for debugging)
pub fn translate_with_fallback(
    key: &str,
    translations: &TranslationMap,
    fallback_translations: &TranslationMap,
) -> String {
    if let Some(translation) = translations.get(key).filter(|t| !t.is_empty()) {
        return translation.clone();
    }

    if let Some(translation) = fallback_translations.get(key).filter(|t| !t.is_empty()) {
        tracing::debug!(
            "Translation key '{}' not found in primary language, using fallback",
            key
        );
        return translation.clone();
    }

    tracing::debug!("Missing translation key: '{}'. Returning key as-is.", key);
    key.to_string()
}

/// What: Replace `{name}` tokens in a template with variable values.
///
/// Inputs:
/// - `template`: Template text, e.g. `"{city} ({timezone}) selected"`
/// - `vars`: Name/value pairs
///
/// Output:
/// - Interpolated string
///
/// Details:
/// - A token is `{` + one or more word characters + `}`
/// - Tokens with no matching variable become the empty string
/// - Braces that do not form a token are copied verbatim
#[must_use]
pub fn interpolate(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if name_len > 0 && after[name_len..].starts_with('}') {
            let name = &after[..name_len];
            if let Some((_, value)) = vars.iter().find(|(k, _)| *k == name) {
                out.push_str(value);
            }
            rest = &after[name_len + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
