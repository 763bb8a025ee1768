//! User locale detection from the process environment.

use std::env;

/// What: Detect the user's locale from environment variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` containing a normalised locale tag (e.g., "en-GB") or None
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in order; first parsable value wins
/// - Parses strings like "fi_FI.UTF-8" -> "fi-FI"
pub fn detect_system_locale() -> Option<String> {
    let locale_vars = ["LC_ALL", "LC_MESSAGES", "LANG"];

    for var_name in &locale_vars {
        if let Ok(locale_str) = env::var(var_name)
            && let Some(parsed) = parse_locale_string(&locale_str)
        {
            return Some(parsed);
        }
    }

    None
}

/// What: Parse a locale string from environment variables into a standardized tag.
///
/// Inputs:
/// - `locale_str`: Locale string like "fi_FI.UTF-8", "en-US", "en_GB.utf8", "C"
///
/// Output:
/// - `Option<String>` with standardized format (e.g., "fi-FI") or None if empty
///
/// Details:
/// - Converts underscores to hyphens
/// - Removes encoding suffix (.UTF-8) and modifier (@euro)
/// - Language part is lowercased, region part uppercased
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    let locale_part = trimmed.split(['.', '@']).next()?;
    if locale_part.is_empty() {
        return None;
    }

    let normalized = locale_part.replace('_', "-");
    let mut parts = normalized.split('-');
    let language = parts.next()?.to_lowercase();
    match parts.next() {
        Some(region) if !region.is_empty() => {
            Some(format!("{language}-{}", region.to_uppercase()))
        }
        _ => Some(language),
    }
}

/// What: Decide whether a locale tag names English.
///
/// Inputs:
/// - `locale`: Locale tag such as "en-US" or "fi-FI"
///
/// Output:
/// - `true` when the tag starts with `en` (case-insensitive)
#[must_use]
pub fn is_english_locale(locale: &str) -> bool {
    locale.trim().to_lowercase().starts_with("en")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_string() {
        assert_eq!(parse_locale_string("fi_FI.UTF-8"), Some("fi-FI".to_string()));
        assert_eq!(parse_locale_string("en_US.utf8"), Some("en-US".to_string()));
        assert_eq!(parse_locale_string("en-GB"), Some("en-GB".to_string()));
        assert_eq!(parse_locale_string("en"), Some("en".to_string()));
        assert_eq!(parse_locale_string("de_DE@euro"), Some("de-DE".to_string()));
        assert_eq!(parse_locale_string("C"), Some("c".to_string()));
        assert_eq!(parse_locale_string(""), None);
        assert_eq!(parse_locale_string("   "), None);
        assert_eq!(parse_locale_string(".UTF-8"), None);
    }

    #[test]
    fn test_is_english_locale() {
        assert!(is_english_locale("en-US"));
        assert!(is_english_locale("EN"));
        assert!(is_english_locale("en-GB"));
        assert!(!is_english_locale("fi-FI"));
        assert!(!is_english_locale("sv-FI"));
        assert!(!is_english_locale("c"));
        assert!(!is_english_locale(""));
    }

    #[test]
    fn test_detect_system_locale_with_env() {
        let _guard = crate::config::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let original_lang = env::var("LANG").ok();
        let original_lc_all = env::var("LC_ALL").ok();
        let original_lc_messages = env::var("LC_MESSAGES").ok();

        unsafe {
            env::set_var("LANG", "fi_FI.UTF-8");
            env::remove_var("LC_ALL");
            env::remove_var("LC_MESSAGES");
        }
        assert_eq!(detect_system_locale(), Some("fi-FI".to_string()));

        unsafe {
            env::set_var("LC_ALL", "en_GB.UTF-8");
        }
        assert_eq!(detect_system_locale(), Some("en-GB".to_string()));

        unsafe {
            env::remove_var("LC_ALL");
            env::remove_var("LC_MESSAGES");
            env::remove_var("LANG");
        }
        assert_eq!(detect_system_locale(), None);

        unsafe {
            for (name, value) in [
                ("LANG", original_lang),
                ("LC_ALL", original_lc_all),
                ("LC_MESSAGES", original_lc_messages),
            ] {
                if let Some(val) = value {
                    env::set_var(name, val);
                } else {
                    env::remove_var(name);
                }
            }
        }
    }
}
