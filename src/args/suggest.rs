//! Command-line location lookup (`--suggest`).

use eightchars::i18n::TextProvider;
use eightchars::net::{ChartApi, SearchRequest};
use eightchars::state::LocationSuggestion;

/// What: Format suggestions as printable lines.
///
/// Inputs:
/// - `items`: Suggestions in server order
/// - `text`: Text provider for the empty-result message
/// - `query`: Query as typed
///
/// Output:
/// - One `display  (timezone)` line per suggestion, or the localized "no matches" line
pub fn suggestion_lines(
    items: &[LocationSuggestion],
    text: &TextProvider,
    query: &str,
) -> Vec<String> {
    if items.is_empty() {
        return vec![text.t_vars("cli_no_suggestions", &[("query", query.to_string())])];
    }
    items
        .iter()
        .map(|s| format!("{}  ({})", s.display, s.timezone))
        .collect()
}

/// What: Run one location search for the command line.
///
/// Inputs:
/// - `api`: Chart service client
/// - `text`: Text provider for messages
/// - `query`: Free-text query
/// - `limit`: Maximum number of suggestions
///
/// Output:
/// - Lines to print on stdout
///
/// # Errors
/// - Localized message for stderr: the service detail when present, else `suggest_error`
pub async fn suggest(
    api: &dyn ChartApi,
    text: &TextProvider,
    query: &str,
    limit: u32,
) -> Result<Vec<String>, String> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(suggestion_lines(&[], text, query));
    }
    let req = SearchRequest {
        query: query.to_string(),
        limit,
    };
    match api.search(&req).await {
        Ok(items) => Ok(suggestion_lines(&items, text, query)),
        Err(e) => {
            tracing::error!(error = %e, query, "CLI location search failed");
            Err(e
                .detail()
                .map_or_else(|| text.t("suggest_error"), str::to_string))
        }
    }
}

/// What: Handle `--suggest` end to end.
///
/// Inputs:
/// - `api`: Chart service client
/// - `text`: Text provider in the session language
/// - `query`: Query from the command line
/// - `limit`: Suggestion limit from settings
///
/// Output:
/// - Process exit code: 0 after printing suggestions, 1 after printing an error
pub async fn handle_suggest(
    api: &dyn ChartApi,
    text: &TextProvider,
    query: &str,
    limit: u32,
) -> i32 {
    tracing::info!(query, "suggest mode requested from CLI");
    match suggest(api, text, query, limit).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            0
        }
        Err(message) => {
            eprintln!("{message}");
            1
        }
    }
}
