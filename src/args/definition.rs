//! Command-line argument definition and settings overrides.

use clap::Parser;
use eightchars::config::Settings;

/// Eight Characters - a terminal client for four-pillars birth charts
#[derive(Parser, Debug, Default)]
#[command(name = "eightchars")]
#[command(version)]
#[command(about = "A terminal client for four-pillars birth charts", long_about = None)]
pub struct Args {
    /// Base URL of the chart service (overrides `api_base_url` in settings.conf)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Interface language, `fi` or `en`; the choice is saved to settings.conf
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print location suggestions for a query and exit without starting the TUI
    #[arg(short, long, value_name = "QUERY")]
    pub suggest: Option<String>,

    /// Prefill the birth date, `YYYY-MM-DD`
    #[arg(long)]
    pub date: Option<String>,

    /// Prefill the birth time, `HH:MM`
    #[arg(long)]
    pub time: Option<String>,
}

impl Args {
    /// What: Apply session overrides from the command line to loaded settings.
    ///
    /// Inputs:
    /// - `settings`: Settings read from `settings.conf`
    ///
    /// Output:
    /// - `settings` with `--api-url` and `--lang` applied
    ///
    /// Details:
    /// - Blank overrides are ignored so `--api-url ""` keeps the configured service
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = self.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            tracing::info!(url, "service URL overridden from CLI");
            settings.api_base_url = url.to_string();
        }
        if let Some(lang) = self.lang.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            settings.language = lang.to_string();
        }
    }
}
