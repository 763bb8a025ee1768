//! Eight Characters binary entrypoint kept minimal. The full runtime lives in `app`.

mod args;

use std::fmt;
use std::sync::{Arc, OnceLock};

use clap::Parser;
use eightchars::app::{self, RunOptions};
use eightchars::config::{Settings, logs_dir, save_language, settings_path};
use eightchars::i18n::{TextProvider, find_locales_dir, load_dictionaries, resolve_language};
use eightchars::net::{ChartApi, HttpChartApi};

struct EightcharsTimer;

impl tracing_subscriber::fmt::time::FormatTime for EightcharsTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the log filter.
///
/// Inputs:
/// - `level`: Level chosen on the command line
///
/// Output:
/// - `RUST_LOG` when set and valid, otherwise `level`
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// Initialize tracing writing to `~/.config/eightchars/logs/eightchars.log`.
fn init_logging(level: &str) {
    let mut log_path = logs_dir();
    log_path.push("eightchars.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(EightcharsTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: init stderr logger to avoid blocking startup
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(EightcharsTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let path = settings_path();
    let mut settings = Settings::load_from(&path);
    args.apply_overrides(&mut settings);
    let language = resolve_language(&settings.language);
    if args.lang.is_some()
        && let Err(e) = save_language(&path, language)
    {
        tracing::warn!(error = %e, path = %path.display(), "failed to persist --lang");
    }
    tracing::info!(lang = %language, api = %settings.api_base_url, "Eight Characters starting");

    if let Some(query) = &args.suggest {
        let api: Arc<dyn ChartApi> = Arc::new(HttpChartApi::new(&settings.api_base_url));
        let text = TextProvider::new(
            load_dictionaries(find_locales_dir().as_deref()),
            language,
            None,
        );
        let code = args::handle_suggest(api.as_ref(), &text, query, settings.search_limit).await;
        std::process::exit(code);
    }

    let options = RunOptions {
        settings,
        language,
        settings_path: Some(path),
        date: args.date.clone(),
        time: args.time.clone(),
    };
    if let Err(err) = app::run(options).await {
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("Eight Characters exited");
}

#[cfg(test)]
mod tests {
    /// What: `FormatTime` impl writes a `YYYY-MM-DD-T HH:MM:SS` timestamp
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer holds a 21-character stamp with `-T ` after the date
    #[test]
    fn eightchars_timer_formats_time() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::EightcharsTimer;
        t.format_time(&mut writer).expect("timestamp written");
        assert_eq!(buf.len(), 21);
        assert_eq!(&buf[10..13], "-T ");
    }

    #[test]
    fn env_filter_accepts_cli_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let _ = super::env_filter(level);
        }
    }
}
