use std::path::PathBuf;
use std::sync::Arc;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Settings;
use crate::i18n::{Language, TextProvider, find_locales_dir, load_dictionaries};
use crate::logic::ChartPipeline;
use crate::net::{ChartApi, HttpChartApi};
use crate::state::AppState;

use super::terminal::{restore_terminal, setup_terminal};

mod channels;
mod event_loop;
mod handlers;
mod workers;

use channels::Channels;
use event_loop::run_event_loop;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Environment variable that skips terminal setup and the input thread (used by smoke tests).
pub const HEADLESS_ENV: &str = "EIGHTCHARS_TEST_HEADLESS";

/// Everything the runtime needs from configuration and the command line.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Effective settings (file values with CLI overrides applied).
    pub settings: Settings,
    /// Start-up language.
    pub language: Language,
    /// Where a language switch is persisted; `None` keeps it in memory only.
    pub settings_path: Option<PathBuf>,
    /// Date to prefill, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Time to prefill, `HH:MM`.
    pub time: Option<String>,
}

/// What: Build the initial `AppState` from the run options.
///
/// Inputs:
/// - `options`: Resolved start-up options
///
/// Output:
/// - State on the input view with dictionaries loaded and prefilled fields
fn initialize_app_state(options: &RunOptions) -> AppState {
    let locales_dir = find_locales_dir();
    tracing::debug!(locales = ?locales_dir, "loading dictionaries");
    let text = TextProvider::new(
        load_dictionaries(locales_dir.as_deref()),
        options.language,
        options.settings_path.clone(),
    );
    let mut app = AppState::new(text);
    if let Some(date) = &options.date {
        app.form.date.clone_from(date);
    }
    if let Some(time) = &options.time {
        app.form.time.clone_from(time);
    }
    app
}

/// What: Run the Eight Characters TUI end-to-end: initialize terminal and state, spawn
/// background workers (search debounce, chart pipeline, enrichment), drive the event loop,
/// and restore the terminal on exit.
///
/// Inputs:
/// - `options`: Settings, language and prefill values
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal errors.
///
/// Details:
/// - With `EIGHTCHARS_TEST_HEADLESS=1` no terminal is touched and no input thread runs;
///   the loop then idles until the task is cancelled.
pub async fn run(options: RunOptions) -> Result<()> {
    let headless = std::env::var(HEADLESS_ENV).ok().as_deref() == Some("1");
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut app = initialize_app_state(&options);
    tracing::info!(
        api = %options.settings.api_base_url,
        lang = %app.language(),
        headless,
        "runtime starting"
    );

    let api: Arc<dyn ChartApi> = Arc::new(HttpChartApi::new(&options.settings.api_base_url));
    let mut channels = Channels::new(
        api.clone(),
        ChartPipeline::new(api),
        &options.settings,
    );
    workers::spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    channels
        .event_thread_cancelled
        .store(true, std::sync::atomic::Ordering::Relaxed);
    if !headless {
        restore_terminal()?;
    }
    tracing::info!("runtime stopped");
    Ok(())
}
