use ratatui::Terminal;
use tokio::select;

use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;
use super::handlers::{handle_enrichment, handle_pipeline_outcome, handle_search_outcome};

/// What: Process one iteration of channel message handling.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Output: `true` if the event loop should exit, `false` to continue
///
/// Details:
/// - Waits for and processes a single message from any channel
async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(&ev, app, &channels.query_tx, &channels.submit_tx)
        }
        Some(outcome) = channels.search_rx.recv() => {
            handle_search_outcome(app, outcome);
            false
        }
        Some(outcome) = channels.pipeline_rx.recv() => {
            handle_pipeline_outcome(app, outcome, &channels.enrich_tx);
            false
        }
        Some(outcome) = channels.enrichment_rx.recv() => {
            handle_enrichment(app, &outcome);
            false
        }
        else => true
    }
}

/// What: Run the main event loop, processing all channel messages and rendering the UI.
///
/// Inputs:
/// - `terminal`: Optional terminal for rendering (None in headless mode)
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Details:
/// - Redraws after every message so a state change and its text are never seen apart
/// - Exits when an event handler asks to quit
pub async fn run_event_loop(
    terminal: &mut Option<Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>>,
    app: &mut AppState,
    channels: &mut Channels,
) {
    loop {
        if let Some(t) = terminal.as_mut()
            && let Err(e) = t.draw(|f| ui(f, app))
        {
            tracing::warn!(error = %e, "frame draw failed");
        }

        if process_channel_messages(app, channels).await || app.should_quit {
            break;
        }
    }
}
