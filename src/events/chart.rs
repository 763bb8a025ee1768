use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::send_query;
use crate::state::{AppState, PillarKey, QueryInput};

/// What: Handle a key press on the chart view.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `query_tx`: Channel to the search worker, told to drop any pending search on back
///
/// Details:
/// - `1`-`4` toggle the panel of that column, Left/Right move focus, Enter/Space toggle it
/// - Esc or `b` go back to the input view
pub fn handle_chart_key(
    ke: &KeyEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) {
    if matches!(ke.code, KeyCode::Esc | KeyCode::Char('b')) {
        send_query(Some(app.back()), query_tx);
        return;
    }
    let Some(chart) = app.chart_mut() else {
        return;
    };
    match ke.code {
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            let key = PillarKey::ALL[index];
            chart.focus(key);
            let outcome = chart.toggle_panel(key);
            tracing::debug!(pillar = key.as_str(), ?outcome, "panel toggled");
        }
        KeyCode::Left => chart.focus_prev(),
        KeyCode::Right => chart.focus_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            chart.toggle_focused();
        }
        _ => {}
    }
}
