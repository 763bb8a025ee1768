use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::send_query;
use crate::state::{AppState, FormField, NavOutcome, QueryInput, SubmitJob};

/// What: Handle a key press on the input view.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `query_tx`: Channel to the search worker
/// - `submit_tx`: Channel to the chart worker
///
/// Details:
/// - Tab/Shift+Tab cycle focus; leaving the location field closes its list
/// - Ctrl+S submits from anywhere
/// - Remaining keys go to the focused field
pub fn handle_input_key(
    ke: &KeyEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    submit_tx: &mpsc::UnboundedSender<SubmitJob>,
) {
    let ctrl = ke.modifiers.contains(KeyModifiers::CONTROL);
    let focus = app.form.focus;
    match ke.code {
        KeyCode::Tab => {
            move_focus(app, focus.next());
            return;
        }
        KeyCode::BackTab => {
            move_focus(app, focus.prev());
            return;
        }
        KeyCode::Char('s') if ctrl => {
            super::submit(app, submit_tx);
            return;
        }
        _ => {}
    }
    match focus {
        FormField::Date | FormField::Time => match ke.code {
            KeyCode::Char(c) if !ctrl => {
                app.form.on_char(c);
            }
            KeyCode::Backspace => {
                app.form.on_backspace();
            }
            KeyCode::Enter => move_focus(app, focus.next()),
            _ => {}
        },
        FormField::Location => handle_location_key(ke, ctrl, app, query_tx, submit_tx),
        FormField::Submit => {
            if matches!(ke.code, KeyCode::Enter | KeyCode::Char(' ')) {
                super::submit(app, submit_tx);
            }
        }
    }
}

/// Keys on the location combobox.
fn handle_location_key(
    ke: &KeyEvent,
    ctrl: bool,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    submit_tx: &mpsc::UnboundedSender<SubmitJob>,
) {
    let resolver = app.resolver_mut();
    let query = match ke.code {
        KeyCode::Down => {
            resolver.move_down();
            None
        }
        KeyCode::Up => {
            resolver.move_up();
            None
        }
        KeyCode::Esc => {
            resolver.escape();
            None
        }
        KeyCode::Enter => {
            // With no open list Enter submits the form.
            if resolver.enter() == NavOutcome::Inactive {
                super::submit(app, submit_tx);
            }
            None
        }
        KeyCode::Char('u') if ctrl => resolver.clear(),
        KeyCode::Char(c) if !ctrl => resolver.on_char(c),
        KeyCode::Backspace => resolver.on_backspace(),
        KeyCode::Delete => resolver.on_delete(),
        _ => None,
    };
    send_query(query, query_tx);
}

/// Move focus, closing the suggestion list when the location field loses it.
fn move_focus(app: &mut AppState, to: FormField) {
    if app.form.focus == FormField::Location && to != FormField::Location {
        app.resolver_mut().dismiss();
    }
    app.form.focus = to;
}
