//! Event handling layer: keyboard and mouse input mutate [`AppState`] and feed the workers.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{AppState, QueryInput, SubmitJob, View};

mod chart;
mod input;
mod mouse;

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: &CEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    submit_tx: &mpsc::UnboundedSender<SubmitJob>,
) -> bool {
    match ev {
        CEvent::Key(ke) => {
            if ke.kind != KeyEventKind::Press {
                return false;
            }
            if is_quit(ke) {
                app.should_quit = true;
                return true;
            }
            if ke.code == KeyCode::F(2) {
                app.toggle_language();
                return false;
            }
            match app.view() {
                View::Input => input::handle_input_key(ke, app, query_tx, submit_tx),
                View::Chart => chart::handle_chart_key(ke, app, query_tx),
            }
            false
        }
        CEvent::Mouse(me) => {
            mouse::handle_mouse_event(me, app, query_tx, submit_tx);
            false
        }
        _ => false,
    }
}

/// Ctrl+C or Ctrl+Q.
fn is_quit(ke: &KeyEvent) -> bool {
    ke.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(ke.code, KeyCode::Char('c' | 'q'))
}

/// Start a submission if the preconditions hold and hand it to the chart worker.
pub(crate) fn submit(app: &mut AppState, submit_tx: &mpsc::UnboundedSender<SubmitJob>) {
    if let Some(job) = app.begin_submission() {
        let _ = submit_tx.send(job);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn ctrl_c_and_ctrl_q_quit() {
        let mut h = Harness::new();
        assert!(!h.key(KeyCode::Char('q')));
        assert!(h.key_mod(KeyCode::Char('q'), KeyModifiers::CONTROL));
        let mut h = Harness::new();
        assert!(h.key_mod(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(h.app.should_quit);
    }

    #[test]
    fn f2_toggles_language() {
        let mut h = Harness::new();
        h.key(KeyCode::F(2));
        assert_eq!(h.app.language(), Language::Fi);
        h.key(KeyCode::F(2));
        assert_eq!(h.app.language(), Language::En);
    }
}
