use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use crate::i18n::Language;
use crate::logic::send_query;
use crate::state::{AppState, FormField, PillarKey, QueryInput, SubmitJob, View};

/// `true` when `rect` was drawn and contains the cell at `pos`.
fn hit(rect: Option<Rect>, pos: Position) -> bool {
    rect.is_some_and(|r| r.contains(pos))
}

/// What: Handle a mouse event using the regions recorded by the last frame.
///
/// Inputs:
/// - `me`: Mouse event
/// - `app`: Application state
/// - `query_tx`: Channel to the search worker
/// - `submit_tx`: Channel to the chart worker
///
/// Details:
/// - Only left-button presses act
/// - On the input view a click outside the combobox closes an open suggestion list
pub fn handle_mouse_event(
    me: &MouseEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    submit_tx: &mpsc::UnboundedSender<SubmitJob>,
) {
    if me.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let pos = Position::new(me.column, me.row);
    if hit(app.hits.lang_fi, pos) {
        app.set_language(Language::Fi);
        return;
    }
    if hit(app.hits.lang_en, pos) {
        app.set_language(Language::En);
        return;
    }
    match app.view() {
        View::Input => handle_input_click(pos, app, submit_tx),
        View::Chart => handle_chart_click(pos, app, query_tx),
    }
}

fn handle_input_click(
    pos: Position,
    app: &mut AppState,
    submit_tx: &mpsc::UnboundedSender<SubmitJob>,
) {
    let row = app
        .hits
        .suggestion_rows
        .iter()
        .find(|(_, r)| r.contains(pos))
        .map(|(i, _)| *i);
    if let Some(index) = row {
        app.form.focus = FormField::Location;
        app.resolver_mut().commit_index(index);
        return;
    }
    if !hit(app.hits.combobox, pos) {
        app.resolver_mut().dismiss();
    }
    if hit(app.hits.date, pos) {
        app.form.focus = FormField::Date;
    } else if hit(app.hits.time, pos) {
        app.form.focus = FormField::Time;
    } else if hit(app.hits.location, pos) {
        app.form.focus = FormField::Location;
    } else if hit(app.hits.submit, pos) {
        app.form.focus = FormField::Submit;
        super::submit(app, submit_tx);
    }
}

fn handle_chart_click(
    pos: Position,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) {
    if hit(app.hits.back, pos) {
        send_query(Some(app.back()), query_tx);
        return;
    }
    let card = app
        .hits
        .branch_cards
        .iter()
        .position(|r| hit(*r, pos));
    if let (Some(index), Some(chart)) = (card, app.chart_mut()) {
        let key = PillarKey::ALL[index];
        chart.focus(key);
        chart.toggle_panel(key);
    }
}
