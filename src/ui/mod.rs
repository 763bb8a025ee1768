//! Frame rendering: title bar with language buttons, the active view, and the footer.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::i18n::Language;
use crate::state::{AppState, FormField, HitRects, View};
use crate::theme::{Theme, theme};

mod chart_view;
mod helpers;
mod input_view;

/// What: Draw one frame and record the clickable regions for mouse handling.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state; only `app.hits` is written
///
/// Details:
/// - Hit rects from the previous frame are discarded, so a closed list or a left view
///   can never be clicked
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    let mut hits = HitRects::default();
    render_title_bar(f, app, rows[0], &mut hits, &th);
    match app.view() {
        View::Input => input_view::render_input_view(f, app, rows[1], &mut hits, &th),
        View::Chart => chart_view::render_chart_view(f, app, rows[1], &mut hits, &th),
    }
    render_footer(f, app, rows[2], &th);
    app.hits = hits;
}

/// Title on the left, `FI`/`EN` buttons on the right with the active one highlighted.
fn render_title_bar(f: &mut Frame, app: &AppState, area: Rect, hits: &mut HitRects, th: &Theme) {
    let text = app.text();
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", text.t("title")),
        Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(th.crust));
    f.render_widget(title, area);

    let mut right = area.right();
    for (language, key) in [(Language::En, "lang_en"), (Language::Fi, "lang_fi")] {
        let label = format!(" {} ", text.t(key));
        let width = helpers::text_width(&label);
        if right < area.x.saturating_add(width) {
            break;
        }
        right -= width;
        let rect = Rect {
            x: right,
            y: area.y,
            width,
            height: 1,
        };
        let style = if app.language() == language {
            Style::default()
                .fg(th.crust)
                .bg(th.mauve)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.overlay1).bg(th.crust)
        };
        f.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        match language {
            Language::Fi => hits.lang_fi = Some(rect),
            Language::En => hits.lang_en = Some(rect),
        }
        right = right.saturating_sub(1);
    }
}

/// Localized key help for the active view.
fn render_footer(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let text = app.text();
    let help = match app.view() {
        View::Chart => text.t("footer_chart"),
        View::Input
            if app.form.focus == FormField::Location && app.resolver().is_locked() =>
        {
            text.t("footer_locked")
        }
        View::Input => text.t("footer_input"),
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {help}"),
        Style::default().fg(th.overlay2),
    )))
    .style(Style::default().bg(th.crust));
    f.render_widget(footer, area);
}
