//! Birth-data form: date, time, the location combobox, submit button and status line.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::helpers::{centered_column, field_block, status_color, text_width, union, value_line};
use crate::state::{AppState, FormField, HitRects};
use crate::theme::Theme;

/// Widest the form grows on large terminals.
const FORM_WIDTH: u16 = 64;
/// Rows of a bordered single-line field.
const FIELD_HEIGHT: u16 = 3;

/// What: Render the input view and record its clickable regions.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state (read only)
/// - `area`: Region below the title bar
/// - `hits`: Hit rects for this frame
/// - `th`: Active theme
///
/// Details:
/// - The suggestion list is drawn last, over the submit button, like a dropdown
pub fn render_input_view(f: &mut Frame, app: &AppState, area: Rect, hits: &mut HitRects, th: &Theme) {
    let text = app.text();
    let column = centered_column(area, FORM_WIDTH);
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(column);

    let heading = Paragraph::new(Line::from(Span::styled(
        text.t("heading"),
        Style::default().fg(th.lavender).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(heading, rows[0]);

    let focus = app.form.focus;
    render_text_field(
        f,
        rows[1],
        text.t("label_date"),
        &app.form.date,
        text.t("placeholder_date"),
        focus == FormField::Date,
        th,
    );
    hits.date = Some(rows[1]);
    render_text_field(
        f,
        rows[2],
        text.t("label_time"),
        &app.form.time,
        text.t("placeholder_time"),
        focus == FormField::Time,
        th,
    );
    hits.time = Some(rows[2]);
    render_location_field(f, app, rows[3], th);
    hits.location = Some(rows[3]);

    render_submit(f, app, rows[5], th);
    hits.submit = Some(rows[5]);

    if let Some((status, tone)) = app.status_line() {
        let line = Paragraph::new(Line::from(Span::styled(
            status,
            Style::default().fg(status_color(tone, th)),
        )))
        .alignment(Alignment::Center);
        f.render_widget(line, rows[6]);
    }

    let list = render_suggestions(f, app, rows[3], area, hits, th);
    hits.combobox = Some(union(rows[3], list));
}

/// Bordered single-line field with a caret at the end of the text when focused.
fn render_text_field(
    f: &mut Frame,
    rect: Rect,
    label: String,
    value: &str,
    placeholder: String,
    focused: bool,
    th: &Theme,
) {
    let block = field_block(label, focused, th);
    let inner = block.inner(rect);
    f.render_widget(Paragraph::new(value_line(value, placeholder, th)).block(block), rect);
    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + text_width(value).min(inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Location field; a committed place renders green with a check mark and no caret.
fn render_location_field(f: &mut Frame, app: &AppState, rect: Rect, th: &Theme) {
    let text = app.text();
    let resolver = app.resolver();
    let focused = app.form.focus == FormField::Location;
    if resolver.is_locked() {
        let mut block = field_block(text.t("label_location"), focused, th);
        if !focused {
            block = block.border_style(Style::default().fg(th.green));
        }
        let line = Line::from(vec![
            Span::styled(
                resolver.input().to_string(),
                Style::default().fg(th.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ✓", Style::default().fg(th.green)),
        ]);
        f.render_widget(Paragraph::new(line).block(block), rect);
        return;
    }
    render_text_field(
        f,
        rect,
        text.t("label_location"),
        resolver.input(),
        text.t("placeholder_city"),
        focused,
        th,
    );
}

fn render_submit(f: &mut Frame, app: &AppState, rect: Rect, th: &Theme) {
    let enabled = app.submit_enabled();
    let focused = app.form.focus == FormField::Submit;
    let (fg, border) = match (enabled, focused) {
        (false, _) => (th.overlay1, th.surface1),
        (true, true) => (th.crust, th.mauve),
        (true, false) => (th.text, th.sapphire),
    };
    let mut style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
    if enabled && focused {
        style = style.bg(th.mauve);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(th.base));
    let label = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", app.text().t("create_chart")),
        style,
    )))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(label, rect);
}

/// What: Draw the open suggestion list under the location field.
///
/// Inputs:
/// - `anchor`: Location field rect
/// - `bounds`: Area the list may not leave
///
/// Output:
/// - Rect of the drawn list, or `None` when the list is closed or has no room
///
/// Details:
/// - Records one hit rect per visible row, keyed by list index
fn render_suggestions(
    f: &mut Frame,
    app: &AppState,
    anchor: Rect,
    bounds: Rect,
    hits: &mut HitRects,
    th: &Theme,
) -> Option<Rect> {
    let resolver = app.resolver();
    if !resolver.list_open() {
        return None;
    }
    let store = resolver.suggestions();
    let top = anchor.bottom();
    let room = bounds.bottom().saturating_sub(top);
    let wanted = u16::try_from(store.len()).unwrap_or(u16::MAX).saturating_add(2);
    let height = wanted.min(room);
    if height < 3 {
        return None;
    }
    let rect = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.mauve))
        .style(Style::default().bg(th.mantle));
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    for (index, item) in store
        .items()
        .iter()
        .enumerate()
        .take(usize::from(inner.height))
    {
        let row = Rect {
            x: inner.x,
            y: inner.y + u16::try_from(index).unwrap_or(u16::MAX),
            width: inner.width,
            height: 1,
        };
        let selected = store.cursor() == Some(index);
        let (fg, bg) = if selected {
            (th.crust, th.lavender)
        } else {
            (th.text, th.mantle)
        };
        let line = Line::from(vec![
            Span::styled(
                item.display.clone(),
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", item.timezone),
                Style::default().fg(if selected { th.surface1 } else { th.overlay1 }),
            ),
        ]);
        f.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), row);
        hits.suggestion_rows.push((index, row));
    }
    Some(rect)
}
