//! Rendered chart: header, back button and four pillar columns with hidden-stem panels.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::helpers::{field_block, hidden_stem_line, text_width, yao_line};
use crate::i18n::TextProvider;
use crate::state::{
    AppState, BranchCard, ChartPillar, ChartView, HitRects, PanelState, PillarKey, StemCard,
};
use crate::theme::{Theme, element_color};

/// Rows above the card lines in a stem card: glyph, pinyin, label.
const STEM_TEXT_ROWS: u16 = 3;
/// Rows above the card lines in a branch card: glyph, pinyin, animal, label.
const BRANCH_TEXT_ROWS: u16 = 4;

/// What: Render the chart view and record the back button and branch cards.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state; nothing is drawn without a chart
/// - `area`: Region below the title bar
/// - `hits`: Hit rects for this frame
/// - `th`: Active theme
pub fn render_chart_view(f: &mut Frame, app: &AppState, area: Rect, hits: &mut HitRects, th: &Theme) {
    let Some(chart) = app.chart() else {
        return;
    };
    let text = app.text();
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);

    let back_label = format!(" {} ", text.t("back"));
    let back_width = text_width(&back_label).saturating_add(2).min(rows[0].width);
    let top = Layout::horizontal([Constraint::Length(back_width), Constraint::Min(0)]).split(rows[0]);
    let back = Paragraph::new(Line::from(Span::styled(
        back_label,
        Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.surface2)),
    );
    f.render_widget(back, top[0]);
    hits.back = Some(top[0]);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            text.t("title"),
            Style::default().fg(th.subtext1),
        )),
        Line::from(Span::styled(
            chart.header().to_string(),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, top[1]);

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(rows[1]);
    let stem_h = card_height(chart, STEM_TEXT_ROWS, |p| p.stem.lines.len());
    let branch_h = card_height(chart, BRANCH_TEXT_ROWS, |p| p.branch.lines.len());
    for key in PillarKey::ALL {
        let Some(pillar) = chart.pillars().get(key.index()) else {
            continue;
        };
        let rect = columns[key.index()];
        hits.branch_cards[key.index()] =
            render_column(f, chart, key, pillar, rect, (stem_h, branch_h), text, th);
    }
}

/// Tallest card of one kind across all columns, so columns line up.
fn card_height(chart: &ChartView, text_rows: u16, lines: impl Fn(&ChartPillar) -> usize) -> u16 {
    let most = chart.pillars().iter().map(lines).max().unwrap_or(0);
    text_rows
        .saturating_add(u16::try_from(most).unwrap_or(u16::MAX))
        .saturating_add(2)
}

/// What: Render one pillar column.
///
/// Output:
/// - Rect of the branch card, used to toggle the column's panel by mouse
#[allow(clippy::too_many_arguments)]
fn render_column(
    f: &mut Frame,
    chart: &ChartView,
    key: PillarKey,
    pillar: &ChartPillar,
    rect: Rect,
    (stem_h, branch_h): (u16, u16),
    text: &TextProvider,
    th: &Theme,
) -> Option<Rect> {
    let panel = chart.panel(key);
    let panel_h = match panel.state() {
        PanelState::Expanded => chart.panel_height(key).saturating_add(2),
        PanelState::Collapsed => 0,
    };
    let parts = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(stem_h),
        Constraint::Length(branch_h),
        Constraint::Length(panel_h),
        Constraint::Min(0),
    ])
    .split(rect);

    let caption = Paragraph::new(vec![
        Line::from(Span::styled(
            pillar.label.clone(),
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(pillar.value.clone(), Style::default().fg(th.subtext0))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(caption, parts[0]);

    render_stem_card(f, &pillar.stem, parts[1], th);

    let focused = chart.focused() == key;
    let marker = match (panel.has_content(), panel.state()) {
        (false, _) => "",
        (true, PanelState::Collapsed) => "▸",
        (true, PanelState::Expanded) => "▾",
    };
    render_branch_card(f, &pillar.branch, parts[2], focused, marker, th);

    if panel_h > 0 {
        let block = field_block(text.t("hidden_stems"), false, th)
            .border_style(Style::default().fg(th.surface1))
            .style(Style::default().bg(th.mantle));
        let lines: Vec<Line<'static>> = panel
            .entries()
            .iter()
            .map(|e| hidden_stem_line(e, text, th))
            .collect();
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            parts[3],
        );
    }
    (parts[2].height > 0).then_some(parts[2])
}

fn card_block(focused: bool, color: ratatui::style::Color, th: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { th.mauve } else { color }))
        .style(Style::default().bg(th.base))
}

fn render_stem_card(f: &mut Frame, card: &StemCard, rect: Rect, th: &Theme) {
    let color = element_color(th, &card.element);
    let mut lines = vec![
        Line::from(Span::styled(
            card.char.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.pinyin.clone(), Style::default().fg(th.subtext0))),
        Line::from(Span::styled(card.label.clone(), Style::default().fg(th.subtext1))),
    ];
    lines.extend(card.lines.iter().map(|l| yao_line(l, color)));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(card_block(false, th.surface2, th)),
        rect,
    );
}

fn render_branch_card(
    f: &mut Frame,
    card: &BranchCard,
    rect: Rect,
    focused: bool,
    marker: &str,
    th: &Theme,
) {
    let color = element_color(th, &card.element);
    let mut glyph = vec![Span::styled(
        card.char.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if !marker.is_empty() {
        glyph.push(Span::styled(format!(" {marker}"), Style::default().fg(th.overlay2)));
    }
    let mut lines = vec![
        Line::from(glyph),
        Line::from(Span::styled(card.pinyin.clone(), Style::default().fg(th.subtext0))),
        Line::from(Span::styled(
            card.animal().to_string(),
            Style::default().fg(th.text),
        )),
        Line::from(Span::styled(
            card.element_label.clone(),
            Style::default().fg(th.subtext1),
        )),
    ];
    lines.extend(card.lines.iter().map(|l| yao_line(l, color)));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(card_block(focused, th.surface2, th)),
        rect,
    );
}
