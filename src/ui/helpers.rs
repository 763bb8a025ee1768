//! Small rendering helpers shared by the input and chart views.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};
use unicode_width::UnicodeWidthStr;

use crate::i18n::TextProvider;
use crate::state::{HiddenStem, StatusTone};
use crate::theme::{Theme, element_color};

/// Display width of `s` in terminal cells, saturated to `u16`.
#[must_use]
pub fn text_width(s: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(s)).unwrap_or(u16::MAX)
}

/// What: Rounded bordered block used for every form field and card.
///
/// Inputs:
/// - `title`: Block title (already localized)
/// - `focused`: Whether the block has keyboard focus
/// - `th`: Active theme
///
/// Output:
/// - Block with mauve borders when focused, surface borders otherwise
#[must_use]
pub fn field_block(title: String, focused: bool, th: &Theme) -> Block<'static> {
    let border = if focused { th.mauve } else { th.surface2 };
    let title_style = if focused {
        Style::default().fg(th.mauve).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(th.overlay2)
    };
    Block::default()
        .title(Span::styled(format!(" {title} "), title_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(th.base))
}

/// Value line of a text field, falling back to a dimmed placeholder.
#[must_use]
pub fn value_line(value: &str, placeholder: String, th: &Theme) -> Line<'static> {
    if value.is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(th.overlay1)))
    } else {
        Line::from(Span::styled(value.to_string(), Style::default().fg(th.text)))
    }
}

/// Foreground colour for a status line of the given tone.
#[must_use]
pub const fn status_color(tone: StatusTone, th: &Theme) -> Color {
    match tone {
        StatusTone::Neutral => th.subtext0,
        StatusTone::Found => th.green,
        StatusTone::Error => th.red,
    }
}

/// What: Draw one trigram or hexagram line.
///
/// Inputs:
/// - `code`: `L` for a solid line, `B` for a broken one
/// - `color`: Element colour of the card
///
/// Output:
/// - Centered-width line; unknown codes render as an empty line
#[must_use]
pub fn yao_line(code: &str, color: Color) -> Line<'static> {
    let glyph = match code.trim() {
        "L" => "━━━━━━━",
        "B" => "━━━ ━━━",
        _ => "",
    };
    Line::from(Span::styled(glyph, Style::default().fg(color)))
}

/// What: One row of a hidden-stem panel.
///
/// Inputs:
/// - `entry`: Bare glyph or described stem
/// - `text`: Text provider for element and qi labels
/// - `th`: Active theme
///
/// Output:
/// - Line such as `乙  Yin Wood · Main`, coloured by element when known
#[must_use]
pub fn hidden_stem_line(entry: &HiddenStem, text: &TextProvider, th: &Theme) -> Line<'static> {
    match entry {
        HiddenStem::Glyph(glyph) => Line::from(Span::styled(
            glyph.clone(),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        HiddenStem::Described {
            stem,
            element,
            polarity,
            qi_type,
        } => {
            let color = element_color(th, element);
            let mut spans = Vec::new();
            if let Some(stem) = stem.as_deref().filter(|s| !s.is_empty()) {
                spans.push(Span::styled(
                    format!("{stem}  "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
            let mut label = polarity.clone();
            if !element.is_empty() {
                if !label.is_empty() {
                    label.push(' ');
                }
                label.push_str(&text.t(&format!("element_{}", element.to_ascii_lowercase())));
            }
            spans.push(Span::styled(label, Style::default().fg(color)));
            if !qi_type.is_empty() {
                spans.push(Span::styled(
                    format!(" · {}", text.t(&format!("qi_{}", qi_type.to_ascii_lowercase()))),
                    Style::default().fg(th.overlay2),
                ));
            }
            Line::from(spans)
        }
    }
}

/// Horizontally centered sub-rect no wider than `max_width`.
#[must_use]
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Smallest rect covering both `a` and `b`.
#[must_use]
pub fn union(a: Rect, b: Option<Rect>) -> Rect {
    b.map_or(a, |b| a.union(b))
}
