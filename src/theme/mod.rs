//! Colour palette for the terminal UI.
//!
//! A single built-in Catppuccin Mocha palette; the chart service decides which element a
//! card belongs to and [`element_color`] maps that id onto the palette.

use ratatui::style::Color;

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widget styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Slightly lighter background layer used behind panels.
    pub mantle: Color,
    /// Darkest background shade for deep contrast areas.
    pub crust: Color,
    /// Subtle surface color for component backgrounds.
    pub surface1: Color,
    /// Secondary surface color for inactive borders.
    pub surface2: Color,
    /// Low-contrast overlay for placeholders and hints.
    pub overlay1: Color,
    /// Higher-contrast overlay for secondary text.
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Tertiary text for captions.
    pub subtext1: Color,
    /// Accent color for labels and links.
    pub sapphire: Color,
    /// Accent color for focus highlights.
    pub mauve: Color,
    /// Success and "found" color.
    pub green: Color,
    /// Warning and in-progress color.
    pub yellow: Color,
    /// Error color.
    pub red: Color,
    /// Accent used for the selected suggestion row.
    pub lavender: Color,
    /// Accent used for the fire element.
    pub peach: Color,
}

/// Catppuccin Mocha.
const MOCHA: Theme = Theme {
    base: Color::Rgb(30, 30, 46),        // #1e1e2e
    mantle: Color::Rgb(24, 24, 37),      // #181825
    crust: Color::Rgb(17, 17, 27),       // #11111b
    surface1: Color::Rgb(69, 71, 90),    // #45475a
    surface2: Color::Rgb(88, 91, 112),   // #585b70
    overlay1: Color::Rgb(127, 132, 156), // #7f849c
    overlay2: Color::Rgb(147, 153, 178), // #9399b2
    text: Color::Rgb(205, 214, 244),     // #cdd6f4
    subtext0: Color::Rgb(166, 173, 200), // #a6adc8
    subtext1: Color::Rgb(186, 194, 222), // #bac2de
    sapphire: Color::Rgb(116, 199, 236), // #74c7ec
    mauve: Color::Rgb(203, 166, 247),    // #cba6f7
    green: Color::Rgb(166, 227, 161),    // #a6e3a1
    yellow: Color::Rgb(249, 226, 175),   // #f9e2af
    red: Color::Rgb(243, 139, 168),      // #f38ba8
    lavender: Color::Rgb(180, 190, 254), // #b4befe
    peach: Color::Rgb(250, 179, 135),    // #fab387
};

/// The active palette.
#[must_use]
pub const fn theme() -> Theme {
    MOCHA
}

/// What: Colour for a Five Elements id as sent by the chart service.
///
/// Inputs:
/// - `th`: Active palette
/// - `element`: `wood`, `fire`, `earth`, `metal` or `water` (case-insensitive)
///
/// Output:
/// - Palette colour for the element; plain text colour for anything else
#[must_use]
pub fn element_color(th: &Theme, element: &str) -> Color {
    match element.trim().to_ascii_lowercase().as_str() {
        "wood" => th.green,
        "fire" => th.peach,
        "earth" => th.yellow,
        "metal" => th.subtext1,
        "water" => th.sapphire,
        _ => th.text,
    }
}
