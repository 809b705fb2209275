//! Colors for the TUI.

use ratatui::style::{Color, Style};

use crate::color::{Hsl, Rgb};

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Empty-state message color.
pub const WARNING_FG: Color = Color::Yellow;

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Background `color` with its readable text color on top.
pub fn swatch(color: Hsl) -> Style {
    Style::default()
        .bg(rgb(color.to_rgb()))
        .fg(rgb(color.readable_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_pairs_background_with_readable_text() {
        let style = swatch(Hsl::new(210, 85, 85));
        assert_eq!(style.bg, Some(Color::Rgb(184, 217, 249)));
        assert_eq!(style.fg, Some(Color::Rgb(0, 0, 0)));

        let dark = swatch(Hsl::new(210, 15, 15));
        assert_eq!(dark.fg, Some(Color::Rgb(255, 255, 255)));
    }
}
