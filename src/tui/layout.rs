//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::runtime::{App, View};
use super::style;
use crate::palette::{DayError, PaletteError};
use crate::position::LocateError;
use crate::timeline::MINUTES_PER_DAY;

const DEFINITION: &str = "Solor, a whimsical fusion of \"solar\" and \"color\", refers to the \
shade or hue that is most suitable and harmonious for a specific time of day in a particular \
geographical location. This term acknowledges the dynamic interplay between the sun's position \
in the sky and the local environment, recognizing that the color palette that complements a \
place can change dramatically as the day progresses.";

const ETYMOLOGY: &str = "\"Solor\" is a portmanteau of \"solar\", relating to the sun, and \
\"color\", representing the visual quality of an object as determined by its reflected or \
transmitted light. This term encapsulates the notion that the ideal color can be closely tied to \
the position of the sun during the day, making it a perfect blend for the concept of \
time-specific color choices.";

const EXAMPLES: [&str; 3] = [
    "The solor of the walls in our beachfront cottage shifted from a soft, sandy beige in the \
     morning to a tranquil seafoam green in the afternoon, creating a serene atmosphere.",
    "The designer selected a warm, golden solor for the living room, inspired by the radiant \
     hues of the setting sun over the desert landscape.",
    "When choosing outdoor furniture, consider the solor of the local twilight to create a \
     backyard oasis that comes to life at dusk.",
];

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(5),    // panes
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    match &app.view {
        View::Day { .. } => {
            render_definition(frame, app, panes[0]);
            render_timeline(frame, app, panes[1]);
        }
        View::Empty { error } => render_empty(frame, error, chunks[1]),
    }

    render_footer(frame, chunks[2]);
}

/// Header bar: location, query time, current color.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " SOLOR ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&app.location, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" │ {}", app.query_label())),
    ];
    if app.shift_minutes != 0 {
        spans.push(Span::raw(format!(" ({:+} min)", app.shift_minutes)));
    }
    if let Some(color) = app.current_color() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(format!(" {} ", color.css()), style::swatch(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Left pane: the word and its meaning, painted in the current color.
fn render_definition(frame: &mut Frame, app: &App, area: Rect) {
    let Some(color) = app.current_color() else {
        return;
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("solor", bold),
            Span::raw(" noun  /ˈso-lor/"),
        ]),
        Line::raw(""),
        Line::from(vec![Span::styled("definition ", bold), Span::raw(DEFINITION)]),
        Line::raw(""),
        Line::from(vec![Span::styled("etymology ", bold), Span::raw(ETYMOLOGY)]),
    ];
    for example in EXAMPLES {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![Span::styled("example ", bold), Span::raw(example)]));
    }
    let paragraph = Paragraph::new(lines)
        .style(style::swatch(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::NONE).style(style::swatch(color)));
    frame.render_widget(paragraph, area);
}

/// Right pane: one row per slice of the day, filled with the covering segment.
///
/// Hour labels take the text color of their own mark, which can differ from
/// the segment's when the color changes within the slice.
fn render_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let Some(timeline) = app.timeline() else {
        return;
    };
    let rows = area.height.max(1) as u32;
    let width = area.width as usize;
    let now = app.query_minute();

    let lines: Vec<Line> = (0..rows)
        .map(|row| {
            let start = row * MINUTES_PER_DAY / rows;
            let end = (row + 1) * MINUTES_PER_DAY / rows;
            let Some(segment) = timeline.segment_at(start) else {
                return Line::raw("");
            };
            let bg = style::rgb(segment.color.to_rgb());
            let fill = Style::default()
                .bg(bg)
                .fg(style::rgb(segment.text))
                .add_modifier(Modifier::BOLD);

            let mark = timeline
                .marks
                .iter()
                .find(|m| m.minute >= start && m.minute < end && m.label.is_some());
            let (label, label_style) = match mark {
                Some(m) => (
                    m.label.clone().unwrap_or_default(),
                    fill.fg(style::rgb(m.text)),
                ),
                None => (String::new(), fill),
            };
            let marker = match now {
                Some(m) if m >= start && m < end => format!("◀ {}", app.query_label()),
                _ => String::new(),
            };
            let gap = width.saturating_sub(label.chars().count() + marker.chars().count() + 2);
            Line::from(vec![
                Span::styled(" ", fill),
                Span::styled(label, label_style),
                Span::styled(format!("{}{marker} ", " ".repeat(gap)), fill),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Full-width notice shown when there is no palette for the day.
fn render_empty(frame: &mut Frame, error: &DayError, area: Rect) {
    let (heading, detail, hint) = match error {
        DayError::Position(LocateError::Unavailable(why)) => ("position unavailable", why.clone(), ""),
        DayError::Palette(PaletteError::MissingPhases(phases)) => (
            "solar phases do not occur on this day",
            format!(
                "missing: {}",
                phases.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
            ),
            "the sun never crosses every phase angle at this latitude; try another date or place",
        ),
        DayError::Palette(other) => ("palette unavailable", other.to_string(), ""),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default()
                .fg(style::WARNING_FG)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(detail),
    ];
    if !hint.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(hint));
    }
    let block = Block::default().title(" solor ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

/// Footer: key bindings.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q quit │ ←/→ ±15 min │ 0 now",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
