/// Shared UI chrome for the data-collection views
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::ColourRound;

/// Render a loading indicator
pub fn render_loading_indicator(f: &mut Frame, area: Rect, message: &str) {
    let loading = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(loading, area);
}

/// Render a bordered single-line text input; the focused field gets a
/// cursor mark and highlight
pub fn render_text_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let display = if focused {
        format!("{value}▏")
    } else {
        value.to_string()
    };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let input = Paragraph::new(display)
        .block(Block::default().borders(Borders::ALL).title(label.to_string()))
        .style(style);

    f.render_widget(input, area);
}

/// Render the bottom key-hint bar
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &str) {
    let bar = Paragraph::new(hints)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(bar, area);
}

/// Terminal swatch for a colour round label
pub fn colour_span(colour: ColourRound) -> Span<'static> {
    let fg = match colour {
        ColourRound::Saffron => Color::LightRed,
        ColourRound::Black => Color::DarkGray,
        ColourRound::Red => Color::Red,
        ColourRound::Yellow => Color::Yellow,
        ColourRound::Blue => Color::Blue,
        ColourRound::White => Color::White,
        ColourRound::Darkpink => Color::Magenta,
    };
    Span::styled("●", Style::default().fg(fg))
}

/// Centered popup rectangle taking the given percentages of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
