use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::components;
use crate::geo;
use crate::models::Coordinate;

/// Arrow-key step on the simulated map surface, in degrees
pub const NUDGE_DEGREES: f64 = 0.0005;

/// Pending manual selection on the simulated map.
///
/// Nothing leaves the picker until the user confirms; cancel discards the
/// pending coordinate. A real mapping component would replace this view
/// while keeping the confirm/cancel contract.
pub struct PickerState {
    pub pending: Coordinate,
    pub acquiring: bool,
}

impl PickerState {
    pub fn new(initial: Option<Coordinate>, fallback: Coordinate) -> Self {
        Self {
            pending: initial.unwrap_or(fallback),
            acquiring: false,
        }
    }

    pub fn nudge(&mut self, dlat: f64, dlng: f64) {
        self.pending = Coordinate::new(self.pending.lat + dlat, self.pending.lng + dlng);
    }

    /// Stand-in for a map click: scatter the pending coordinate
    pub fn simulate_click(&mut self) {
        self.pending = geo::jitter(self.pending);
    }
}

pub fn render(f: &mut Frame, state: &PickerState) {
    let panel = components::popup_area(f.area(), 70, 70);
    f.render_widget(Clear, panel);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("🗺  Select Location");
    let inner = outer.inner(panel);
    f.render_widget(outer, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // coordinates
            Constraint::Min(5),    // map surface
            Constraint::Length(2), // hints
        ])
        .split(inner);

    let coords = if state.acquiring {
        Line::from(Span::styled(
            "Getting location...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled("Coordinates: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(state.pending.to_string()),
        ])
    };
    f.render_widget(Paragraph::new(coords), chunks[0]);

    render_map_surface(f, chunks[1]);

    f.render_widget(
        Paragraph::new("↑↓←→: Move | r: Map click | g: Use current location | Enter: Confirm | Esc: Cancel")
            .style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
}

/// Simulated map tile: a dotted grid with the pin at the center
fn render_map_surface(f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::with_capacity(inner.height as usize);
    for y in 0..inner.height {
        let mut spans = Vec::with_capacity(inner.width as usize);
        for x in 0..inner.width {
            if y == inner.height / 2 && x == inner.width / 2 {
                spans.push(Span::styled(
                    "▼",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            } else if x % 2 == 0 && y % 2 == 0 {
                spans.push(Span::styled("·", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines), inner);
}
