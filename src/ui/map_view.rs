use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashMap;

use super::components;
use crate::models::{ColourRound, Coordinate, Point, Sheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Sheet,
    Point,
}

/// One pin on the simulated map, merged from sheets and points
#[derive(Debug, Clone)]
pub struct Marker {
    pub kind: MarkerKind,
    pub title: String,
    pub colour: Option<ColourRound>,
    pub community: Option<String>,
    pub voters: Option<String>,
    pub location: Coordinate,
    pub created_at: DateTime<Utc>,
}

pub struct MapState {
    pub markers: Vec<Marker>,
    pub selected: Option<usize>,
    pub sheet_count: usize,
    pub point_count: usize,
    pub loading: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            selected: None,
            sheet_count: 0,
            point_count: 0,
            loading: true,
        }
    }
}

impl MapState {
    /// Merge located sheets and all points into one marker list
    pub fn set_data(&mut self, sheets: &[Sheet], points: &[Point]) {
        let mut markers = Vec::new();
        for sheet in sheets {
            if let Some(location) = sheet.location {
                markers.push(Marker {
                    kind: MarkerKind::Sheet,
                    title: sheet.house_name.clone(),
                    colour: Some(sheet.colour_round),
                    community: Some(sheet.community.clone()),
                    voters: Some(sheet.no_of_voters.clone()),
                    location,
                    created_at: sheet.created_at,
                });
            }
        }
        for point in points {
            markers.push(Marker {
                kind: MarkerKind::Point,
                title: "Location Point".to_string(),
                colour: None,
                community: None,
                voters: None,
                location: point.location,
                created_at: point.created_at,
            });
        }

        self.sheet_count = markers
            .iter()
            .filter(|m| m.kind == MarkerKind::Sheet)
            .count();
        self.point_count = markers.len() - self.sheet_count;
        self.selected = if markers.is_empty() { None } else { Some(0) };
        self.markers = markers;
        self.loading = false;
    }

    pub fn next(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.markers.len() => i + 1,
            _ => 0,
        });
    }

    pub fn previous(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.markers.len() - 1,
            Some(i) => i - 1,
        });
    }

    pub fn selected_marker(&self) -> Option<&Marker> {
        self.markers.get(self.selected?)
    }
}

/// Lat/lng bounding box of every marker, used to scale pins onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl Bounds {
    fn of(markers: &[Marker]) -> Option<Bounds> {
        let first = markers.first()?.location;
        let mut bounds = Bounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        for marker in &markers[1..] {
            bounds.min_lat = bounds.min_lat.min(marker.location.lat);
            bounds.max_lat = bounds.max_lat.max(marker.location.lat);
            bounds.min_lng = bounds.min_lng.min(marker.location.lng);
            bounds.max_lng = bounds.max_lng.max(marker.location.lng);
        }
        Some(bounds)
    }
}

/// Scale a coordinate into a cell of a cols x rows canvas.
///
/// Latitude grows upward, rows grow downward, so the row axis is inverted.
/// Degenerate spans (single marker, or all markers on one line) land in the
/// middle of the axis.
fn project(location: Coordinate, bounds: Bounds, cols: u16, rows: u16) -> (u16, u16) {
    if cols == 0 || rows == 0 {
        return (0, 0);
    }
    let x = scale(
        location.lng,
        bounds.min_lng,
        bounds.max_lng,
        cols.saturating_sub(1),
    );
    let y_up = scale(
        location.lat,
        bounds.min_lat,
        bounds.max_lat,
        rows.saturating_sub(1),
    );
    (x, rows - 1 - y_up)
}

fn scale(value: f64, min: f64, max: f64, steps: u16) -> u16 {
    let span = max - min;
    if span <= f64::EPSILON {
        return steps / 2;
    }
    let ratio = ((value - min) / span).clamp(0.0, 1.0);
    (ratio * f64::from(steps)).round() as u16
}

pub fn render(f: &mut Frame, state: &MapState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("🗺  Map View ({} markers)", state.markers.len()))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(38)])
        .split(chunks[1]);

    if state.loading {
        components::render_loading_indicator(f, body[0], "Loading map data...");
    } else {
        render_canvas(f, body[0], state);
    }
    render_side_panel(f, body[1], state);

    components::render_key_hints(f, chunks[2], "↑/↓: Cycle markers | Esc: Back | q: Quit");
}

fn render_canvas(f: &mut Frame, area: Rect, state: &MapState) {
    let block = Block::default().borders(Borders::ALL).title("Simulated Map");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let Some(bounds) = Bounds::of(&state.markers) else {
        let empty = Paragraph::new("No markers yet. Set sheet locations or add points")
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, inner);
        return;
    };

    // Last-drawn marker wins a contested cell, except the selected one
    let mut cells: HashMap<(u16, u16), usize> = HashMap::new();
    for (i, marker) in state.markers.iter().enumerate() {
        let cell = project(marker.location, bounds, inner.width, inner.height);
        match cells.get(&cell) {
            Some(&existing) if state.selected == Some(existing) => {}
            _ => {
                cells.insert(cell, i);
            }
        }
    }

    let mut lines = Vec::with_capacity(inner.height as usize);
    for y in 0..inner.height {
        let mut spans = Vec::with_capacity(inner.width as usize);
        for x in 0..inner.width {
            if let Some(&idx) = cells.get(&(x, y)) {
                let marker = &state.markers[idx];
                let (glyph, colour) = match marker.kind {
                    MarkerKind::Sheet => ("▲", Color::Blue),
                    MarkerKind::Point => ("●", Color::Green),
                };
                let mut style = Style::default().fg(colour).add_modifier(Modifier::BOLD);
                if state.selected == Some(idx) {
                    style = style.bg(Color::White);
                }
                spans.push(Span::styled(glyph, style));
            } else if x % 4 == 0 && y % 2 == 0 {
                spans.push(Span::styled("·", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_side_panel(f: &mut Frame, area: Rect, state: &MapState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let legend = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("▲ ", Style::default().fg(Color::Blue)),
            Span::raw(format!("Voter Sheets ({})", state.sheet_count)),
        ]),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::raw(format!("Location Points ({})", state.point_count)),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Legend"));
    f.render_widget(legend, chunks[0]);

    let detail: Vec<Line> = match state.selected_marker() {
        Some(marker) => {
            let mut lines = vec![Line::from(Span::styled(
                marker.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(colour) = marker.colour {
                lines.push(Line::from(vec![
                    components::colour_span(colour),
                    Span::raw(format!(" {}", colour.label())),
                ]));
            }
            if let Some(community) = &marker.community {
                lines.push(Line::from(format!("Community: {}", community)));
            }
            if let Some(voters) = &marker.voters {
                lines.push(Line::from(format!("{} voters", voters)));
            }
            lines.push(Line::from(Span::styled(
                marker.location.to_string(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(Span::styled(
                format!("Added: {}", marker.created_at.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::Gray),
            )));
            lines
        }
        None => vec![Line::from(Span::styled(
            "No marker selected",
            Style::default().fg(Color::Gray),
        ))],
    };

    let panel = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title("Marker"))
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(panel, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            min_lat: 10.0,
            max_lat: 20.0,
            min_lng: 70.0,
            max_lng: 80.0,
        }
    }

    #[test]
    fn corners_project_to_canvas_corners() {
        // North-west corner is the top-left cell
        assert_eq!(project(Coordinate::new(20.0, 70.0), bounds(), 11, 11), (0, 0));
        // South-east corner is the bottom-right cell
        assert_eq!(
            project(Coordinate::new(10.0, 80.0), bounds(), 11, 11),
            (10, 10)
        );
    }

    #[test]
    fn midpoint_projects_to_the_middle() {
        assert_eq!(project(Coordinate::new(15.0, 75.0), bounds(), 11, 11), (5, 5));
    }

    #[test]
    fn degenerate_bounds_land_in_the_center() {
        let single = Bounds {
            min_lat: 12.0,
            max_lat: 12.0,
            min_lng: 77.0,
            max_lng: 77.0,
        };
        assert_eq!(project(Coordinate::new(12.0, 77.0), single, 20, 10), (9, 5));
    }

    #[test]
    fn markers_merge_located_sheets_and_all_points() {
        use chrono::Utc;
        let located = Sheet {
            id: "a".into(),
            house_name: "A".into(),
            colour_round: ColourRound::Red,
            community: "X".into(),
            no_of_voters: "2".into(),
            location: Some(Coordinate::new(1.0, 2.0)),
            voters: Vec::new(),
            created_at: Utc::now(),
        };
        let mut unlocated = located.clone();
        unlocated.id = "b".into();
        unlocated.location = None;
        let point = Point {
            id: "p".into(),
            location: Coordinate::new(3.0, 4.0),
            created_at: Utc::now(),
        };

        let mut state = MapState::default();
        state.set_data(&[located, unlocated], &[point]);
        assert_eq!(state.markers.len(), 2);
        assert_eq!(state.sheet_count, 1);
        assert_eq!(state.point_count, 1);
        assert_eq!(state.selected, Some(0));
    }
}
