use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::components;
use crate::export::Totals;
use crate::models::{Point, Sheet};

/// Admin dashboard: totals, the full sheet table, export and logout
pub struct AdminState {
    pub sheets: Vec<Sheet>,
    pub points: Vec<Point>,
    pub totals: Totals,
    pub table: TableState,
    pub loading: bool,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            points: Vec::new(),
            totals: Totals {
                total_sheets: 0,
                total_voters: 0,
                total_points: 0,
            },
            table: TableState::default(),
            loading: true,
        }
    }
}

impl AdminState {
    pub fn set_data(&mut self, sheets: Vec<Sheet>, points: Vec<Point>) {
        self.totals = crate::export::totals(&sheets, &points);
        self.sheets = sheets;
        self.points = points;
        self.loading = false;
        self.table = TableState::default();
        if !self.sheets.is_empty() {
            self.table.select(Some(0));
        }
    }

    pub fn next(&mut self) {
        if self.sheets.is_empty() {
            return;
        }
        let i = match self.table.selected() {
            Some(i) if i + 1 < self.sheets.len() => i + 1,
            _ => 0,
        };
        self.table.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.sheets.is_empty() {
            return;
        }
        let i = match self.table.selected() {
            Some(0) | None => self.sheets.len() - 1,
            Some(i) => i - 1,
        };
        self.table.select(Some(i));
    }

    pub fn selected_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(self.table.selected()?)
    }
}

pub fn render(f: &mut Frame, state: &mut AdminState, username: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(5), // stat tiles
            Constraint::Min(4),    // table
            Constraint::Length(3), // hints
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "🛡  Admin Dashboard",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   User: {}", username), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    if state.loading {
        components::render_loading_indicator(f, chunks[1], "Loading dashboard data...");
    } else {
        render_stat_tiles(f, chunks[1], state.totals);
        render_sheet_table(f, chunks[2], state);
    }

    components::render_key_hints(
        f,
        chunks[3],
        "↑/↓: Navigate | e: Export CSV | d: Delete | l: Logout | Esc: Back | q: Quit",
    );
}

fn render_stat_tiles(f: &mut Frame, area: Rect, totals: Totals) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    render_tile(f, tiles[0], "Total Sheets", totals.total_sheets.to_string(), Color::Blue);
    render_tile(f, tiles[1], "Total Voters", totals.total_voters.to_string(), Color::Green);
    render_tile(
        f,
        tiles[2],
        "Location Points",
        totals.total_points.to_string(),
        Color::Magenta,
    );
}

fn render_tile(f: &mut Frame, area: Rect, label: &str, value: String, colour: Color) {
    let tile = Paragraph::new(vec![
        Line::from(Span::styled(label.to_string(), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            value,
            Style::default().fg(colour).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(tile, area);
}

fn render_sheet_table(f: &mut Frame, area: Rect, state: &mut AdminState) {
    if state.sheets.is_empty() {
        let empty = Paragraph::new("No sheets recorded yet")
            .block(Block::default().borders(Borders::ALL).title("All Records"))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = state
        .sheets
        .iter()
        .map(|sheet| {
            Row::new(vec![
                Cell::from(sheet.house_name.clone()),
                Cell::from(Line::from(vec![
                    components::colour_span(sheet.colour_round),
                    Span::raw(format!(" {}", sheet.colour_round.value())),
                ])),
                Cell::from(sheet.community.clone()),
                Cell::from(sheet.no_of_voters.clone()),
                Cell::from(sheet.created_at.format("%Y-%m-%d").to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Length(12),
            Constraint::Percentage(24),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["House Name", "Colour", "Community", "Voters", "Created"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("All Records"))
    .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut state.table);
}
