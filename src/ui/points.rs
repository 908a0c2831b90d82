use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components;
use crate::models::Sheet;

/// Point-capture view: one-key GPS capture plus the existing-sheets listing
pub struct PointsState {
    pub sheets: Vec<Sheet>,
    pub list: ListState,
    pub loading: bool,
}

impl Default for PointsState {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            list: ListState::default(),
            loading: true,
        }
    }
}

impl PointsState {
    pub fn set_sheets(&mut self, sheets: Vec<Sheet>) {
        self.sheets = sheets;
        self.loading = false;
        self.list = ListState::default();
        if !self.sheets.is_empty() {
            self.list.select(Some(0));
        }
    }

    pub fn next(&mut self) {
        if self.sheets.is_empty() {
            return;
        }
        let i = match self.list.selected() {
            Some(i) if i + 1 < self.sheets.len() => i + 1,
            _ => 0,
        };
        self.list.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.sheets.is_empty() {
            return;
        }
        let i = match self.list.selected() {
            Some(0) | None => self.sheets.len() - 1,
            Some(i) => i - 1,
        };
        self.list.select(Some(i));
    }

    pub fn selected_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(self.list.selected()?)
    }
}

pub fn render(f: &mut Frame, state: &mut PointsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // capture banner
            Constraint::Min(4),    // sheet list
            Constraint::Length(3), // hints
        ])
        .split(f.area());

    let title = Paragraph::new("📍 Add Location")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(title, chunks[0]);

    let capture = Paragraph::new(Line::from(vec![
        Span::styled("a", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(": Add new point at my location"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(capture, chunks[1]);

    if state.loading {
        components::render_loading_indicator(f, chunks[2], "Loading records...");
    } else if state.sheets.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No sheets created yet"),
            Line::from(Span::styled(
                "Create your first sheet using the ENTER action",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Existing Sheets"));
        f.render_widget(empty, chunks[2]);
    } else {
        let items: Vec<ListItem> = state
            .sheets
            .iter()
            .map(|sheet| {
                let mut header = vec![
                    components::colour_span(sheet.colour_round),
                    Span::raw(" "),
                    Span::styled(
                        sheet.house_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ];
                if sheet.location.is_some() {
                    header.push(Span::styled(
                        "  📍 location set",
                        Style::default().fg(Color::Green),
                    ));
                }
                ListItem::new(vec![
                    Line::from(header),
                    Line::from(Span::styled(
                        format!(
                            "  Community: {} | Voters: {} | Colour: {}",
                            sheet.community,
                            sheet.no_of_voters,
                            sheet.colour_round.label()
                        ),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Existing Sheets"))
            .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
            .highlight_symbol("→ ");
        f.render_stateful_widget(list, chunks[2], &mut state.list);
    }

    components::render_key_hints(
        f,
        chunks[3],
        "a: Add Point | ↑/↓: Navigate | Enter: Edit | d: Delete | Esc: Back | q: Quit",
    );
}
