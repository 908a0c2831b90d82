use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components;

/// Actions reachable from the splash menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashAction {
    NewSheet,
    AddPoint,
    MapView,
    Admin,
}

const MENU: [(SplashAction, &str, &str); 4] = [
    (SplashAction::NewSheet, "ENTER", "Create new sheet"),
    (SplashAction::AddPoint, "ADD", "Add location point"),
    (SplashAction::MapView, "MAP VIEW", "View all points"),
    (SplashAction::Admin, "ADMIN", "Dashboard & reports"),
];

pub struct SplashState {
    pub list: ListState,
}

impl Default for SplashState {
    fn default() -> Self {
        let mut list = ListState::default();
        list.select(Some(0));
        Self { list }
    }
}

impl SplashState {
    pub fn next(&mut self) {
        let i = match self.list.selected() {
            Some(i) if i + 1 < MENU.len() => i + 1,
            _ => 0,
        };
        self.list.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.list.selected() {
            Some(0) | None => MENU.len() - 1,
            Some(i) => i - 1,
        };
        self.list.select(Some(i));
    }

    pub fn selected_action(&self) -> SplashAction {
        MENU[self.list.selected().unwrap_or(0)].0
    }

    /// Direct selection via the 1-4 shortcut keys
    pub fn action_for_digit(digit: u32) -> Option<SplashAction> {
        MENU.get(digit.checked_sub(1)? as usize).map(|m| m.0)
    }
}

pub fn render(f: &mut Frame, state: &mut SplashState, username: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // banner
            Constraint::Min(6),    // menu
            Constraint::Length(3), // hints
        ])
        .split(f.area());

    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            "📋 Voter Data Collection",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Signed in as {}", username),
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(banner, chunks[0]);

    let items: Vec<ListItem> = MENU
        .iter()
        .enumerate()
        .map(|(i, (_, label, description))| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::Blue)),
                    Span::styled(
                        *label,
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("   {}", description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
        .highlight_symbol("→ ");
    f.render_stateful_widget(menu, chunks[1], &mut state.list);

    components::render_key_hints(
        f,
        chunks[2],
        "↑/↓: Navigate | Enter: Open | 1-4: Jump | l: Logout | q: Quit",
    );
}
