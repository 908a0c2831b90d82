use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components;
use crate::session::{DEMO_PASSWORD, DEMO_USERNAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
}

/// State behind the sign-in / register form
pub struct AuthState {
    pub username: String,
    pub password: String,
    pub mode: AuthMode,
    pub focus: AuthField,
    pub busy: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        // The demo credential is prefilled, same as the form it mirrors
        Self {
            username: DEMO_USERNAME.to_string(),
            password: DEMO_PASSWORD.to_string(),
            mode: AuthMode::SignIn,
            focus: AuthField::Username,
            busy: false,
        }
    }
}

impl AuthState {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        };
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }

    pub fn input(&mut self, c: char) {
        self.field_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.field_value_mut().pop();
    }

    fn field_value_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }
}

pub fn render(f: &mut Frame, state: &AuthState) {
    let panel = components::popup_area(f.area(), 60, 70);
    f.render_widget(ratatui::widgets::Clear, panel);

    let title = match state.mode {
        AuthMode::SignIn => "🔐 Sign In",
        AuthMode::Register => "🔐 Create Account",
    };
    let outer = Block::default().borders(Borders::ALL).title(title);
    let inner = outer.inner(panel);
    f.render_widget(outer, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // hint
            Constraint::Length(3), // username
            Constraint::Length(3), // password
            Constraint::Length(2), // submit
            Constraint::Min(0),
        ])
        .split(inner);

    let hint = match state.mode {
        AuthMode::SignIn => format!("Demo: {} / {}", DEMO_USERNAME, DEMO_PASSWORD),
        AuthMode::Register => "Join us to start collecting voter data".to_string(),
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    components::render_text_input(
        f,
        chunks[1],
        "Email",
        &state.username,
        state.focus == AuthField::Username,
    );

    let masked = "•".repeat(state.password.chars().count());
    components::render_text_input(
        f,
        chunks[2],
        "Password",
        &masked,
        state.focus == AuthField::Password,
    );

    let submit = if state.busy {
        "Processing..."
    } else {
        match state.mode {
            AuthMode::SignIn => "Enter: Sign In",
            AuthMode::Register => "Enter: Create Account",
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(submit))
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        chunks[3],
    );

    f.render_widget(
        Paragraph::new("Tab: switch field • ←/→: sign in / register • Esc: quit")
            .style(Style::default().fg(Color::Gray)),
        chunks[4],
    );
}
