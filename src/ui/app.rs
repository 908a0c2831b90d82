use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::editor::EditorError;
use crate::export;
use crate::geo::{LocationError, LocationProvider, SimulatedGps};
use crate::models::{Config, PointInput};
use crate::session::SessionManager;
use crate::store::{Backend, MemoryBackend};

use super::admin::{self, AdminState};
use super::auth::{self, AuthMode, AuthState};
use super::editor_view::{self, EditorFocus, EditorState};
use super::map_picker::{PickerState, NUDGE_DEGREES};
use super::map_view::{self, MapState};
use super::points::{self, PointsState};
use super::splash::{self, SplashAction, SplashState};

/// Application views; the shell mounts exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Auth,
    Splash,
    Editor,
    Points,
    Map,
    Admin,
}

/// Transient status notice surfaced at the view boundary
struct Notice {
    message: String,
    error: bool,
    ticks: u8,
}

/// How long a notice stays up, in poll ticks
const NOTICE_TICKS: u8 = 12;
/// Delay before returning to the splash view after a successful save
const SAVE_RETURN_TICKS: u8 = 4;

/// The navigation shell: current view, the sheet being edited, the session
/// gate, and the per-view state structs.
pub struct App {
    config: Config,
    store: Arc<dyn Backend>,
    geo: Arc<dyn LocationProvider>,
    sessions: SessionManager,
    view: AppView,
    auth: AuthState,
    splash: SplashState,
    editor: EditorState,
    points: PointsState,
    map: MapState,
    admin: AdminState,
    notice: Option<Notice>,
    return_to_splash_in: Option<u8>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Arc<dyn Backend>, geo: Arc<dyn LocationProvider>) -> Self {
        let mut sessions = SessionManager::new(&config.token_path);
        // A fresh valid token skips the auth gate; expired tokens are
        // cleared by restore itself
        let view = if sessions.restore().is_some() {
            AppView::Splash
        } else {
            AppView::Auth
        };

        Self {
            config,
            store,
            geo,
            sessions,
            view,
            auth: AuthState::default(),
            splash: SplashState::default(),
            editor: EditorState::new_sheet(),
            points: PointsState::default(),
            map: MapState::default(),
            admin: AdminState::default(),
            notice: None,
            return_to_splash_in: None,
            should_quit: false,
        }
    }

    /// Run the application on an alternate-screen raw-mode terminal
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        result
    }

    /// Single-threaded cooperative loop: draw, take one event, run its
    /// action to completion, repeat. Poll timeouts drive the tick used for
    /// notice expiry and the delayed post-save navigation.
    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await?;
                    }
                }
            } else {
                self.tick();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let username = self
            .sessions
            .current()
            .map(|s| s.username.clone())
            .unwrap_or_default();

        match self.view {
            AppView::Auth => auth::render(f, &self.auth),
            AppView::Splash => splash::render(f, &mut self.splash, &username),
            AppView::Editor => editor_view::render(f, &mut self.editor),
            AppView::Points => points::render(f, &mut self.points),
            AppView::Map => map_view::render(f, &self.map),
            AppView::Admin => admin::render(f, &mut self.admin, &username),
        }

        if let Some(notice) = &self.notice {
            render_notice(f, notice);
        }
    }

    fn tick(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks = notice.ticks.saturating_sub(1);
        }
        if self.notice.as_ref().is_some_and(|n| n.ticks == 0) {
            self.notice = None;
        }

        if let Some(remaining) = &mut self.return_to_splash_in {
            *remaining = remaining.saturating_sub(1);
        }
        if self.return_to_splash_in == Some(0) {
            self.return_to_splash_in = None;
            self.editor = EditorState::new_sheet();
            self.view = AppView::Splash;
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if self.view == AppView::Editor && self.editor.picker.is_some() {
            self.handle_picker_key(key).await;
            return Ok(());
        }

        match self.view {
            AppView::Auth => self.handle_auth_key(key),
            AppView::Splash => self.handle_splash_key(key).await,
            AppView::Editor => self.handle_editor_key(key).await,
            AppView::Points => self.handle_points_key(key).await,
            AppView::Map => self.handle_map_key(key),
            AppView::Admin => self.handle_admin_key(key).await,
        }
        Ok(())
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.auth.next_field(),
            KeyCode::Left | KeyCode::Right => self.auth.toggle_mode(),
            KeyCode::Backspace => self.auth.backspace(),
            KeyCode::Char(c) => self.auth.input(c),
            KeyCode::Enter => self.submit_auth(),
            _ => {}
        }
    }

    fn submit_auth(&mut self) {
        if self.auth.busy {
            return;
        }
        if self.auth.username.is_empty() || self.auth.password.is_empty() {
            self.notify_error("Please fill in all fields");
            return;
        }

        self.auth.busy = true;
        let result = match self.auth.mode {
            AuthMode::SignIn => self.sessions.login(&self.auth.username, &self.auth.password),
            AuthMode::Register => self
                .sessions
                .register(&self.auth.username, &self.auth.password),
        };
        self.auth.busy = false;

        match result {
            Ok(_) => {
                let message = match self.auth.mode {
                    AuthMode::SignIn => "Successfully logged in",
                    AuthMode::Register => "Account created. Welcome to the platform",
                };
                self.notify(message);
                self.view = AppView::Splash;
            }
            Err(crate::session::AuthError::InvalidCredentials) => {
                self.notify_error("Invalid email or password. Try: admin@gmail.com / test@123");
            }
            Err(e) => {
                warn!("auth failure: {}", e);
                self.notify_error("Authentication failed. Please try again.");
            }
        }
    }

    async fn handle_splash_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down => self.splash.next(),
            KeyCode::Up => self.splash.previous(),
            KeyCode::Enter => {
                let action = self.splash.selected_action();
                self.perform_splash_action(action).await;
            }
            KeyCode::Char('l') => self.logout(),
            KeyCode::Char(c) => {
                if let Some(action) = c.to_digit(10).and_then(SplashState::action_for_digit) {
                    self.perform_splash_action(action).await;
                }
            }
            _ => {}
        }
    }

    async fn perform_splash_action(&mut self, action: SplashAction) {
        match action {
            SplashAction::NewSheet => {
                self.editor = EditorState::new_sheet();
                self.view = AppView::Editor;
            }
            SplashAction::AddPoint => self.open_points().await,
            SplashAction::MapView => self.open_map().await,
            SplashAction::Admin => self.open_admin().await,
        }
    }

    async fn open_points(&mut self) {
        self.points = PointsState::default();
        self.view = AppView::Points;
        match self.store.list_sheets().await {
            Ok(sheets) => self.points.set_sheets(sheets),
            Err(e) => {
                warn!("failed to load sheets: {}", e);
                self.points.loading = false;
                self.notify_error("Failed to load sheets");
            }
        }
    }

    async fn open_map(&mut self) {
        self.map = MapState::default();
        self.view = AppView::Map;
        let sheets = self.store.list_sheets().await;
        let points = self.store.list_points().await;
        match (sheets, points) {
            (Ok(sheets), Ok(points)) => self.map.set_data(&sheets, &points),
            (Err(e), _) | (_, Err(e)) => {
                warn!("failed to load map data: {}", e);
                self.map.loading = false;
                self.notify_error("Failed to load map data");
            }
        }
    }

    async fn open_admin(&mut self) {
        self.admin = AdminState::default();
        self.view = AppView::Admin;
        let sheets = self.store.list_sheets().await;
        let points = self.store.list_points().await;
        match (sheets, points) {
            (Ok(sheets), Ok(points)) => self.admin.set_data(sheets, points),
            (Err(e), _) | (_, Err(e)) => {
                warn!("failed to load dashboard data: {}", e);
                self.admin.loading = false;
                self.notify_error("Failed to load dashboard data");
            }
        }
    }

    async fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.editor = EditorState::new_sheet();
                self.view = AppView::Splash;
            }
            KeyCode::Tab | KeyCode::Down => self.editor.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.editor.previous_focus(),
            KeyCode::Left => self.editor.cycle_colour(-1),
            KeyCode::Right => self.editor.cycle_colour(1),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Enter => match self.editor.focus {
                EditorFocus::Location => {
                    self.editor.picker = Some(PickerState::new(
                        self.editor.form.location,
                        self.config.map_center,
                    ));
                }
                EditorFocus::Save => self.save_sheet().await,
                _ => self.editor.next_focus(),
            },
            KeyCode::Char(c) => self.editor.input(c),
            _ => {}
        }
    }

    /// Validate and persist the draft; disabled while a save is in flight
    /// or the post-save countdown is running
    async fn save_sheet(&mut self) {
        if self.editor.saving || self.return_to_splash_in.is_some() {
            return;
        }

        let input = match self.editor.form.validate() {
            Ok(input) => input,
            Err(EditorError::MissingFields) => {
                self.notify_error("Please fill all required fields");
                return;
            }
        };

        self.editor.saving = true;
        let editing_id = self.editor.form.editing_id().map(str::to_string);
        let result = match &editing_id {
            Some(id) => self.store.update_sheet(id, input).await,
            None => self.store.create_sheet(input).await,
        };
        self.editor.saving = false;

        match result {
            Ok(_) => {
                self.notify(if editing_id.is_some() {
                    "Sheet updated successfully"
                } else {
                    "Sheet created successfully"
                });
                self.return_to_splash_in = Some(SAVE_RETURN_TICKS);
            }
            Err(e) => {
                warn!("save failed: {}", e);
                self.notify_error("Failed to save sheet. Please try again.");
            }
        }
    }

    async fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Cancel discards the pending selection
                self.editor.picker = None;
            }
            KeyCode::Up => self.nudge_picker(NUDGE_DEGREES, 0.0),
            KeyCode::Down => self.nudge_picker(-NUDGE_DEGREES, 0.0),
            KeyCode::Left => self.nudge_picker(0.0, -NUDGE_DEGREES),
            KeyCode::Right => self.nudge_picker(0.0, NUDGE_DEGREES),
            KeyCode::Char('r') => {
                if let Some(picker) = &mut self.editor.picker {
                    picker.simulate_click();
                }
            }
            KeyCode::Char('g') => self.picker_use_current_location().await,
            KeyCode::Enter => {
                if let Some(picker) = self.editor.picker.take() {
                    self.editor.form.location = Some(picker.pending);
                    self.notify("GPS coordinates captured successfully");
                }
            }
            _ => {}
        }
    }

    fn nudge_picker(&mut self, dlat: f64, dlng: f64) {
        if let Some(picker) = &mut self.editor.picker {
            picker.nudge(dlat, dlng);
        }
    }

    async fn picker_use_current_location(&mut self) {
        if let Some(picker) = &mut self.editor.picker {
            picker.acquiring = true;
        }
        let geo = Arc::clone(&self.geo);
        let result = geo.current_location().await;
        let Some(picker) = &mut self.editor.picker else {
            return;
        };
        picker.acquiring = false;

        match result {
            Ok(location) => {
                picker.pending = location;
                self.notify("Current GPS position set");
            }
            Err(LocationError::Unsupported) => {
                self.notify_error("Geolocation is not supported on this device");
            }
            Err(LocationError::PositionUnavailable) => {
                self.notify_error("Could not get current location. Please select manually on map.");
            }
        }
    }

    async fn handle_points_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.view = AppView::Splash,
            KeyCode::Down => self.points.next(),
            KeyCode::Up => self.points.previous(),
            KeyCode::Char('a') => self.add_point_here().await,
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(sheet) = self.points.selected_sheet().cloned() {
                    self.editor = EditorState::edit_sheet(&sheet);
                    self.view = AppView::Editor;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.points.selected_sheet().map(|s| s.id.clone()) {
                    self.delete_sheet(&id).await;
                    if let Ok(sheets) = self.store.list_sheets().await {
                        self.points.set_sheets(sheets);
                    }
                }
            }
            _ => {}
        }
    }

    /// Capture the device location and record it as a standalone point
    async fn add_point_here(&mut self) {
        let geo = Arc::clone(&self.geo);
        match geo.current_location().await {
            Ok(location) => match self.store.create_point(PointInput { location }).await {
                Ok(point) => {
                    self.notify(&format!(
                        "Point added at {:.6}, {:.6}",
                        point.location.lat, point.location.lng
                    ));
                }
                Err(e) => {
                    warn!("failed to create point: {}", e);
                    self.notify_error("Failed to save location point");
                }
            },
            Err(LocationError::Unsupported) => {
                self.notify_error("Geolocation is not supported on this device");
            }
            Err(LocationError::PositionUnavailable) => {
                self.notify_error("Could not get current location. Please try again.");
            }
        }
    }

    async fn delete_sheet(&mut self, id: &str) {
        match self.store.delete_sheet(id).await {
            Ok(()) => self.notify("Sheet deleted"),
            Err(e) => {
                warn!("failed to delete sheet {}: {}", id, e);
                self.notify_error("Failed to delete sheet");
            }
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.view = AppView::Splash,
            KeyCode::Down | KeyCode::Right => self.map.next(),
            KeyCode::Up | KeyCode::Left => self.map.previous(),
            _ => {}
        }
    }

    async fn handle_admin_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.view = AppView::Splash,
            KeyCode::Down => self.admin.next(),
            KeyCode::Up => self.admin.previous(),
            KeyCode::Char('e') => self.export_csv(),
            KeyCode::Char('d') => {
                if let Some(id) = self.admin.selected_sheet().map(|s| s.id.clone()) {
                    self.delete_sheet(&id).await;
                    self.open_admin_data().await;
                }
            }
            KeyCode::Char('l') => self.logout(),
            _ => {}
        }
    }

    /// Reload the admin data set without resetting the view
    async fn open_admin_data(&mut self) {
        let sheets = self.store.list_sheets().await;
        let points = self.store.list_points().await;
        if let (Ok(sheets), Ok(points)) = (sheets, points) {
            self.admin.set_data(sheets, points);
        }
    }

    fn export_csv(&mut self) {
        if self.admin.sheets.is_empty() {
            self.notify_error("No sheets available to export");
            return;
        }
        match export::export_sheets(
            &self.admin.sheets,
            Path::new(&self.config.export_dir),
            Utc::now().date_naive(),
        ) {
            Ok(path) => self.notify(&format!("Export successful: {}", path.display())),
            Err(e) => {
                warn!("export failed: {}", e);
                self.notify_error("Failed to export CSV");
            }
        }
    }

    fn logout(&mut self) {
        self.sessions.logout();
        self.auth = AuthState::default();
        self.view = AppView::Auth;
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(Notice {
            message: message.to_string(),
            error: false,
            ticks: NOTICE_TICKS,
        });
    }

    fn notify_error(&mut self, message: &str) {
        self.notice = Some(Notice {
            message: message.to_string(),
            error: true,
            ticks: NOTICE_TICKS,
        });
    }
}

fn render_notice(f: &mut Frame, notice: &Notice) {
    let area = f.area();
    if area.height == 0 {
        return;
    }
    let bar = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    let style = if notice.error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    f.render_widget(Clear, bar);
    f.render_widget(Paragraph::new(notice.message.clone()).style(style), bar);
}

/// Build the store and location provider from configuration and run the TUI
pub async fn run_app(config: Config) -> Result<()> {
    let store: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    let geo: Arc<dyn LocationProvider> = if config.geolocation_enabled {
        Arc::new(SimulatedGps::new(config.map_center))
    } else {
        Arc::new(SimulatedGps::unsupported(config.map_center))
    };

    let mut app = App::new(config, store, geo);
    app.run().await
}
