//! Main application state and logic for the MOTORDASH TUI.
//!
//! The `App` struct manages overall application state, view switching,
//! and drives the toast lifecycle from the single-threaded frame loop:
//! every frame reconciles the scheduler against the displayable alert set,
//! fires due deadlines, and routes finalized ids back to the alert store
//! as acknowledgements.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use motordash_core::logging::motordash_home;
use motordash_core::DashConfig;

use crate::alert_panel;
use crate::analytics_panel;
use crate::data::DataManager;
use crate::event::{AppEvent, InputHandler};
use crate::sensor_panel;
use crate::theme::ThemeManager;
use crate::toast::{ToastConfig, ToastPhase, ToastScheduler};
use crate::view::{LayoutMode, View};
use crate::widget::ToastOverlay;

/// Result type for app operations.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Target frame rate (60 FPS = ~16.67ms per frame).
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Header timestamp cache duration (update every second).
const TIMESTAMP_CACHE_DURATION: Duration = Duration::from_secs(1);

/// Main application state.
pub struct App {
    /// Current active view
    current_view: View,
    /// Input handler for key events
    input_handler: InputHandler,
    /// Whether the app should quit
    should_quit: bool,
    /// Whether to show the help overlay
    show_help: bool,
    /// Status message to display in the footer
    status_message: Option<String>,
    /// List scroll position for the Alerts view
    scroll_offset: usize,
    /// Data manager for feed and alert store
    data_manager: DataManager,
    /// Toast lifecycle scheduler
    toast_scheduler: ToastScheduler,
    /// Toast fingerprint from the previous frame (dirty detection)
    last_toast_state: Vec<(String, ToastPhase)>,
    /// Theme manager for color themes
    theme_manager: ThemeManager,
    /// Dirty flag - whether UI needs redraw
    dirty: bool,
    /// Cached timestamp for header (updated every second)
    cached_timestamp: Option<String>,
    last_timestamp_update: Instant,
}

impl App {
    /// Create a new app instance from the dashboard configuration.
    pub fn new(config: DashConfig) -> Self {
        let now = Instant::now();
        Self {
            current_view: View::default(),
            input_handler: InputHandler::new(),
            should_quit: false,
            show_help: false,
            status_message: None,
            scroll_offset: 0,
            data_manager: DataManager::new(&config),
            toast_scheduler: ToastScheduler::new(ToastConfig::from_dash_config(&config)),
            last_toast_state: Vec::new(),
            theme_manager: ThemeManager::from_config_name(&config.theme),
            dirty: true,
            cached_timestamp: None,
            last_timestamp_update: now,
        }
    }

    /// Returns the current view.
    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Returns whether the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Mark the UI as dirty (needs redraw).
    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if UI needs redraw and clear the dirty flag.
    fn take_dirty(&mut self) -> bool {
        if self.dirty {
            self.dirty = false;
            true
        } else {
            false
        }
    }

    /// Get cached timestamp or update if expired.
    fn get_cached_timestamp(&mut self) -> String {
        if self.cached_timestamp.is_none()
            || self.last_timestamp_update.elapsed() >= TIMESTAMP_CACHE_DURATION
        {
            self.cached_timestamp =
                Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
            self.last_timestamp_update = Instant::now();
        }
        self.cached_timestamp.clone().unwrap_or_default()
    }

    /// Switch to a specific view.
    pub fn switch_view(&mut self, view: View) {
        if self.current_view != view {
            self.current_view = view;
            self.scroll_offset = 0;
            self.mark_dirty();
            self.status_message = Some(format!(
                "{} (Press {} to return here)",
                view.title(),
                view.hotkey()
            ));
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let event = self.input_handler.handle_key(key);
        self.handle_app_event(event);
    }

    /// Handle an application event.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SwitchView(view) => self.switch_view(view),
            AppEvent::NextView => self.switch_view(self.current_view.next()),
            AppEvent::PrevView => self.switch_view(self.current_view.prev()),
            AppEvent::ShowHelp => {
                self.show_help = true;
                self.mark_dirty();
            }
            AppEvent::Quit | AppEvent::ForceQuit => self.should_quit = true,
            AppEvent::Cancel => {
                if self.show_help {
                    self.show_help = false;
                }
                self.mark_dirty();
            }
            AppEvent::NavigateUp => {
                if self.scroll_offset > 0 {
                    self.scroll_offset -= 1;
                    self.mark_dirty();
                }
            }
            AppEvent::NavigateDown => {
                self.scroll_offset += 1;
                self.mark_dirty();
            }
            AppEvent::DismissNewestToast => {
                self.dismiss_rendered_toast(1);
            }
            AppEvent::DismissToastAt(position) => {
                self.dismiss_rendered_toast(position);
            }
            AppEvent::AcknowledgeAll => {
                let count = self.data_manager.alert_store_mut().acknowledge_all();
                self.status_message = Some(format!("Acknowledged {count} alert(s)"));
                self.mark_dirty();
            }
            AppEvent::ToggleMotor => {
                let running = self.data_manager.toggle_motor();
                self.status_message = Some(if running {
                    "Motor started".to_string()
                } else {
                    "Motor stopped".to_string()
                });
                self.mark_dirty();
            }
            AppEvent::ExportAlerts => self.export_alerts(),
            AppEvent::CycleTheme => {
                let new_theme = self.theme_manager.cycle_theme();
                self.status_message = Some(format!("Theme: {}", new_theme.display_name()));
                self.mark_dirty();
            }
            AppEvent::None => {}
        }
    }

    /// Dismiss the toast at a 1-based rendered position (newest first).
    ///
    /// The overlay renders newest-first, so position 1 is the last entry of
    /// the scheduler's display order. Out-of-range positions and toasts
    /// already dismissing are silent no-ops.
    fn dismiss_rendered_toast(&mut self, position: usize) {
        let toasts = self.toast_scheduler.toasts();
        if position == 0 || position > toasts.len() {
            return;
        }
        let (id, _) = toasts[toasts.len() - position];
        let id = id.to_string();
        if self.toast_scheduler.dismiss(&id, Instant::now()) {
            self.status_message = Some(format!("Dismissed {id}"));
            self.mark_dirty();
        }
    }

    /// Export the alert history to a timestamped JSON file.
    fn export_alerts(&mut self) {
        let result = motordash_home().map(|home| {
            home.join("exports").join(format!(
                "alerts-{}.json",
                chrono::Local::now().format("%Y%m%d-%H%M%S")
            ))
        });

        match result {
            Ok(path) => {
                match alert_panel::export_alerts(self.data_manager.alert_store().all(), &path) {
                    Ok(()) => {
                        self.status_message = Some(format!("Exported to {}", path.display()));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "alert export failed");
                        self.status_message = Some(format!("Export failed: {e}"));
                    }
                }
            }
            Err(e) => {
                self.status_message = Some(format!("Export failed: {e}"));
            }
        }
        self.mark_dirty();
    }

    /// Run one pass of the toast pipeline.
    ///
    /// Reconciles the scheduler against the displayable set, fires due
    /// deadlines, and acknowledges finalized ids back to the store before
    /// the next reconciliation can observe them.
    fn advance_toasts(&mut self, now: Instant) {
        let displayable: Vec<String> = self
            .data_manager
            .alert_store()
            .displayable()
            .iter()
            .map(|a| a.id.clone())
            .collect();
        self.toast_scheduler
            .sync(displayable.iter().map(String::as_str), now);

        let finalized = self.toast_scheduler.tick(now);
        for id in &finalized {
            self.data_manager.alert_store_mut().acknowledge(id);
        }

        let toast_state: Vec<(String, ToastPhase)> = self
            .toast_scheduler
            .toasts()
            .into_iter()
            .map(|(id, phase)| (id.to_string(), phase))
            .collect();
        if toast_state != self.last_toast_state {
            self.last_toast_state = toast_state;
            self.mark_dirty();
        }
    }

    /// Run the main application loop.
    pub fn run(&mut self) -> AppResult<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.run_loop(&mut terminal);

        // Teardown: drop every pending toast deadline before the terminal
        // goes back, so no finalization outlives the view.
        self.toast_scheduler.clear();

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    /// The inner event loop with frame-rate limiting.
    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> AppResult<()> {
        while !self.should_quit {
            let frame_start = Instant::now();

            // Poll the feed; new data marks the UI dirty
            if self.data_manager.poll_updates() {
                self.mark_dirty();
            }

            // Toast lifecycle pass
            self.advance_toasts(Instant::now());

            // Only draw if dirty or the header clock needs a refresh
            let needs_redraw = self.take_dirty()
                || self.last_timestamp_update.elapsed() >= TIMESTAMP_CACHE_DURATION;
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
            }

            // Handle events with the remaining frame budget as timeout
            let elapsed = frame_start.elapsed();
            let event_timeout = if elapsed < FRAME_DURATION {
                FRAME_DURATION - elapsed
            } else {
                Duration::from_millis(10)
            };

            if event::poll(event_timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }
        }
        Ok(())
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: header, content, footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_content(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        // Help overlay if active
        if self.show_help {
            self.draw_help_overlay(frame, area);
        }

        // Toast overlay renders last so notifications sit on top
        self.draw_toasts(frame, chunks[1]);
    }

    /// Draw the header bar with cached timestamp and motor status.
    fn draw_header(&mut self, frame: &mut Frame, area: Rect) {
        let now = self.get_cached_timestamp();
        let theme = self.theme_manager.current();
        let title = format!(" MOTORDASH - {} ", self.current_view.title());
        let title_len = title.len();

        let (status_text, status_color) = if self.data_manager.snapshot().is_none() {
            ("[Loading...]".to_string(), theme.colors.status_warning)
        } else if self.data_manager.is_motor_running() {
            ("[Running]".to_string(), theme.colors.status_healthy)
        } else {
            ("[Stopped]".to_string(), theme.colors.text_dim)
        };

        let unacked = self.data_manager.alert_store().unacknowledged_count();
        let badge = if unacked > 0 {
            format!("⚠ {unacked} alert(s)")
        } else {
            String::new()
        };

        let right_len = now.len() + 2 + badge.len() + 2 + status_text.len();
        let spacing = area
            .width
            .saturating_sub(title_len as u16 + right_len as u16 + 2) as usize;

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                title,
                Style::default()
                    .fg(theme.colors.header)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(spacing)),
            Span::styled(now, Style::default().fg(theme.colors.text_dim)),
            Span::raw("  "),
            Span::styled(badge, Style::default().fg(theme.colors.status_warning)),
            Span::raw("  "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.colors.border_dim)),
        );

        frame.render_widget(header, area);
    }

    /// Draw the main content area based on current view.
    fn draw_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.current_view {
            View::Overview => self.draw_overview(frame, area),
            View::Sensors => {
                let content = sensor_panel::format_sensor_detail(self.data_manager.snapshot());
                self.draw_panel(frame, area, "Sensors", &content);
            }
            View::Analytics => {
                let content =
                    analytics_panel::format_analytics_detail(self.data_manager.analytics());
                self.draw_panel(frame, area, "Analytics", &content);
            }
            View::Alerts => {
                let content = alert_panel::format_alert_history(
                    self.data_manager.alert_store().all(),
                    self.scroll_offset,
                );
                self.draw_panel(frame, area, "Alert History", &content);
            }
        }
    }

    /// Draw the Overview view.
    ///
    /// Wide terminals get sensors and analytics side by side over a
    /// recent-alerts strip; narrow terminals stack all three.
    fn draw_overview(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        match LayoutMode::from_width(area.width) {
            LayoutMode::Wide => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[0]);

                let sensors = sensor_panel::format_sensor_summary(self.data_manager.snapshot());
                self.draw_panel(frame, columns[0], "Motor", &sensors);

                let analytics =
                    analytics_panel::format_analytics_summary(self.data_manager.analytics());
                self.draw_panel(frame, columns[1], "Analytics", &analytics);
            }
            LayoutMode::Narrow => {
                let sensors = sensor_panel::format_sensor_summary(self.data_manager.snapshot());
                self.draw_panel(frame, rows[0], "Motor", &sensors);
            }
        }

        let recent = alert_panel::format_recent_alerts(self.data_manager.alert_store().all(), 8);
        self.draw_panel(frame, rows[1], "Recent Alerts", &recent);
    }

    /// Draw a bordered panel with text content.
    fn draw_panel(&self, frame: &mut Frame, area: Rect, title: &str, content: &str) {
        let theme = self.theme_manager.current();
        let panel = Paragraph::new(content.to_string())
            .style(Style::default().fg(theme.colors.text))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.colors.border_dim))
                    .title(Span::styled(
                        format!(" {title} "),
                        Style::default().fg(theme.colors.header),
                    )),
            );
        frame.render_widget(panel, area);
    }

    /// Draw the footer with hotkey hints and the status message.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme_manager.current();
        let hotkey_style = Style::default().fg(theme.colors.hotkey);
        let mut hints = vec![
            Span::styled("[o]", hotkey_style),
            Span::raw("Overview "),
            Span::styled("[n]", hotkey_style),
            Span::raw("Sensors "),
            Span::styled("[a]", hotkey_style),
            Span::raw("Analytics "),
            Span::styled("[r]", hotkey_style),
            Span::raw("Alerts "),
            Span::styled("[x/1-9]", hotkey_style),
            Span::raw("Dismiss "),
            Span::styled("[c]", hotkey_style),
            Span::raw("Ack-all "),
            Span::styled("[s]", hotkey_style),
            Span::raw("Start/Stop "),
            Span::styled("[?]", hotkey_style),
            Span::raw("Help "),
            Span::styled("[q]", hotkey_style),
            Span::raw("Quit"),
        ];

        if let Some(message) = &self.status_message {
            hints.push(Span::raw("  |  "));
            hints.push(Span::styled(
                message.clone(),
                Style::default().fg(theme.colors.text_dim),
            ));
        }

        let footer = Paragraph::new(Line::from(hints))
            .style(Style::default().fg(theme.colors.text_dim))
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(footer, area);
    }

    /// Draw the toast overlay in the top-right of the content area.
    fn draw_toasts(&mut self, frame: &mut Frame, area: Rect) {
        let store = self.data_manager.alert_store();
        let toasts: Vec<_> = self
            .toast_scheduler
            .toasts()
            .into_iter()
            .filter_map(|(id, phase)| store.get(id).map(|alert| (alert, phase)))
            .collect();

        if toasts.is_empty() {
            return;
        }

        let overlay = ToastOverlay::new(toasts, self.theme_manager.current());
        frame.render_widget(overlay, area);
    }

    /// Draw the help overlay.
    fn draw_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme_manager.current();
        let width = area.width.min(60);
        let height = area.height.min(18);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        let text = "\
MOTORDASH Help

Views
  o        Overview
  n        Sensors
  a        Analytics
  r        Alert history
  Tab      Cycle views

Alerts
  x        Dismiss newest toast
  1-9      Dismiss toast by position
  c        Acknowledge all alerts
  e        Export alert history (JSON)

Motor
  s        Start/stop motor

Esc closes this help. q quits.";

        frame.render_widget(Clear, popup);
        let help = Paragraph::new(text)
            .style(Style::default().fg(theme.colors.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.colors.header))
                    .title(Span::styled(
                        " Help ",
                        Style::default()
                            .fg(theme.colors.header)
                            .add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(help, popup);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DashConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(DashConfig::default())
    }

    #[test]
    fn test_switch_view() {
        let mut app = app();
        assert_eq!(app.current_view(), View::Overview);
        app.handle_app_event(AppEvent::SwitchView(View::Analytics));
        assert_eq!(app.current_view(), View::Analytics);
    }

    #[test]
    fn test_quit_events() {
        let mut app = app();
        assert!(!app.should_quit());
        app.handle_app_event(AppEvent::Quit);
        assert!(app.should_quit());

        let mut app = App::new(DashConfig::default());
        app.handle_app_event(AppEvent::ForceQuit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_key_event_routing() {
        let mut app = app();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(app.current_view(), View::Sensors);
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = app();
        app.handle_app_event(AppEvent::ShowHelp);
        assert!(app.show_help);
        app.handle_app_event(AppEvent::Cancel);
        assert!(!app.show_help);
    }

    #[test]
    fn test_toggle_motor_updates_status() {
        let mut app = app();
        app.handle_app_event(AppEvent::ToggleMotor);
        assert_eq!(app.status_message.as_deref(), Some("Motor stopped"));
        app.handle_app_event(AppEvent::ToggleMotor);
        assert_eq!(app.status_message.as_deref(), Some("Motor started"));
    }

    #[test]
    fn test_dismiss_out_of_range_is_noop() {
        let mut app = app();
        // No toasts exist yet; nothing should panic or change state
        app.handle_app_event(AppEvent::DismissNewestToast);
        app.handle_app_event(AppEvent::DismissToastAt(5));
        assert!(app.toast_scheduler.is_empty());
    }

    #[test]
    fn test_toast_pipeline_acknowledges_finalized() {
        use motordash_core::types::{Alert, AlertSeverity};

        let mut app = app();
        app.data_manager.alert_store_mut().push(Alert::new(
            "a1",
            AlertSeverity::High,
            "overheat",
            "hot",
            "MOTOR-001",
        ));

        let t0 = Instant::now();
        app.advance_toasts(t0);
        assert_eq!(app.toast_scheduler.phase("a1"), Some(ToastPhase::Visible));

        // Past dwell: dismissing
        app.advance_toasts(t0 + Duration::from_millis(5000));
        assert_eq!(
            app.toast_scheduler.phase("a1"),
            Some(ToastPhase::Dismissing)
        );

        // Past collapse: finalized and acknowledged upstream
        app.advance_toasts(t0 + Duration::from_millis(5300));
        assert_eq!(app.toast_scheduler.phase("a1"), None);
        assert!(app
            .data_manager
            .alert_store()
            .get("a1")
            .is_some_and(|a| a.acknowledged));

        // Subsequent passes do not resurrect the toast
        app.advance_toasts(t0 + Duration::from_millis(6000));
        assert!(app.toast_scheduler.is_empty());
    }

    #[test]
    fn test_bulk_acknowledge_cancels_toasts() {
        use motordash_core::types::{Alert, AlertSeverity};

        let mut app = app();
        app.data_manager.alert_store_mut().push(Alert::new(
            "a1",
            AlertSeverity::High,
            "overheat",
            "hot",
            "MOTOR-001",
        ));

        let t0 = Instant::now();
        app.advance_toasts(t0);
        assert_eq!(app.toast_scheduler.len(), 1);

        app.handle_app_event(AppEvent::AcknowledgeAll);
        app.advance_toasts(t0 + Duration::from_millis(100));
        assert!(app.toast_scheduler.is_empty());
    }
}
