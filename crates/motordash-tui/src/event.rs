//! Event handling for the MOTORDASH TUI.
//!
//! Provides keyboard input handling and event routing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::View;

/// Application-level events that can trigger state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Switch to a specific view
    SwitchView(View),
    /// Cycle to the next view
    NextView,
    /// Cycle to the previous view
    PrevView,
    /// Show help overlay
    ShowHelp,
    /// Request application quit
    Quit,
    /// Force quit (Ctrl+C)
    ForceQuit,
    /// Cancel current operation / close overlay
    Cancel,
    /// Navigate up in a list
    NavigateUp,
    /// Navigate down in a list
    NavigateDown,
    /// Dismiss the newest visible toast
    DismissNewestToast,
    /// Dismiss the toast at a 1-based display position
    DismissToastAt(usize),
    /// Acknowledge every outstanding alert (bulk clear)
    AcknowledgeAll,
    /// Toggle motor start/stop
    ToggleMotor,
    /// Export alert history to JSON
    ExportAlerts,
    /// Cycle color theme
    CycleTheme,
    /// No action needed
    None,
}

/// Input handler for converting key events to app events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Create a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Handle a key event and return the corresponding app event.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppEvent {
        // Ctrl+C always force quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppEvent::ForceQuit;
        }

        // Escape cancels current operation / closes overlay
        if key.code == KeyCode::Esc {
            return AppEvent::Cancel;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Char('Q') => AppEvent::Quit,

            // Help
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => AppEvent::ShowHelp,

            // View navigation hotkeys
            KeyCode::Char('o') | KeyCode::Char('O') => AppEvent::SwitchView(View::Overview),
            KeyCode::Char('n') | KeyCode::Char('N') => AppEvent::SwitchView(View::Sensors),
            KeyCode::Char('a') | KeyCode::Char('A') => AppEvent::SwitchView(View::Analytics),
            KeyCode::Char('r') | KeyCode::Char('R') => AppEvent::SwitchView(View::Alerts),

            // Tab cycling
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    AppEvent::PrevView
                } else {
                    AppEvent::NextView
                }
            }
            KeyCode::BackTab => AppEvent::PrevView,

            // List navigation
            KeyCode::Up | KeyCode::Char('k') => AppEvent::NavigateUp,
            KeyCode::Down | KeyCode::Char('j') => AppEvent::NavigateDown,

            // Toast dismissal
            KeyCode::Char('x') | KeyCode::Char('X') => AppEvent::DismissNewestToast,
            KeyCode::Char(c @ '1'..='9') => {
                AppEvent::DismissToastAt(c.to_digit(10).unwrap_or(1) as usize)
            }

            // Bulk acknowledge
            KeyCode::Char('c') | KeyCode::Char('C') => AppEvent::AcknowledgeAll,

            // Motor control
            KeyCode::Char('s') | KeyCode::Char('S') => AppEvent::ToggleMotor,

            // Alert export
            KeyCode::Char('e') | KeyCode::Char('E') => AppEvent::ExportAlerts,

            // Theme
            KeyCode::Char('t') | KeyCode::Char('T') => AppEvent::CycleTheme,

            _ => AppEvent::None,
        }
    }
}
