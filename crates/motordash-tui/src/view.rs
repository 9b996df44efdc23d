//! View types and navigation for the MOTORDASH TUI.
//!
//! Views represent the different screens available in the dashboard.

use std::fmt;

/// Available views in the MOTORDASH dashboard.
///
/// Each view represents a distinct screen with its own content.
/// Views can be switched using hotkeys or the Tab key to cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Overview/dashboard showing sensors, analytics, and recent alerts
    #[default]
    Overview,
    /// Full sensor readout
    Sensors,
    /// Analytics detail (health, risk, trends, anomalies, OEE)
    Analytics,
    /// Alert history including acknowledged alerts
    Alerts,
}

impl View {
    /// Returns the hotkey character for this view.
    pub fn hotkey(&self) -> char {
        match self {
            View::Overview => 'o',
            View::Sensors => 'n',
            View::Analytics => 'a',
            View::Alerts => 'r',
        }
    }

    /// Returns the display title for this view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Sensors => "Sensors",
            View::Analytics => "Analytics",
            View::Alerts => "Alerts",
        }
    }

    /// All views in display order (for Tab cycling).
    pub const ALL: [View; 4] = [View::Overview, View::Sensors, View::Analytics, View::Alerts];

    /// Returns the next view in the cycle (for Tab navigation).
    pub fn next(&self) -> View {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Returns the previous view in the cycle (for Shift+Tab navigation).
    pub fn prev(&self) -> View {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }

    /// Try to parse a view from a hotkey character.
    pub fn from_hotkey(key: char) -> Option<View> {
        match key.to_ascii_lowercase() {
            'o' => Some(View::Overview),
            'n' => Some(View::Sensors),
            'a' => Some(View::Analytics),
            'r' => Some(View::Alerts),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Layout mode based on terminal dimensions.
///
/// The TUI adapts its layout based on available screen real estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Wide layout (120+ cols): side-by-side panels on the Overview.
    Wide,
    /// Narrow layout (<120 cols): stacked panels.
    Narrow,
}

impl LayoutMode {
    /// Determine the layout mode based on terminal width.
    pub fn from_width(width: u16) -> Self {
        if width >= 120 {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        }
    }
}
