//! Theme system for the MOTORDASH TUI.
//!
//! Provides named color palettes with runtime cycling. Severity colors are
//! part of the palette so alert rendering stays consistent across panels
//! and the toast overlay.

use motordash_core::types::AlertSeverity;
use ratatui::style::Color;

/// Theme name identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    /// Default theme
    #[default]
    Default,
    /// Dark theme (enhanced contrast)
    Dark,
    /// Light theme (for bright environments)
    Light,
}

impl ThemeName {
    /// All available themes in cycle order.
    pub fn all() -> &'static [ThemeName] {
        &[ThemeName::Default, ThemeName::Dark, ThemeName::Light]
    }

    /// Get the next theme in the cycle.
    pub fn next(&self) -> ThemeName {
        let themes = Self::all();
        let current_idx = themes.iter().position(|t| t == self).unwrap_or(0);
        themes[(current_idx + 1) % themes.len()]
    }

    /// Get the display name for this theme.
    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Default => "Default",
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
        }
    }

    /// Parse a theme name from a configuration string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(ThemeName::Default),
            "dark" => Some(ThemeName::Dark),
            "light" => Some(ThemeName::Light),
            _ => None,
        }
    }
}

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Primary headers and focused borders
    pub header: Color,
    /// Hotkey hints
    pub hotkey: Color,
    /// Regular text
    pub text: Color,
    /// De-emphasized text
    pub text_dim: Color,
    /// Unfocused borders
    pub border_dim: Color,
    /// Healthy/OK status
    pub status_healthy: Color,
    /// Warning status
    pub status_warning: Color,
    /// Error status
    pub status_error: Color,
    /// Critical severity
    pub severity_critical: Color,
    /// High severity
    pub severity_high: Color,
    /// Medium severity
    pub severity_medium: Color,
    /// Low severity
    pub severity_low: Color,
    /// Unknown severity
    pub severity_unknown: Color,
}

impl ThemeColors {
    /// Color for an alert severity.
    pub fn severity(&self, severity: AlertSeverity) -> Color {
        match severity {
            AlertSeverity::Critical => self.severity_critical,
            AlertSeverity::High => self.severity_high,
            AlertSeverity::Medium => self.severity_medium,
            AlertSeverity::Low => self.severity_low,
            AlertSeverity::Unknown => self.severity_unknown,
        }
    }
}

/// A complete theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme identity
    pub name: ThemeName,
    /// Palette
    pub colors: ThemeColors,
}

impl Theme {
    /// Build the palette for a theme name.
    pub fn from_name(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Default => ThemeColors {
                header: Color::Cyan,
                hotkey: Color::Yellow,
                text: Color::White,
                text_dim: Color::DarkGray,
                border_dim: Color::DarkGray,
                status_healthy: Color::Green,
                status_warning: Color::Yellow,
                status_error: Color::Red,
                severity_critical: Color::Red,
                severity_high: Color::LightRed,
                severity_medium: Color::Yellow,
                severity_low: Color::Blue,
                severity_unknown: Color::Gray,
            },
            ThemeName::Dark => ThemeColors {
                header: Color::LightCyan,
                hotkey: Color::LightYellow,
                text: Color::Gray,
                text_dim: Color::DarkGray,
                border_dim: Color::Black,
                status_healthy: Color::LightGreen,
                status_warning: Color::LightYellow,
                status_error: Color::LightRed,
                severity_critical: Color::LightRed,
                severity_high: Color::Red,
                severity_medium: Color::LightYellow,
                severity_low: Color::LightBlue,
                severity_unknown: Color::DarkGray,
            },
            ThemeName::Light => ThemeColors {
                header: Color::Blue,
                hotkey: Color::Magenta,
                text: Color::Black,
                text_dim: Color::Gray,
                border_dim: Color::Gray,
                status_healthy: Color::Green,
                status_warning: Color::Magenta,
                status_error: Color::Red,
                severity_critical: Color::Red,
                severity_high: Color::Magenta,
                severity_medium: Color::Blue,
                severity_low: Color::Cyan,
                severity_unknown: Color::Gray,
            },
        };
        Self { name, colors }
    }
}

/// Runtime theme manager.
#[derive(Debug)]
pub struct ThemeManager {
    current: Theme,
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(ThemeName::Default)
    }
}

impl ThemeManager {
    /// Create a manager starting on the given theme.
    pub fn new(name: ThemeName) -> Self {
        Self {
            current: Theme::from_name(name),
        }
    }

    /// Create a manager from a configuration string, falling back to default.
    pub fn from_config_name(name: &str) -> Self {
        let theme_name = ThemeName::parse(name).unwrap_or_default();
        Self::new(theme_name)
    }

    /// The current theme.
    pub fn current(&self) -> &Theme {
        &self.current
    }

    /// Cycle to the next theme, returning its name.
    pub fn cycle_theme(&mut self) -> ThemeName {
        let next = self.current.name.next();
        self.current = Theme::from_name(next);
        next
    }
}
