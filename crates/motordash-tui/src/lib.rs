//! Terminal UI for MOTORDASH.
//!
//! This crate provides the Ratatui-based terminal interface for MOTORDASH.
//!
//! ## Features
//!
//! - Multi-view motor dashboard with hotkey navigation
//! - Live sensor readouts from the telemetry feed
//! - Analytics display (health, risk, trends, OEE)
//! - Alert history with JSON export
//! - Transient toast notifications with a two-phase
//!   dismiss animation and deadline-driven auto-dismiss
//!
//! ## Hotkeys
//!
//! - `o` - Overview (dashboard)
//! - `n` - Sensors view
//! - `a` - Analytics view
//! - `r` - Alerts view
//! - `x` / `1`-`9` - Dismiss toasts
//! - `c` - Acknowledge all alerts
//! - `s` - Start/stop the motor
//! - `e` - Export alert history
//! - `t` - Cycle color theme
//! - `?` or `h` - Help
//! - `q` - Quit
//! - `Tab` - Cycle views
//! - `Esc` - Cancel/back

pub mod alert_panel;
pub mod analytics_panel;
pub mod app;
pub mod data;
pub mod event;
pub mod sensor_panel;
pub mod theme;
pub mod toast;
pub mod view;
pub mod widget;

pub use app::{App, AppResult};
pub use data::{AlertStore, DataManager};
pub use toast::{ToastConfig, ToastPhase, ToastScheduler};
pub use view::View;
