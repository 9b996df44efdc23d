//! # motordash-core
//!
//! Core types, errors, and utilities for the MOTORDASH monitoring system.
//!
//! This crate provides:
//! - [`DashError`] - Error types for all MOTORDASH operations
//! - [`logging`] - Tracing setup and log management utilities
//! - [`types`] - Alert, sensor, and analytics type definitions
//! - [`config`] - Dashboard configuration loading
//! - [`feed`] - Simulated motor telemetry feed
//!
//! ## Example
//!
//! ```no_run
//! use motordash_core::{logging, DashConfig};
//!
//! fn main() -> motordash_core::Result<()> {
//!     // Initialize logging
//!     let _guard = logging::init_logging(None, false)?;
//!
//!     // Load configuration (falls back to defaults if absent)
//!     let config = DashConfig::load_default()?;
//!     tracing::info!(machine_id = %config.machine_id, "configuration loaded");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod types;

// Re-export main types for convenience
pub use config::DashConfig;
pub use error::{DashError, Result};
pub use feed::TelemetryFeed;
pub use logging::{init_logging, LogGuard};
pub use types::{Alert, AlertSeverity, AnalyticsReport, SensorSnapshot};
