//! Shared type definitions used across MOTORDASH crates.
//!
//! This module defines the alert record consumed by the dashboard's toast
//! subsystem, the sensor snapshot rendered by the sensor panels, and the
//! analytics payload produced by the telemetry feed. Analytics values are
//! opaque to the dashboard: it renders them, it never computes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an alert.
pub type AlertId = String;

/// Unique identifier for a machine.
pub type MachineId = String;

/// Alert severity level.
///
/// Any severity string outside the four known values deserializes to
/// [`AlertSeverity::Unknown`], which is a display category, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Advisory condition
    Low = 1,
    /// Condition worth watching
    Medium = 2,
    /// Condition needing prompt attention
    High = 3,
    /// Condition needing immediate attention
    Critical = 4,
    /// Unrecognized severity string; rendered in the default style
    #[default]
    #[serde(other)]
    Unknown = 0,
}

impl AlertSeverity {
    /// Get the icon for this severity level.
    pub fn icon(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "✖",
            AlertSeverity::High => "⚠",
            AlertSeverity::Medium => "◆",
            AlertSeverity::Low => "ℹ",
            AlertSeverity::Unknown => "•",
        }
    }

    /// Get the display label for this severity level.
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "CRITICAL",
            AlertSeverity::High => "HIGH",
            AlertSeverity::Medium => "MEDIUM",
            AlertSeverity::Low => "LOW",
            AlertSeverity::Unknown => "UNKNOWN",
        }
    }

    /// Parse a severity from a free-form string.
    ///
    /// Unrecognized values map to [`AlertSeverity::Unknown`].
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "critical" => AlertSeverity::Critical,
            "high" => AlertSeverity::High,
            "medium" => AlertSeverity::Medium,
            "low" => AlertSeverity::Low,
            _ => AlertSeverity::Unknown,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single machine alert.
///
/// Alerts are owned by the dashboard's alert store; the toast subsystem
/// references them by id only and never mutates content fields. The `acknowledged` flag is flipped exactly once, by the store,
/// when the toast lifecycle finalizes or when an external bulk-clear runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique, stable alert identifier
    pub id: AlertId,
    /// Severity level
    pub severity: AlertSeverity,
    /// Free-form classification label (e.g. "overheat", "vibration")
    pub alert_type: String,
    /// Human-readable message
    pub message: String,
    /// Originating machine identifier
    pub machine_id: MachineId,
    /// When the alert was raised (display only)
    pub timestamp: DateTime<Utc>,
    /// Whether the alert has been acknowledged
    pub acknowledged: bool,
}

impl Alert {
    /// Create a new unacknowledged alert raised now.
    pub fn new(
        id: impl Into<AlertId>,
        severity: AlertSeverity,
        alert_type: impl Into<String>,
        message: impl Into<String>,
        machine_id: impl Into<MachineId>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            alert_type: alert_type.into(),
            message: message.into(),
            machine_id: machine_id.into(),
            timestamp: Utc::now(),
            acknowledged: false,
        }
    }

    /// Format for one-line display in the alert history panel.
    pub fn format_compact(&self) -> String {
        let ack_marker = if self.acknowledged { "✓" } else { " " };
        format!(
            "{} {} [{}] {} - {}",
            ack_marker,
            self.severity.icon(),
            self.machine_id,
            self.alert_type,
            self.message
        )
    }

    /// Format for detailed display.
    pub fn format_detail(&self) -> String {
        let time = self.timestamp.format("%H:%M:%S");
        format!(
            "[{}] {} {} {} - {}\n  {}",
            time,
            self.severity.icon(),
            self.severity.label(),
            self.machine_id,
            self.alert_type,
            self.message
        )
    }
}

/// Maintenance status reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// No maintenance needed
    #[default]
    Ok,
    /// Maintenance recommended soon
    Due,
    /// Maintenance overdue
    Overdue,
}

impl MaintenanceStatus {
    /// Returns the status label for TUI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Due => "DUE",
            Self::Overdue => "OVERDUE",
        }
    }
}

/// One reading cycle of the motor sensor array.
///
/// Field set mirrors the physical sensor suite of the motor test rig:
/// electrical, mechanical, thermal, and environmental channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Machine this snapshot belongs to
    pub machine_id: MachineId,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Whether the motor is running
    pub running: bool,
    /// Shaft speed in RPM
    pub rpm: f64,
    /// Winding temperature in Celsius
    pub temperature_c: f64,
    /// Vibration along X axis (mm/s)
    pub vibration_x: f64,
    /// Vibration along Y axis (mm/s)
    pub vibration_y: f64,
    /// Vibration along Z axis (mm/s)
    pub vibration_z: f64,
    /// Supply voltage (V)
    pub voltage: f64,
    /// Drawn current (A)
    pub current: f64,
    /// Power consumption (kW)
    pub power_kw: f64,
    /// Shaft torque (Nm)
    pub torque_nm: f64,
    /// Electrical efficiency (0-100)
    pub efficiency_pct: f64,
    /// Oil pressure (bar)
    pub oil_pressure_bar: f64,
    /// Acoustic level (dB)
    pub sound_db: f64,
    /// Bearing condition (0-100, 100 = new)
    pub bearing_health_pct: f64,
    /// Cumulative operating hours
    pub operating_hours: f64,
    /// Maintenance status
    pub maintenance: MaintenanceStatus,
}

impl SensorSnapshot {
    /// Aggregate vibration magnitude across the three axes.
    pub fn vibration_magnitude(&self) -> f64 {
        (self.vibration_x.powi(2) + self.vibration_y.powi(2) + self.vibration_z.powi(2)).sqrt()
    }
}

/// Risk classification attached to an analytics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    Elevated,
    Severe,
}

impl RiskLevel {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::Elevated => "ELEVATED",
            Self::Severe => "SEVERE",
        }
    }
}

/// Per-channel trend slope (units per hour) over the recent window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct TrendSlopes {
    /// Temperature trend (C/h)
    pub temperature: f64,
    /// Vibration magnitude trend (mm/s per hour)
    pub vibration: f64,
    /// Efficiency trend (pct-points/h)
    pub efficiency: f64,
}

/// A detected anomaly in the recent sensor window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    /// Channel the anomaly was detected on (e.g. "temperature")
    pub channel: String,
    /// Deviation score (higher = further from baseline)
    pub score: f64,
    /// Human-readable description
    pub description: String,
}

/// Overall Equipment Effectiveness factors (each 0-100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct OeeFactors {
    /// Fraction of scheduled time the motor was available
    pub availability: f64,
    /// Actual vs. rated throughput
    pub performance: f64,
    /// Good output vs. total output
    pub quality: f64,
}

impl OeeFactors {
    /// Composite OEE score (product of the three factors).
    pub fn composite(&self) -> f64 {
        (self.availability / 100.0) * (self.performance / 100.0) * (self.quality / 100.0) * 100.0
    }
}

/// Analytics payload consumed read-only by the dashboard.
///
/// Produced by the analytics side of the feed; the dashboard never derives
/// these values itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Machine the report covers
    pub machine_id: MachineId,
    /// When the report was produced
    pub timestamp: DateTime<Utc>,
    /// Overall health score (0-100)
    pub health_score: f64,
    /// Risk classification
    pub risk: RiskLevel,
    /// Recent trend slopes
    pub trends: TrendSlopes,
    /// Detected anomalies, most significant first
    pub anomalies: Vec<Anomaly>,
    /// OEE factor breakdown
    pub oee: OeeFactors,
}
