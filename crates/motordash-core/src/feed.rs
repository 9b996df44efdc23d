//! Simulated motor telemetry feed.
//!
//! Stands in for the plant-floor data source: produces sensor snapshots,
//! analytics reports, and threshold-driven alerts for a single motor. The
//! dashboard consumes all three read-only; in particular the analytics
//! payload (health score, risk, trends, anomalies, OEE) is produced here
//! and never derived by the UI.
//!
//! The simulation uses thermal-mass temperature dynamics, load cycles, and
//! wear accumulation so the dashboard has plausible data to render, plus a
//! small random jitter on every channel.

use std::collections::HashSet;
use std::collections::VecDeque;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{
    Alert, AlertSeverity, AnalyticsReport, Anomaly, MaintenanceStatus, OeeFactors, RiskLevel,
    SensorSnapshot, TrendSlopes,
};

/// Rated shaft speed of the simulated motor (RPM).
const RATED_RPM: f64 = 1480.0;

/// Ambient temperature baseline (Celsius).
const AMBIENT_C: f64 = 22.0;

/// Number of snapshots kept for trend estimation.
const TREND_WINDOW: usize = 60;

/// Simulated telemetry feed for one motor.
///
/// Call [`TelemetryFeed::advance`] on every poll interval, then read the
/// latest [`SensorSnapshot`] / [`AnalyticsReport`] and drain any alerts the
/// threshold monitor raised during the step.
pub struct TelemetryFeed {
    machine_id: String,
    rng: StdRng,
    running: bool,
    rpm: f64,
    target_rpm: f64,
    temperature_c: f64,
    load: f64,
    bearing_wear: f64,
    oil_degradation: f64,
    operating_hours: f64,
    total_hours: f64,
    running_hours: f64,
    history: VecDeque<SensorSnapshot>,
    /// Threshold conditions currently latched (no duplicate alert while latched)
    latched: HashSet<&'static str>,
    /// Monotonic sequence for unique alert ids
    alert_seq: u64,
    pending_alerts: Vec<Alert>,
}

impl TelemetryFeed {
    /// Create a feed for the given machine, seeded for reproducible jitter.
    pub fn new(machine_id: impl Into<String>) -> Self {
        Self::with_seed(machine_id, rand::random())
    }

    /// Create a feed with an explicit RNG seed (deterministic, for tests).
    pub fn with_seed(machine_id: impl Into<String>, seed: u64) -> Self {
        Self {
            machine_id: machine_id.into(),
            rng: StdRng::seed_from_u64(seed),
            running: true,
            rpm: RATED_RPM,
            target_rpm: RATED_RPM,
            temperature_c: 58.0,
            load: 0.75,
            bearing_wear: 0.0,
            oil_degradation: 0.0,
            operating_hours: 1200.0,
            total_hours: 0.0,
            running_hours: 0.0,
            history: VecDeque::with_capacity(TREND_WINDOW),
            latched: HashSet::new(),
            alert_seq: 0,
            pending_alerts: Vec::new(),
        }
    }

    /// Whether the motor is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start the motor.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            tracing::info!(machine_id = %self.machine_id, "motor started");
        }
    }

    /// Stop the motor.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::info!(machine_id = %self.machine_id, "motor stopped");
        }
    }

    /// Toggle the motor run state, returning the new state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    /// Advance the simulation by `elapsed_secs` and record a snapshot.
    pub fn advance(&mut self, elapsed_secs: f64) {
        self.total_hours += elapsed_secs / 3600.0;

        if self.running {
            self.running_hours += elapsed_secs / 3600.0;
            self.operating_hours += elapsed_secs / 3600.0;

            // Load follows a slow production cycle with jitter
            let cycle = (self.operating_hours * 0.05).sin() * 0.15;
            let demand = (self.operating_hours * 0.2).sin() * 0.10;
            self.load = (0.75 + cycle + demand + self.jitter(0.02)).clamp(0.2, 1.0);

            // Wear accumulates with load; oil degrades faster when hot
            self.bearing_wear += self.load * (elapsed_secs / 3600.0) * 0.0002;
            let oil_temp_factor = (self.temperature_c - 65.0) / 20.0;
            self.oil_degradation +=
                (1.0 + oil_temp_factor * 0.3) * (elapsed_secs / 3600.0) * 0.00015;

            // Thermal mass: heat from load and speed, cooling toward ambient
            let heat = self.load * 15.0 + (self.rpm / 2500.0) * 8.0;
            let cooling = 0.8 + (self.rpm / 2500.0) * 0.4;
            let temp_change =
                (heat - cooling * (self.temperature_c - AMBIENT_C)) * (elapsed_secs / 60.0);
            self.temperature_c = (self.temperature_c + temp_change).clamp(AMBIENT_C, 120.0);

            // Speed tracks target with load and temperature response
            let load_response = (self.load - 0.7) * 300.0;
            let temp_response = (self.temperature_c - 65.0) * 1.5;
            let delta = (self.target_rpm + load_response - temp_response - self.rpm) * 0.1;
            self.rpm = (self.rpm + delta * (elapsed_secs / 60.0) + self.jitter(3.0))
                .clamp(self.target_rpm * 0.7, self.target_rpm * 1.3);
        } else {
            // Spin-down and cool-down
            self.rpm = (self.rpm * 0.90).max(0.0);
            self.temperature_c =
                AMBIENT_C + (self.temperature_c - AMBIENT_C) * (1.0 - elapsed_secs / 120.0).max(0.0);
            self.load = 0.0;
        }

        let snapshot = self.build_snapshot();
        self.check_thresholds(&snapshot);

        if self.history.len() == TREND_WINDOW {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }

    /// Latest sensor snapshot, if the feed has advanced at least once.
    pub fn snapshot(&self) -> Option<&SensorSnapshot> {
        self.history.back()
    }

    /// Current analytics report, if the feed has advanced at least once.
    pub fn analytics(&self) -> Option<AnalyticsReport> {
        let latest = self.history.back()?;

        let health = self.health_score(latest);
        let risk = if health < 40.0 {
            RiskLevel::Severe
        } else if health < 60.0 {
            RiskLevel::Elevated
        } else if health < 80.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };

        Some(AnalyticsReport {
            machine_id: self.machine_id.clone(),
            timestamp: latest.timestamp,
            health_score: health,
            risk,
            trends: self.trend_slopes(),
            anomalies: self.detect_anomalies(latest),
            oee: self.oee(latest),
        })
    }

    /// Take any alerts raised since the last drain, in raise order.
    pub fn drain_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.pending_alerts)
    }

    fn jitter(&mut self, scale: f64) -> f64 {
        self.rng.gen_range(-scale..=scale)
    }

    fn build_snapshot(&mut self) -> SensorSnapshot {
        let efficiency = self.efficiency();
        let vibration = self.vibration_base();
        let power = if self.running {
            (4.5 + self.load * 1.8
                + (100.0 - efficiency) * 0.15
                + (self.temperature_c - 65.0).max(0.0) * 0.05)
                .clamp(2.0, 15.0)
        } else {
            0.0
        };
        let voltage = if self.running {
            400.0 + self.jitter(2.5)
        } else {
            0.0
        };
        let current = if voltage > 0.0 {
            power * 1000.0 / (voltage * 1.732 * 0.85)
        } else {
            0.0
        };

        let maintenance = if self.bearing_wear > 0.1
            || self.oil_degradation > 0.05
            || self.temperature_c > 90.0
        {
            MaintenanceStatus::Overdue
        } else if self.bearing_wear > 0.05
            || self.temperature_c > 80.0
            || efficiency < 85.0
        {
            MaintenanceStatus::Due
        } else {
            MaintenanceStatus::Ok
        };

        SensorSnapshot {
            machine_id: self.machine_id.clone(),
            timestamp: Utc::now(),
            running: self.running,
            rpm: self.rpm,
            temperature_c: self.temperature_c,
            vibration_x: vibration * 0.6 + self.jitter(0.1),
            vibration_y: vibration * 0.5 + self.jitter(0.1),
            vibration_z: vibration * 0.3 + self.jitter(0.05),
            voltage,
            current,
            power_kw: power,
            torque_nm: if self.rpm > 1.0 {
                power * 9549.0 / self.rpm
            } else {
                0.0
            },
            efficiency_pct: efficiency,
            oil_pressure_bar: if self.running {
                3.2 - self.oil_degradation * 8.0 + self.jitter(0.05)
            } else {
                0.0
            },
            sound_db: if self.running {
                62.0 + vibration * 4.0 + self.jitter(1.0)
            } else {
                30.0
            },
            bearing_health_pct: (100.0 - self.bearing_wear * 400.0).clamp(0.0, 100.0),
            operating_hours: self.operating_hours,
            maintenance,
        }
    }

    fn efficiency(&self) -> f64 {
        if !self.running {
            return 0.0;
        }
        let base = 95.0;
        let wear_loss = self.bearing_wear * 120.0;
        let oil_loss = self.oil_degradation * 80.0;
        let temp_loss = ((self.temperature_c - 75.0) * 0.2).max(0.0);
        let load_loss = (self.load - 0.8).abs() * 5.0;
        (base - wear_loss - oil_loss - temp_loss - load_loss).clamp(70.0, 96.0)
    }

    fn vibration_base(&self) -> f64 {
        if !self.running {
            return 0.0;
        }
        let base = 1.0;
        let speed_harmonic = (self.rpm * 0.01).sin() * 0.3;
        let load_harmonic = (self.load * 10.0).sin() * 0.2;
        let wear_harmonic = self.bearing_wear * 15.0;
        (base + speed_harmonic + load_harmonic + wear_harmonic).clamp(0.5, 8.0)
    }

    fn health_score(&self, snapshot: &SensorSnapshot) -> f64 {
        let wear_impact = self.bearing_wear * 250.0;
        let oil_impact = self.oil_degradation * 150.0;
        let temp_impact = ((snapshot.temperature_c - 75.0) * 0.8).max(0.0);
        let vibration_impact = (snapshot.vibration_magnitude() - 1.0).max(0.0) * 12.0;
        let efficiency_impact = (100.0 - snapshot.efficiency_pct) * 0.8;
        (100.0 - wear_impact - oil_impact - temp_impact - vibration_impact - efficiency_impact)
            .clamp(0.0, 100.0)
    }

    fn trend_slopes(&self) -> TrendSlopes {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return TrendSlopes::default();
        };
        let span_hours = (last.timestamp - first.timestamp).num_milliseconds() as f64 / 3_600_000.0;
        if span_hours <= 0.0 {
            return TrendSlopes::default();
        }
        TrendSlopes {
            temperature: (last.temperature_c - first.temperature_c) / span_hours,
            vibration: (last.vibration_magnitude() - first.vibration_magnitude()) / span_hours,
            efficiency: (last.efficiency_pct - first.efficiency_pct) / span_hours,
        }
    }

    fn detect_anomalies(&self, latest: &SensorSnapshot) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();
        if latest.temperature_c > 85.0 {
            anomalies.push(Anomaly {
                channel: "temperature".into(),
                score: (latest.temperature_c - 85.0) / 10.0,
                description: format!("Winding temperature {:.1}C above baseline", latest.temperature_c),
            });
        }
        let vib = latest.vibration_magnitude();
        if vib > 2.5 {
            anomalies.push(Anomaly {
                channel: "vibration".into(),
                score: (vib - 2.5) / 1.0,
                description: format!("Vibration magnitude {vib:.2} mm/s above baseline"),
            });
        }
        if latest.running && latest.efficiency_pct < 85.0 {
            anomalies.push(Anomaly {
                channel: "efficiency".into(),
                score: (85.0 - latest.efficiency_pct) / 5.0,
                description: format!("Efficiency down to {:.1}%", latest.efficiency_pct),
            });
        }
        anomalies.sort_by(|a, b| b.score.total_cmp(&a.score));
        anomalies
    }

    fn oee(&self, latest: &SensorSnapshot) -> OeeFactors {
        let availability = if self.total_hours > 0.0 {
            (self.running_hours / self.total_hours * 100.0).clamp(0.0, 100.0)
        } else if self.running {
            100.0
        } else {
            0.0
        };
        let performance = (latest.rpm / RATED_RPM * 100.0).clamp(0.0, 100.0);
        // Quality proxy: efficiency relative to rated
        let quality = (latest.efficiency_pct / 95.0 * 100.0).clamp(0.0, 100.0);
        OeeFactors {
            availability,
            performance,
            quality,
        }
    }

    /// Evaluate alert thresholds against the latest snapshot.
    ///
    /// Each condition latches while it holds so a sustained excursion raises
    /// exactly one alert; when the condition clears the latch resets and a
    /// later excursion raises a new alert with a fresh id.
    fn check_thresholds(&mut self, snapshot: &SensorSnapshot) {
        let temp = snapshot.temperature_c;
        let vib = snapshot.vibration_magnitude();
        let checks: [(&'static str, bool, AlertSeverity, String); 5] = [
            (
                "overheat-critical",
                temp > 95.0,
                AlertSeverity::Critical,
                format!("Winding temperature critical: {temp:.1}C"),
            ),
            (
                "overheat",
                temp > 85.0 && temp <= 95.0,
                AlertSeverity::High,
                format!("Winding temperature high: {temp:.1}C"),
            ),
            (
                "vibration",
                vib > 3.0,
                AlertSeverity::High,
                format!("Excessive vibration: {vib:.2} mm/s"),
            ),
            (
                "bearing-wear",
                snapshot.bearing_health_pct < 70.0,
                AlertSeverity::Medium,
                format!("Bearing health degraded: {:.0}%", snapshot.bearing_health_pct),
            ),
            (
                "efficiency-drop",
                snapshot.running && snapshot.efficiency_pct < 82.0,
                AlertSeverity::Low,
                format!("Efficiency below target: {:.1}%", snapshot.efficiency_pct),
            ),
        ];

        for (kind, active, severity, message) in checks {
            if active {
                if self.latched.insert(kind) {
                    self.alert_seq += 1;
                    let id = format!("{}-{}-{}", self.machine_id, kind, self.alert_seq);
                    tracing::warn!(alert_id = %id, %severity, "alert raised");
                    self.pending_alerts.push(Alert::new(
                        id,
                        severity,
                        kind,
                        message,
                        self.machine_id.clone(),
                    ));
                }
            } else {
                self.latched.remove(kind);
            }
        }
    }
}
