//! Data plumbing between the telemetry feed and the dashboard.
//!
//! [`AlertStore`] is the authoritative ordered alert collection; the toast
//! subsystem references alerts by id only and signals acknowledgement back
//! through [`AlertStore::acknowledge`]. [`DataManager`] drives the feed on
//! a poll interval and hands the panels their latest payloads.

use std::time::{Duration, Instant};

use motordash_core::types::{Alert, AnalyticsReport, SensorSnapshot};
use motordash_core::{DashConfig, TelemetryFeed};

/// Authoritative ordered collection of alerts.
///
/// Insertion order is display order. Content fields of an unacknowledged
/// alert are never mutated; the only mutation is the `acknowledged` flag,
/// flipped exactly once per alert.
#[derive(Debug, Default)]
pub struct AlertStore {
    alerts: Vec<Alert>,
}

impl AlertStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert.
    ///
    /// An id colliding with an existing unacknowledged alert is dropped
    /// with a warning - ids must be unique within the store at any instant.
    pub fn push(&mut self, alert: Alert) {
        if self
            .alerts
            .iter()
            .any(|a| a.id == alert.id && !a.acknowledged)
        {
            tracing::warn!(alert_id = %alert.id, "duplicate unacknowledged alert id, dropping");
            return;
        }
        self.alerts.push(alert);
    }

    /// Flip the acknowledged flag for an alert id.
    ///
    /// Returns true if the alert existed and was newly acknowledged.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        match self
            .alerts
            .iter_mut()
            .find(|a| a.id == id && !a.acknowledged)
        {
            Some(alert) => {
                alert.acknowledged = true;
                tracing::info!(alert_id = id, "alert acknowledged");
                true
            }
            None => false,
        }
    }

    /// Acknowledge every outstanding alert (bulk clear).
    pub fn acknowledge_all(&mut self) -> usize {
        let mut count = 0;
        for alert in self.alerts.iter_mut().filter(|a| !a.acknowledged) {
            alert.acknowledged = true;
            count += 1;
        }
        if count > 0 {
            tracing::info!(count, "bulk-acknowledged alerts");
        }
        count
    }

    /// The displayable subset: unacknowledged alerts in insertion order.
    pub fn displayable(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| !a.acknowledged).collect()
    }

    /// Every alert ever stored, in insertion order (for the history panel).
    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    /// Look up an alert by id (most recent occurrence of the id).
    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().rev().find(|a| a.id == id)
    }

    /// Count of unacknowledged alerts.
    pub fn unacknowledged_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.acknowledged).count()
    }

    /// Total stored alert count.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether the store holds no alerts at all.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Drives the telemetry feed and owns the alert store.
pub struct DataManager {
    feed: TelemetryFeed,
    alert_store: AlertStore,
    poll_interval: Duration,
    last_poll: Instant,
    latest_snapshot: Option<SensorSnapshot>,
    latest_analytics: Option<AnalyticsReport>,
}

impl DataManager {
    /// Create a manager wired to a fresh feed for the configured machine.
    pub fn new(config: &DashConfig) -> Self {
        Self::with_feed(
            TelemetryFeed::new(config.machine_id.clone()),
            Duration::from_millis(config.poll_interval_ms),
        )
    }

    /// Create a manager around an existing feed (for testing).
    pub fn with_feed(feed: TelemetryFeed, poll_interval: Duration) -> Self {
        Self {
            feed,
            alert_store: AlertStore::new(),
            poll_interval,
            last_poll: Instant::now(),
            latest_snapshot: None,
            latest_analytics: None,
        }
    }

    /// Poll the feed if the interval elapsed. Returns true if data changed.
    pub fn poll_updates(&mut self) -> bool {
        let elapsed = self.last_poll.elapsed();
        if elapsed < self.poll_interval {
            return false;
        }
        self.last_poll = Instant::now();

        self.feed.advance(elapsed.as_secs_f64());
        self.latest_snapshot = self.feed.snapshot().cloned();
        self.latest_analytics = self.feed.analytics();

        for alert in self.feed.drain_alerts() {
            self.alert_store.push(alert);
        }

        true
    }

    /// Latest sensor snapshot.
    pub fn snapshot(&self) -> Option<&SensorSnapshot> {
        self.latest_snapshot.as_ref()
    }

    /// Latest analytics report.
    pub fn analytics(&self) -> Option<&AnalyticsReport> {
        self.latest_analytics.as_ref()
    }

    /// The alert store.
    pub fn alert_store(&self) -> &AlertStore {
        &self.alert_store
    }

    /// Mutable access to the alert store (acknowledgement path).
    pub fn alert_store_mut(&mut self) -> &mut AlertStore {
        &mut self.alert_store
    }

    /// Whether the motor is running.
    pub fn is_motor_running(&self) -> bool {
        self.feed.is_running()
    }

    /// Toggle the motor run state, returning the new state.
    pub fn toggle_motor(&mut self) -> bool {
        self.feed.toggle()
    }
}
