//! Toast lifecycle for transient alert notifications.
//!
//! Each displayable alert gets a toast with a two-phase, time-bounded
//! lifecycle: it stays fully visible for a dwell period, then collapses
//! through a short exit-animation phase, and is finally acknowledged back
//! to the alert store. A user can short-circuit the dwell with a manual
//! dismiss. The whole thing runs cooperatively off the frame loop - timers
//! are absolute deadlines checked by [`ToastScheduler::tick`], never
//! background threads.
//!
//! ## Per-toast state machine
//!
//! ```text
//! (first displayable) -> Visible --dwell expiry or manual dismiss--> Dismissing
//! Dismissing --collapse expiry--> removed (acknowledge exactly once)
//! any phase --id vanishes upstream--> removed (no acknowledge)
//! ```
//!
//! A record holds exactly one deadline at a time (dwell while `Visible`,
//! collapse while `Dismissing`), so duplicate timers per id cannot exist.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use motordash_core::config::{DashConfig, DEFAULT_COLLAPSE_MS, DEFAULT_DWELL_MS};
use motordash_core::types::AlertId;

/// Phase of a toast's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Fully visible, dwell deadline pending
    Visible,
    /// Exit animation running, collapse deadline pending
    Dismissing,
}

/// Timing configuration for the toast lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct ToastConfig {
    /// Time a toast stays fully visible before auto-dismissal begins
    pub dwell: Duration,
    /// Duration of the exit-animation phase before finalization
    pub collapse: Duration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(DEFAULT_DWELL_MS),
            collapse: Duration::from_millis(DEFAULT_COLLAPSE_MS),
        }
    }
}

impl ToastConfig {
    /// Build from the dashboard configuration.
    pub fn from_dash_config(config: &DashConfig) -> Self {
        Self {
            dwell: Duration::from_millis(config.dwell_ms),
            collapse: Duration::from_millis(config.collapse_ms),
        }
    }
}

/// Transient lifecycle record for one toast.
///
/// Owned exclusively by the scheduler. The single `deadline` field is the
/// dwell deadline while `Visible` and the collapse deadline while
/// `Dismissing`.
#[derive(Debug, Clone, Copy)]
struct ToastRecord {
    phase: ToastPhase,
    deadline: Instant,
}

/// Scheduler owning every toast's lifecycle record.
///
/// Driven by the single-threaded frame loop in three calls:
///
/// 1. [`sync`](Self::sync) with the current displayable ids - creates
///    records for new ids and force-removes records whose id vanished
///    upstream (cancelling their pending deadline without acknowledging).
/// 2. [`tick`](Self::tick) - fires due deadlines and returns the ids whose
///    lifecycle finalized this pass. **The caller must acknowledge each
///    returned id before the next `sync`**, otherwise the still-displayable
///    id would be treated as a new toast.
/// 3. [`dismiss`](Self::dismiss) on user request.
#[derive(Debug)]
pub struct ToastScheduler {
    config: ToastConfig,
    /// Lifecycle records keyed by alert id
    records: HashMap<AlertId, ToastRecord>,
    /// Display order (insertion order of first appearance)
    order: Vec<AlertId>,
}

impl ToastScheduler {
    /// Create a scheduler with the given timing configuration.
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Number of live toasts (either phase).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no toasts are live.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Current phase of a toast, if a record exists for the id.
    pub fn phase(&self, id: &str) -> Option<ToastPhase> {
        self.records.get(id).map(|r| r.phase)
    }

    /// Live toast ids with their phase, in display (insertion) order.
    pub fn toasts(&self) -> Vec<(&str, ToastPhase)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|r| (id.as_str(), r.phase)))
            .collect()
    }

    /// Reconcile lifecycle records against the current displayable id set.
    ///
    /// New ids get a `Visible` record with a dwell deadline started at
    /// `now`; the dwell is started once per id, never restarted by repeated
    /// syncs. Ids that vanished upstream (external acknowledgement, bulk
    /// clear, replaced alert list) have their record dropped with the
    /// pending deadline cancelled and no acknowledgement issued.
    pub fn sync<'a, I>(&mut self, displayable: I, now: Instant)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for id in displayable {
            seen.insert(id);
            if !self.records.contains_key(id) {
                tracing::debug!(alert_id = id, "toast created");
                self.records.insert(
                    id.to_string(),
                    ToastRecord {
                        phase: ToastPhase::Visible,
                        deadline: now + self.config.dwell,
                    },
                );
                self.order.push(id.to_string());
            }
        }

        // Forced removal: id no longer displayable, cancel without ack
        let records = &mut self.records;
        self.order.retain(|id| {
            if seen.contains(id.as_str()) {
                true
            } else {
                tracing::debug!(alert_id = %id, "toast removed upstream, cancelling");
                records.remove(id);
                false
            }
        });
    }

    /// Fire due deadlines and return ids finalized this pass.
    ///
    /// A `Visible` toast whose dwell deadline has passed transitions to
    /// `Dismissing` with a fresh collapse deadline. A `Dismissing` toast
    /// whose collapse deadline has passed is finalized: its record is
    /// deleted and its id is returned so the caller can acknowledge it
    /// exactly once.
    pub fn tick(&mut self, now: Instant) -> Vec<AlertId> {
        let mut finalized = Vec::new();

        for id in &self.order {
            let Some(record) = self.records.get_mut(id) else {
                continue;
            };
            match record.phase {
                ToastPhase::Visible if now >= record.deadline => {
                    tracing::debug!(alert_id = %id, "dwell expired, dismissing");
                    record.phase = ToastPhase::Dismissing;
                    record.deadline = now + self.config.collapse;
                }
                ToastPhase::Dismissing if now >= record.deadline => {
                    tracing::debug!(alert_id = %id, "collapse complete, finalizing");
                    finalized.push(id.clone());
                }
                _ => {}
            }
        }

        for id in &finalized {
            self.records.remove(id);
        }
        let records = &self.records;
        self.order.retain(|id| records.contains_key(id));

        finalized
    }

    /// Manually dismiss a toast, short-circuiting its dwell.
    ///
    /// Only a `Visible` toast transitions; a `Dismissing` or unknown id is
    /// a no-op (the alert may already have transitioned or been removed
    /// upstream), which makes repeated dismissal idempotent and rules out
    /// double acknowledgement.
    pub fn dismiss(&mut self, id: &str, now: Instant) -> bool {
        match self.records.get_mut(id) {
            Some(record) if record.phase == ToastPhase::Visible => {
                tracing::debug!(alert_id = id, "manual dismiss");
                record.phase = ToastPhase::Dismissing;
                record.deadline = now + self.config.collapse;
                true
            }
            _ => false,
        }
    }

    /// Drop every record and pending deadline deterministically.
    ///
    /// Called on dashboard teardown so no finalization can be observed
    /// after the view is gone.
    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            tracing::debug!(count = self.records.len(), "clearing toast records");
        }
        self.records.clear();
        self.order.clear();
    }
}

impl Default for ToastScheduler {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ToastConfig {
        ToastConfig {
            dwell: Duration::from_millis(5000),
            collapse: Duration::from_millis(300),
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_record_created_on_first_sync() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();

        scheduler.sync(["a1"], t0);
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_repeated_sync_does_not_restart_dwell() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();

        scheduler.sync(["a1"], t0);
        // Upstream recomputes several times before the dwell fires
        scheduler.sync(["a1"], t0 + ms(2000));
        scheduler.sync(["a1"], t0 + ms(4000));

        // Dwell still anchored at t0: fires at t0+5000, not t0+9000
        assert!(scheduler.tick(t0 + ms(4999)).is_empty());
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));
        scheduler.tick(t0 + ms(5000));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    }

    #[test]
    fn test_auto_dismiss_timeline() {
        // Scenario A: no user action; dismissing at 5000, gone at 5300
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);

        assert!(scheduler.tick(t0 + ms(4999)).is_empty());
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));

        assert!(scheduler.tick(t0 + ms(5000)).is_empty());
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));

        assert!(scheduler.tick(t0 + ms(5299)).is_empty());

        let finalized = scheduler.tick(t0 + ms(5300));
        assert_eq!(finalized, vec!["a1".to_string()]);
        assert_eq!(scheduler.phase("a1"), None);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_finalized_only_once() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);

        let finalized = scheduler.tick(t0 + ms(6000));
        // Single late tick covers both transitions? No - dwell fires first,
        // collapse deadline restarts from the tick instant.
        assert!(finalized.is_empty());
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));

        let finalized = scheduler.tick(t0 + ms(6300));
        assert_eq!(finalized.len(), 1);

        // Stale ticks after finalization are no-ops
        assert!(scheduler.tick(t0 + ms(7000)).is_empty());
    }

    #[test]
    fn test_manual_dismiss_short_circuits_dwell() {
        // Scenario: manual dismiss at t=1000 with 5000 dwell removes at 1300
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);

        assert!(scheduler.dismiss("a1", t0 + ms(1000)));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));

        assert!(scheduler.tick(t0 + ms(1299)).is_empty());
        let finalized = scheduler.tick(t0 + ms(1300));
        assert_eq!(finalized, vec!["a1".to_string()]);
    }

    #[test]
    fn test_manual_dismiss_idempotent() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);

        assert!(scheduler.dismiss("a1", t0 + ms(100)));
        // Second dismiss while already dismissing is a no-op
        assert!(!scheduler.dismiss("a1", t0 + ms(150)));

        // Collapse deadline anchored at the first dismiss
        assert!(scheduler.tick(t0 + ms(399)).is_empty());
        let finalized = scheduler.tick(t0 + ms(400));
        assert_eq!(finalized.len(), 1);
    }

    #[test]
    fn test_manual_dismiss_unknown_id_noop() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        assert!(!scheduler.dismiss("ghost", t0));
        scheduler.sync(["a1"], t0);
        assert!(!scheduler.dismiss("other", t0));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));
    }

    #[test]
    fn test_independent_toasts() {
        // Scenario B: a2 dismissed manually at 100, a1 untouched
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1", "a2"], t0);

        scheduler.dismiss("a2", t0 + ms(100));

        let finalized = scheduler.tick(t0 + ms(400));
        assert_eq!(finalized, vec!["a2".to_string()]);
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));

        assert!(scheduler.tick(t0 + ms(4999)).is_empty());
        scheduler.tick(t0 + ms(5000));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    }

    #[test]
    fn test_upstream_removal_cancels_without_finalizing() {
        // Scenario C: external bulk-clear while the dwell is pending
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);

        // a1 vanishes from the displayable set at t=1000
        scheduler.sync(std::iter::empty::<&str>(), t0 + ms(1000));
        assert_eq!(scheduler.phase("a1"), None);

        // The cancelled dwell never fires and nothing is finalized
        assert!(scheduler.tick(t0 + ms(5300)).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_upstream_removal_while_dismissing() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);
        scheduler.dismiss("a1", t0 + ms(100));

        // Removed upstream mid-collapse: no finalization
        scheduler.sync(std::iter::empty::<&str>(), t0 + ms(200));
        assert!(scheduler.tick(t0 + ms(400)).is_empty());
    }

    #[test]
    fn test_phase_never_returns_to_visible() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);
        scheduler.dismiss("a1", t0 + ms(50));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));

        // Re-syncing the same displayable id must not reset the phase
        scheduler.sync(["a1"], t0 + ms(100));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    }

    #[test]
    fn test_reappearing_id_is_new_lifecycle() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);
        scheduler.sync(std::iter::empty::<&str>(), t0 + ms(1000));

        // Same id reappears later: treated as a new logical alert
        scheduler.sync(["a1"], t0 + ms(2000));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));
        assert!(scheduler.tick(t0 + ms(6999)).is_empty());
        scheduler.tick(t0 + ms(7000));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    }

    #[test]
    fn test_toasts_in_display_order() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1", "a2"], t0);
        scheduler.sync(["a1", "a2", "a3"], t0 + ms(100));
        scheduler.dismiss("a2", t0 + ms(200));

        let toasts = scheduler.toasts();
        assert_eq!(
            toasts,
            vec![
                ("a1", ToastPhase::Visible),
                ("a2", ToastPhase::Dismissing),
                ("a3", ToastPhase::Visible),
            ]
        );
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut scheduler = ToastScheduler::new(config());
        let t0 = Instant::now();
        scheduler.sync(["a1", "a2"], t0);
        scheduler.dismiss("a2", t0);

        scheduler.clear();
        assert!(scheduler.is_empty());
        assert!(scheduler.tick(t0 + ms(10_000)).is_empty());
    }

    #[test]
    fn test_custom_timing_config() {
        let mut scheduler = ToastScheduler::new(ToastConfig {
            dwell: ms(100),
            collapse: ms(50),
        });
        let t0 = Instant::now();
        scheduler.sync(["a1"], t0);

        scheduler.tick(t0 + ms(100));
        assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
        let finalized = scheduler.tick(t0 + ms(150));
        assert_eq!(finalized.len(), 1);
    }
}
