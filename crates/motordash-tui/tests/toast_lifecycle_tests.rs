//! Integration tests for the toast lifecycle driven through the alert store.
//!
//! These tests run the same reconcile/fire/acknowledge pass the frame loop
//! runs, with synthetic instants instead of real sleeps.

use std::time::{Duration, Instant};

use motordash_core::types::{Alert, AlertSeverity};
use motordash_tui::data::AlertStore;
use motordash_tui::toast::{ToastConfig, ToastPhase, ToastScheduler};

fn alert(id: &str) -> Alert {
    Alert::new(id, AlertSeverity::High, "overheat", "temperature high", "MOTOR-001")
}

/// One frame-loop pass: reconcile the scheduler against the unacknowledged
/// alerts, fire due deadlines, and acknowledge every finalized id.
fn advance(store: &mut AlertStore, scheduler: &mut ToastScheduler, now: Instant) -> Vec<String> {
    let displayable: Vec<String> = store
        .displayable()
        .iter()
        .map(|a| a.id.clone())
        .collect();
    scheduler.sync(displayable.iter().map(String::as_str), now);

    let finalized = scheduler.tick(now);
    for id in &finalized {
        store.acknowledge(id);
    }
    finalized
}

#[test]
fn test_auto_dismiss_acknowledges_exactly_once() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));

    // Toast appears and stays visible through the dwell window
    advance(&mut store, &mut scheduler, t0);
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(4999));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));

    // Dwell expires: dismissing, not yet acknowledged
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(5000));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    assert_eq!(store.unacknowledged_count(), 1);

    // Collapse expires: finalized and acknowledged
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(5300));
    assert_eq!(finalized, vec!["a1".to_string()]);
    assert!(store.get("a1").is_some_and(|a| a.acknowledged));
    assert!(scheduler.is_empty());

    // Later passes neither resurrect the toast nor acknowledge again
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(9000));
    assert!(finalized.is_empty());
    assert!(scheduler.is_empty());
}

#[test]
fn test_manual_dismiss_with_second_toast_unaffected() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));
    store.push(alert("a2"));
    advance(&mut store, &mut scheduler, t0);
    assert_eq!(scheduler.len(), 2);

    // User dismisses a1 at t=1000; a2 keeps its own dwell deadline
    assert!(scheduler.dismiss("a1", t0 + Duration::from_millis(1000)));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    assert_eq!(scheduler.phase("a2"), Some(ToastPhase::Visible));

    // a1 collapses at t=1300 and is acknowledged; a2 still visible
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(1300));
    assert_eq!(finalized, vec!["a1".to_string()]);
    assert!(store.get("a1").is_some_and(|a| a.acknowledged));
    assert_eq!(scheduler.phase("a2"), Some(ToastPhase::Visible));

    // a2 follows its own auto timeline
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(5000));
    assert_eq!(scheduler.phase("a2"), Some(ToastPhase::Dismissing));
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(5300));
    assert_eq!(finalized, vec!["a2".to_string()]);
    assert!(store.get("a2").is_some_and(|a| a.acknowledged));
}

#[test]
fn test_bulk_acknowledge_cancels_without_second_ack() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));
    store.push(alert("a2"));
    advance(&mut store, &mut scheduler, t0);

    // a1 is already mid-collapse when the user acknowledges everything
    scheduler.dismiss("a1", t0 + Duration::from_millis(1000));
    let acked = store.acknowledge_all();
    assert_eq!(acked, 2);

    // Next pass removes both toasts without reporting them as finalized,
    // so nothing tries to acknowledge an already-acknowledged alert
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(1100));
    assert!(finalized.is_empty());
    assert!(scheduler.is_empty());

    // And the store saw exactly one acknowledgement per alert
    assert!(!store.acknowledge("a1"));
    assert!(!store.acknowledge("a2"));
}

#[test]
fn test_repeated_dismiss_does_not_double_acknowledge() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));
    advance(&mut store, &mut scheduler, t0);

    // First dismiss starts the collapse; repeats are no-ops
    assert!(scheduler.dismiss("a1", t0 + Duration::from_millis(500)));
    assert!(!scheduler.dismiss("a1", t0 + Duration::from_millis(600)));
    assert!(!scheduler.dismiss("a1", t0 + Duration::from_millis(700)));

    // Collapse deadline is unchanged by the repeats: 500 + 300
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(799));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(800));
    assert_eq!(finalized.len(), 1);
    assert!(!store.acknowledge("a1"));
}

#[test]
fn test_phase_never_returns_to_visible() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));
    advance(&mut store, &mut scheduler, t0);
    scheduler.dismiss("a1", t0 + Duration::from_millis(100));

    // Reconciling again while dismissing must not restart the toast
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(200));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));

    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(400));
    assert_eq!(scheduler.phase("a1"), None);
}

#[test]
fn test_reappearing_id_gets_fresh_lifecycle() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));
    advance(&mut store, &mut scheduler, t0);
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(5000));
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(5300));
    assert!(scheduler.is_empty());

    // The same condition recurs later as a new alert record
    store.push(alert("a1"));
    let t1 = t0 + Duration::from_millis(60_000);
    advance(&mut store, &mut scheduler, t1);
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));

    // Fresh dwell deadline, anchored at the reappearance
    advance(&mut store, &mut scheduler, t1 + Duration::from_millis(4999));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Visible));
    advance(&mut store, &mut scheduler, t1 + Duration::from_millis(5000));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
}

#[test]
fn test_stalled_loop_does_not_skip_collapse() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig::default());
    let t0 = Instant::now();

    store.push(alert("a1"));
    advance(&mut store, &mut scheduler, t0);

    // A single pass long after both deadlines would have fired only moves
    // the toast one phase; the collapse runs from the observed instant
    let late = t0 + Duration::from_millis(20_000);
    let finalized = advance(&mut store, &mut scheduler, late);
    assert!(finalized.is_empty());
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));

    let finalized = advance(&mut store, &mut scheduler, late + Duration::from_millis(300));
    assert_eq!(finalized, vec!["a1".to_string()]);
}

#[test]
fn test_custom_timing_configuration() {
    let mut store = AlertStore::new();
    let mut scheduler = ToastScheduler::new(ToastConfig {
        dwell: Duration::from_millis(1000),
        collapse: Duration::from_millis(100),
    });
    let t0 = Instant::now();

    store.push(alert("a1"));
    advance(&mut store, &mut scheduler, t0);
    advance(&mut store, &mut scheduler, t0 + Duration::from_millis(1000));
    assert_eq!(scheduler.phase("a1"), Some(ToastPhase::Dismissing));
    let finalized = advance(&mut store, &mut scheduler, t0 + Duration::from_millis(1100));
    assert_eq!(finalized, vec!["a1".to_string()]);
}
