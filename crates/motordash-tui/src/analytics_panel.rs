//! Analytics rendering for the MOTORDASH TUI.
//!
//! Formats the externally-computed analytics payload (health score, risk,
//! trends, anomalies, OEE). The dashboard never derives these values; it
//! renders whatever the report says.

use motordash_core::types::AnalyticsReport;

/// Character width of the health score bar.
const HEALTH_BAR_WIDTH: usize = 20;

/// Format the compact analytics summary for the Overview panel.
pub fn format_analytics_summary(report: Option<&AnalyticsReport>) -> String {
    let Some(r) = report else {
        return "Waiting for analytics...".to_string();
    };

    format!(
        "Health:  {} {:.0}/100\n\
         Risk:    {}\n\
         OEE:     {:.1} %\n\
         Anomalies: {}",
        health_bar(r.health_score),
        r.health_score,
        r.risk.label(),
        r.oee.composite(),
        r.anomalies.len(),
    )
}

/// Format the full analytics detail for the Analytics view.
pub fn format_analytics_detail(report: Option<&AnalyticsReport>) -> String {
    let Some(r) = report else {
        return "Waiting for analytics...".to_string();
    };

    let mut out = format!(
        "Machine:      {}\n\
         Health score: {} {:.1}/100\n\
         Risk level:   {}\n\
         \n\
         -- Trends (per hour) --\n\
         Temperature:  {:>+9.2} C/h\n\
         Vibration:    {:>+9.3} mm/s/h\n\
         Efficiency:   {:>+9.2} pp/h\n\
         \n\
         -- OEE --\n\
         Availability: {:>9.1} %\n\
         Performance:  {:>9.1} %\n\
         Quality:      {:>9.1} %\n\
         Composite:    {:>9.1} %\n\
         \n\
         -- Anomalies --",
        r.machine_id,
        health_bar(r.health_score),
        r.health_score,
        r.risk.label(),
        r.trends.temperature,
        r.trends.vibration,
        r.trends.efficiency,
        r.oee.availability,
        r.oee.performance,
        r.oee.quality,
        r.oee.composite(),
    );

    if r.anomalies.is_empty() {
        out.push_str("\n(none detected)");
    } else {
        for anomaly in &r.anomalies {
            out.push_str(&format!(
                "\n[{:.2}] {}: {}",
                anomaly.score, anomaly.channel, anomaly.description
            ));
        }
    }

    out
}

/// Render a fixed-width health bar, full at 100.
fn health_bar(score: f64) -> String {
    let filled = ((score / 100.0) * HEALTH_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(HEALTH_BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(HEALTH_BAR_WIDTH - filled)
    )
}
