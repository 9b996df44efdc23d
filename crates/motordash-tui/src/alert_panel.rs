//! Alert history formatting and JSON export.

use std::path::Path;

use motordash_core::error::{DashError, Result};
use motordash_core::types::Alert;

/// Format the alert history, newest first.
///
/// `scroll_offset` skips that many entries from the top.
pub fn format_alert_history(alerts: &[Alert], scroll_offset: usize) -> String {
    if alerts.is_empty() {
        return "No alerts recorded.".to_string();
    }

    let lines: Vec<String> = alerts
        .iter()
        .rev()
        .skip(scroll_offset)
        .map(|a| a.format_detail())
        .collect();

    if lines.is_empty() {
        return "(scrolled past end)".to_string();
    }
    lines.join("\n")
}

/// Format the compact recent-alerts block for the Overview panel.
pub fn format_recent_alerts(alerts: &[Alert], limit: usize) -> String {
    if alerts.is_empty() {
        return "No alerts recorded.".to_string();
    }

    alerts
        .iter()
        .rev()
        .take(limit)
        .map(|a| a.format_compact())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the full alert history to a JSON file.
pub fn export_alerts(alerts: &[Alert], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DashError::DirectoryCreation {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(alerts).map_err(|e| DashError::Json {
        context: "alert export".into(),
        message: e.to_string(),
        source: Some(e),
    })?;

    std::fs::write(path, json).map_err(|e| DashError::io("writing", path, e))?;
    tracing::info!(path = %path.display(), count = alerts.len(), "alert history exported");
    Ok(())
}
