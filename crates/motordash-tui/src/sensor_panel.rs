//! Sensor readout formatting for the MOTORDASH TUI.
//!
//! Pure formatting from the latest [`SensorSnapshot`]; no owned state.

use motordash_core::types::SensorSnapshot;

/// Format the compact sensor summary for the Overview panel.
pub fn format_sensor_summary(snapshot: Option<&SensorSnapshot>) -> String {
    let Some(s) = snapshot else {
        return "Waiting for telemetry...".to_string();
    };

    let state = if s.running { "RUNNING" } else { "STOPPED" };
    format!(
        "State:        {}\n\
         Speed:        {:>8.0} RPM\n\
         Temperature:  {:>8.1} C\n\
         Vibration:    {:>8.2} mm/s\n\
         Power:        {:>8.2} kW\n\
         Efficiency:   {:>8.1} %\n\
         Bearing:      {:>8.0} %\n\
         Maintenance:  {:>8}",
        state,
        s.rpm,
        s.temperature_c,
        s.vibration_magnitude(),
        s.power_kw,
        s.efficiency_pct,
        s.bearing_health_pct,
        s.maintenance.label(),
    )
}

/// Format the full sensor readout for the Sensors view.
pub fn format_sensor_detail(snapshot: Option<&SensorSnapshot>) -> String {
    let Some(s) = snapshot else {
        return "Waiting for telemetry...".to_string();
    };

    format!(
        "Machine:         {}\n\
         State:           {}\n\
         \n\
         -- Mechanical --\n\
         Speed:           {:>9.0} RPM\n\
         Torque:          {:>9.1} Nm\n\
         Vibration X:     {:>9.2} mm/s\n\
         Vibration Y:     {:>9.2} mm/s\n\
         Vibration Z:     {:>9.2} mm/s\n\
         Vibration |v|:   {:>9.2} mm/s\n\
         Sound level:     {:>9.1} dB\n\
         \n\
         -- Electrical --\n\
         Voltage:         {:>9.1} V\n\
         Current:         {:>9.1} A\n\
         Power:           {:>9.2} kW\n\
         Efficiency:      {:>9.1} %\n\
         \n\
         -- Condition --\n\
         Temperature:     {:>9.1} C\n\
         Oil pressure:    {:>9.2} bar\n\
         Bearing health:  {:>9.0} %\n\
         Operating hours: {:>9.1} h\n\
         Maintenance:     {:>9}",
        s.machine_id,
        if s.running { "RUNNING" } else { "STOPPED" },
        s.rpm,
        s.torque_nm,
        s.vibration_x,
        s.vibration_y,
        s.vibration_z,
        s.vibration_magnitude(),
        s.sound_db,
        s.voltage,
        s.current,
        s.power_kw,
        s.efficiency_pct,
        s.temperature_c,
        s.oil_pressure_bar,
        s.bearing_health_pct,
        s.operating_hours,
        s.maintenance.label(),
    )
}
