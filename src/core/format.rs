use crate::core::{DashboardSnapshot, EnvironmentalReading, NearBodyRecord, OrbitalPosition};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Fixed readouts for the telemetry card; the dashboard has no live source for them.
pub const SATELLITE_TELEMETRY: [(&str, &str); 3] = [
    ("Power Systems", "98.7%"),
    ("Communication", "NOMINAL"),
    ("Orbital Velocity", "7.66 km/s"),
];

/// (timestamp, mission, status), newest first.
pub const MISSION_TIMELINE: [(&str, &str, &str); 4] = [
    ("2024-07-20 14:30:00", "ISS Expedition 71", "ACTIVE"),
    ("2024-07-18 09:15:00", "Artemis II Prep", "ONGOING"),
    ("2024-07-15 16:42:00", "Mars Sample Return", "PLANNING"),
    ("2024-07-10 11:20:00", "Europa Clipper", "COMPLETED"),
];

pub fn degrees(value: f64) -> String {
    format!("{:.4}°", value)
}

/// Miss distances are shown in millions of kilometres.
pub fn miss_distance(km: f64) -> String {
    format!("{:.2}M km", km / 1_000_000.0)
}

pub fn diameter(km: f64) -> String {
    format!("~{:.2} km", km)
}

pub fn mission_time(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn orbital_lines(out: &mut String, position: Option<&OrbitalPosition>) {
    out.push_str("ISS Live Tracker\n");
    match position {
        Some(position) => {
            let _ = writeln!(
                out,
                "  Latitude  {}\n  Longitude {}",
                degrees(position.latitude),
                degrees(position.longitude)
            );
            let observed = DateTime::<Utc>::from_timestamp(position.observed_at_unix_seconds, 0);
            if let Some(observed) = observed {
                let _ = writeln!(out, "  Observed  {}", mission_time(observed));
            }
        }
        None => out.push_str("  Loading ISS data...\n"),
    }
}

fn near_body_lines(out: &mut String, records: &[NearBodyRecord]) {
    out.push_str("Near-Earth Asteroids\n");
    if records.is_empty() {
        out.push_str("  none reported today\n");
    }
    for record in records {
        let _ = writeln!(
            out,
            "  {:<24} {:>10}  miss {}",
            record.name,
            diameter(record.max_diameter_km),
            miss_distance(record.miss_distance_km)
        );
    }
}

fn environment_lines(out: &mut String, reading: Option<&EnvironmentalReading>) {
    out.push_str("Mars Weather\n");
    if let Some(reading) = reading {
        let _ = writeln!(
            out,
            "  Sol {} ({})\n  High {}°C  Low {}°C\n  Wind {} m/s  Pressure {} Pa",
            reading.sol_index,
            reading.season_label,
            reading.high_temp_c,
            reading.low_temp_c,
            reading.wind_speed_mps,
            reading.pressure_pa
        );
    }
}

fn telemetry_lines(out: &mut String) {
    out.push_str("Satellite Telemetry\n");
    for (label, reading) in SATELLITE_TELEMETRY {
        let _ = writeln!(out, "  {:<18}{}", label, reading);
    }
}

fn timeline_lines(out: &mut String) {
    out.push_str("Mission Timeline\n");
    for (at, mission, status) in MISSION_TIMELINE {
        let _ = writeln!(out, "  {}  {:<20}{}", at, mission, status);
    }
}

/// Plain-text rendering of one dashboard frame.
pub fn render_snapshot(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AstroScope  Mission Time: {}", mission_time(now));

    if snapshot.loading {
        out.push_str("Initializing AstroScope...\n");
        return out;
    }

    out.push('\n');
    orbital_lines(&mut out, snapshot.orbital_position.as_ref());
    out.push('\n');
    environment_lines(&mut out, snapshot.environment.as_ref());
    out.push('\n');
    near_body_lines(&mut out, &snapshot.near_bodies);
    out.push('\n');
    telemetry_lines(&mut out);
    out.push('\n');
    timeline_lines(&mut out);
    out
}
