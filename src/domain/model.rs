use serde::{Deserialize, Serialize};

/// Ground-track position of the tracked station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub observed_at_unix_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearBodyRecord {
    pub name: String,
    pub max_diameter_km: f64,
    pub miss_distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub sol_index: i64,
    pub high_temp_c: f64,
    pub low_temp_c: f64,
    pub wind_speed_mps: f64,
    pub pressure_pa: f64,
    pub season_label: String,
}

/// Everything a single render needs, read together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub orbital_position: Option<OrbitalPosition>,
    pub near_bodies: Vec<NearBodyRecord>,
    pub environment: Option<EnvironmentalReading>,
    pub loading: bool,
}

/// Contents of the contact form at the moment it is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}
