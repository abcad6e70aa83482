//! Literal values shown when live data is unavailable, plus the simulated weather feed.

use crate::core::{EnvironmentalReading, NearBodyRecord, OrbitalPosition};

pub fn orbital_position(observed_at_unix_seconds: i64) -> OrbitalPosition {
    OrbitalPosition {
        latitude: 25.4,
        longitude: -45.2,
        observed_at_unix_seconds,
    }
}

pub fn near_bodies() -> Vec<NearBodyRecord> {
    vec![
        NearBodyRecord {
            name: "2024 AB1".to_string(),
            max_diameter_km: 0.5,
            miss_distance_km: 7_500_000.0,
        },
        NearBodyRecord {
            name: "2024 BC2".to_string(),
            max_diameter_km: 1.2,
            miss_distance_km: 12_000_000.0,
        },
    ]
}

/// There is no live Mars weather source; this reading is generated once per controller.
pub fn environmental_reading() -> EnvironmentalReading {
    EnvironmentalReading {
        sol_index: 3847,
        high_temp_c: -15.0,
        low_temp_c: -78.0,
        wind_speed_mps: 5.2,
        pressure_pa: 725.0,
        season_label: "Month 8".to_string(),
    }
}
