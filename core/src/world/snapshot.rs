use serde::{Deserialize, Serialize};

/// Own-ship pose at the snapshot instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnShipState {
    pub x: f64,
    pub z: f64,
    pub heading_deg: f64,
    pub speed_ms: f64,
}

impl Default for OwnShipState {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            heading_deg: 0.0,
            speed_ms: 0.0,
        }
    }
}

/// Another vessel visible to the radar. `length_m` drives both the echo
/// strength and how many adjacent range bins the return occupies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetVessel {
    pub x: f64,
    pub z: f64,
    pub heading_deg: f64,
    pub speed_ms: f64,
    pub length_m: f64,
}

/// Floating navigation mark. Small fixed cross-section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuoyMark {
    pub x: f64,
    pub z: f64,
}

/// Per-tick view of the world supplied by the host simulation. The core
/// never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub own_ship: OwnShipState,
    pub vessels: Vec<TargetVessel>,
    pub buoys: Vec<BuoyMark>,
    /// Tide height above chart datum, metres.
    pub tide_height_m: f32,
    /// Sea-state style weather intensity, 0 = flat calm.
    pub weather: f32,
    /// Rain intensity, 0 = dry.
    pub rain_intensity: f32,
    /// Direction the wind blows from, degrees true.
    pub wind_direction_deg: f32,
    /// Absolute simulation time, seconds.
    pub time_s: f64,
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        Self {
            own_ship: OwnShipState::default(),
            vessels: Vec::new(),
            buoys: Vec::new(),
            tide_height_m: 0.0,
            weather: 2.0,
            rain_intensity: 0.0,
            wind_direction_deg: 0.0,
            time_s: 0.0,
        }
    }
}

impl WorldSnapshot {
    /// Convenience for tests and drivers: an empty sea at a given instant.
    pub fn at_time(time_s: f64) -> Self {
        Self {
            time_s,
            ..Self::default()
        }
    }
}
