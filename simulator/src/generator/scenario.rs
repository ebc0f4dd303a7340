//! Synthetic world scripting: straight-line traffic, fixed marks, islands,
//! and weather, advanced to any instant by simple kinematics.

use crate::generator::terrain::{Island, IslandTerrain};
use radarcore::math::geo;
use radarcore::world::{BuoyMark, OwnShipState, TargetVessel, WorldSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipScript {
    pub x: f64,
    pub z: f64,
    pub heading_deg: f64,
    pub speed_ms: f64,
    pub length_m: f64,
}

impl Default for ShipScript {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            heading_deg: 0.0,
            speed_ms: 0.0,
            length_m: 30.0,
        }
    }
}

impl ShipScript {
    fn position_at(&self, time_s: f64) -> (f64, f64) {
        geo::offset(self.x, self.z, self.heading_deg, self.speed_ms * time_s)
    }
}

/// Everything the driver needs to replay a world deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub own_ship: ShipScript,
    pub vessels: Vec<ShipScript>,
    pub buoys: Vec<BuoyMark>,
    pub islands: Vec<Island>,
    pub sea_depth_m: f32,
    pub weather: f32,
    pub rain_intensity: f32,
    pub wind_direction_deg: f32,
    pub tide_height_m: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "crossing-traffic".to_string(),
            own_ship: ShipScript::default(),
            vessels: vec![ShipScript {
                x: 1852.0,
                z: -1000.0,
                heading_deg: 0.0,
                speed_ms: 6.0,
                length_m: 45.0,
            }],
            buoys: vec![BuoyMark { x: -900.0, z: 600.0 }],
            islands: vec![Island {
                x: 0.0,
                z: 4000.0,
                peak_m: 70.0,
                radius_m: 600.0,
            }],
            sea_depth_m: 40.0,
            weather: 3.0,
            rain_intensity: 0.0,
            wind_direction_deg: 225.0,
            tide_height_m: 0.5,
        }
    }
}

impl ScenarioConfig {
    pub fn terrain(&self) -> IslandTerrain {
        IslandTerrain::new(self.islands.clone(), self.sea_depth_m)
    }

    /// World state at an absolute simulation time.
    pub fn snapshot_at(&self, time_s: f64) -> WorldSnapshot {
        let (own_x, own_z) = self.own_ship.position_at(time_s);
        WorldSnapshot {
            own_ship: OwnShipState {
                x: own_x,
                z: own_z,
                heading_deg: self.own_ship.heading_deg,
                speed_ms: self.own_ship.speed_ms,
            },
            vessels: self
                .vessels
                .iter()
                .map(|ship| {
                    let (x, z) = ship.position_at(time_s);
                    TargetVessel {
                        x,
                        z,
                        heading_deg: ship.heading_deg,
                        speed_ms: ship.speed_ms,
                        length_m: ship.length_m,
                    }
                })
                .collect(),
            buoys: self.buoys.clone(),
            tide_height_m: self.tide_height_m,
            weather: self.weather,
            rain_intensity: self.rain_intensity,
            wind_direction_deg: self.wind_direction_deg,
            time_s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vessels_advance_along_their_course() {
        let scenario = ScenarioConfig::default();
        let start = scenario.snapshot_at(0.0);
        let later = scenario.snapshot_at(100.0);
        // Default traffic steams due north at 6 m/s.
        assert!((later.vessels[0].z - start.vessels[0].z - 600.0).abs() < 1e-6);
        assert!((later.vessels[0].x - start.vessels[0].x).abs() < 1e-6);
        assert_eq!(later.time_s, 100.0);
    }

    #[test]
    fn buoys_and_weather_are_static() {
        let scenario = ScenarioConfig::default();
        let a = scenario.snapshot_at(5.0);
        let b = scenario.snapshot_at(500.0);
        assert_eq!(a.buoys[0].x, b.buoys[0].x);
        assert_eq!(a.weather, b.weather);
    }
}
