use radarcore::world::TerrainSampler;
use serde::{Deserialize, Serialize};

/// One gaussian island bump in an otherwise open sea.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Island {
    pub x: f64,
    pub z: f64,
    pub peak_m: f32,
    pub radius_m: f64,
}

/// Synthetic heightfield: constant-depth sea plus gaussian islands.
#[derive(Debug, Clone)]
pub struct IslandTerrain {
    islands: Vec<Island>,
    sea_depth_m: f32,
}

impl IslandTerrain {
    pub fn new(islands: Vec<Island>, sea_depth_m: f32) -> Self {
        Self {
            islands,
            sea_depth_m,
        }
    }
}

impl TerrainSampler for IslandTerrain {
    fn height_at(&self, x: f64, z: f64) -> f32 {
        let mut height = -self.sea_depth_m;
        for island in &self.islands {
            let dx = x - island.x;
            let dz = z - island.z;
            let r2 = island.radius_m * island.radius_m;
            let bump = island.peak_m as f64 * (-(dx * dx + dz * dz) / (2.0 * r2)).exp();
            height = height.max(bump as f32 - 0.5);
        }
        height
    }
}
