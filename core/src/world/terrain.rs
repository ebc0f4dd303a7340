/// Read-only heightfield query supplied by the host application.
pub trait TerrainSampler {
    /// Ground/obstruction height in metres above chart datum at world
    /// (x east, z north). Negative values are seabed.
    fn height_at(&self, x: f64, z: f64) -> f32;
}

/// Featureless sea of constant depth. Default collaborator for tests and
/// for hosts that have no land in the area.
#[derive(Debug, Clone, Copy)]
pub struct OpenSea {
    pub depth_m: f32,
}

impl Default for OpenSea {
    fn default() -> Self {
        Self { depth_m: 50.0 }
    }
}

impl TerrainSampler for OpenSea {
    fn height_at(&self, _x: f64, _z: f64) -> f32 {
        -self.depth_m
    }
}
