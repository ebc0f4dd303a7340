//! Per-cell clutter and receiver-noise model.
//!
//! Sea clutter is strong near the scanner, decays exponentially with range,
//! and is biased toward the downwind side. Rain clutter is range-independent
//! and scales with rain intensity. Each clutter term is attenuated by its
//! operator-controlled reduction setting; the receiver noise floor is always
//! present. False contacts produced here are intentionally left for the
//! tracker's ignore/stale logic to reject.

use crate::config::NoiseConfig;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Inputs describing one buffer cell and the conditions around it.
#[derive(Debug, Clone, Copy)]
pub struct CellEnvironment {
    pub range_nm: f32,
    pub bearing_deg: f32,
    pub wind_direction_deg: f32,
    pub weather: f32,
    pub rain_intensity: f32,
    /// Operator sea-clutter reduction, [0, 1].
    pub sea_reduction: f32,
    /// Operator rain-clutter reduction, [0, 1].
    pub rain_reduction: f32,
    /// Effective scanner height, proxy for the depression angle.
    pub scanner_height_m: f32,
}

pub struct NoiseModel {
    config: NoiseConfig,
    rng: StdRng,
}

impl NoiseModel {
    pub fn new(config: NoiseConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Deterministic clutter amplitude for a cell. Monotone non-increasing
    /// in both reduction settings; never negative.
    pub fn clutter_level(config: &NoiseConfig, cell: &CellEnvironment) -> f32 {
        let range = cell.range_nm.max(0.0);

        // Downwind asymmetry: 0 looking into the wind, 1 looking downwind.
        let relative = (cell.bearing_deg - cell.wind_direction_deg) as f64;
        let downwind = 0.5 * (1.0 - relative.to_radians().cos()) as f32;

        // Grazing-angle proxy: a taller scanner sees more near-range sea
        // return, a low one almost none.
        let height = cell.scanner_height_m.max(0.0);
        let grazing = height / (height + range).max(f32::EPSILON);

        let sea = config.sea_coeff
            * cell.weather.max(0.0)
            * (-range / config.sea_decay_nm).exp()
            * grazing
            * (1.0 + config.downwind_bias * downwind)
            * (1.0 - cell.sea_reduction.clamp(0.0, 1.0));

        let rain = config.rain_coeff
            * cell.rain_intensity.max(0.0)
            * (1.0 - cell.rain_reduction.clamp(0.0, 1.0));

        (sea + rain).max(0.0)
    }

    /// Clutter plus a jittered receiver-noise floor for one cell.
    pub fn sample(&mut self, cell: &CellEnvironment) -> f32 {
        let floor = self.config.noise_floor * self.rng.gen_range(0.0..2.0);
        (Self::clutter_level(&self.config, cell) + floor).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(range_nm: f32, sea_reduction: f32) -> CellEnvironment {
        CellEnvironment {
            range_nm,
            bearing_deg: 45.0,
            wind_direction_deg: 270.0,
            weather: 5.0,
            rain_intensity: 3.0,
            sea_reduction,
            rain_reduction: 0.2,
            scanner_height_m: 2.0,
        }
    }

    #[test]
    fn increasing_sea_reduction_never_increases_noise() {
        let config = NoiseConfig::default();
        let mut previous = f32::INFINITY;
        for step in 0..=10 {
            let reduction = step as f32 / 10.0;
            let level = NoiseModel::clutter_level(&config, &cell(0.5, reduction));
            assert!(level <= previous, "reduction {} raised clutter", reduction);
            previous = level;
        }
    }

    #[test]
    fn sea_clutter_fades_with_range() {
        let config = NoiseConfig::default();
        let near = NoiseModel::clutter_level(&config, &cell(0.2, 0.0));
        let far = NoiseModel::clutter_level(&config, &cell(8.0, 0.0));
        assert!(near > far);
    }

    #[test]
    fn downwind_bearing_sees_more_clutter_than_upwind() {
        let config = NoiseConfig::default();
        let mut upwind = cell(0.5, 0.0);
        upwind.bearing_deg = upwind.wind_direction_deg;
        let mut downwind = upwind;
        downwind.bearing_deg = upwind.wind_direction_deg + 180.0;
        assert!(
            NoiseModel::clutter_level(&config, &downwind)
                > NoiseModel::clutter_level(&config, &upwind)
        );
    }

    #[test]
    fn sample_is_non_negative_and_keeps_the_noise_floor() {
        let mut model = NoiseModel::new(NoiseConfig::default(), 7);
        let mut calm = cell(10.0, 1.0);
        calm.weather = 0.0;
        calm.rain_intensity = 0.0;
        for _ in 0..100 {
            let value = model.sample(&calm);
            assert!(value >= 0.0);
            assert!(value <= NoiseConfig::default().noise_floor * 2.0 + f32::EPSILON);
        }
    }

    #[test]
    fn seeded_models_reproduce_the_same_sequence() {
        let mut a = NoiseModel::new(NoiseConfig::default(), 42);
        let mut b = NoiseModel::new(NoiseConfig::default(), 42);
        let environment = cell(1.0, 0.3);
        for _ in 0..16 {
            assert_eq!(a.sample(&environment), b.sample(&environment));
        }
    }
}
