//! Rotating-antenna sweep engine.
//!
//! Each tick advances the sweep by a bounded number of angle buckets, so a
//! full rotation takes many ticks and the per-tick cost stays fixed. Buffer
//! indexing is north-referenced: bucket 0 is true north regardless of the
//! display orientation, which is applied at render time.

use crate::config::ScanConfig;
use crate::math::geo;
use crate::scan::buffer::ScanBufferSet;
use crate::scan::noise::{CellEnvironment, NoiseModel};
use crate::settings::RadarSettings;
use crate::telemetry::LogManager;
use crate::world::{OwnShipState, TerrainSampler, WorldSnapshot};

/// What one call to `sweep` covered, in scan (angle) order.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub swept: Vec<usize>,
    pub rotation_completed: bool,
}

pub struct ScanEngine {
    config: ScanConfig,
    current_bucket: usize,
    carry_buckets: f64,
    logger: LogManager,
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            current_bucket: 0,
            carry_buckets: 0.0,
            logger: LogManager::new("scan"),
        }
    }

    /// Advances the antenna and fills the raw and amplified rows for every
    /// bucket crossed. Rotates the amplified buffers when the sweep passes
    /// north, exactly once per full rotation.
    pub fn sweep(
        &mut self,
        buffers: &mut ScanBufferSet,
        noise: &mut NoiseModel,
        snapshot: &WorldSnapshot,
        terrain: &impl TerrainSampler,
        settings: &RadarSettings,
        dt_s: f64,
    ) -> SweepReport {
        let angle_buckets = buffers.angle_buckets();
        let buckets_per_second =
            self.config.rotation_rpm as f64 / 60.0 * angle_buckets as f64;
        let advance = buckets_per_second * dt_s.max(0.0) + self.carry_buckets;
        let mut steps = advance.floor() as usize;
        self.carry_buckets = advance - steps as f64;
        if steps > self.config.max_buckets_per_tick {
            steps = self.config.max_buckets_per_tick;
            self.carry_buckets = 0.0;
        }

        let mut report = SweepReport::default();
        for _ in 0..steps {
            self.current_bucket = (self.current_bucket + 1) % angle_buckets;
            if self.current_bucket == 0 {
                buffers.rotate();
                report.rotation_completed = true;
                self.logger.record("rotation complete");
            }
            self.scan_ray(self.current_bucket, buffers, noise, snapshot, terrain, settings);
            report.swept.push(self.current_bucket);
        }
        report
    }

    /// Line-of-sight detection range along a bearing: the distance to the
    /// first range-bin step where terrain rises above the sight line from
    /// the scanner (horizontal line less the radar-horizon curvature drop).
    /// Always within [0, max_range_m].
    pub fn range_at_angle(
        terrain: &impl TerrainSampler,
        own: &OwnShipState,
        bearing_deg: f64,
        scanner_height_m: f64,
        max_range_m: f64,
        range_bins: usize,
    ) -> f64 {
        let bin_m = max_range_m / range_bins.max(1) as f64;
        match Self::march_to_obstruction(
            terrain,
            own,
            bearing_deg,
            scanner_height_m,
            bin_m,
            range_bins,
        ) {
            Some(bin) => ((bin + 1) as f64 * bin_m).min(max_range_m),
            None => max_range_m,
        }
    }

    /// First bin whose terrain sample blocks the sight line, if any.
    fn march_to_obstruction(
        terrain: &impl TerrainSampler,
        own: &OwnShipState,
        bearing_deg: f64,
        scanner_height_m: f64,
        bin_m: f64,
        range_bins: usize,
    ) -> Option<usize> {
        for bin in 0..range_bins {
            let distance = (bin + 1) as f64 * bin_m;
            let (x, z) = geo::offset(own.x, own.z, bearing_deg, distance);
            let terrain_height = terrain.height_at(x, z) as f64;
            let sight_height = scanner_height_m - geo::horizon_drop_m(distance);
            if terrain_height > sight_height {
                return Some(bin);
            }
        }
        None
    }

    fn effective_scanner_height(&self, settings: &RadarSettings, tide_m: f32) -> f64 {
        ((settings.scanner_height_m() - tide_m).max(self.config.min_scanner_height_m)) as f64
    }

    fn scan_ray(
        &mut self,
        bucket: usize,
        buffers: &mut ScanBufferSet,
        noise: &mut NoiseModel,
        snapshot: &WorldSnapshot,
        terrain: &impl TerrainSampler,
        settings: &RadarSettings,
    ) {
        let angle_buckets = buffers.angle_buckets();
        let range_bins = buffers.range_bins();
        let bucket_width_deg = 360.0 / angle_buckets as f64;
        let bearing = bucket as f64 * bucket_width_deg;
        let own = snapshot.own_ship;
        let scanner_height = self.effective_scanner_height(settings, snapshot.tide_height_m);
        let max_range_m = settings.range_m();
        let bin_m = max_range_m / range_bins as f64;

        let mut ray = vec![0.0f32; range_bins];

        // Terrain: back-scatter from visible land, a strong return at the
        // blocking bin, shadow beyond it.
        let mut shadow_from = range_bins;
        for bin in 0..range_bins {
            let distance = (bin + 1) as f64 * bin_m;
            let (x, z) = geo::offset(own.x, own.z, bearing, distance);
            let terrain_height = terrain.height_at(x, z) as f64;
            let sight_height = scanner_height - geo::horizon_drop_m(distance);
            if terrain_height > sight_height {
                ray[bin] = self.config.land_return;
                shadow_from = bin + 1;
                break;
            }
            let above_water = (terrain_height - snapshot.tide_height_m as f64).max(0.0) as f32;
            if above_water > 0.0 {
                ray[bin] += self.config.terrain_reflectivity * above_water
                    / range_attenuation(distance);
            }
        }
        let lit_bins = shadow_from.min(range_bins);

        // Vessel and buoy echoes are summed into the lit bins so that
        // overlapping targets reinforce each other.
        for vessel in &snapshot.vessels {
            let cross_section = (vessel.length_m / 10.0).powi(2) as f32;
            let spread = ((vessel.length_m / bin_m) / 2.0).round() as usize;
            self.illuminate_target(
                &mut ray[..lit_bins],
                &own,
                bearing,
                bucket_width_deg,
                bin_m,
                vessel.x,
                vessel.z,
                self.config.vessel_echo_scale * cross_section,
                spread,
            );
        }
        for buoy in &snapshot.buoys {
            self.illuminate_target(
                &mut ray[..lit_bins],
                &own,
                bearing,
                bucket_width_deg,
                bin_m,
                buoy.x,
                buoy.z,
                self.config.vessel_echo_scale * self.config.buoy_cross_section,
                0,
            );
        }

        // Raw keeps the clean echoes; the amplified row layers clutter on
        // top for the picture the tracker and renderer consume.
        for (bin, &value) in ray.iter().enumerate() {
            buffers.raw_mut()[[bucket, bin]] = value;
            let cell = CellEnvironment {
                range_nm: (((bin + 1) as f64 * bin_m) / geo::METRES_PER_NM) as f32,
                bearing_deg: bearing as f32,
                wind_direction_deg: snapshot.wind_direction_deg,
                weather: snapshot.weather,
                rain_intensity: snapshot.rain_intensity,
                sea_reduction: settings.sea_clutter(),
                rain_reduction: settings.rain_clutter(),
                scanner_height_m: scanner_height as f32,
            };
            buffers.amplified_mut()[[bucket, bin]] = value + noise.sample(&cell);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn illuminate_target(
        &self,
        ray: &mut [f32],
        own: &OwnShipState,
        ray_bearing_deg: f64,
        bucket_width_deg: f64,
        bin_m: f64,
        target_x: f64,
        target_z: f64,
        echo: f32,
        spread_bins: usize,
    ) {
        if ray.is_empty() {
            return;
        }
        let distance = geo::distance_m(own.x, own.z, target_x, target_z);
        if distance <= 0.0 || distance > ray.len() as f64 * bin_m {
            return;
        }
        let target_bearing = geo::bearing_deg(own.x, own.z, target_x, target_z);
        // Beam spread of roughly one bucket either side; wraps at north.
        if geo::signed_delta_deg(target_bearing, ray_bearing_deg).abs() > 1.5 * bucket_width_deg {
            return;
        }
        let amplitude = echo / range_attenuation(distance);
        let centre_bin = ((distance / bin_m) as usize).min(ray.len() - 1);
        let first = centre_bin.saturating_sub(spread_bins);
        let last = (centre_bin + spread_bins).min(ray.len() - 1);
        for bin in first..=last {
            ray[bin] += amplitude;
        }
    }
}

/// Range attenuation shared by every echo source: unity at the scanner,
/// quadratic in nautical miles beyond it.
fn range_attenuation(distance_m: f64) -> f32 {
    let range_nm = distance_m / geo::METRES_PER_NM;
    (1.0 + range_nm * range_nm) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NoiseConfig, RadarConfig, ScanConfig};
    use crate::world::{BuoyMark, TargetVessel, TerrainSampler};

    /// Sheer wall across every bearing at a fixed distance.
    struct Wall {
        distance_m: f64,
        height_m: f32,
    }

    impl TerrainSampler for Wall {
        fn height_at(&self, x: f64, z: f64) -> f32 {
            if (x * x + z * z).sqrt() >= self.distance_m {
                self.height_m
            } else {
                -20.0
            }
        }
    }

    fn default_settings() -> RadarSettings {
        RadarSettings::from_config(&RadarConfig::default())
    }

    fn sweep_full_rotation(
        engine: &mut ScanEngine,
        buffers: &mut ScanBufferSet,
        noise: &mut NoiseModel,
        snapshot: &WorldSnapshot,
        terrain: &impl TerrainSampler,
        settings: &RadarSettings,
    ) {
        // Each oversized tick is capped at max_buckets_per_tick, so enough
        // ticks guarantee at least one full rotation.
        for _ in 0..60 {
            engine.sweep(buffers, noise, snapshot, terrain, settings, 10.0);
        }
    }

    #[test]
    fn open_sea_range_is_the_full_selected_range() {
        let own = OwnShipState::default();
        let range = ScanEngine::range_at_angle(
            &crate::world::OpenSea::default(),
            &own,
            0.0,
            2.0,
            5556.0,
            64,
        );
        assert_eq!(range, 5556.0);
    }

    #[test]
    fn wall_blocks_the_ray_and_shadows_everything_beyond() {
        let terrain = Wall {
            distance_m: 2000.0,
            height_m: 80.0,
        };
        let own = OwnShipState::default();
        let max_range = 5556.0;
        let blocked = ScanEngine::range_at_angle(&terrain, &own, 45.0, 2.0, max_range, 64);
        assert!(blocked >= 2000.0);
        assert!(blocked < 2400.0);

        let settings = default_settings();
        let mut engine = ScanEngine::new(ScanConfig::default());
        let mut buffers = ScanBufferSet::new(360, 64);
        let mut noise = NoiseModel::new(NoiseConfig::default(), 0);
        let snapshot = WorldSnapshot::default();
        sweep_full_rotation(&mut engine, &mut buffers, &mut noise, &snapshot, &terrain, &settings);

        let bin_m = settings.range_m() / 64.0;
        let blocked_bin = (blocked / bin_m).round() as usize - 1;
        let row = buffers.raw().row(45);
        assert_eq!(row[blocked_bin], ScanConfig::default().land_return);
        for bin in blocked_bin + 1..64 {
            assert_eq!(row[bin], 0.0, "bin {} inside the shadow is lit", bin);
        }
    }

    #[test]
    fn vessel_and_buoy_echoes_land_in_their_buckets() {
        let settings = default_settings();
        let mut engine = ScanEngine::new(ScanConfig::default());
        let mut buffers = ScanBufferSet::new(360, 64);
        let mut noise = NoiseModel::new(NoiseConfig::default(), 0);
        let snapshot = WorldSnapshot {
            vessels: vec![TargetVessel {
                x: 1852.0,
                z: 0.0,
                heading_deg: 0.0,
                speed_ms: 5.0,
                length_m: 30.0,
            }],
            buoys: vec![BuoyMark { x: 0.0, z: -926.0 }],
            ..WorldSnapshot::default()
        };
        let terrain = crate::world::OpenSea::default();
        sweep_full_rotation(&mut engine, &mut buffers, &mut noise, &snapshot, &terrain, &settings);

        // Vessel due east at 1 nm: bucket 90, bin around 1852 / bin_m.
        let bin_m = settings.range_m() / 64.0;
        let vessel_bin = (1852.0 / bin_m) as usize;
        assert!(buffers.raw()[[90, vessel_bin]] > 1.0);
        // Beam spread reaches the neighbouring bucket.
        assert!(buffers.raw()[[89, vessel_bin]] > 0.0);

        // Buoy due south at 0.5 nm: weaker but present.
        let buoy_bin = (926.0 / bin_m) as usize;
        assert!(buffers.raw()[[180, buoy_bin]] > 0.0);
        assert!(buffers.raw()[[180, buoy_bin]] < buffers.raw()[[90, vessel_bin]]);

        // A quiet bearing has no raw return on open sea.
        assert_eq!(buffers.raw().row(270).iter().copied().fold(0.0f32, f32::max), 0.0);
    }

    #[test]
    fn per_tick_step_is_bounded_and_rotation_is_reported_once_per_circle() {
        let settings = default_settings();
        let config = ScanConfig::default();
        let mut engine = ScanEngine::new(config);
        let mut buffers = ScanBufferSet::new(360, 64);
        let mut noise = NoiseModel::new(NoiseConfig::default(), 0);
        let snapshot = WorldSnapshot::default();
        let terrain = crate::world::OpenSea::default();

        let report = engine.sweep(&mut buffers, &mut noise, &snapshot, &terrain, &settings, 100.0);
        assert_eq!(report.swept.len(), config.max_buckets_per_tick);

        let mut rotations = 0;
        for _ in 0..48 {
            let report =
                engine.sweep(&mut buffers, &mut noise, &snapshot, &terrain, &settings, 10.0);
            if report.rotation_completed {
                rotations += 1;
            }
        }
        // 48 ticks x 15 buckets = 720 buckets = exactly two rotations.
        assert_eq!(rotations, 2);
    }

    #[test]
    fn zero_dt_sweeps_nothing() {
        let settings = default_settings();
        let mut engine = ScanEngine::new(ScanConfig::default());
        let mut buffers = ScanBufferSet::new(360, 64);
        let mut noise = NoiseModel::new(NoiseConfig::default(), 0);
        let report = engine.sweep(
            &mut buffers,
            &mut noise,
            &WorldSnapshot::default(),
            &crate::world::OpenSea::default(),
            &settings,
            0.0,
        );
        assert!(report.swept.is_empty());
        assert!(!report.rotation_completed);
    }
}
