//! Startup configuration with documented defaults.
//!
//! Every numeric tuning knob of the pipeline lives here rather than as a
//! literal inside an algorithm. Loading is never fatal: a missing or
//! malformed file falls back to the built-in defaults with a warning.

use crate::prelude::RadarResult;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Clutter and receiver-noise coefficients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Always-present receiver noise floor amplitude.
    pub noise_floor: f32,
    /// Sea-clutter amplitude per unit of weather intensity at zero range.
    pub sea_coeff: f32,
    /// e-folding range of sea clutter, nautical miles.
    pub sea_decay_nm: f32,
    /// Extra sea clutter on the downwind side, fraction of the base term.
    pub downwind_bias: f32,
    /// Rain-clutter amplitude per unit of rain intensity.
    pub rain_coeff: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            noise_floor: 0.05,
            sea_coeff: 0.6,
            sea_decay_nm: 1.5,
            downwind_bias: 0.5,
            rain_coeff: 0.15,
        }
    }
}

/// Sweep and echo-strength tuning for the scan engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Antenna rotation speed, revolutions per minute.
    pub rotation_rpm: f32,
    /// Upper bound on angle buckets swept in a single tick.
    pub max_buckets_per_tick: usize,
    /// Back-scatter amplitude per metre of terrain above water.
    pub terrain_reflectivity: f32,
    /// Amplitude of the return at the bin where terrain blocks the ray.
    pub land_return: f32,
    /// Echo scale for vessels; multiplied by (length/10)^2.
    pub vessel_echo_scale: f32,
    /// Fixed echo cross-section for buoys.
    pub buoy_cross_section: f32,
    /// Minimum effective scanner height after tide correction, metres.
    pub min_scanner_height_m: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rotation_rpm: 22.0,
            max_buckets_per_tick: 15,
            terrain_reflectivity: 0.8,
            land_return: 6.0,
            vessel_echo_scale: 50.0,
            buoy_cross_section: 0.6,
            min_scanner_height_m: 0.25,
        }
    }
}

/// ARPA detection, gating, and lifecycle tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detection threshold above the ray mean, in units of ray RMS.
    pub threshold_rms_factor: f32,
    /// Absolute amplitude floor under detections at gain = 1.
    pub detection_floor: f32,
    /// Association gate radius at zero elapsed time, metres.
    pub gate_base_m: f64,
    /// Gate growth per second since the contact was last seen, metres.
    pub gate_growth_ms: f64,
    /// Contacts unseen for longer than this are removed, seconds.
    pub staleness_s: f64,
    /// Detections gating to a contact within this interval of its latest
    /// scan count as the same look of the antenna, not a new observation.
    pub min_scan_interval_s: f64,
    /// Scans retained per contact for the motion estimate.
    pub history_len: usize,
    /// Speed below which an automatic contact may be classified ignored.
    pub ignore_speed_ms: f64,
    /// Cross-section below which an automatic contact may be ignored.
    pub ignore_cross_section: f32,
    /// Converts detection amplitude back to an estimated cross-section.
    pub cross_section_scale: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            threshold_rms_factor: 2.5,
            detection_floor: 0.8,
            gate_base_m: 150.0,
            gate_growth_ms: 25.0,
            staleness_s: 60.0,
            min_scan_interval_s: 1.0,
            history_len: 10,
            ignore_speed_ms: 0.5,
            ignore_cross_section: 3.0,
            cross_section_scale: 0.02,
        }
    }
}

/// Top-level radar configuration. All fields default individually, so a
/// partial config file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Index into the supported range table at startup.
    pub initial_range_index: usize,
    /// Scanner height above the waterline, metres.
    pub scanner_height_m: f32,
    pub gain: f32,
    pub sea_clutter: f32,
    pub rain_clutter: f32,
    /// Angle buckets per full rotation.
    pub angle_buckets: usize,
    /// Range bins per ray.
    pub range_bins: usize,
    /// Side length of the square PPI raster, pixels.
    pub image_size: usize,
    /// Afterglow decay applied to the previous rotation, 0 disables it.
    pub afterglow_decay: f32,
    /// Minimum simulation time between EBL adjustments, seconds.
    pub ebl_debounce_s: f64,
    /// Seed for the receiver-noise jitter.
    pub seed: u64,
    pub noise: NoiseConfig,
    pub scan: ScanConfig,
    pub tracker: TrackerConfig,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            initial_range_index: 3,
            scanner_height_m: 2.0,
            gain: 0.5,
            sea_clutter: 0.5,
            rain_clutter: 0.5,
            angle_buckets: 360,
            range_bins: 64,
            image_size: 512,
            afterglow_decay: 0.6,
            ebl_debounce_s: 0.25,
            seed: 0,
            noise: NoiseConfig::default(),
            scan: ScanConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl RadarConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> RadarResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Loads a config file, substituting the defaults on any failure.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "radar config {} unusable ({}), using defaults",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RadarConfig::load_or_default("/nonexistent/radar.json");
        assert_eq!(config.angle_buckets, 360);
        assert_eq!(config.initial_range_index, 3);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"not json at all").unwrap();
        let config = RadarConfig::load_or_default(temp.path());
        assert_eq!(config.range_bins, 64);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"scanner_height_m": 4.5, "noise": {"noise_floor": 0.1}}"#)
            .unwrap();
        let config = RadarConfig::load_or_default(temp.path());
        assert_eq!(config.scanner_height_m, 4.5);
        assert_eq!(config.noise.noise_floor, 0.1);
        assert_eq!(config.noise.sea_decay_nm, 1.5);
        assert_eq!(config.image_size, 512);
    }
}
