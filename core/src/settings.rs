//! Operator-facing radar state: range ring, gain and anti-clutter levels,
//! display orientation, and the electronic bearing line.

use crate::config::RadarConfig;
use serde::{Deserialize, Serialize};

/// Supported range rings, nautical miles. Range changes step through this
/// table and clamp at the ends.
pub const RANGE_TABLE_NM: [f32; 7] = [0.5, 1.0, 1.5, 3.0, 6.0, 12.0, 24.0];

const EBL_BEARING_STEP_DEG: f32 = 1.0;
const EBL_RANGE_STEP_NM: f32 = 0.05;

/// Display orientation reference. Course-up freezes the heading that was
/// current when the mode was selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    NorthUp,
    CourseUp { reference_deg: f32 },
    HeadUp,
}

#[derive(Debug, Clone)]
pub struct RadarSettings {
    range_index: usize,
    gain: f32,
    sea_clutter: f32,
    rain_clutter: f32,
    scanner_height_m: f32,
    orientation: Orientation,
    ebl_range_nm: f32,
    ebl_bearing_deg: f32,
    ebl_last_adjust_s: f64,
    ebl_debounce_s: f64,
}

impl RadarSettings {
    pub fn from_config(config: &RadarConfig) -> Self {
        Self {
            range_index: config.initial_range_index.min(RANGE_TABLE_NM.len() - 1),
            gain: config.gain.clamp(0.0, 1.0),
            sea_clutter: config.sea_clutter.clamp(0.0, 1.0),
            rain_clutter: config.rain_clutter.clamp(0.0, 1.0),
            scanner_height_m: config.scanner_height_m,
            orientation: Orientation::NorthUp,
            ebl_range_nm: 1.0,
            ebl_bearing_deg: 0.0,
            ebl_last_adjust_s: f64::NEG_INFINITY,
            ebl_debounce_s: config.ebl_debounce_s,
        }
    }

    pub fn range_nm(&self) -> f32 {
        RANGE_TABLE_NM[self.range_index]
    }

    pub fn range_m(&self) -> f64 {
        self.range_nm() as f64 * crate::math::geo::METRES_PER_NM
    }

    /// Steps to the next larger range ring. Returns true if the range
    /// changed (the caller must reset the scan buffers when it did).
    pub fn range_up(&mut self) -> bool {
        if self.range_index + 1 < RANGE_TABLE_NM.len() {
            self.range_index += 1;
            true
        } else {
            false
        }
    }

    /// Steps to the next smaller range ring; clamped at the bottom.
    pub fn range_down(&mut self) -> bool {
        if self.range_index > 0 {
            self.range_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, value: f32) {
        self.gain = value.clamp(0.0, 1.0);
    }

    pub fn sea_clutter(&self) -> f32 {
        self.sea_clutter
    }

    pub fn set_sea_clutter(&mut self, value: f32) {
        self.sea_clutter = value.clamp(0.0, 1.0);
    }

    pub fn rain_clutter(&self) -> f32 {
        self.rain_clutter
    }

    pub fn set_rain_clutter(&mut self, value: f32) {
        self.rain_clutter = value.clamp(0.0, 1.0);
    }

    pub fn scanner_height_m(&self) -> f32 {
        self.scanner_height_m
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_north_up(&mut self) {
        self.orientation = Orientation::NorthUp;
    }

    pub fn set_head_up(&mut self) {
        self.orientation = Orientation::HeadUp;
    }

    /// Selects course-up, freezing the supplied heading as the reference.
    pub fn set_course_up(&mut self, current_heading_deg: f32) {
        self.orientation = Orientation::CourseUp {
            reference_deg: current_heading_deg,
        };
    }

    pub fn ebl_range_nm(&self) -> f32 {
        self.ebl_range_nm
    }

    pub fn ebl_bearing_deg(&self) -> f32 {
        self.ebl_bearing_deg
    }

    /// A held-down EBL control fires every tick; the shared debounce timer
    /// limits it to one applied change per debounce interval.
    fn ebl_debounced(&mut self, now_s: f64) -> bool {
        if now_s - self.ebl_last_adjust_s < self.ebl_debounce_s {
            return false;
        }
        self.ebl_last_adjust_s = now_s;
        true
    }

    pub fn ebl_bearing_up(&mut self, now_s: f64) -> bool {
        if !self.ebl_debounced(now_s) {
            return false;
        }
        self.ebl_bearing_deg =
            crate::math::geo::wrap_deg((self.ebl_bearing_deg + EBL_BEARING_STEP_DEG) as f64) as f32;
        true
    }

    pub fn ebl_bearing_down(&mut self, now_s: f64) -> bool {
        if !self.ebl_debounced(now_s) {
            return false;
        }
        self.ebl_bearing_deg =
            crate::math::geo::wrap_deg((self.ebl_bearing_deg - EBL_BEARING_STEP_DEG) as f64) as f32;
        true
    }

    pub fn ebl_range_up(&mut self, now_s: f64) -> bool {
        if !self.ebl_debounced(now_s) {
            return false;
        }
        self.ebl_range_nm = (self.ebl_range_nm + EBL_RANGE_STEP_NM).min(self.range_nm());
        true
    }

    pub fn ebl_range_down(&mut self, now_s: f64) -> bool {
        if !self.ebl_debounced(now_s) {
            return false;
        }
        self.ebl_range_nm = (self.ebl_range_nm - EBL_RANGE_STEP_NM).max(0.0);
        true
    }
}
