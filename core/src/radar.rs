//! Radar facade: owns the settings, buffers, and pipeline stages, and runs
//! the scan → noise → track → render sequence once per simulation tick.
//!
//! The stage handoff is explicit and single-threaded: the scan engine (with
//! the noise model) writes the buffers, the tracker reads them and mutates
//! only its own contact set, the renderer reads both. The update entry point
//! never fails; degraded input degrades the picture instead.

use crate::arpa::{Contact, ContactId, ContactTracker};
use crate::config::RadarConfig;
use crate::display::{PpiImage, PpiRenderer};
use crate::scan::{NoiseModel, ScanBufferSet, ScanEngine};
use crate::settings::{Orientation, RadarSettings};
use crate::telemetry::{MetricsRecorder, MetricsSnapshot};
use crate::world::{TerrainSampler, WorldSnapshot};

pub struct Radar {
    settings: RadarSettings,
    buffers: ScanBufferSet,
    engine: ScanEngine,
    noise: NoiseModel,
    tracker: ContactTracker,
    renderer: PpiRenderer,
    metrics: MetricsRecorder,
    last_time_s: Option<f64>,
}

impl Radar {
    pub fn new(config: RadarConfig) -> Self {
        Self {
            settings: RadarSettings::from_config(&config),
            buffers: ScanBufferSet::new(config.angle_buckets, config.range_bins),
            engine: ScanEngine::new(config.scan),
            noise: NoiseModel::new(config.noise, config.seed),
            tracker: ContactTracker::new(config.tracker),
            renderer: PpiRenderer::new(config.image_size, config.afterglow_decay),
            metrics: MetricsRecorder::new(),
            last_time_s: None,
        }
    }

    /// Per-tick entry point. The first call only establishes the time
    /// reference; afterwards each call advances the sweep by the elapsed
    /// simulation time and returns the freshly rendered PPI image.
    pub fn update(
        &mut self,
        snapshot: &WorldSnapshot,
        terrain: &impl TerrainSampler,
    ) -> &PpiImage {
        let dt = match self.last_time_s {
            Some(last) => (snapshot.time_s - last).max(0.0),
            None => 0.0,
        };
        self.last_time_s = Some(snapshot.time_s);

        let report = self.engine.sweep(
            &mut self.buffers,
            &mut self.noise,
            snapshot,
            terrain,
            &self.settings,
            dt,
        );
        if report.rotation_completed {
            self.metrics.record_rotation();
        }

        let tracked = self
            .tracker
            .update(&report, &self.buffers, snapshot, &self.settings);
        self.metrics.record_contacts_spawned(tracked.spawned);
        self.metrics.record_contacts_pruned(tracked.pruned);

        self.renderer
            .render(&self.buffers, &self.settings, snapshot.own_ship.heading_deg)
    }

    // --- runtime controls -------------------------------------------------

    /// Steps up the range table. A change resets all three scan buffers
    /// together, since every bin's distance meaning shifts at once.
    pub fn range_up(&mut self) {
        if self.settings.range_up() {
            self.buffers.clear();
        }
    }

    pub fn range_down(&mut self) {
        if self.settings.range_down() {
            self.buffers.clear();
        }
    }

    pub fn set_gain(&mut self, value: f32) {
        self.settings.set_gain(value);
    }

    pub fn set_sea_clutter(&mut self, value: f32) {
        self.settings.set_sea_clutter(value);
    }

    pub fn set_rain_clutter(&mut self, value: f32) {
        self.settings.set_rain_clutter(value);
    }

    pub fn set_north_up(&mut self) {
        self.settings.set_north_up();
    }

    pub fn set_head_up(&mut self) {
        self.settings.set_head_up();
    }

    pub fn set_course_up(&mut self, current_heading_deg: f32) {
        self.settings.set_course_up(current_heading_deg);
    }

    pub fn ebl_bearing_up(&mut self) -> bool {
        self.settings.ebl_bearing_up(self.now())
    }

    pub fn ebl_bearing_down(&mut self) -> bool {
        self.settings.ebl_bearing_down(self.now())
    }

    pub fn ebl_range_up(&mut self) -> bool {
        self.settings.ebl_range_up(self.now())
    }

    pub fn ebl_range_down(&mut self) -> bool {
        self.settings.ebl_range_down(self.now())
    }

    /// Designates a manual ARPA contact at a world position.
    pub fn acquire_manual_contact(&mut self, x: f64, z: f64) -> ContactId {
        self.tracker.acquire_manual(x, z, self.now())
    }

    // --- read-only accessors ----------------------------------------------

    pub fn range_nm(&self) -> f32 {
        self.settings.range_nm()
    }

    pub fn gain(&self) -> f32 {
        self.settings.gain()
    }

    pub fn sea_clutter(&self) -> f32 {
        self.settings.sea_clutter()
    }

    pub fn rain_clutter(&self) -> f32 {
        self.settings.rain_clutter()
    }

    pub fn orientation(&self) -> Orientation {
        self.settings.orientation()
    }

    pub fn ebl_range_nm(&self) -> f32 {
        self.settings.ebl_range_nm()
    }

    pub fn ebl_bearing_deg(&self) -> f32 {
        self.settings.ebl_bearing_deg()
    }

    pub fn contacts(&self) -> &[Contact] {
        self.tracker.contacts()
    }

    pub fn image(&self) -> &PpiImage {
        self.renderer.image()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn now(&self) -> f64 {
        self.last_time_s.unwrap_or(0.0)
    }
}
