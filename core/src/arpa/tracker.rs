//! Detection, association, and lifecycle management for ARPA contacts.

use crate::arpa::contact::{Contact, ContactId, ContactKind, ContactScan};
use crate::config::TrackerConfig;
use crate::math::{geo, stats};
use crate::scan::{ScanBufferSet, SweepReport};
use crate::settings::RadarSettings;
use crate::telemetry::LogManager;
use crate::world::WorldSnapshot;

/// A cell group pulled out of the amplified buffer, in world coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub x: f64,
    pub z: f64,
    pub time_s: f64,
    pub amplitude: f32,
    pub range_nm: f32,
    pub bearing_deg: f32,
    pub cross_section: f32,
}

/// Lifecycle counters for one tracker pass, fed into the metrics recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerUpdate {
    pub detections: usize,
    pub spawned: usize,
    pub pruned: usize,
}

pub struct ContactTracker {
    config: TrackerConfig,
    contacts: Vec<Contact>,
    next_id: u64,
    logger: LogManager,
}

impl ContactTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            contacts: Vec::new(),
            next_id: 0,
            logger: LogManager::new("arpa"),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    fn allocate_id(&mut self) -> ContactId {
        let id = ContactId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Operator-designated contact at a known position. Bypasses the ignore
    /// classification and low-speed removal, but still ages out when no
    /// detection associates with it for the staleness window.
    pub fn acquire_manual(&mut self, x: f64, z: f64, time_s: f64) -> ContactId {
        let id = self.allocate_id();
        let scan = ContactScan {
            x,
            z,
            time_s,
            cross_section: 0.0,
            range_nm: 0.0,
            bearing_deg: 0.0,
        };
        self.contacts.push(Contact::new(id, ContactKind::Manual, scan));
        self.logger.record(&format!("manual contact {:?} acquired", id));
        id
    }

    /// One tracker pass over the buckets swept this tick.
    pub fn update(
        &mut self,
        report: &SweepReport,
        buffers: &ScanBufferSet,
        snapshot: &WorldSnapshot,
        settings: &RadarSettings,
    ) -> TrackerUpdate {
        let detections = self.detect(report, buffers, snapshot, settings);
        let mut update = self.associate_all(detections);
        update.pruned = self.prune(snapshot.time_s);
        if update.spawned > 0 || update.pruned > 0 {
            self.logger.record(&format!(
                "{} detections, {} new, {} pruned, {} live",
                update.detections,
                update.spawned,
                update.pruned,
                self.contacts.len()
            ));
        }
        update
    }

    /// Scans the swept rays of the amplified buffer for cell groups above
    /// both the per-ray statistical threshold and the gain-derived floor.
    /// Adjacent hot bins merge into one detection at their amplitude
    /// centroid; groups continuing across neighbouring swept buckets merge
    /// as well, so an extended target yields a single detection.
    fn detect(
        &self,
        report: &SweepReport,
        buffers: &ScanBufferSet,
        snapshot: &WorldSnapshot,
        settings: &RadarSettings,
    ) -> Vec<Detection> {
        let angle_buckets = buffers.angle_buckets();
        let range_bins = buffers.range_bins();
        let bucket_width_deg = 360.0 / angle_buckets as f64;
        let bin_nm = settings.range_nm() / range_bins as f32;
        let own = snapshot.own_ship;
        // Higher gain lowers the absolute floor, admitting weaker targets
        // (and more clutter) exactly as a real gain control does.
        let gain_floor = self.config.detection_floor * (2.0 - settings.gain());

        let mut detections: Vec<Detection> = Vec::new();
        let mut previous_bucket: Option<usize> = None;

        for &bucket in &report.swept {
            let row = buffers.amplified().row(bucket);
            let cells = row.as_slice().unwrap_or(&[]);
            let threshold = (stats::mean(cells)
                + self.config.threshold_rms_factor * stats::rms(cells))
            .max(gain_floor);

            let mut group: Option<(f32, f32)> = None; // (amplitude sum, weighted bin sum)
            for (bin, &value) in cells.iter().enumerate() {
                if value > threshold {
                    let (amplitude, weighted) = group.unwrap_or((0.0, 0.0));
                    group = Some((amplitude + value, weighted + value * bin as f32));
                } else if let Some((amplitude, weighted)) = group.take() {
                    self.push_detection(
                        &mut detections,
                        previous_bucket,
                        bucket,
                        amplitude,
                        weighted / amplitude,
                        bucket_width_deg,
                        bin_nm,
                        &own,
                        snapshot.time_s,
                    );
                }
            }
            if let Some((amplitude, weighted)) = group {
                self.push_detection(
                    &mut detections,
                    previous_bucket,
                    bucket,
                    amplitude,
                    weighted / amplitude,
                    bucket_width_deg,
                    bin_nm,
                    &own,
                    snapshot.time_s,
                );
            }
            previous_bucket = Some(bucket);
        }
        detections
    }

    #[allow(clippy::too_many_arguments)]
    fn push_detection(
        &self,
        detections: &mut Vec<Detection>,
        previous_bucket: Option<usize>,
        bucket: usize,
        amplitude: f32,
        centroid_bin: f32,
        bucket_width_deg: f64,
        bin_nm: f32,
        own: &crate::world::OwnShipState,
        time_s: f64,
    ) {
        let bearing = bucket as f64 * bucket_width_deg;
        let range_nm = (centroid_bin + 1.0) * bin_nm;
        let range_m = range_nm as f64 * geo::METRES_PER_NM;
        let (x, z) = geo::offset(own.x, own.z, bearing, range_m);
        let cross_section =
            amplitude * (1.0 + range_nm * range_nm) * self.config.cross_section_scale;

        // The same target lighting up the neighbouring bucket produces one
        // detection, not a string of them.
        if let (Some(previous), Some(last)) = (previous_bucket, detections.last_mut()) {
            let adjacent = previous + 1 == bucket || (bucket == 0 && previous != 0);
            let same_range = (last.range_nm - range_nm).abs() <= 2.0 * bin_nm;
            if adjacent && same_range && last.time_s == time_s {
                if amplitude > last.amplitude {
                    last.x = x;
                    last.z = z;
                    last.amplitude = amplitude;
                    last.range_nm = range_nm;
                    last.bearing_deg = bearing as f32;
                    last.cross_section = cross_section;
                }
                return;
            }
        }

        detections.push(Detection {
            x,
            z,
            time_s,
            amplitude,
            range_nm,
            bearing_deg: bearing as f32,
            cross_section,
        });
    }

    /// Nearest-neighbour association with a distance-and-time gate. This is
    /// deliberately not an optimal assignment: detections are taken in scan
    /// order, each contact accepts at most one detection per pass, and an
    /// equidistant later detection loses to the earlier one.
    fn associate_all(&mut self, detections: Vec<Detection>) -> TrackerUpdate {
        let mut update = TrackerUpdate {
            detections: detections.len(),
            ..TrackerUpdate::default()
        };
        let mut claimed = vec![false; self.contacts.len()];

        for detection in detections {
            let mut best: Option<(usize, f64)> = None;
            for (index, contact) in self.contacts.iter().enumerate() {
                if claimed[index] {
                    continue;
                }
                let elapsed = (detection.time_s - contact.latest_scan().time_s).max(0.0);
                let gate = self.config.gate_base_m + self.config.gate_growth_ms * elapsed;
                let (px, pz) = contact.predicted_position(detection.time_s);
                let distance = geo::distance_m(px, pz, detection.x, detection.z);
                if distance <= gate && best.map_or(true, |(_, d)| distance < d) {
                    best = Some((index, distance));
                }
            }

            let scan = ContactScan {
                x: detection.x,
                z: detection.z,
                time_s: detection.time_s,
                cross_section: detection.cross_section,
                range_nm: detection.range_nm,
                bearing_deg: detection.bearing_deg,
            };
            match best {
                Some((index, _)) => {
                    claimed[index] = true;
                    let contact = &mut self.contacts[index];
                    // An extended target can light up neighbouring rays of
                    // the same antenna look across consecutive ticks; that
                    // refines the current scan instead of appending history.
                    let same_look = detection.time_s - contact.latest_scan().time_s
                        < self.config.min_scan_interval_s;
                    if same_look {
                        if detection.cross_section > contact.latest_scan().cross_section {
                            contact.replace_latest_scan(scan);
                        }
                    } else {
                        contact.push_scan(scan, self.config.history_len);
                    }
                    contact.recompute_estimate();
                    self.classify(index);
                }
                None => {
                    let id = self.allocate_id();
                    self.contacts.push(Contact::new(id, ContactKind::Auto, scan));
                    claimed.push(true);
                    update.spawned += 1;
                }
            }
        }
        update
    }

    /// Static buoys and clutter spikes read as slow and small; flag them so
    /// the display can suppress their vectors. Manual designation overrides.
    fn classify(&mut self, index: usize) {
        let contact = &mut self.contacts[index];
        if contact.kind == ContactKind::Manual {
            contact.ignored = false;
            return;
        }
        if contact.scan_count() < 3 {
            return;
        }
        contact.ignored = contact.speed_ms() < self.config.ignore_speed_ms
            && contact.mean_cross_section() < self.config.ignore_cross_section;
    }

    /// Drops contacts not seen within the staleness window. Identifiers are
    /// never reissued; the counter only moves forward.
    fn prune(&mut self, now_s: f64) -> usize {
        let staleness = self.config.staleness_s;
        let before = self.contacts.len();
        self.contacts
            .retain(|contact| now_s - contact.latest_scan().time_s <= staleness);
        before - self.contacts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arpa::contact::ContactStatus;

    fn detection(x: f64, z: f64, time_s: f64, cross_section: f32) -> Detection {
        Detection {
            x,
            z,
            time_s,
            amplitude: 10.0,
            range_nm: (x * x + z * z).sqrt() as f32 / 1852.0,
            bearing_deg: 0.0,
            cross_section,
        }
    }

    fn tracker() -> ContactTracker {
        ContactTracker::new(TrackerConfig::default())
    }

    #[test]
    fn constant_velocity_target_converges_and_is_not_ignored() {
        let mut t = tracker();
        // 10 m/s due east, one detection per 3 s rotation.
        for step in 0..4 {
            let time = step as f64 * 3.0;
            t.associate_all(vec![detection(1000.0 + 10.0 * time, 500.0, time, 40.0)]);
        }
        assert_eq!(t.contacts().len(), 1);
        let contact = &t.contacts()[0];
        assert_eq!(contact.status, ContactStatus::Confirmed);
        assert!((contact.speed_ms() - 10.0).abs() < 0.1);
        assert!((contact.heading_deg - 90.0).abs() < 0.5);
        assert!(!contact.ignored);
    }

    #[test]
    fn stationary_small_target_is_classified_ignored() {
        let mut t = tracker();
        for step in 0..4 {
            let time = step as f64 * 3.0;
            t.associate_all(vec![detection(800.0, -300.0, time, 1.0)]);
        }
        assert_eq!(t.contacts().len(), 1);
        assert!(t.contacts()[0].ignored);
    }

    #[test]
    fn manual_contact_is_never_ignored() {
        let mut t = tracker();
        let id = t.acquire_manual(800.0, -300.0, 0.0);
        for step in 1..5 {
            let time = step as f64 * 3.0;
            t.associate_all(vec![detection(800.0, -300.0, time, 1.0)]);
        }
        assert_eq!(t.contacts().len(), 1);
        assert_eq!(t.contacts()[0].id, id);
        assert_eq!(t.contacts()[0].kind, ContactKind::Manual);
        assert!(!t.contacts()[0].ignored);
    }

    #[test]
    fn unassociated_detection_spawns_a_new_contact() {
        let mut t = tracker();
        t.associate_all(vec![detection(0.0, 2000.0, 0.0, 20.0)]);
        // Far outside any gate: own contact.
        let update = t.associate_all(vec![detection(5000.0, -5000.0, 3.0, 20.0)]);
        assert_eq!(update.spawned, 1);
        assert_eq!(t.contacts().len(), 2);
        assert_ne!(t.contacts()[0].id, t.contacts()[1].id);
    }

    #[test]
    fn equidistant_detections_resolve_to_the_earlier_one() {
        let mut t = tracker();
        t.associate_all(vec![detection(1000.0, 0.0, 0.0, 20.0)]);
        // Two detections symmetric about the contact: the first in scan
        // order wins the association, the second spawns a new contact.
        let update = t.associate_all(vec![
            detection(950.0, 0.0, 3.0, 20.0),
            detection(1050.0, 0.0, 3.0, 20.0),
        ]);
        assert_eq!(update.spawned, 1);
        let original = &t.contacts()[0];
        assert_eq!(original.scan_count(), 2);
        assert_eq!(original.latest_scan().x, 950.0);
    }

    #[test]
    fn detections_within_the_same_look_refine_instead_of_appending() {
        let mut t = tracker();
        t.associate_all(vec![detection(1000.0, 0.0, 0.0, 20.0)]);
        // Neighbouring ray of the same look, 0.1 s later, stronger echo.
        let update = t.associate_all(vec![detection(1010.0, 0.0, 0.1, 25.0)]);
        assert_eq!(update.spawned, 0);
        let contact = &t.contacts()[0];
        assert_eq!(contact.scan_count(), 1);
        assert_eq!(contact.latest_scan().x, 1010.0);
        assert_eq!(contact.latest_scan().cross_section, 25.0);
    }

    #[test]
    fn stale_contacts_are_removed_and_ids_are_not_reused() {
        let mut t = tracker();
        t.associate_all(vec![detection(1000.0, 0.0, 0.0, 20.0)]);
        let stale_id = t.contacts()[0].id;

        let pruned = t.prune(TrackerConfig::default().staleness_s + 1.0);
        assert_eq!(pruned, 1);
        assert!(t.contacts().is_empty());

        t.associate_all(vec![detection(1000.0, 0.0, 100.0, 20.0)]);
        assert_ne!(t.contacts()[0].id, stale_id);
        assert!(t.contacts()[0].id.0 > stale_id.0);
    }
}
