//! Tracked contact state and motion estimation.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Stable display identity. Assigned from a monotone counter and never
/// reused within a session, so external UI may hold one across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub u64);

/// How the contact entered the system. A closed variant, not a hierarchy:
/// manual designation only changes classification and pruning behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Auto,
    Manual,
}

/// Lifecycle: a bare detection is unconfirmed; the first associated
/// re-detection confirms it; staleness removes it from the set entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactStatus {
    Unconfirmed,
    Confirmed,
}

/// One observation of the contact. Reference range/bearing are kept for
/// diagnostics only; estimates re-derive from positions and timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactScan {
    pub x: f64,
    pub z: f64,
    pub time_s: f64,
    pub cross_section: f32,
    pub range_nm: f32,
    pub bearing_deg: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub kind: ContactKind,
    pub status: ContactStatus,
    scans: VecDeque<ContactScan>,
    /// Estimated velocity, metres per second east/north.
    pub velocity_east_ms: f64,
    pub velocity_north_ms: f64,
    pub heading_deg: f64,
    /// Static-clutter classification; never set on manual contacts.
    pub ignored: bool,
}

impl Contact {
    pub fn new(id: ContactId, kind: ContactKind, first_scan: ContactScan) -> Self {
        let mut scans = VecDeque::new();
        scans.push_back(first_scan);
        Self {
            id,
            kind,
            status: ContactStatus::Unconfirmed,
            scans,
            velocity_east_ms: 0.0,
            velocity_north_ms: 0.0,
            heading_deg: 0.0,
            ignored: false,
        }
    }

    pub fn scans(&self) -> impl Iterator<Item = &ContactScan> {
        self.scans.iter()
    }

    pub fn scan_count(&self) -> usize {
        self.scans.len()
    }

    pub fn latest_scan(&self) -> &ContactScan {
        // A contact always holds at least its creating scan.
        self.scans.back().expect("contact without scans")
    }

    /// Swaps out the newest scan for a better observation of the same look.
    pub fn replace_latest_scan(&mut self, scan: ContactScan) {
        if let Some(latest) = self.scans.back_mut() {
            *latest = scan;
        }
    }

    pub fn push_scan(&mut self, scan: ContactScan, max_history: usize) {
        while self.scans.len() >= max_history.max(1) {
            self.scans.pop_front();
        }
        self.scans.push_back(scan);
        if self.status == ContactStatus::Unconfirmed && self.scans.len() >= 2 {
            self.status = ContactStatus::Confirmed;
        }
    }

    pub fn speed_ms(&self) -> f64 {
        (self.velocity_east_ms.powi(2) + self.velocity_north_ms.powi(2)).sqrt()
    }

    /// Constant-velocity extrapolation of the last known position.
    pub fn predicted_position(&self, time_s: f64) -> (f64, f64) {
        let last = self.latest_scan();
        let dt = (time_s - last.time_s).max(0.0);
        (
            last.x + self.velocity_east_ms * dt,
            last.z + self.velocity_north_ms * dt,
        )
    }

    /// Finite-difference estimate over the retained history: displacement
    /// from the oldest kept scan to the newest, divided by elapsed time.
    /// With fewer than two scans the motion is reported as zero, never as a
    /// division by zero.
    pub fn recompute_estimate(&mut self) {
        let (oldest, newest) = match (self.scans.front(), self.scans.back()) {
            (Some(oldest), Some(newest)) if self.scans.len() >= 2 => (*oldest, *newest),
            _ => {
                self.velocity_east_ms = 0.0;
                self.velocity_north_ms = 0.0;
                return;
            }
        };
        let elapsed = newest.time_s - oldest.time_s;
        if elapsed <= f64::EPSILON {
            self.velocity_east_ms = 0.0;
            self.velocity_north_ms = 0.0;
            return;
        }
        self.velocity_east_ms = (newest.x - oldest.x) / elapsed;
        self.velocity_north_ms = (newest.z - oldest.z) / elapsed;
        if self.speed_ms() > 0.01 {
            self.heading_deg =
                crate::math::geo::wrap_deg(self.velocity_east_ms.atan2(self.velocity_north_ms).to_degrees());
        }
    }

    /// Mean estimated cross-section over the retained scans.
    pub fn mean_cross_section(&self) -> f32 {
        if self.scans.is_empty() {
            return 0.0;
        }
        self.scans.iter().map(|s| s.cross_section).sum::<f32>() / self.scans.len() as f32
    }
}
