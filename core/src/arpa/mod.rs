//! ARPA (Automatic Radar Plotting Aid) contact tracking.
//!
//! Detections are pulled from the amplified scan buffer, associated to
//! persistent contacts by nearest-neighbour gating, and turned into motion
//! estimates by a finite-difference over each contact's scan history. The
//! clutter the noise model injects upstream is rejected here, through the
//! ignore classification and staleness pruning, not filtered beforehand.

pub mod contact;
pub mod tracker;

pub use contact::{Contact, ContactId, ContactKind, ContactScan, ContactStatus};
pub use tracker::{ContactTracker, Detection, TrackerUpdate};
