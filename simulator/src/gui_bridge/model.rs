use crate::workflow::runner::{ContactReport, SimulationResult};
use serde::{Deserialize, Serialize};

/// Frame published to the HTTP bridge after a run: the operator-facing
/// summary, not the pixel buffer itself.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrameModel {
    pub scenario: String,
    pub ticks_run: usize,
    pub rotations_completed: usize,
    pub contacts_spawned: usize,
    pub contacts_pruned: usize,
    pub image_size: usize,
    pub contacts: Vec<ContactReport>,
}

impl FrameModel {
    pub fn from_result(scenario: &str, result: &SimulationResult) -> Self {
        Self {
            scenario: scenario.to_string(),
            ticks_run: result.ticks_run,
            rotations_completed: result.metrics.rotations_completed,
            contacts_spawned: result.metrics.contacts_spawned,
            contacts_pruned: result.metrics.contacts_pruned,
            image_size: result.image_size,
            contacts: result.contacts.clone(),
        }
    }
}
