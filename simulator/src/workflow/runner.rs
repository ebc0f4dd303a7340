use crate::generator::scenario::ScenarioConfig;
use crate::workflow::config::SimulationConfig;
use radarcore::arpa::{Contact, ContactKind};
use radarcore::telemetry::MetricsSnapshot;
use radarcore::Radar;
use serde::{Deserialize, Serialize};

/// Flattened contact view for reports and the HTTP bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReport {
    pub id: u64,
    pub manual: bool,
    pub ignored: bool,
    pub speed_ms: f64,
    pub heading_deg: f64,
    pub scan_count: usize,
}

impl ContactReport {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id.0,
            manual: contact.kind == ContactKind::Manual,
            ignored: contact.ignored,
            speed_ms: contact.speed_ms(),
            heading_deg: contact.heading_deg,
            scan_count: contact.scan_count(),
        }
    }
}

pub struct SimulationResult {
    pub ticks_run: usize,
    pub metrics: MetricsSnapshot,
    pub contacts: Vec<ContactReport>,
    pub image_size: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: SimulationConfig,
}

impl Runner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Drives the radar through the configured scenario.
    pub fn execute(&self) -> anyhow::Result<SimulationResult> {
        self.execute_scenario(&self.config.scenario)
    }

    /// Same tick plan, different world; used by the HTTP bridge.
    pub fn execute_scenario(&self, scenario: &ScenarioConfig) -> anyhow::Result<SimulationResult> {
        let mut radar = Radar::new(self.config.radar.clone());
        let terrain = scenario.terrain();

        let mut time_s = 0.0;
        for _ in 0..self.config.ticks {
            let snapshot = scenario.snapshot_at(time_s);
            radar.update(&snapshot, &terrain);
            time_s += self.config.tick_seconds;
        }

        Ok(SimulationResult {
            ticks_run: self.config.ticks,
            metrics: radar.metrics(),
            contacts: radar.contacts().iter().map(ContactReport::from_contact).collect(),
            image_size: radar.image().size(),
        })
    }
}
