use crate::generator::scenario::ScenarioConfig;
use anyhow::Context;
use radarcore::RadarConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub ticks: usize,
    pub tick_seconds: f64,
    pub radar: RadarConfig,
    pub scenario: ScenarioConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_seconds: 0.1,
            radar: RadarConfig::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading simulation config {}", path_ref.display()))?;
        let config: SimulationConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing simulation config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(ticks: usize, tick_seconds: f64) -> Self {
        Self {
            ticks,
            tick_seconds,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_overrides_the_tick_plan() {
        let cfg = SimulationConfig::from_args(100, 0.05);
        assert_eq!(cfg.ticks, 100);
        assert_eq!(cfg.tick_seconds, 0.05);
        assert_eq!(cfg.radar.angle_buckets, 360);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"ticks: 50\ntick_seconds: 0.2\nscenario:\n  weather: 7.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = SimulationConfig::load(&path).unwrap();
        assert_eq!(cfg.ticks, 50);
        assert_eq!(cfg.scenario.weather, 7.0);
    }
}
