//! Simulation core for a rotating-antenna marine navigation radar.
//!
//! The modules follow the per-tick pipeline: the scan engine casts one
//! bounded angular sweep against terrain and traffic, the noise model layers
//! sea/rain clutter onto the swept rays, the ARPA tracker detects and tracks
//! contacts across rotations, and the display renderer rasterizes the
//! amplified buffer into a plan-position indicator image.

pub mod arpa;
pub mod config;
pub mod display;
pub mod math;
pub mod prelude;
pub mod radar;
pub mod scan;
pub mod settings;
pub mod telemetry;
pub mod world;

pub use config::RadarConfig;
pub use prelude::{RadarError, RadarResult};
pub use radar::Radar;
