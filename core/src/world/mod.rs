pub mod snapshot;
pub mod terrain;

pub use snapshot::{BuoyMark, OwnShipState, TargetVessel, WorldSnapshot};
pub use terrain::{OpenSea, TerrainSampler};
