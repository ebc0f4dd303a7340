pub mod buffer;
pub mod engine;
pub mod noise;

pub use buffer::ScanBufferSet;
pub use engine::{ScanEngine, SweepReport};
pub use noise::{CellEnvironment, NoiseModel};
