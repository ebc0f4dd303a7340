pub mod geo;
pub mod stats;
