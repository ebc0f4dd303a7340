pub mod scenario;
pub mod terrain;
