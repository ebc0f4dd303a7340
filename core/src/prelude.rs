/// Common error type for the fallible edges of the core.
///
/// The per-tick update path never surfaces errors: degraded input produces a
/// degraded picture, not a failure. Only configuration loading is fallible,
/// and even that is normally absorbed by `RadarConfig::load_or_default`.
#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    #[error("failed to read radar config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse radar config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type RadarResult<T> = Result<T, RadarError>;
