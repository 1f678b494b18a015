use thiserror::Error;

/// Errors surfaced by the radar engine.
///
/// None of these are fatal at runtime: a missing surface means the radar
/// simply does not start, and bad configuration is rejected before a
/// scheduler is ever built.
#[derive(Debug, Error)]
pub enum RadarError {
    /// The host drawing surface or its 2D context could not be obtained.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Configuration or catalog JSON failed to parse.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds values the engine cannot run with.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
