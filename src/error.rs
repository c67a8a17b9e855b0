// error.rs - Host-level errors
//
// Simulation code never fails: bad geometry degrades to an empty frame.
// Only mounting, configuration and surface acquisition can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("Unknown effect: {0} (expected metaball, voronoi or wave)")]
    UnknownEffect(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange { field: &'static str, min: f64, max: f64, value: f64 },

    #[error("Stale mount handle {0}: effect was already detached or replaced")]
    StaleHandle(u64),

    #[error("Surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, HeroError>;
