//! Error types for force profile sweeps.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A grid axis was given no values.
    #[error("grid has no {0} values")]
    EmptyGrid(&'static str),

    /// A grid axis holds the same value twice, which would evaluate a grid point twice.
    #[error("grid {axis} value {value} appears more than once")]
    DuplicateGridValue { axis: &'static str, value: f64 },

    /// A grid value is NaN or infinite.
    #[error("grid {axis} value {value} is not finite")]
    NonFiniteGridValue { axis: &'static str, value: f64 },

    /// The sweep axis has zero length.
    #[error("sweep axis must be non-zero")]
    ZeroAxis,

    #[error("configuration label '{0}' is defined more than once")]
    DuplicateLabel(String),

    #[error("configuration '{label}' gives {given} polarizations for {beams} beams")]
    PolarizationCount {
        label: String,
        given: usize,
        beams: usize,
    },

    /// A beam set was built with a polarization count that does not match its geometry.
    #[error("{given} polarizations given for {beams} beams")]
    BeamCount { given: usize, beams: usize },

    #[error("polarization must be +1 or -1, got {0}")]
    InvalidPolarization(i32),

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    /// A physical parameter is outside the range the model accepts.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The force evaluated at a grid point is NaN or infinite.
    #[error("force profile '{profile}' is not finite at position {position}, velocity {velocity}")]
    NonFinite {
        profile: String,
        position: f64,
        velocity: f64,
    },

    /// The ECS world could not be updated between evaluation chunks.
    #[error("ecs error: {0}")]
    Ecs(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
