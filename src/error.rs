//! Error types for lattice generation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Spacing undefined for cube_dim={cube_dim}, num_molecules={num_molecules}")]
    SpacingDomain { cube_dim: f64, num_molecules: f64 },

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Truncated-normal sampler gave up after {attempts} draws (bond_length={bond_length}, std_dev={std_dev})")]
    SamplerExhausted {
        attempts: usize,
        bond_length: f64,
        std_dev: f64,
    },

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
