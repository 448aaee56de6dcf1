pub mod config;
pub mod error;
pub mod generator;
pub mod init_config;
pub mod io;
pub mod lattice;
pub mod output_filename;
pub mod perturbation;
pub mod species;

pub use error::{GeneratorError, Result};
pub use generator::{GenerationReport, Generator};
pub use init_config::{GeneratorConfig, LatticePlan};
pub use io::{CsvSink, ParticleRecord, RecordSink, RunHeader};
pub use lattice::{calc_spacing, walk_lattice, LatticeWalker};
pub use perturbation::{random_drift, PerturbationPolicy, PerturbationSampler};
pub use species::Species;
