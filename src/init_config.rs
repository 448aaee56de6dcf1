// init_config.rs
// Loads the placement configuration from TOML and derives the lattice plan

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{GeneratorError, Result};
use crate::lattice::{calc_spacing, jitter_bound, percent_deviation, walk_lattice, LatticeWalker};
use crate::perturbation::{PerturbationPolicy, PerturbationSampler};
use crate::species::Species;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub system: SystemConfig,
    pub particle: ParticleConfig,
    pub perturbation: PerturbationConfig,
    pub random: RandomConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Particle count of the whole system, all species included.
    pub total_particles: u64,
    /// Share of `total_particles` placed by this run.
    pub species_fraction: f64,
    /// Optional cube side length. Falls back to `total_particles^(1/3)` (unit density) when omitted.
    pub cube_dim: Option<f64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            total_particles: config::TOTAL_NUM_PARTICLES,
            species_fraction: config::FRACTION_SPECIES,
            cube_dim: None,
        }
    }
}

impl SystemConfig {
    pub fn num_molecules(&self) -> f64 {
        self.total_particles as f64 * self.species_fraction
    }

    /// Return the cube side length, deriving it from the particle count when not provided.
    pub fn cube_dim(&self) -> f64 {
        self.cube_dim
            .unwrap_or_else(|| (self.total_particles as f64).powf(1.0 / 3.0))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub diameter: f64,
    pub bond_length: f64,
    pub species: Species,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            diameter: config::PARTICLE_DIAMETER,
            bond_length: config::BOND_LENGTH,
            species: Species::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PerturbationConfig {
    pub policy: PerturbationPolicy,
    /// Scales the jitter bound; 1.0 lets particles reach the cell wall.
    pub jitter_extent_fraction: f64,
    /// Truncated-normal standard deviation as a fraction of the spacing.
    pub std_dev_fraction: f64,
    pub max_rejection_attempts: usize,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            policy: PerturbationPolicy::default(),
            jitter_extent_fraction: config::FRACTIONAL_EXTENT_OF_DEVIATION,
            std_dev_fraction: config::FRAC_STD_DEV,
            max_rejection_attempts: config::TRUNCATED_NORMAL_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomConfig {
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self { seed: config::SEED }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file. Derived from the configuration when omitted.
    pub path: Option<PathBuf>,
}

/// Quantities derived once from a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePlan {
    pub cube_dim: f64,
    pub num_molecules: f64,
    pub spacing: f64,
    pub upper_limit: f64,
    pub jitter_extent_fraction: f64,
    pub percent_deviation: f64,
}

impl LatticePlan {
    pub fn walker(&self) -> LatticeWalker {
        walk_lattice(self.cube_dim, self.spacing)
    }
}

impl GeneratorConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject configurations that would produce NaN or unbounded output.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(GeneratorError::InvalidParameter(msg)) };

        if self.system.total_particles == 0 {
            return invalid("total_particles must be positive".to_string());
        }
        let fraction = self.system.species_fraction;
        if !(fraction.is_finite() && fraction > 0.0) {
            return invalid(format!("species_fraction must be positive, got {}", fraction));
        }
        if let Some(cube_dim) = self.system.cube_dim {
            if !(cube_dim.is_finite() && cube_dim > 0.0) {
                return invalid(format!("cube_dim must be positive, got {}", cube_dim));
            }
        }
        let diameter = self.particle.diameter;
        if !(diameter.is_finite() && diameter >= 0.0) {
            return invalid(format!("particle diameter must be non-negative, got {}", diameter));
        }
        let extent = self.perturbation.jitter_extent_fraction;
        if !(extent.is_finite() && extent >= 0.0) {
            return invalid(format!(
                "jitter_extent_fraction must be non-negative, got {}",
                extent
            ));
        }
        let std_dev_fraction = self.perturbation.std_dev_fraction;
        if !(std_dev_fraction.is_finite() && std_dev_fraction >= 0.0) {
            return invalid(format!(
                "std_dev_fraction must be non-negative, got {}",
                std_dev_fraction
            ));
        }
        if extent > 1.0 {
            log::warn!(
                "jitter_extent_fraction={} exceeds 1.0; neighbouring particles may overlap",
                extent
            );
        }
        Ok(())
    }

    /// Validate and compute spacing, jitter bound and derived figures.
    pub fn plan(&self) -> Result<LatticePlan> {
        self.validate()?;

        let cube_dim = self.system.cube_dim();
        let num_molecules = self.system.num_molecules();
        let spacing = calc_spacing(cube_dim, num_molecules)?;
        let extent = self.perturbation.jitter_extent_fraction;
        let upper_limit = jitter_bound(spacing, self.particle.diameter, extent);

        if self.perturbation.policy == PerturbationPolicy::UniformDrift && upper_limit < 0.0 {
            return Err(GeneratorError::InvalidParameter(format!(
                "particle diameter {} exceeds lattice spacing {}",
                self.particle.diameter, spacing
            )));
        }

        Ok(LatticePlan {
            cube_dim,
            num_molecules,
            spacing,
            upper_limit,
            jitter_extent_fraction: extent,
            percent_deviation: percent_deviation(upper_limit, spacing),
        })
    }

    /// Build the displacement model selected by `perturbation.policy`.
    pub fn sampler(&self, plan: &LatticePlan) -> Result<PerturbationSampler> {
        match self.perturbation.policy {
            PerturbationPolicy::UniformDrift => PerturbationSampler::uniform(plan.upper_limit),
            PerturbationPolicy::TruncatedNormal => PerturbationSampler::truncated_normal(
                plan.spacing * self.perturbation.std_dev_fraction,
                self.particle.bond_length,
                self.perturbation.max_rejection_attempts,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.system.total_particles, 30000);
        assert_eq!(cfg.system.num_molecules(), 3000.0);
        assert_eq!(cfg.random.seed, 12357);
        assert_eq!(cfg.particle.species, Species::Pag);
        assert_eq!(cfg.perturbation.policy, PerturbationPolicy::UniformDrift);

        let plan = cfg.plan().unwrap();
        assert!((plan.cube_dim - 31.0723250595).abs() < 1e-9);
        assert!((plan.spacing - 10f64.powf(1.0 / 3.0)).abs() < 1e-12);
        assert!((plan.upper_limit - (plan.spacing - 1.0) / 2.0).abs() < 1e-15);
        assert!(plan.upper_limit >= 0.0 && plan.upper_limit < plan.spacing / 2.0);
        assert!((plan.percent_deviation - 100.0 * plan.upper_limit / plan.spacing).abs() < 1e-12);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: GeneratorConfig = toml::from_str(
            r#"
            [system]
            total_particles = 1000
            species_fraction = 1.0
            cube_dim = 10.0

            [particle]
            species = "MAA"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.system.cube_dim(), 10.0);
        assert_eq!(cfg.particle.species, Species::Maa);
        assert_eq!(cfg.particle.diameter, config::PARTICLE_DIAMETER);
        assert_eq!(cfg.random.seed, config::SEED);
        assert_eq!(cfg.plan().unwrap().spacing, 1.0);
    }

    #[test]
    fn shipped_placement_file_equals_defaults() {
        let cfg: GeneratorConfig = toml::from_str(include_str!("../placement.toml")).unwrap();
        assert_eq!(cfg, GeneratorConfig::default());
    }

    #[test]
    fn policy_parses_from_snake_case() {
        let cfg: GeneratorConfig = toml::from_str(
            r#"
            [perturbation]
            policy = "truncated_normal"
            std_dev_fraction = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.perturbation.policy, PerturbationPolicy::TruncatedNormal);
        let plan = cfg.plan().unwrap();
        let sampler = cfg.sampler(&plan).unwrap();
        assert_eq!(sampler.policy(), PerturbationPolicy::TruncatedNormal);
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = GeneratorConfig::default();
        cfg.system.cube_dim = Some(12.5);
        cfg.output.path = Some(PathBuf::from("out.csv"));
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: GeneratorConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn invalid_counts_fail_fast() {
        let mut cfg = GeneratorConfig::default();
        cfg.system.total_particles = 0;
        assert!(matches!(cfg.plan(), Err(GeneratorError::InvalidParameter(_))));

        let mut cfg = GeneratorConfig::default();
        cfg.system.species_fraction = 0.0;
        assert!(cfg.plan().is_err());

        let mut cfg = GeneratorConfig::default();
        cfg.system.cube_dim = Some(-2.0);
        assert!(cfg.plan().is_err());
    }

    #[test]
    fn negative_std_dev_fraction_fails_fast() {
        for policy in [PerturbationPolicy::UniformDrift, PerturbationPolicy::TruncatedNormal] {
            let mut cfg = GeneratorConfig::default();
            cfg.perturbation.policy = policy;
            cfg.perturbation.std_dev_fraction = -0.5;
            assert!(matches!(cfg.plan(), Err(GeneratorError::InvalidParameter(_))));
        }
    }

    #[test]
    fn oversized_particles_rejected_for_uniform_drift() {
        let mut cfg = GeneratorConfig::default();
        cfg.particle.diameter = 5.0;
        assert!(matches!(cfg.plan(), Err(GeneratorError::InvalidParameter(_))));
    }

    #[test]
    fn single_particle_plan_is_valid() {
        let mut cfg = GeneratorConfig::default();
        cfg.system.total_particles = 1;
        let plan = cfg.plan().unwrap();
        assert!(plan.spacing > plan.cube_dim);
        assert_eq!(plan.walker().count(), 0);
    }
}
