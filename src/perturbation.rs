// perturbation.rs
// Random displacement of nominal lattice sites

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use ultraviolet::DVec3;

use crate::error::{GeneratorError, Result};

/// Which displacement model is applied to every lattice site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationPolicy {
    /// Uniform offset in `[-upper_limit, upper_limit]` per axis.
    #[default]
    UniformDrift,
    /// Normal offset redrawn until it reaches at least one bond length.
    TruncatedNormal,
}

/// `nominal` plus an offset drawn uniformly from the closed interval
/// `[-upper_limit, upper_limit]`. Consumes exactly one draw from `rng`.
pub fn random_drift<R: Rng + ?Sized>(nominal: f64, upper_limit: f64, rng: &mut R) -> f64 {
    let unit: f64 = rng.random_range(-1.0..=1.0);
    nominal + unit * upper_limit
}

/// Rejection sampler over `N(mean, std_dev)` that only accepts samples with
/// `sample - mean >= bond_length`.
#[derive(Clone, Debug)]
pub struct TruncatedNormal {
    offset: Normal<f64>,
    std_dev: f64,
    bond_length: f64,
    max_attempts: usize,
}

impl TruncatedNormal {
    pub fn new(std_dev: f64, bond_length: f64, max_attempts: usize) -> Result<Self> {
        if !bond_length.is_finite() {
            return Err(GeneratorError::InvalidParameter(format!(
                "bond_length must be finite, got {}",
                bond_length
            )));
        }
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(GeneratorError::InvalidParameter(format!(
                "truncated-normal std_dev must be finite and non-negative, got {}",
                std_dev
            )));
        }
        if max_attempts == 0 {
            return Err(GeneratorError::InvalidParameter(
                "max_rejection_attempts must be at least 1".to_string(),
            ));
        }
        let offset = Normal::new(0.0, std_dev).map_err(|e| {
            GeneratorError::InvalidDistribution(format!("std_dev={}: {}", std_dev, e))
        })?;
        Ok(Self {
            offset,
            std_dev,
            bond_length,
            max_attempts,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn sample<R: Rng + ?Sized>(&self, mean: f64, rng: &mut R) -> Result<f64> {
        for _ in 0..self.max_attempts {
            let delta = self.offset.sample(rng);
            if delta >= self.bond_length {
                return Ok(mean + delta);
            }
        }
        Err(GeneratorError::SamplerExhausted {
            attempts: self.max_attempts,
            bond_length: self.bond_length,
            std_dev: self.std_dev,
        })
    }
}

/// A configured displacement model, ready to be applied site by site.
#[derive(Clone, Debug)]
pub enum PerturbationSampler {
    UniformDrift { upper_limit: f64 },
    TruncatedNormal(TruncatedNormal),
}

impl PerturbationSampler {
    pub fn uniform(upper_limit: f64) -> Result<Self> {
        if !(upper_limit >= 0.0) || !upper_limit.is_finite() {
            return Err(GeneratorError::InvalidParameter(format!(
                "jitter upper_limit must be a finite non-negative number, got {}",
                upper_limit
            )));
        }
        Ok(Self::UniformDrift { upper_limit })
    }

    pub fn truncated_normal(std_dev: f64, bond_length: f64, max_attempts: usize) -> Result<Self> {
        TruncatedNormal::new(std_dev, bond_length, max_attempts).map(Self::TruncatedNormal)
    }

    pub fn policy(&self) -> PerturbationPolicy {
        match self {
            Self::UniformDrift { .. } => PerturbationPolicy::UniformDrift,
            Self::TruncatedNormal(_) => PerturbationPolicy::TruncatedNormal,
        }
    }

    pub fn perturb<R: Rng + ?Sized>(&self, nominal: f64, rng: &mut R) -> Result<f64> {
        match self {
            Self::UniformDrift { upper_limit } => Ok(random_drift(nominal, *upper_limit, rng)),
            Self::TruncatedNormal(tn) => tn.sample(nominal, rng),
        }
    }

    /// Perturb all three axes, drawing in x, y, z order.
    pub fn perturb_site<R: Rng + ?Sized>(&self, site: DVec3, rng: &mut R) -> Result<DVec3> {
        let x = self.perturb(site.x, rng)?;
        let y = self.perturb(site.y, rng)?;
        let z = self.perturb(site.z, rng)?;
        Ok(DVec3::new(x, y, z))
    }
}
