// generator.rs
// Walks the lattice, perturbs every site and streams records to a sink

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::Result;
use crate::init_config::{GeneratorConfig, LatticePlan};
use crate::io::{write_preamble, CsvSink, ParticleRecord, RecordSink, RunHeader};
use crate::output_filename::resolve_output_path;
use crate::perturbation::{PerturbationPolicy, PerturbationSampler};
use crate::species::Species;

/// Summary of one generation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub species: String,
    pub policy: PerturbationPolicy,
    pub cube_dim: f64,
    pub target_molecules: f64,
    pub spacing: f64,
    pub upper_limit: f64,
    pub jitter_extent_fraction: f64,
    pub percent_deviation: f64,
    /// Records actually emitted; zero for a degenerate grid.
    pub placed: usize,
}

/// Validated configuration together with its derived lattice plan and sampler.
#[derive(Clone, Debug)]
pub struct Generator {
    config: GeneratorConfig,
    plan: LatticePlan,
    sampler: PerturbationSampler,
}

impl Generator {
    /// Fails on any configuration error, before output is touched.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let plan = config.plan()?;
        let sampler = config.sampler(&plan)?;
        log::info!(
            "Lattice plan: cube_dim={}, target={}, spacing={}, upper_limit={} ({:.2}% of spacing)",
            plan.cube_dim,
            plan.num_molecules,
            plan.spacing,
            plan.upper_limit,
            plan.percent_deviation
        );
        Ok(Self {
            config,
            plan,
            sampler,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn plan(&self) -> &LatticePlan {
        &self.plan
    }

    pub fn species(&self) -> Species {
        self.config.particle.species
    }

    pub fn header(&self) -> RunHeader {
        RunHeader {
            spacing: self.plan.spacing,
            upper_limit: self.plan.upper_limit,
            jitter_extent_fraction: self.plan.jitter_extent_fraction,
            percent_deviation: self.plan.percent_deviation,
        }
    }

    /// Lazily produce records in walker order, consuming `rng` three draws per
    /// site for the uniform policy.
    pub fn records<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
    ) -> impl Iterator<Item = Result<ParticleRecord>> + 'a {
        let species = self.species();
        self.plan.walker().map(move |site| -> Result<ParticleRecord> {
            let pos = self.sampler.perturb_site(site, &mut *rng)?;
            Ok(ParticleRecord { pos, species })
        })
    }

    /// Write the header, column line and every record to `sink`.
    pub fn run<R, S>(&self, rng: &mut R, sink: &mut S) -> Result<GenerationReport>
    where
        R: Rng + ?Sized,
        S: RecordSink + ?Sized,
    {
        write_preamble(sink, &self.header())?;
        for record in self.records(rng) {
            sink.write_record(&record?)?;
        }
        let placed = sink.finish()?;

        if placed == 0 {
            log::warn!(
                "Spacing {} does not fit inside cube_dim {}; no particles placed",
                self.plan.spacing,
                self.plan.cube_dim
            );
        } else if placed as f64 != self.plan.num_molecules.round() {
            log::info!(
                "Placed {} particles for a target of {}",
                placed,
                self.plan.num_molecules
            );
        }
        log::debug!("Grid steps per axis: {}", self.plan.walker().axis_steps());

        Ok(self.report(placed))
    }

    /// Run with a generator seeded from `random.seed`.
    pub fn run_seeded<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<GenerationReport> {
        let mut rng = StdRng::seed_from_u64(self.config.random.seed);
        self.run(&mut rng, sink)
    }

    /// Write to the configured (or derived) path, truncating any existing file.
    pub fn run_to_file(&self) -> Result<(PathBuf, GenerationReport)> {
        let path = resolve_output_path(&self.config);
        log::info!("Writing placement file {}", path.display());
        let mut sink = CsvSink::create(&path)?;
        let report = self.run_seeded(&mut sink)?;
        Ok((path, report))
    }

    fn report(&self, placed: usize) -> GenerationReport {
        GenerationReport {
            seed: self.config.random.seed,
            species: self.species().label().to_string(),
            policy: self.sampler.policy(),
            cube_dim: self.plan.cube_dim,
            target_molecules: self.plan.num_molecules,
            spacing: self.plan.spacing,
            upper_limit: self.plan.upper_limit,
            jitter_extent_fraction: self.plan.jitter_extent_fraction,
            percent_deviation: self.plan.percent_deviation,
            placed,
        }
    }
}
