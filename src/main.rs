use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

use lattice_dist::io::save_json;
use lattice_dist::{Generator, GeneratorConfig, Result};

#[derive(Parser)]
#[command(name = "lattice_dist")]
#[command(about = "Place monomers on a jittered simple-cubic lattice for simulation input")]
#[command(version)]
struct Cli {
    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV path (derived from the configuration when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also write a JSON run report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly so failures stay visible under any log filter.
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            GeneratorConfig::load_from_file(path)?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.random.seed = seed;
    }
    if let Some(output) = cli.output {
        config.output.path = Some(output);
    }

    if let Some(path) = &cli.dump_config {
        config.save_to_file(path)?;
        log::info!("Configuration written to {}", path.display());
        return Ok(());
    }

    let generator = Generator::new(config)?;
    let (path, report) = generator.run_to_file()?;
    log::info!("Placement written to {}", path.display());

    if let Some(report_path) = &cli.report {
        save_json(report_path, &report)?;
        log::info!("Run report written to {}", report_path.display());
    }

    println!("processed molecules: {}", report.placed);
    Ok(())
}
