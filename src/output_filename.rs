// Helper to deduce the placement filename from run settings
use std::path::PathBuf;

use crate::config::OUTPUT_PATTERN_TAG;
use crate::init_config::GeneratorConfig;
use crate::io::Decimal;

/// Compute a standard placement filename from the configuration:
/// Format: "M[A]-[B]-regular_dist-frac_ext_dev-[C].csv"
/// where:
/// - A is the total particle count of the system: "30000"
/// - B is the species label: "PAG", "TBMA" or "MAA"
/// - C is the jitter extent fraction in shortest round-trip form with '.'
///   replaced by '_': "1_0", "0_5" or "0_25"
pub fn build_output_filename(config: &GeneratorConfig) -> String {
    let extent_str = Decimal(config.perturbation.jitter_extent_fraction)
        .to_string()
        .replace('.', "_");
    format!(
        "M{}-{}-{}-frac_ext_dev-{}.csv",
        config.system.total_particles,
        config.particle.species.label(),
        OUTPUT_PATTERN_TAG,
        extent_str
    )
}

/// Explicit `output.path` when set, otherwise the derived filename.
pub fn resolve_output_path(config: &GeneratorConfig) -> PathBuf {
    config
        .output
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(build_output_filename(config)))
}
