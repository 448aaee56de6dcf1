use crate::error::{GeneratorError, Result};

/// Spacing of a simple-cubic lattice holding `num_molecules` cells inside a
/// cube of side `cube_dim`, so that `spacing^3 * num_molecules == cube_dim^3`.
pub fn calc_spacing(cube_dim: f64, num_molecules: f64) -> Result<f64> {
    let valid = cube_dim.is_finite()
        && num_molecules.is_finite()
        && cube_dim > 0.0
        && num_molecules > 0.0;
    if !valid {
        return Err(GeneratorError::SpacingDomain {
            cube_dim,
            num_molecules,
        });
    }

    let total_volume = cube_dim * cube_dim * cube_dim;
    let cell_volume = total_volume / num_molecules;
    Ok(cell_volume.powf(1.0 / 3.0))
}

/// Largest per-axis jitter that keeps a particle of `particle_diameter`
/// inside its own cell, scaled by `extent_fraction`.
/// Negative when the particle does not fit the cell.
pub fn jitter_bound(spacing: f64, particle_diameter: f64, extent_fraction: f64) -> f64 {
    (spacing - particle_diameter) / 2.0 * extent_fraction
}

pub fn percent_deviation(upper_limit: f64, spacing: f64) -> f64 {
    100.0 * upper_limit / spacing
}
