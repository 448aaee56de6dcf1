// Centralized default parameters for lattice placement

// ====================
// System Size
// ====================
/// Total number of particles in the full system (all species).
pub const TOTAL_NUM_PARTICLES: u64 = 30000;
/// Fraction of the total particle count belonging to the placed species.
pub const FRACTION_SPECIES: f64 = 0.1;

// ====================
// Particle Geometry
// ====================
pub const PARTICLE_DIAMETER: f64 = 1.0;
pub const BOND_LENGTH: f64 = 0.9;

// ====================
// Perturbation Parameters
// ====================
/// Fraction of the free gap between neighbours that jitter may use (1.0 = all of it).
pub const FRACTIONAL_EXTENT_OF_DEVIATION: f64 = 1.0;
/// Standard deviation of the truncated-normal policy as a fraction of the spacing.
pub const FRAC_STD_DEV: f64 = 1.0;
/// Upper bound on redraws in the truncated-normal rejection loop
pub const TRUNCATED_NORMAL_MAX_ATTEMPTS: usize = 10_000;

// ====================
// Random Number Generation
// ====================
pub const SEED: u64 = 12357;

// ====================
// Output Format
// ====================
pub const COLUMN_HEADER: &str = "x,y,z,monomer_name,monomer_id,chain_index";
pub const OUTPUT_PATTERN_TAG: &str = "regular_dist";
