/// Simple-cubic lattice construction.
///
/// - `spacing`: unit-cell edge from a target count and cube size
/// - `walker`: lazy enumeration of the nominal lattice sites

pub mod spacing;
pub mod walker;


pub use spacing::{calc_spacing, jitter_bound, percent_deviation};
pub use walker::{walk_lattice, LatticeWalker};
