//! Intra-route local search operators used by the tour sequencer.
//!
//! - [`two_opt_pass`]: segment reversal
//! - [`or_opt_pass`]: relocation of segments of 1–3 nodes

mod or_opt;
mod two_opt;

pub use or_opt::{or_opt_pass, route_distance};
pub use two_opt::two_opt_pass;

/// Minimum distance gain for a move to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;
