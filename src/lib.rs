//! GPS single point position solver for raw GNSS measurement logs
//! (Android GnssLogger CSV dialect).
//!
//! The pipeline normalizes raw receiver records, groups them into
//! measurement epochs, forms clock corrected pseudoranges, resolves
//! satellite states from broadcast ephemerides (provided through the
//! [prelude::EphemerisSource] trait) and solves each epoch by iterated
//! least squares, seeding every epoch with the previous solution.
//!
//! GPS only, offline processing, no atmospheric corrections.

extern crate gnss_rs as gnss;

// private modules
mod apriori;
mod cfg;
mod constants;
mod epochs;
mod ephemeris;
mod error;
mod measurements;
mod navigation;
mod pseudorange;
mod solver;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::apriori::Apriori;
    pub use crate::cfg::Config;
    pub use crate::constants::SPEED_OF_LIGHT_M_S;
    pub use crate::ephemeris::{Ephemeris, EphemerisSource, SatelliteState};
    pub use crate::epochs::{segment, EpochData};
    pub use crate::error::Error;
    pub use crate::measurements::{LocationFix, RawLog, RawObservation};
    pub use crate::navigation::solutions::PVTSolution;
    pub use crate::pseudorange::{ClockReference, Pseudorange};
    pub use crate::solver::Solver;
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}
