#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::prelude::{Constellation, Duration};

fn default_constellation() -> Constellation {
    Constellation::GPS
}

fn default_epoch_gap() -> Duration {
    Duration::from_milliseconds(200.0)
}

fn default_min_sv() -> usize {
    5
}

fn default_max_travel_time_s() -> f64 {
    0.1
}

fn default_convergence_m() -> f64 {
    1.0E-3
}

fn default_kepler_tolerance_rad() -> f64 {
    1.0E-8
}

fn default_kepler_max_iter() -> usize {
    10
}

fn default_max_dtoe() -> Duration {
    Duration::from_hours(4.0)
}

/// Solver parametrization. [Config::default()] matches the
/// standard GPS single point processing setup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Single [Constellation] retained by the measurement normalizer.
    #[cfg_attr(feature = "serde", serde(default = "default_constellation"))]
    pub constellation: Constellation,

    /// Receiver time gap beyond which a new measurement epoch begins.
    #[cfg_attr(feature = "serde", serde(default = "default_epoch_gap"))]
    pub epoch_gap: Duration,

    /// Minimal satellites per epoch to attempt solving. Deliberately
    /// stricter than the 4 unknowns strictly require, to give margin.
    #[cfg_attr(feature = "serde", serde(default = "default_min_sv"))]
    pub min_sv: usize,

    /// Pseudoranges longer than this (expressed as signal travel time,
    /// in seconds) are considered corrupted and excluded from solving.
    #[cfg_attr(feature = "serde", serde(default = "default_max_travel_time_s"))]
    pub max_travel_time_s: f64,

    /// Position update norm below which the navigation iteration stops (m).
    #[cfg_attr(feature = "serde", serde(default = "default_convergence_m"))]
    pub convergence_m: f64,

    /// Eccentric anomaly update magnitude considered converged (rad).
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_tolerance_rad"))]
    pub kepler_tolerance_rad: f64,

    /// Hard cap on Kepler fixed-point iterations. Non converged states
    /// are used as is (best effort), never rejected.
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_max_iter"))]
    pub kepler_max_iter: usize,

    /// Maximal ephemeris frame age for it to still qualify.
    #[cfg_attr(feature = "serde", serde(default = "default_max_dtoe"))]
    pub max_dtoe: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            constellation: default_constellation(),
            epoch_gap: default_epoch_gap(),
            min_sv: default_min_sv(),
            max_travel_time_s: default_max_travel_time_s(),
            convergence_m: default_convergence_m(),
            kepler_tolerance_rad: default_kepler_tolerance_rad(),
            kepler_max_iter: default_kepler_max_iter(),
            max_dtoe: default_max_dtoe(),
        }
    }
}
