//! Broadcast ephemeris frames and their provider interface
use std::collections::HashMap;

use crate::prelude::{Duration, Epoch, SV};

mod kepler;
pub use kepler::SatelliteState;

/// One broadcast [Ephemeris] frame: Keplerian elements, harmonic
/// perturbation coefficients and the clock correction polynomial,
/// valid over a bounded window around its reference time.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Ephemeris {
    /// [SV]
    pub sv: SV,

    /// Time of Issue of [Ephemeris], GPST
    pub toe: Epoch,

    /// Time of Clock, GPST
    pub toc: Epoch,

    /// Square root of the semi-major axis (√m)
    pub sqrt_a: f64,

    /// Eccentricity
    pub eccentricity: f64,

    /// Mean anomaly at reference time (rad)
    pub m0_rad: f64,

    /// Mean motion difference from computed value (rad/s)
    pub dn_rad_s: f64,

    /// Inclination at reference time (rad)
    pub i0_rad: f64,

    /// Inclination rate of change (rad/s)
    pub idot_rad_s: f64,

    /// Longitude of ascending node at reference time (rad)
    pub omega0_rad: f64,

    /// Argument of perigee (rad)
    pub omega_rad: f64,

    /// Right ascension rate of change (rad/s)
    pub omega_dot_rad_s: f64,

    /// Argument of latitude harmonic correction amplitudes,
    /// sine then cosine (rad)
    pub cus_rad: f64,
    pub cuc_rad: f64,

    /// Inclination harmonic correction amplitudes, sine then cosine (rad)
    pub cis_rad: f64,
    pub cic_rad: f64,

    /// Orbit radius harmonic correction amplitudes, sine then cosine (m)
    pub crs_m: f64,
    pub crc_m: f64,

    /// Clock correction polynomial: bias (s)
    pub clock_bias_s: f64,

    /// Clock correction polynomial: drift (s/s)
    pub clock_drift_s_s: f64,

    /// Clock correction polynomial: drift rate (s/s²)
    pub clock_drift_rate_s_s2: f64,
}

impl Ephemeris {
    /// Returns True if this [Ephemeris] frame is still valid
    pub fn is_valid(&self, now: Epoch, max_dtoe: Duration) -> bool {
        (now - self.toe).abs() < max_dtoe
    }

    /// Returns ToE in seconds of week
    pub fn weekly_toe_seconds(&self) -> f64 {
        (self.toe.to_time_of_week().1 as f64) / 1.0E9
    }

    /// Returns ToC in seconds of week
    pub fn weekly_toc_seconds(&self) -> f64 {
        (self.toc.to_time_of_week().1 as f64) / 1.0E9
    }
}

/// Implement [EphemerisSource] to contribute broadcast [Ephemeris]
/// frames to the solving process. Typical implementations maintain a
/// local cache of daily navigation files and may perform I/O.
pub trait EphemerisSource {
    /// Provide the most recent [Ephemeris] valid at `epoch`, for each
    /// requested [SV]. Satellites without a valid frame are simply
    /// omitted from the returned map: the solver re-derives the usable
    /// satellite set from the keys, never from its own request.
    fn ephemeris_data(&self, epoch: Epoch, svs: &[SV]) -> HashMap<SV, Ephemeris>;
}
