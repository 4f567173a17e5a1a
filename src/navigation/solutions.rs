//! Per epoch solutions
use map_3d::{ecef2geodetic, ecef2ned, rad2deg, Ellipsoid};

use crate::constants::SPEED_OF_LIGHT_M_S;
use crate::prelude::{Epoch, Vector3, SV};

/// Position, clock bias and solution quality for one epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct PVTSolution {
    /// [Epoch] of this solution (receiver collection time, GPST)
    pub epoch: Epoch,

    /// Receiver ECEF position (m)
    pub pos_ecef_m: Vector3<f64>,

    /// Receiver clock bias, meters equivalent
    pub clock_bias_m: f64,

    /// Norm of the pseudorange residual vector at convergence (m)
    pub residual_norm_m: f64,

    /// Satellites that contributed
    pub sv: Vec<SV>,
}

impl PVTSolution {
    /// Receiver clock bias in seconds
    pub fn clock_bias_s(&self) -> f64 {
        self.clock_bias_m / SPEED_OF_LIGHT_M_S
    }

    /// Geodetic coordinates: latitude and longitude in decimal
    /// degrees, altitude above the WGS84 ellipsoid (m).
    pub fn latlongalt(&self) -> (f64, f64, f64) {
        let (lat_rad, long_rad, alt_m) = ecef2geodetic(
            self.pos_ecef_m[0],
            self.pos_ecef_m[1],
            self.pos_ecef_m[2],
            Ellipsoid::WGS84,
        );
        (rad2deg(lat_rad), rad2deg(long_rad), alt_m)
    }

    /// Offset from `reference` in the local tangent plane of that
    /// reference, returned as (north, east, down) in meters. Handy to
    /// plot a track relative to the first epoch's solution.
    pub fn ned_offset_m(&self, reference: &PVTSolution) -> Vector3<f64> {
        let (lat_rad, long_rad, alt_m) = ecef2geodetic(
            reference.pos_ecef_m[0],
            reference.pos_ecef_m[1],
            reference.pos_ecef_m[2],
            Ellipsoid::WGS84,
        );

        let (north, east, down) = ecef2ned(
            self.pos_ecef_m[0],
            self.pos_ecef_m[1],
            self.pos_ecef_m[2],
            lat_rad,
            long_rad,
            alt_m,
            Ellipsoid::WGS84,
        );

        Vector3::new(north, east, down)
    }
}
