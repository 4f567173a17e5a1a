use map_3d::{deg2rad, geodetic2ecef, Ellipsoid};

use crate::prelude::Vector3;

/// Navigation seed: receiver position and clock bias the iteration
/// linearizes around. The all zero [Default] (Earth center) is a valid,
/// if slow, starting point.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Apriori {
    /// ECEF position (m)
    pub pos_ecef_m: Vector3<f64>,

    /// Clock bias, meters equivalent
    pub clock_bias_m: f64,
}

impl Apriori {
    /// Builds [Apriori] from an ECEF position (m), null clock bias.
    pub fn from_ecef_m(ecef: Vector3<f64>) -> Self {
        Self {
            pos_ecef_m: ecef,
            clock_bias_m: 0.0,
        }
    }

    /// Builds [Apriori] from geodetic coordinates: latitude and
    /// longitude in decimal degrees, altitude above sea level (m).
    pub fn from_geo_ddeg(lat_ddeg: f64, long_ddeg: f64, alt_m: f64) -> Self {
        let (x, y, z) = geodetic2ecef(
            deg2rad(lat_ddeg),
            deg2rad(long_ddeg),
            alt_m,
            Ellipsoid::WGS84,
        );
        Self::from_ecef_m(Vector3::new(x, y, z))
    }
}
