/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Earth gravitational constant (m³.s⁻²), IS-GPS-200 value
pub const EARTH_GRAVITATION_MU_M3_S2: f64 = 3.986005E14;

/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD_S: f64 = 7.2921151467E-5;

/// Relativistic clock correction constant F = -2√µ/c² (s per √m)
pub const RELATIVISTIC_CLOCK_F: f64 = -4.442807633E-10;

/// Nanoseconds in one GNSS week
pub const NANOSECONDS_PER_WEEK: i64 = 604_800_000_000_000;
