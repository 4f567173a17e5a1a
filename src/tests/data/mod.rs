//! Shared synthetic data for the test suite
use std::collections::HashMap;

use crate::constants::NANOSECONDS_PER_WEEK;
use crate::prelude::{
    Apriori, Config, Constellation, Ephemeris, EphemerisSource, Epoch, RawObservation,
    SatelliteState, TimeScale, Vector3, SPEED_OF_LIGHT_M_S, SV,
};

/// GPS week of the reference scenario (2020-12-03)
pub const WEEK: u32 = 2134;

/// Receiver collection time, nanoseconds into [WEEK]
/// (2020-12-03T01:19:57.432062 GPST)
pub const T_RX_WEEK_NANOS: i64 = 350_397_432_062_000;

/// ToE of the synthetic ephemerides, seconds into [WEEK]
pub const TOE_WEEK_S: u64 = 349_200;

/// Reference scenario receiver location (Seattle area)
pub const RX_LAT_DDEG: f64 = 47.586;
pub const RX_LONG_DDEG: f64 = -122.328;
pub const RX_ALT_M: f64 = -4.78;

/// Reference scenario receiver clock bias (~2.21e-7 s)
pub const RX_CLOCK_BIAS_M: f64 = 66.25;

/// (m0, omega0) pairs whose satellites are all in sight of the
/// reference receiver (elevation above 8 degrees)
pub const SCENARIO_ANOMALIES: [(f64, f64); 9] = [
    (0.7, 2.399963),
    (2.1, 0.916704),
    (0.016815, 2.750111),
    (1.416815, 1.266852),
    (0.033629, 5.500222),
    (0.733629, 1.617),
    (0.750444, 4.367111),
    (0.067259, 4.717259),
    (0.100888, 3.934296),
];

pub fn rx_gpst_nanos() -> i64 {
    WEEK as i64 * NANOSECONDS_PER_WEEK + T_RX_WEEK_NANOS
}

pub fn rx_position_ecef_m() -> Vector3<f64> {
    Apriori::from_geo_ddeg(RX_LAT_DDEG, RX_LONG_DDEG, RX_ALT_M).pos_ecef_m
}

/// GPS like broadcast frame, tied to the scenario week.
pub fn gps_ephemeris(prn: u8, m0_rad: f64, omega0_rad: f64) -> Ephemeris {
    let toe = Epoch::from_time_of_week(WEEK, TOE_WEEK_S * 1_000_000_000, TimeScale::GPST);
    Ephemeris {
        sv: SV::new(Constellation::GPS, prn),
        toe,
        toc: toe,
        sqrt_a: 5153.79,
        eccentricity: 0.0124,
        m0_rad,
        dn_rad_s: 4.8E-9,
        i0_rad: 0.96,
        idot_rad_s: -7.0E-11,
        omega0_rad,
        omega_rad: 0.72,
        omega_dot_rad_s: -8.0E-9,
        cus_rad: 7.6E-6,
        cuc_rad: -1.2E-6,
        cis_rad: 1.0E-7,
        cic_rad: -2.0E-8,
        crs_m: -24.5,
        crc_m: 221.3,
        clock_bias_s: 4.1E-4,
        clock_drift_s_s: -3.6E-12,
        clock_drift_rate_s_s2: 0.0,
    }
}

pub fn scenario_ephemerides() -> Vec<Ephemeris> {
    SCENARIO_ANOMALIES
        .iter()
        .enumerate()
        .map(|(i, (m0, omega0))| gps_ephemeris(i as u8 + 1, *m0, *omega0))
        .collect()
}

/// In memory [EphemerisSource] over a fixed set of frames.
pub struct MapSource(pub HashMap<SV, Ephemeris>);

impl MapSource {
    pub fn new(frames: &[Ephemeris]) -> Self {
        Self(frames.iter().map(|eph| (eph.sv, *eph)).collect())
    }
}

impl EphemerisSource for MapSource {
    fn ephemeris_data(&self, _epoch: Epoch, svs: &[SV]) -> HashMap<SV, Ephemeris> {
        svs.iter()
            .filter_map(|sv| self.0.get(sv).map(|eph| (*sv, *eph)))
            .collect()
    }
}

/// Synthesizes the raw observation that makes `eph` measure the
/// receiver at `rx_ecef_m` with clock bias `clock_bias_m`: the
/// satellite transmission time is fixed-pointed until the forward
/// geometric model reproduces itself, then quantized to integer
/// nanoseconds like a real log would be.
pub fn forward_observation(
    eph: &Ephemeris,
    rx_ecef_m: Vector3<f64>,
    clock_bias_m: f64,
    cfg: &Config,
) -> RawObservation {
    let t_rx_week_s = T_RX_WEEK_NANOS as f64 * 1.0E-9;

    let mut t_tx_week_s = t_rx_week_s - 0.07;

    for _ in 0..8 {
        let state = eph.resolve_state(t_tx_week_s, cfg.kepler_tolerance_rad, cfg.kepler_max_iter);
        let range_m = (state.position_m - rx_ecef_m).norm();
        let travel_s = (range_m + clock_bias_m) / SPEED_OF_LIGHT_M_S - state.clock_correction_s;
        t_tx_week_s = t_rx_week_s - travel_s;
    }

    RawObservation {
        sv: eph.sv,
        snr_dbhz: 40.0,
        time_nanos: 0,
        full_bias_nanos: -rx_gpst_nanos(),
        bias_nanos: 0.0,
        time_offset_nanos: 0.0,
        received_sv_time_nanos: (t_tx_week_s * 1.0E9).round() as i64,
        received_sv_time_uncertainty_nanos: 10.0,
        pseudorange_rate_m_s: 0.0,
    }
}

/// Free floating satellite geometry (no ephemeris behind it): `n`
/// states on the GPS orbital sphere, spread enough for a well
/// conditioned geometry matrix.
pub fn synthetic_states(n: usize) -> Vec<SatelliteState> {
    const DIRECTIONS: [(f64, f64, f64); 9] = [
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (-1.0, 0.2, 0.3),
        (0.3, -1.0, 0.2),
        (0.2, 0.3, -1.0),
        (0.577, 0.577, 0.577),
        (-0.577, 0.577, -0.577),
        (0.5, -0.5, 0.707),
    ];

    assert!(n <= DIRECTIONS.len());

    DIRECTIONS[..n]
        .iter()
        .enumerate()
        .map(|(i, (x, y, z))| {
            let direction = Vector3::new(*x, *y, *z).normalize();
            SatelliteState {
                sv: SV::new(Constellation::GPS, i as u8 + 1),
                position_m: direction * 2.656E7,
                clock_correction_s: 0.0,
                converged: true,
            }
        })
        .collect()
}

/// Noiseless pseudoranges for the given receiver state.
pub fn forward_ranges(states: &[SatelliteState], rx_m: Vector3<f64>, bias_m: f64) -> Vec<f64> {
    states
        .iter()
        .map(|state| (state.position_m - rx_m).norm() + bias_m)
        .collect()
}

/// Hand written GnssLogger excerpt: preamble, two header rows, one
/// fix, two GPS observations and one GLONASS observation.
pub const SAMPLE_LOG: &str = "\
# Version: v3.0.6.4 Platform: 10
# Raw,utcTimeMillis,TimeNanos,LeapSecond,FullBiasNanos,BiasNanos,TimeOffsetNanos,Svid,ConstellationType,State,ReceivedSvTimeNanos,ReceivedSvTimeUncertaintyNanos,Cn0DbHz,PseudorangeRateMetersPerSecond
# Fix,Provider,LatitudeDegrees,LongitudeDegrees,AltitudeMeters,SpeedMps,AccuracyMeters,BearingDegrees,UnixTimeMillis
Fix,gps,47.586320,-122.328490,-4.70,0.00,3.90,0.00,1606958397432
Raw,1606958397432,863644000000,18,-1290992733788062000,,0.0,5,1,16431,350397362062000,10.0,41.2,-654.3
Raw,1606958397432,863644000000,18,-1290992733788062000,0.0,0.0,9,3,16431,350397362000000,10.0,33.0,121.9
Raw,1606958397433,863645000000,18,-1290992733788062000,0.0,0.0,7,1,16431,350397363062000,12.0,38.7,433.1
";
