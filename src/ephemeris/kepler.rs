//! Kepler equation solving: broadcast elements to ECEF state
use log::{debug, warn};
use nalgebra::{Rotation3, Vector3};

use crate::constants::{
    EARTH_ANGULAR_VEL_RAD_S, EARTH_GRAVITATION_MU_M3_S2, RELATIVISTIC_CLOCK_F,
};
use crate::prelude::{Ephemeris, SV};

/// Satellite state at signal transmission time, resolved from one
/// [Ephemeris] frame. Recomputed fresh for every epoch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SatelliteState {
    /// [SV]
    pub sv: SV,

    /// ECEF position (m)
    pub position_m: Vector3<f64>,

    /// Clock bias correction, relativistic term included (s)
    pub clock_correction_s: f64,

    /// False when the eccentric anomaly iteration hit its cap: the
    /// state is best effort, still usable, but worth counting.
    pub converged: bool,
}

impl SatelliteState {
    /// Distance to Earth center (m)
    pub fn radius_m(&self) -> f64 {
        self.position_m.norm()
    }
}

impl Ephemeris {
    /// Resolves the ECEF state and clock correction of this satellite
    /// at `t_tx_week_s` (transmission time, in seconds of current GPS
    /// week), per the broadcast orbit model.
    ///
    /// The eccentric anomaly is obtained by fixed point iteration
    /// seeded at the mean anomaly, stopped when the update magnitude
    /// drops below `tolerance_rad` or after `max_iter` rounds,
    /// whichever comes first. The cap is hard: a state that has not
    /// converged is returned as is, flagged through
    /// [SatelliteState::converged].
    pub fn resolve_state(
        &self,
        t_tx_week_s: f64,
        tolerance_rad: f64,
        max_iter: usize,
    ) -> SatelliteState {
        let e = self.eccentricity;
        let e_2 = e.powi(2);
        let a = self.sqrt_a.powi(2);

        let t_k = t_tx_week_s - self.weekly_toe_seconds();

        let n = (EARTH_GRAVITATION_MU_M3_S2 / a.powi(3)).sqrt() + self.dn_rad_s;
        let m_k = self.m0_rad + n * t_k;

        let mut e_k = m_k;
        let mut converged = false;

        for _ in 0..max_iter {
            let e_k_next = m_k + e * e_k.sin();
            let update = (e_k_next - e_k).abs();
            e_k = e_k_next;

            if update < tolerance_rad {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!("{} - kepler iteration cap hit (e_k={})", self.sv, e_k);
        }

        let (sin_e_k, cos_e_k) = e_k.sin_cos();

        // IS-GPS-200 relativistic term F·e·√A·sin(E_k). Some secondary
        // references print this with e raised to the power √A: that is
        // a transcription artifact, the ICD Table 20-IV form is the
        // product.
        let del_t_r = RELATIVISTIC_CLOCK_F * e * self.sqrt_a * sin_e_k;

        let dt_oc = t_tx_week_s - self.weekly_toc_seconds();
        let clock_correction_s = self.clock_bias_s
            + self.clock_drift_s_s * dt_oc
            + self.clock_drift_rate_s_s2 * dt_oc.powi(2)
            + del_t_r;

        let v_k = ((1.0 - e_2).sqrt() * sin_e_k).atan2(cos_e_k - e);

        let phi_k = v_k + self.omega_rad;
        let (sin_2phi, cos_2phi) = (2.0 * phi_k).sin_cos();

        let u_k = phi_k + self.cus_rad * sin_2phi + self.cuc_rad * cos_2phi;
        let r_k = a * (1.0 - e * cos_e_k) + self.crs_m * sin_2phi + self.crc_m * cos_2phi;
        let i_k = self.i0_rad
            + self.idot_rad_s * t_k
            + self.cis_rad * sin_2phi
            + self.cic_rad * cos_2phi;

        let omega_k = self.omega0_rad
            + (self.omega_dot_rad_s - EARTH_ANGULAR_VEL_RAD_S) * t_k
            - EARTH_ANGULAR_VEL_RAD_S * self.weekly_toe_seconds();

        let (x, y) = (r_k * u_k.cos(), r_k * u_k.sin());

        // orbital plane to ECEF
        let rot_x3 = Rotation3::from_axis_angle(&Vector3::x_axis(), i_k);
        let rot_z3 = Rotation3::from_axis_angle(&Vector3::z_axis(), omega_k);
        let position_m = rot_z3 * rot_x3 * Vector3::new(x, y, 0.0);

        debug!(
            "{} - resolved x={:.1} y={:.1} z={:.1} dt_sv={:.3e} (t_k={:.1})",
            self.sv, position_m[0], position_m[1], position_m[2], clock_correction_s, t_k
        );

        SatelliteState {
            sv: self.sv,
            position_m,
            clock_correction_s,
            converged,
        }
    }
}
