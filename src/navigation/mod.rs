//! Gauss-Newton navigation core
use log::debug;
use nalgebra::{DVector, MatrixXx4, Vector3, Vector4};

use crate::prelude::{Apriori, Error, SatelliteState};

pub(crate) mod solutions;

/// Minimal satellite count: 3 position unknowns + clock bias
const MIN_SV: usize = 4;

/// Converged navigation estimate, ECEF.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Estimate {
    /// Receiver position (m)
    pub pos_ecef_m: Vector3<f64>,

    /// Receiver clock bias, meters equivalent
    pub clock_bias_m: f64,

    /// Norm of the residual vector at convergence (m): rough solution
    /// quality indicator, not a formal uncertainty.
    pub residual_norm_m: f64,
}

/// Solves receiver position and clock bias from satellite ECEF states
/// and clock corrected pseudoranges (m), by iterated linearization
/// around `apriori` (normal equations Δx = (GᵀG)⁻¹GᵀΔρ).
///
/// Iterates until the position update norm drops below
/// `convergence_m`. No iteration cap: an ill conditioned (yet
/// invertible) geometry can keep this spinning.
pub(crate) fn resolve(
    states: &[SatelliteState],
    ranges_m: &[f64],
    apriori: &Apriori,
    convergence_m: f64,
) -> Result<Estimate, Error> {
    if states.len() < MIN_SV || states.len() != ranges_m.len() {
        return Err(Error::NotEnoughSatellites);
    }

    let size = states.len();

    let mut x = apriori.pos_ecef_m;
    let mut b = apriori.clock_bias_m;
    let mut iter = 0_usize;

    loop {
        let mut g = MatrixXx4::<f64>::zeros(size);
        let mut dp = DVector::<f64>::zeros(size);

        for (i, state) in states.iter().enumerate() {
            let los = state.position_m - x;
            let rho = los.norm();

            dp[i] = ranges_m[i] - rho - b;

            g[(i, 0)] = -los[0] / rho;
            g[(i, 1)] = -los[1] / rho;
            g[(i, 2)] = -los[2] / rho;
            g[(i, 3)] = 1.0;
        }

        let gt = g.transpose();
        let gt_dp = &gt * &dp;
        let gt_g = gt * g;
        let gt_g_inv = gt_g.try_inverse().ok_or(Error::SingularGeometry)?;

        let dx: Vector4<f64> = gt_g_inv * gt_dp;

        x += Vector3::new(dx[0], dx[1], dx[2]);
        b += dx[3];
        iter += 1;

        if Vector3::new(dx[0], dx[1], dx[2]).norm() < convergence_m {
            let residual_norm_m = residual_norm(states, ranges_m, x, b);
            debug!(
                "converged in {} iterations (residual norm {:.3} m)",
                iter, residual_norm_m
            );

            return Ok(Estimate {
                pos_ecef_m: x,
                clock_bias_m: b,
                residual_norm_m,
            });
        }
    }
}

/// Norm of the measured minus predicted pseudorange vector (m).
fn residual_norm(
    states: &[SatelliteState],
    ranges_m: &[f64],
    x: Vector3<f64>,
    b: f64,
) -> f64 {
    states
        .iter()
        .zip(ranges_m.iter())
        .map(|(state, range_m)| {
            let predicted = (state.position_m - x).norm() + b;
            (range_m - predicted).powi(2)
        })
        .sum::<f64>()
        .sqrt()
}
