//! Single point position solver
use itertools::Itertools;
use log::{debug, info, warn};

use crate::constants::SPEED_OF_LIGHT_M_S;
use crate::epochs::segment;
use crate::navigation;
use crate::prelude::{
    Apriori, ClockReference, Config, EphemerisSource, EpochData, Error, PVTSolution, Pseudorange,
    RawLog,
};

/// [Solver] turns a raw measurement log into one [PVTSolution] per
/// epoch, each epoch seeded by the previous converged solution.
pub struct Solver<E: EphemerisSource> {
    /// Solver parametrization
    pub cfg: Config,

    /// [EphemerisSource] collaborator
    ephemeris: E,

    /// Pseudoranges excluded for implausible travel time
    rejected_pseudoranges: usize,

    /// Best effort satellite states (Kepler iteration cap hit)
    kepler_failures: usize,

    /// Epochs that could not be solved
    skipped_epochs: usize,
}

impl<E: EphemerisSource> Solver<E> {
    /// Creates a new [Solver] from a [Config] preset and an
    /// [EphemerisSource] implementation.
    pub fn new(cfg: Config, ephemeris: E) -> Self {
        Self {
            cfg,
            ephemeris,
            rejected_pseudoranges: 0,
            kepler_failures: 0,
            skipped_epochs: 0,
        }
    }

    /// Processes a whole [RawLog]: segments it into epochs, then folds
    /// [Self::resolve] over the sequence. The first epoch is seeded by
    /// `initial`, every following epoch by the last converged solution.
    /// Unsolvable epochs are skipped with a warning, never fatal: the
    /// pipeline degrades per epoch rather than halting on one bad
    /// batch.
    pub fn run(&mut self, log: &RawLog, initial: Apriori) -> Result<Vec<PVTSolution>, Error> {
        let reference = log.clock_reference().ok_or(Error::EmptyLog)?;

        let epochs = segment(&log.observations, self.cfg.epoch_gap);
        info!("{} epochs in log", epochs.len());

        let mut seed = initial;
        let mut solutions = Vec::with_capacity(epochs.len());

        for epoch in &epochs {
            match self.resolve(&seed, &reference, epoch) {
                Ok(solution) => {
                    seed = Apriori {
                        pos_ecef_m: solution.pos_ecef_m,
                        clock_bias_m: solution.clock_bias_m,
                    };
                    solutions.push(solution);
                },
                Err(e) => {
                    warn!("{} - epoch #{} skipped: {}", epoch.epoch, epoch.index, e);
                    self.skipped_epochs += 1;
                },
            }
        }

        Ok(solutions)
    }

    /// Solves one epoch from an explicit `seed`: pure function of
    /// (previous estimate, epoch data), no state carried other than the
    /// degradation counters.
    pub fn resolve(
        &mut self,
        seed: &Apriori,
        reference: &ClockReference,
        epoch: &EpochData,
    ) -> Result<PVTSolution, Error> {
        let mut pseudoranges = Vec::with_capacity(epoch.observations.len());

        for observation in &epoch.observations {
            let pseudorange = Pseudorange::new(observation, reference);
            if pseudorange.is_plausible(self.cfg.max_travel_time_s) {
                pseudoranges.push(pseudorange);
            } else {
                debug!(
                    "{} - {} rejected: implausible travel time {:.3e} s",
                    epoch.epoch, pseudorange.sv, pseudorange.travel_time_s
                );
                self.rejected_pseudoranges += 1;
            }
        }

        if pseudoranges.len() < self.cfg.min_sv {
            return Err(Error::NotEnoughSatellites);
        }

        let svs = pseudoranges.iter().map(|pr| pr.sv).collect::<Vec<_>>();
        let ephemerides = self.ephemeris.ephemeris_data(epoch.epoch, &svs);

        // the usable set comes from the provider's answer, not the
        // request: a satellite silently dropped here only matters if
        // it brings the count below the navigation minimum
        let mut states = Vec::with_capacity(ephemerides.len());
        let mut corrected_m = Vec::with_capacity(ephemerides.len());
        let mut used = Vec::with_capacity(ephemerides.len());

        for pseudorange in pseudoranges
            .iter()
            .sorted_by_key(|pr| pr.sv.prn)
        {
            let Some(ephemeris) = ephemerides.get(&pseudorange.sv) else {
                debug!("{} - no ephemeris for {}", epoch.epoch, pseudorange.sv);
                continue;
            };

            let state = ephemeris.resolve_state(
                pseudorange.t_tx_week_s,
                self.cfg.kepler_tolerance_rad,
                self.cfg.kepler_max_iter,
            );

            if !state.converged {
                self.kepler_failures += 1;
            }

            corrected_m.push(pseudorange.range_m + state.clock_correction_s * SPEED_OF_LIGHT_M_S);
            used.push(state.sv);
            states.push(state);
        }

        let estimate = navigation::resolve(&states, &corrected_m, seed, self.cfg.convergence_m)?;

        Ok(PVTSolution {
            epoch: epoch.epoch,
            pos_ecef_m: estimate.pos_ecef_m,
            clock_bias_m: estimate.clock_bias_m,
            residual_norm_m: estimate.residual_norm_m,
            sv: used,
        })
    }

    /// Pseudoranges excluded so far for implausible travel time
    pub fn rejected_pseudoranges(&self) -> usize {
        self.rejected_pseudoranges
    }

    /// Satellite states used despite the Kepler iteration cap
    pub fn kepler_failures(&self) -> usize {
        self.kepler_failures
    }

    /// Epochs skipped so far
    pub fn skipped_epochs(&self) -> usize {
        self.skipped_epochs
    }
}
