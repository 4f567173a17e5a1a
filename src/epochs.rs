//! Epoch segmentation
use log::debug;

use crate::prelude::{Duration, Epoch, RawObservation};

/// One measurement epoch: a synchronized batch of per satellite
/// observations sharing an inferred collection time.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochData {
    /// Sequential epoch id, starting at 0
    pub index: usize,

    /// Collection time (receiver clock of the first observation), GPST
    pub epoch: Epoch,

    /// Per satellite observations, [SV] unique within the batch
    pub observations: Vec<RawObservation>,
}

/// Groups observations into [EpochData] batches: a new epoch begins
/// whenever the receiver timestamp gap between successive rows exceeds
/// `gap`. Single forward pass, no lookahead; input is assumed in log
/// (arrival) order and is not re-sorted. On duplicate [SV] within one
/// batch, the first occurrence wins.
///
/// The boundary rule only depends on the derived receiver timestamps,
/// so re-segmenting already segmented batches yields identical
/// boundaries (idempotent).
pub fn segment(observations: &[RawObservation], gap: Duration) -> Vec<EpochData> {
    let mut epochs = Vec::<EpochData>::new();

    let gap_nanos = gap.total_nanoseconds() as i64;
    let mut previous_nanos: Option<i64> = None;

    for observation in observations {
        let rx_nanos = observation.gps_time_nanos();

        let new_epoch = match previous_nanos {
            Some(previous) => rx_nanos - previous > gap_nanos,
            None => true,
        };

        previous_nanos = Some(rx_nanos);

        if new_epoch {
            epochs.push(EpochData {
                index: epochs.len(),
                epoch: Epoch::from_gpst_nanoseconds(rx_nanos as u64),
                observations: Vec::new(),
            });
        }

        if let Some(current) = epochs.last_mut() {
            if current
                .observations
                .iter()
                .any(|other| other.sv == observation.sv)
            {
                debug!(
                    "{} - duplicated {} in epoch #{}",
                    current.epoch, observation.sv, current.index
                );
                continue;
            }

            current.observations.push(observation.clone());
        }
    }

    epochs
}
