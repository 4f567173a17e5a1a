//! Raw pseudorange formation
use crate::constants::{NANOSECONDS_PER_WEEK, SPEED_OF_LIGHT_M_S};
use crate::prelude::{RawLog, RawObservation, SV};

/// Receiver clock bias reference, captured once from the very first
/// raw observation of the log and reused for every row. Assumes the
/// hardware bias is quasi constant over the log duration: fine for
/// short recordings, to be revisited for logs where clock drift
/// accumulates beyond the pseudorange noise floor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockReference {
    /// FullBiasNanos of the reference row
    pub full_bias_nanos: i64,

    /// BiasNanos of the reference row
    pub bias_nanos: f64,
}

impl ClockReference {
    /// Captures the [ClockReference] from the first observation.
    pub fn new(observation: &RawObservation) -> Self {
        Self {
            full_bias_nanos: observation.full_bias_nanos,
            bias_nanos: observation.bias_nanos,
        }
    }
}

impl RawLog {
    /// [ClockReference] of this log (first raw observation),
    /// None if the log holds no observation at all.
    pub fn clock_reference(&self) -> Option<ClockReference> {
        self.observations.first().map(ClockReference::new)
    }
}

/// Raw pseudorange: apparent signal travel distance between one
/// satellite and the receiver, before satellite clock correction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pseudorange {
    /// [SV] identity
    pub sv: SV,

    /// Time of transmission, in seconds of current GPS week
    pub t_tx_week_s: f64,

    /// Apparent signal travel time (s)
    pub travel_time_s: f64,

    /// Apparent travel distance (m)
    pub range_m: f64,

    /// 1-sigma uncertainty (m)
    pub uncertainty_m: f64,
}

impl Pseudorange {
    /// Forms the raw [Pseudorange] for one observation.
    ///
    /// Time of reception comes from the receiver clock and the log wide
    /// [ClockReference]; time of transmission is satellite reported.
    /// Both are expressed in seconds of the current GPS week, the week
    /// number being derived from the reception time. The integer
    /// nanosecond part is reduced modulo one week before any float
    /// conversion, so no precision is lost on the ~1.3e18 ns clock
    /// readings.
    pub fn new(observation: &RawObservation, reference: &ClockReference) -> Self {
        let rx_gnss_nanos = observation.time_nanos - reference.full_bias_nanos;
        let week = rx_gnss_nanos.div_euclid(NANOSECONDS_PER_WEEK);

        let t_rx_week_s = (rx_gnss_nanos - week * NANOSECONDS_PER_WEEK) as f64 * 1.0E-9
            + (observation.time_offset_nanos - reference.bias_nanos) * 1.0E-9;

        let t_tx_week_s =
            (observation.received_sv_time_nanos as f64 + observation.time_offset_nanos) * 1.0E-9;

        let travel_time_s = t_rx_week_s - t_tx_week_s;

        Self {
            sv: observation.sv,
            t_tx_week_s,
            travel_time_s,
            range_m: travel_time_s * SPEED_OF_LIGHT_M_S,
            uncertainty_m: observation.received_sv_time_uncertainty_nanos * 1.0E-9
                * SPEED_OF_LIGHT_M_S,
        }
    }

    /// True if the apparent travel time is physically plausible for a
    /// MEO signal. Anything above `max_travel_time_s` (nominally 0.1 s)
    /// is a corrupted or week-ambiguous transmit time estimate and must
    /// not contribute to solving.
    pub fn is_plausible(&self, max_travel_time_s: f64) -> bool {
        self.travel_time_s < max_travel_time_s && self.travel_time_s > 0.0
    }
}
