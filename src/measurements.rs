//! Raw measurement log ingestion
use std::collections::HashMap;
use std::io::BufRead;

use log::debug;

use crate::prelude::{Constellation, Error, SV};

/// One satellite measurement at one receiver clock tick,
/// normalized from a raw "Raw" log record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    /// [SV] identity (constellation + zero padded id, "G05" style)
    pub sv: SV,

    /// Received signal strength (dB.Hz)
    pub snr_dbhz: f64,

    /// Receiver hardware clock tick (ns)
    pub time_nanos: i64,

    /// Offset between the hardware clock and GPS time (ns),
    /// large and negative by convention
    pub full_bias_nanos: i64,

    /// Sub-nanosecond clock bias remainder (ns), 0 when not reported
    pub bias_nanos: f64,

    /// Offset of this measurement relative to the clock tick (ns),
    /// 0 when not reported
    pub time_offset_nanos: f64,

    /// Satellite reported time of transmission (ns of current week)
    pub received_sv_time_nanos: i64,

    /// 1-sigma uncertainty on the reported transmission time (ns)
    pub received_sv_time_uncertainty_nanos: f64,

    /// Doppler derived range rate (m.s⁻¹)
    pub pseudorange_rate_m_s: f64,
}

impl RawObservation {
    /// Receiver clock reading converted to GPS time since
    /// 1980-01-06T00:00:00 GPST, in nanoseconds.
    pub fn gps_time_nanos(&self) -> i64 {
        self.time_nanos - self.full_bias_nanos + self.bias_nanos as i64
    }
}

/// Device reported location fix, normalized from a "Fix" log record.
/// Kept so callers may compare the solved track to the device track.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    /// Fix provider ("gps", "fused"..), empty when not reported
    pub provider: String,

    /// Latitude (decimal degrees)
    pub latitude_ddeg: f64,

    /// Longitude (decimal degrees)
    pub longitude_ddeg: f64,

    /// Altitude above the ellipsoid (m), 0 when not reported
    pub altitude_m: f64,

    /// UTC timestamp (ms), 0 when not reported
    pub unix_time_millis: i64,
}

/// Normalized measurement log: two homogeneous tables,
/// both in original arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLog {
    /// Raw satellite observations, filtered to a single constellation
    pub observations: Vec<RawObservation>,

    /// Device reported location fixes
    pub fixes: Vec<LocationFix>,
}

/// Column layout declared by a `#` header row: name to field index.
type Columns = HashMap<String, usize>;

impl RawLog {
    /// Parses a raw GNSS measurement log (GnssLogger CSV dialect).
    ///
    /// Header rows start with `#`, their first field names the record
    /// tag they describe ("Raw", "Fix") and the remaining fields bind
    /// column names until the next header of that kind. Record rows
    /// carry the tag in their first field.
    ///
    /// Observations from constellations other than `target` are
    /// dropped. Missing optional fields (`BiasNanos`,
    /// `TimeOffsetNanos`..) default to zero; missing mandatory fields
    /// and unrecognized record tags abort with [Error].
    pub fn parse<R: BufRead>(reader: R, target: Constellation) -> Result<Self, Error> {
        let mut log = Self::default();

        let mut raw_columns: Option<Columns> = None;
        let mut fix_columns: Option<Columns> = None;

        for line in reader.lines() {
            let line = line.map_err(|_| Error::LogIo)?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('#') {
                let fields: Vec<&str> = header.split(',').map(|f| f.trim()).collect();
                match fields.first() {
                    Some(&"Raw") => raw_columns = Some(columns(&fields)),
                    Some(&tag) if tag.contains("Fix") => fix_columns = Some(columns(&fields)),
                    // headers for record kinds we never consume
                    _ => continue,
                }
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
            let tag = fields[0];

            if tag.contains("Raw") {
                let columns = raw_columns.as_ref().ok_or(Error::MissingHeader("Raw"))?;
                if let Some(observation) = parse_observation(&fields, columns, target)? {
                    log.observations.push(observation);
                }
            } else if tag.contains("Fix") {
                let columns = fix_columns.as_ref().ok_or(Error::MissingHeader("Fix"))?;
                log.fixes.push(parse_fix(&fields, columns)?);
            } else {
                return Err(Error::UnknownRecordTag(tag.to_string()));
            }
        }

        Ok(log)
    }
}

fn columns(fields: &[&str]) -> Columns {
    fields
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, name)| (name.to_string(), idx))
        .collect()
}

/// Android numeric constellation type to [Constellation]
pub(crate) fn constellation_from_type(gnss_type: i64) -> Option<Constellation> {
    match gnss_type {
        1 => Some(Constellation::GPS),
        2 => Some(Constellation::SBAS),
        3 => Some(Constellation::Glonass),
        4 => Some(Constellation::QZSS),
        5 => Some(Constellation::BeiDou),
        6 => Some(Constellation::Galileo),
        7 => Some(Constellation::IRNSS),
        _ => None,
    }
}

fn field<'a>(fields: &[&'a str], columns: &Columns, name: &'static str) -> Option<&'a str> {
    let idx = *columns.get(name)?;
    match fields.get(idx) {
        Some(&value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn required_f64(fields: &[&str], columns: &Columns, name: &'static str) -> Result<f64, Error> {
    let value = field(fields, columns, name).ok_or(Error::MissingColumn(name))?;
    value.parse::<f64>().map_err(|_| Error::InvalidNumber(name))
}

fn required_i64(fields: &[&str], columns: &Columns, name: &'static str) -> Result<i64, Error> {
    let value = field(fields, columns, name).ok_or(Error::MissingColumn(name))?;
    match value.parse::<i64>() {
        Ok(integer) => Ok(integer),
        // tolerate "123.0" style encodings
        Err(_) => {
            let float = value.parse::<f64>().map_err(|_| Error::InvalidNumber(name))?;
            Ok(float.round() as i64)
        },
    }
}

/// Missing column or empty field: defaults to zero.
fn optional_f64(fields: &[&str], columns: &Columns, name: &'static str) -> Result<f64, Error> {
    match field(fields, columns, name) {
        Some(value) => value.parse::<f64>().map_err(|_| Error::InvalidNumber(name)),
        None => Ok(0.0),
    }
}

fn optional_i64(fields: &[&str], columns: &Columns, name: &'static str) -> Result<i64, Error> {
    match field(fields, columns, name) {
        Some(value) => value.parse::<i64>().map_err(|_| Error::InvalidNumber(name)),
        None => Ok(0),
    }
}

fn parse_observation(
    fields: &[&str],
    columns: &Columns,
    target: Constellation,
) -> Result<Option<RawObservation>, Error> {
    let gnss_type = required_i64(fields, columns, "ConstellationType")?;
    let svid = required_i64(fields, columns, "Svid")?;

    let constellation = match constellation_from_type(gnss_type) {
        Some(constellation) if constellation == target => constellation,
        _ => {
            debug!("dropped (constellation type {}, id {})", gnss_type, svid);
            return Ok(None);
        },
    };

    Ok(Some(RawObservation {
        sv: SV::new(constellation, svid as u8),
        snr_dbhz: required_f64(fields, columns, "Cn0DbHz")?,
        time_nanos: required_i64(fields, columns, "TimeNanos")?,
        full_bias_nanos: required_i64(fields, columns, "FullBiasNanos")?,
        bias_nanos: optional_f64(fields, columns, "BiasNanos")?,
        time_offset_nanos: optional_f64(fields, columns, "TimeOffsetNanos")?,
        received_sv_time_nanos: required_i64(fields, columns, "ReceivedSvTimeNanos")?,
        received_sv_time_uncertainty_nanos: required_f64(
            fields,
            columns,
            "ReceivedSvTimeUncertaintyNanos",
        )?,
        pseudorange_rate_m_s: required_f64(fields, columns, "PseudorangeRateMetersPerSecond")?,
    }))
}

fn parse_fix(fields: &[&str], columns: &Columns) -> Result<LocationFix, Error> {
    Ok(LocationFix {
        provider: field(fields, columns, "Provider")
            .unwrap_or_default()
            .to_string(),
        latitude_ddeg: required_f64(fields, columns, "LatitudeDegrees")?,
        longitude_ddeg: required_f64(fields, columns, "LongitudeDegrees")?,
        altitude_m: optional_f64(fields, columns, "AltitudeMeters")?,
        unix_time_millis: optional_i64(fields, columns, "UnixTimeMillis")?,
    })
}
