use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Record rows must carry a tag declared by a preceding header row.
    /// Anything else corrupts the arrival ordering and aborts the run.
    #[error("unrecognized record tag \"{0}\"")]
    UnknownRecordTag(String),

    /// A record row showed up before the header row describing its columns.
    #[error("no header describes \"{0}\" records")]
    MissingHeader(&'static str),

    /// A mandatory column is absent from the header (optional fields
    /// default to zero and never wind up here).
    #[error("missing required column \"{0}\"")]
    MissingColumn(&'static str),

    /// A mandatory field exists but does not parse as a number.
    #[error("invalid numeric value for \"{0}\"")]
    InvalidNumber(&'static str),

    /// The log stream failed mid read.
    #[error("log i/o error")]
    LogIo,

    /// The log contains no raw measurement: no clock reference can be defined.
    #[error("empty measurement log")]
    EmptyLog,

    /// Too few usable satellites remain in this epoch, with respect to
    /// the navigation minimum.
    #[error("not enough usable satellites")]
    NotEnoughSatellites,

    /// Degenerate geometry: the normal equations cannot be inverted.
    #[error("singular geometry matrix")]
    SingularGeometry,
}
