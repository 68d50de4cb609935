//! Error types shared by every crate in the workspace.
use std::path::PathBuf;

/// The error sum type returned by every decoder and writer in the workspace.
///
/// Each file-level operation isolates its own failure into one of these variants; the
/// pipeline coordinator pattern-matches on them to build the per-run report rather than
/// letting any single bad file abort the run.
#[derive(Debug)]
pub enum TelemetryError {
    /// The input path does not exist.
    FileMissing { path: PathBuf },
    /// Fewer bytes than the header/preamble requires.
    Truncated { path: PathBuf, needed: usize, found: usize },
    /// Magic word mismatch.
    BadMagic { path: PathBuf, expected: u32, found: u32 },
    /// Preamble mismatch (GPS 1024-byte block).
    BadPreamble { path: PathBuf, expected: u32, found: u32 },
    /// The BCD calendar fields did not decode to a valid date.
    BadBcd { path: PathBuf, detail: String },
    /// An IMU decode produced zero records.
    ZeroRecords { path: PathBuf },
    /// An audio or GPS decode produced an empty payload.
    EmptyPayload { path: PathBuf },
    /// Writing an output artifact failed.
    WriteFailed { path: PathBuf, source: std::io::Error },
    /// `sample_rate` was zero, or some other precondition made decoding meaningless.
    Unexpected { detail: String },
    /// Wrapped `std::io::Error` not otherwise classified above.
    StdIoError(std::io::Error),
    #[cfg(feature = "to_json")]
    /// Serialisation/deserialisation error.
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for TelemetryError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl From<hound::Error> for TelemetryError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => Self::StdIoError(io),
            other => Self::Unexpected { detail: other.to_string() },
        }
    }
}

#[cfg(feature = "to_json")]
impl From<serde_json::Error> for TelemetryError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerdeError(e)
    }
}

impl std::fmt::Display for TelemetryError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::TelemetryError::*;
        match self {
            FileMissing { path } => write!(fmt, "file not found: {}", path.display()),
            Truncated { path, needed, found } => write!(
                fmt,
                "{} is truncated: needed at least {} bytes, found {}",
                path.display(),
                needed,
                found
            ),
            BadMagic { path, expected, found } => write!(
                fmt,
                "{} has bad magic word: expected {:#010X}, found {:#010X}",
                path.display(),
                expected,
                found
            ),
            BadPreamble { path, expected, found } => write!(
                fmt,
                "{} has bad preamble magic: expected {:#010X}, found {:#010X}",
                path.display(),
                expected,
                found
            ),
            BadBcd { path, detail } => write!(fmt, "{} has an invalid BCD timestamp: {}", path.display(), detail),
            ZeroRecords { path } => write!(fmt, "{} decoded to zero records", path.display()),
            EmptyPayload { path } => write!(fmt, "{} has an empty payload", path.display()),
            WriteFailed { path, source } => write!(fmt, "failed to write {}: {}", path.display(), source),
            Unexpected { detail } => write!(fmt, "{}", detail),
            StdIoError(e) => write!(fmt, "{}", e),
            #[cfg(feature = "to_json")]
            SerdeError(e) => write!(fmt, "{}", e),
        }
    }
}

impl From<TelemetryError> for String {
    fn from(e: TelemetryError) -> String {
        e.to_string()
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::TelemetryError::*;
        match self {
            WriteFailed { source, .. } => Some(source),
            StdIoError(e) => Some(e),
            #[cfg(feature = "to_json")]
            SerdeError(e) => Some(e),
            _ => None,
        }
    }
}
