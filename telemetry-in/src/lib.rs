//! Decoders for the three wildlife-tag telemetry binary formats.
//!
//! Each decoder in this crate takes a file path and returns a decoded in-memory result or a
//! [`TelemetryError`]; none of them perform aggregation (that is `telemetry-out`'s job) and
//! only the GPS decoder performs any output I/O, per the source format's own component split.
pub mod audio;
pub mod gps;
pub mod imu;

pub use telemetry_core::*;

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Reads a whole file into memory, translating a missing file into [`TelemetryError::FileMissing`].
pub(crate) fn read_whole_file(path: &Path) -> Result<Vec<u8>, TelemetryError> {
    if !path.exists() {
        return Err(TelemetryError::FileMissing { path: path.to_path_buf() });
    }
    Ok(fs::read(path)?)
}

/// Gets a file's last-modification instant, falling back to the Unix epoch if the
/// filesystem cannot report one.
pub(crate) fn mtime_of(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Warns on an IMU/AUD header whose magic word doesn't match [`HEADER_MAGIC`], per §7's
/// "record failure (IMU/AUD left to implementer's choice; current behavior is to continue
/// decoding regardless)": the mismatch is logged but never fails the file.
pub(crate) fn warn_on_bad_magic(header: &SensorHeader, path: &Path) {
    if header.magic != HEADER_MAGIC {
        let err = TelemetryError::BadMagic { path: path.to_path_buf(), expected: HEADER_MAGIC, found: header.magic };
        log::warn!("{}", err);
    }
}
