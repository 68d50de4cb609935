//! Session aggregation and artifact writing for decoded wildlife-tag telemetry, plus the
//! pipeline coordinator that drives per-session decode/write fan-out (§4.5-§4.7).
pub mod aggregate;
pub mod csv;
pub mod pipeline;
pub mod sidecar;
pub mod wav;

pub use telemetry_core::*;

use telemetry_core::model::{AudioStream, ImuTable};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

fn fmt_ts(t: NaiveDateTime) -> String {
    t.format("%Y%m%d_%H%M%S").to_string()
}

/// Writes a session's aggregated IMU table as CSV plus its sidecar.
///
/// Output directories are created (idempotently) exactly once per call; an existing
/// sidecar file is left untouched (§4.6), while the CSV is always (re)written since it is
/// a deterministic function of the input binaries.
pub fn write_imu_session(output_root: &Path, table: &ImuTable, header: &SensorHeader) -> Result<PathBuf, TelemetryError> {
    let start = *table.time.first().ok_or_else(|| TelemetryError::ZeroRecords { path: output_root.to_path_buf() })?;
    let end = *table.time.last().unwrap();
    let stem = format!("{}-{}_{:X}", fmt_ts(start), fmt_ts(end), header.device_id);

    let csv_dir = output_root.join("imu");
    let meta_dir = csv_dir.join("metadata");
    fs::create_dir_all(&csv_dir).map_err(|e| TelemetryError::WriteFailed { path: csv_dir.clone(), source: e })?;
    fs::create_dir_all(&meta_dir).map_err(|e| TelemetryError::WriteFailed { path: meta_dir.clone(), source: e })?;

    let csv_path = csv_dir.join(format!("{}.csv", stem));
    csv::write_imu_csv(&csv_path, table)?;

    let sidecar_path = meta_dir.join(format!("{}.txt", stem));
    if !sidecar_path.exists() {
        sidecar::write_sidecar(&sidecar_path, header, &[])?;
    } else {
        log::debug!("{}: sidecar already exists, skipping", sidecar_path.display());
    }

    Ok(csv_path)
}

/// Writes one decoded audio stream as WAV plus its sidecar (including the drift-timestamp
/// block, when present).
pub fn write_audio_session(output_root: &Path, stream: &AudioStream) -> Result<PathBuf, TelemetryError> {
    let start = stream.header.start;
    let end = stream.end_instant();
    let stem = format!("{}-{}_{:X}", fmt_ts(start), fmt_ts(end), stream.header.device_id);

    let wav_dir = output_root.join("aud");
    let meta_dir = wav_dir.join("metadata");
    fs::create_dir_all(&wav_dir).map_err(|e| TelemetryError::WriteFailed { path: wav_dir.clone(), source: e })?;
    fs::create_dir_all(&meta_dir).map_err(|e| TelemetryError::WriteFailed { path: meta_dir.clone(), source: e })?;

    let wav_path = wav_dir.join(format!("{}.wav", stem));
    wav::write_audio_wav(&wav_path, stream)?;

    let sidecar_path = meta_dir.join(format!("{}.txt", stem));
    if !sidecar_path.exists() {
        sidecar::write_sidecar(&sidecar_path, &stream.header, &stream.drift_timestamps)?;
    } else {
        log::debug!("{}: sidecar already exists, skipping", sidecar_path.display());
    }

    Ok(wav_path)
}

#[cfg(test)]
mod integration_tests;
