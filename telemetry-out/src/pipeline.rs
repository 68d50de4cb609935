//! Pipeline coordinator (§4.7): per-session fan-out across the three sensor families,
//! isolating each file's failure into a `{file, reason}` accumulator rather than aborting.
use crate::aggregate::{basename_sort_key, merge_imu};
use crate::{write_audio_session, write_imu_session};
use telemetry_core::PipelineConfig;
use telemetry_in::audio::decode_audio_file;
use telemetry_in::gps::{decode_and_write_gps, GpsOutcome};
use telemetry_in::imu::decode_imu_file;
use std::path::PathBuf;

/// Per-family found/succeeded/failed counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyStats {
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// One file that could not be processed, and why.
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub file: PathBuf,
    pub reason: String,
}

/// The inputs the external crawler hands the coordinator for one session (§6).
#[derive(Debug, Clone, Default)]
pub struct SessionInput {
    pub session_id: String,
    pub imu_paths: Vec<PathBuf>,
    pub aud_paths: Vec<PathBuf>,
    pub gps_paths: Vec<PathBuf>,
}

/// Per-session outcome: family totals plus every isolated failure.
///
/// `imu.succeeded`/`imu.failed` count per-file decode outcomes only, so `imu.found ==
/// imu.succeeded + imu.failed` always holds; a failure writing the merged session (which
/// isn't attributable to any one input file) is recorded in `imu_write_failed` and in
/// `failures`, not folded into the per-file counters.
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    pub session_id: String,
    pub imu: FamilyStats,
    pub audio: FamilyStats,
    pub gps: FamilyStats,
    pub imu_write_failed: bool,
    pub failures: Vec<FailedFile>,
}

/// Decodes and writes every file in `input`, isolating per-file failures, and returns the
/// totals. Never panics on a bad input file; a failed file is recorded and skipped.
pub fn run_session(input: &SessionInput, config: &PipelineConfig) -> SessionReport {
    let mut report = SessionReport { session_id: input.session_id.clone(), ..Default::default() };

    report.imu.found = input.imu_paths.len();
    let mut ordered = input.imu_paths.clone();
    ordered.sort_by_key(|p| basename_sort_key(p));

    let mut chunks = Vec::new();
    for path in &ordered {
        match decode_imu_file(path, config) {
            Ok(chunk) => {
                report.imu.succeeded += 1;
                chunks.push(chunk);
            }
            Err(e) => {
                log::warn!("{}: IMU decode failed: {}", path.display(), e);
                report.imu.failed += 1;
                report.failures.push(FailedFile { file: path.clone(), reason: e.to_string() });
            }
        }
    }
    if let Some((table, header)) = merge_imu(chunks) {
        if let Err(e) = write_imu_session(&config.processed_folder, &table, &header) {
            log::error!("session {}: IMU write failed: {}", input.session_id, e);
            report.imu_write_failed = true;
            report.failures.push(FailedFile { file: config.processed_folder.join("imu"), reason: e.to_string() });
        }
    }

    report.audio.found = input.aud_paths.len();
    for path in &input.aud_paths {
        let outcome = decode_audio_file(path, config).and_then(|stream| write_audio_session(&config.processed_folder, &stream));
        match outcome {
            Ok(_) => report.audio.succeeded += 1,
            Err(e) => {
                log::warn!("{}: audio processing failed: {}", path.display(), e);
                report.audio.failed += 1;
                report.failures.push(FailedFile { file: path.clone(), reason: e.to_string() });
            }
        }
    }

    report.gps.found = input.gps_paths.len();
    for path in &input.gps_paths {
        match decode_and_write_gps(path, &config.processed_folder) {
            Ok(GpsOutcome::Written(_)) => report.gps.succeeded += 1,
            Ok(GpsOutcome::AlreadyExists(p)) => {
                log::info!("{}: snapshot already exists, not counted as a failure", p.display());
                report.gps.succeeded += 1;
            }
            Err(e) => {
                log::warn!("{}: GPS decode failed: {}", path.display(), e);
                report.gps.failed += 1;
                report.failures.push(FailedFile { file: path.clone(), reason: e.to_string() });
            }
        }
    }

    report
}
