//! IMU record decoding (§4.2).
use crate::{mtime_of, read_whole_file, warn_on_bad_magic, TelemetryError};
use telemetry_core::header::{SensorHeader, HEADER_LEN};
use telemetry_core::model::{ImuChunk, ImuSample, ImuTable, IMU_RECORD_LEN};
use telemetry_core::PipelineConfig;
use std::convert::TryInto;
use std::path::Path;

/// Decodes a single IMU file into a chronologically-timestamped table plus its header.
///
/// Returns `Ok(None)` only for inputs the §4.2 contract treats as "nothing to do" rather than
/// a failure: `Ok((empty table, header))` is itself still `Some` — the caller (the session
/// aggregator) is the one that drops empty chunks, not this function. A trailing partial
/// record is dropped silently; `sample_rate == 0` fails the file.
pub fn decode_imu_file(path: &Path, config: &PipelineConfig) -> Result<(ImuTable, SensorHeader), TelemetryError> {
    let bytes = read_whole_file(path)?;
    let header = SensorHeader::from_bytes(&bytes, path, mtime_of(path))?;
    warn_on_bad_magic(&header, path);

    if header.sample_rate == 0 {
        return Err(TelemetryError::Unexpected {
            detail: format!("{}: sample_rate is zero", path.display()),
        });
    }

    let payload = &bytes[HEADER_LEN.min(bytes.len())..];
    let n_records = payload.len() / IMU_RECORD_LEN;
    let mut samples = Vec::with_capacity(n_records);
    for i in 0..n_records {
        let record = &payload[i * IMU_RECORD_LEN..(i + 1) * IMU_RECORD_LEN];
        samples.push(decode_record(record));
    }

    if config.trim_startup_pop {
        trim_startup_pop(&mut samples);
    }

    let chunk = ImuChunk { header, samples };
    let mut table = ImuTable::default();
    for (i, sample) in chunk.samples.iter().enumerate() {
        table.push(chunk.timestamp(i), *sample);
    }

    if table.is_empty() {
        log::info!("{}: decoded to zero IMU records", path.display());
    }

    Ok((table, chunk.header))
}

fn decode_record(bytes: &[u8]) -> ImuSample {
    let f32_at = |i: usize| f32::from_le_bytes(bytes[i..i + 4].try_into().unwrap());
    ImuSample {
        gyro: [f32_at(0), f32_at(4), f32_at(8)],
        acc: [f32_at(12), f32_at(16), f32_at(20)],
        mag: [f32_at(24), f32_at(28), f32_at(32)],
    }
}

/// Drops a leading run of samples whose accelerometer channels all carry the device's
/// wake-up sentinel bit pattern (§4.2.1; off unless `PipelineConfig::trim_startup_pop` is set).
fn trim_startup_pop(samples: &mut Vec<ImuSample>) {
    const SENTINEL_BITS: u32 = 0x8000_0000;
    let pop_len = samples
        .iter()
        .take_while(|s| s.acc.iter().all(|v| v.to_bits() == SENTINEL_BITS))
        .count();
    if pop_len > 0 {
        log::debug!("trimming {} startup-pop sample(s)", pop_len);
        samples.drain(0..pop_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(sample_rate: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&0xDEAF_DAC0u32.to_le_bytes());
        bytes[4..8].copy_from_slice(&0x1234u32.to_le_bytes());
        bytes[8..13].copy_from_slice(b"IMU10");
        bytes[28..32].copy_from_slice(&sample_rate.to_le_bytes());
        bytes[132] = 0x07;
        bytes[133] = 0x34;
        bytes[134] = 0x51;
        bytes[137] = 0x09;
        bytes[138] = 0x29;
        bytes[139] = 0x25;
        bytes
    }

    fn record_bytes(gyro: [f32; 3], acc: [f32; 3], mag: [f32; 3]) -> Vec<u8> {
        let mut out = Vec::with_capacity(IMU_RECORD_LEN);
        for v in gyro.iter().chain(acc.iter()).chain(mag.iter()) {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&[0u8; 6]);
        out
    }

    #[test]
    fn s1_empty_payload_yields_empty_table_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.BIN");
        std::fs::write(&path, header_bytes(50)).unwrap();

        let (table, _header) = decode_imu_file(&path, &PipelineConfig::new("r", "o")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn s2_single_record_decodes_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.BIN");
        let mut bytes = header_bytes(50);
        bytes.extend(record_bytes([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]));
        std::fs::write(&path, bytes).unwrap();

        let (table, header) = decode_imu_file(&path, &PipelineConfig::new("r", "o")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.acc_x[0], 4.0);
        assert_eq!(table.gyro_x[0], 1.0);
        assert_eq!(table.mag_z[0], 9.0);
        assert_eq!(table.time[0].format("%d/%m/%Y %H:%M:%S%.3f").to_string(), "29/09/2025 07:34:51.000");
        assert_eq!(header.sample_rate, 50);
    }

    #[test]
    fn trailing_partial_record_is_dropped_silently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.BIN");
        let mut bytes = header_bytes(50);
        bytes.extend(record_bytes([0.0; 3], [0.0; 3], [0.0; 3]));
        bytes.extend_from_slice(&[0u8; 10]); // partial trailing record
        std::fs::write(&path, bytes).unwrap();

        let (table, _) = decode_imu_file(&path, &PipelineConfig::new("r", "o")).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn zero_sample_rate_fails_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.BIN");
        std::fs::write(&path, header_bytes(0)).unwrap();

        let err = decode_imu_file(&path, &PipelineConfig::new("r", "o")).unwrap_err();
        assert!(matches!(err, TelemetryError::Unexpected { .. }));
    }

    #[test]
    fn bad_magic_is_logged_but_does_not_fail_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.BIN");
        let mut bytes = header_bytes(50);
        bytes[0..4].copy_from_slice(&0u32.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();

        let (table, _) = decode_imu_file(&path, &PipelineConfig::new("r", "o")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_file_is_file_missing_error() {
        let err = decode_imu_file(Path::new("/does/not/exist.BIN"), &PipelineConfig::new("r", "o")).unwrap_err();
        assert!(matches!(err, TelemetryError::FileMissing { .. }));
    }

    #[test]
    fn startup_pop_trim_is_off_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.BIN");
        let pop = f32::from_bits(0x8000_0000);
        let mut bytes = header_bytes(50);
        bytes.extend(record_bytes([0.0; 3], [pop, pop, pop], [0.0; 3]));
        bytes.extend(record_bytes([1.0; 3], [1.0; 3], [1.0; 3]));
        std::fs::write(&path, &bytes).unwrap();

        let (table, _) = decode_imu_file(&path, &PipelineConfig::new("r", "o")).unwrap();
        assert_eq!(table.len(), 2);

        let trimming_cfg = PipelineConfig::new("r", "o").with_startup_pop_trim(true);
        let (trimmed, _) = decode_imu_file(&path, &trimming_cfg).unwrap();
        assert_eq!(trimmed.len(), 1);
    }
}
