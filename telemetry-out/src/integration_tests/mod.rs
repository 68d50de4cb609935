//! Round-trip tests driving the coordinator against real files under `tempfile::tempdir()`,
//! exercising each sensor family's decode-then-write path end to end.
use crate::pipeline::{run_session, SessionInput};
use telemetry_core::PipelineConfig;
use std::fs;
use std::path::PathBuf;

fn imu_file_bytes(sample_rate: u32, bcd: [u8; 6], rows: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; telemetry_core::HEADER_LEN];
    bytes[0..4].copy_from_slice(&0xDEAF_DAC0u32.to_le_bytes());
    bytes[4..8].copy_from_slice(&0x4242u32.to_le_bytes());
    bytes[8..13].copy_from_slice(b"IMU10");
    bytes[28..32].copy_from_slice(&sample_rate.to_le_bytes());
    bytes[132] = bcd[0];
    bytes[133] = bcd[1];
    bytes[134] = bcd[2];
    bytes[137] = bcd[3];
    bytes[138] = bcd[4];
    bytes[139] = bcd[5];
    for _ in 0..rows {
        for v in [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.extend_from_slice(&[0u8; 6]);
    }
    bytes
}

#[test]
fn a_session_with_one_imu_file_writes_a_csv_under_the_output_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("raw");
    fs::create_dir_all(&raw).unwrap();
    let processed = dir.path().join("processed");

    let path = raw.join("01M.BIN");
    fs::write(&path, imu_file_bytes(50, [0x07, 0x34, 0x51, 0x09, 0x29, 0x25], 3)).unwrap();

    let config = PipelineConfig::new(raw, processed.clone());
    let input = SessionInput {
        session_id: "20250918_vesper1".to_string(),
        imu_paths: vec![path],
        aud_paths: vec![],
        gps_paths: vec![],
    };

    let report = run_session(&input, &config);
    assert_eq!(report.imu.succeeded, 1);
    assert_eq!(report.imu.failed, 0);

    let csv_files: Vec<PathBuf> = fs::read_dir(processed.join("imu"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    assert_eq!(csv_files.len(), 1);

    let content = fs::read_to_string(&csv_files[0]).unwrap();
    assert_eq!(content.lines().count(), 4); // header + 3 rows
}

#[test]
fn a_session_with_two_imu_files_merges_into_one_monotone_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("raw");
    fs::create_dir_all(&raw).unwrap();
    let processed = dir.path().join("processed");

    let second = raw.join("2_M.BIN");
    fs::write(&second, imu_file_bytes(50, [0x08, 0x00, 0x00, 0x09, 0x29, 0x25], 2)).unwrap();
    let first = raw.join("1_M.BIN");
    fs::write(&first, imu_file_bytes(50, [0x07, 0x34, 0x51, 0x09, 0x29, 0x25], 2)).unwrap();

    let config = PipelineConfig::new(raw, processed.clone());
    let input = SessionInput {
        session_id: "20250929_vesper2".to_string(),
        imu_paths: vec![second, first],
        aud_paths: vec![],
        gps_paths: vec![],
    };

    let report = run_session(&input, &config);
    assert_eq!(report.imu.found, 2);
    assert_eq!(report.imu.succeeded, 2);
    assert_eq!(report.imu.failed, 0);
    assert!(!report.imu_write_failed);

    let csv_files: Vec<PathBuf> = fs::read_dir(processed.join("imu"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    assert_eq!(csv_files.len(), 1);
    let content = fs::read_to_string(&csv_files[0]).unwrap();
    assert_eq!(content.lines().count(), 5); // header + 4 rows across both files
}

#[test]
fn a_session_with_audio_and_gps_writes_wav_and_snapshot() {
    use telemetry_core::{FOOTER_MAGIC, GPS_PREAMBLE_MAGIC};

    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("raw");
    fs::create_dir_all(&raw).unwrap();
    let processed = dir.path().join("processed");

    let mut audio_bytes = vec![0u8; telemetry_core::HEADER_LEN];
    audio_bytes[0..4].copy_from_slice(&0xDEAF_DAC0u32.to_le_bytes());
    audio_bytes[8..15].copy_from_slice(b"SPH0641");
    audio_bytes[28..32].copy_from_slice(&16000u32.to_le_bytes());
    audio_bytes.extend(vec![0x01, 0x00, 0x02, 0x00]);
    audio_bytes.extend_from_slice(&FOOTER_MAGIC);
    audio_bytes.extend_from_slice(&[0x07, 0x34, 0x51, 0x00, 0x04, 0x09, 0x29, 0x25]);
    audio_bytes.extend_from_slice(&[0x00, 0x00]);
    audio_bytes.extend(vec![0x03, 0x00, 0x04, 0x00]);
    let audio_path = raw.join("01A.BIN");
    fs::write(&audio_path, audio_bytes).unwrap();

    let mut gps_bytes = vec![0u8; telemetry_core::GPS_PREAMBLE_LEN];
    gps_bytes[0..4].copy_from_slice(&GPS_PREAMBLE_MAGIC.to_le_bytes());
    gps_bytes[4] = 7;
    gps_bytes[5] = 3;
    gps_bytes[6] = 9;
    gps_bytes[9] = 4;
    gps_bytes[10] = 9;
    gps_bytes[11] = 25;
    gps_bytes.extend_from_slice(&0xAABB_CCDDu32.to_le_bytes());
    let gps_path = raw.join("gps_001.BIN");
    fs::write(&gps_path, gps_bytes).unwrap();

    let config = PipelineConfig::new(raw, processed.clone());
    let input = SessionInput {
        session_id: "20250929_vesper3".to_string(),
        imu_paths: vec![],
        aud_paths: vec![audio_path],
        gps_paths: vec![gps_path],
    };

    let report = run_session(&input, &config);
    assert_eq!(report.audio.succeeded, 1);
    assert_eq!(report.gps.succeeded, 1);
    assert!(report.failures.is_empty());

    let wav_files: Vec<PathBuf> = fs::read_dir(processed.join("aud"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("wav"))
        .collect();
    assert_eq!(wav_files.len(), 1);

    let snapshot_path = processed.join("gps").join("snapshots").join("snap.2025_04_09_07_03_09_GC0.dat");
    assert!(snapshot_path.exists());
}
