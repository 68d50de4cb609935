//! Sidecar metadata text files (§4.6, §3.1, §4.6.1).
use telemetry_core::model::DriftTimestamp;
use telemetry_core::{SensorHeader, TelemetryError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the `Key:Value` sidecar for one session's header, with an optional trailing
/// drift-timestamp block when the source stream carried any.
pub fn write_sidecar(path: &Path, header: &SensorHeader, drift_timestamps: &[DriftTimestamp]) -> Result<(), TelemetryError> {
    let file = File::create(path).map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })?;
    let mut out = BufWriter::new(file);

    let write = |out: &mut BufWriter<File>, line: std::fmt::Arguments| -> std::io::Result<()> {
        writeln!(out, "{}", line)
    };

    write(&mut out, format_args!("DeviceID:{:X}", header.device_id))
        .and_then(|_| write(&mut out, format_args!("HWID:{:X}", header.hardware_id())))
        .and_then(|_| write(&mut out, format_args!("FWID:{:X}", header.firmware_id())))
        .and_then(|_| write(&mut out, format_args!("Sensor:{}", header.sensor_name)))
        .and_then(|_| write(&mut out, format_args!("SampleRate:{}", header.sample_rate)))
        .and_then(|_| write(&mut out, format_args!("WinRate:{}", header.win_rate())))
        .and_then(|_| write(&mut out, format_args!("WinLen:{}", header.win_len())))
        .and_then(|_| write(&mut out, format_args!("Config0:{:X}", header.config[0])))
        .and_then(|_| write(&mut out, format_args!("Config1:{:X}", header.config[1])))
        .and_then(|_| write(&mut out, format_args!("Config2:{:X}", header.config[2])))
        .and_then(|_| write(&mut out, format_args!("Config3:{:X}", header.config[3])))
        .and_then(|_| write(&mut out, format_args!("Bitmask:{:X}", header.bitmask)))
        .map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })?;

    if !drift_timestamps.is_empty() {
        writeln!(out).and_then(|_| writeln!(out, "=== EMBEDDED BLOCK TIMESTAMPS (Audio Drift Check) ==="))
            .map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })?;
        for (i, ts) in drift_timestamps.iter().enumerate() {
            writeln!(out, "Block_{}: {}", i + 1, ts)
                .map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })?;
        }
    }

    out.flush().map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })
}
