//! Hand-rolled IMU CSV formatting (§4.6, §9: "No library dependence is required").
use telemetry_core::model::ImuTable;
use telemetry_core::TelemetryError;
use chrono::Timelike;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_ROW: &str = "Time,Minute,Second,Milisecond,Acc X [mg],Acc Y [mg],Acc Z [mg],\
Gyro X [dps],Gyro Y [dps],Gyro Z [dps],Mag X [mGauss],Mag Y [mGauss],Mag Z [mGauss],\
Temperature [C],Bar Pressure [hPa]";

/// Writes one session's merged IMU table as CSV, column order and spelling fixed by §4.2
/// (`Milisecond` is intentional, not a typo).
pub fn write_imu_csv(path: &Path, table: &ImuTable) -> Result<(), TelemetryError> {
    let file = File::create(path).map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })?;
    let mut out = BufWriter::new(file);

    write_row(&mut out, path)?;
    for i in 0..table.len() {
        write_data_row(&mut out, table, i, path)?;
    }
    out.flush().map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })
}

fn write_row(out: &mut impl Write, path: &Path) -> Result<(), TelemetryError> {
    writeln!(out, "{}", HEADER_ROW).map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })
}

fn write_data_row(out: &mut impl Write, table: &ImuTable, i: usize, path: &Path) -> Result<(), TelemetryError> {
    let t = table.time[i];
    let millis = t.nanosecond() / 1_000_000;
    writeln!(
        out,
        "{}.{:03},{},{},{:03},{},{},{},{},{},{},{},{},{},0.0,0.0",
        t.format("%d/%m/%Y %H:%M:%S"),
        millis,
        t.minute(),
        t.second(),
        millis,
        table.acc_x[i],
        table.acc_y[i],
        table.acc_z[i],
        table.gyro_x[i],
        table.gyro_y[i],
        table.gyro_z[i],
        table.mag_x[i],
        table.mag_y[i],
        table.mag_z[i],
    )
    .map_err(|e| TelemetryError::WriteFailed { path: path.to_path_buf(), source: e })
}
