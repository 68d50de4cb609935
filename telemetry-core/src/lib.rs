//! This library is the foundation for the `telemetry-in` and `telemetry-out` crates. It can
//! be built either with serialization support, or in a slightly more lightweight manner
//! without it (see features).
#![allow(clippy::derive_partial_eq_without_eq)]
#[cfg(feature = "to_json")]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod bcd;
pub mod config;
pub mod errors;
pub mod header;
pub mod model;

pub use config::PipelineConfig;
pub use errors::TelemetryError;
pub use header::{SensorHeader, HEADER_LEN, SYNC_WORD};
pub use model::{
    AudioStream, DriftTimestamp, GpsSnapshot, ImuChunk, ImuSample, ImuTable, IMU_RECORD_LEN,
};

/// Expected magic word at offset 0 of an IMU/audio header.
pub const HEADER_MAGIC: u32 = 0xDEAF_DAC0;

/// Expected magic word at offset 0 of a GPS snapshot preamble.
pub const GPS_PREAMBLE_MAGIC: u32 = 0xA55A_A55A;

/// Width, in bytes, of the GPS preamble (magic word + time/date block).
pub const GPS_PREAMBLE_LEN: usize = 1024;

/// Magic word that opens every audio footer.
pub const FOOTER_MAGIC: [u8; 4] = [0xEF, 0xEF, 0xCD, 0xAB];

/// Width, in bytes, of one audio footer.
pub const FOOTER_LEN: usize = 14;

#[cfg(feature = "to_json")]
impl SensorHeader {
    /// Serializes the header to JSON, mainly for sidecar/debug tooling.
    pub fn to_json(&self) -> Result<String, TelemetryError> {
        #[derive(serde::Serialize)]
        struct Repr<'a> {
            device_id: u32,
            sensor_name: &'a str,
            sample_rate: u32,
            bitmask: u32,
            config: [u32; 4],
            start: String,
        }
        let repr = Repr {
            device_id: self.device_id,
            sensor_name: &self.sensor_name,
            sample_rate: self.sample_rate,
            bitmask: self.bitmask,
            config: self.config,
            start: self.start.to_string(),
        };
        Ok(serde_json::to_string(&repr)?)
    }
}
