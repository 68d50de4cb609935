//! The 150-byte preamble shared by IMU and audio files.
use crate::bcd::{ascii_bytes_to_string, bcd_to_u32};
use crate::errors::TelemetryError;
use chrono::NaiveDateTime;
use std::convert::TryInto;
use std::path::Path;
use std::time::SystemTime;

/// Width, in bytes, of the preamble common to IMU and audio files.
pub const HEADER_LEN: usize = 150;

/// Expected value of the sync word at offset 128. Not enforced on decode; exposed so
/// callers can sanity-check a header if they choose to.
pub const SYNC_WORD: u32 = 0x5AA5_5AA5;

/// The fixed-layout record parsed from bytes `[0, 150)` of an IMU or audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorHeader {
    /// Bytes 0-4. Not validated against a whitelist; the caller decides what to do with it.
    pub magic: u32,
    /// Bytes 4-8, rendered as uppercase hex wherever it appears in filenames or sidecars.
    pub device_id: u32,
    /// Bytes 8-24, ASCII, NUL-terminated (e.g. `"IMU10"`, `"SPH0641"`).
    pub sensor_name: String,
    /// Bytes 28-32, Hz.
    pub sample_rate: u32,
    /// Bytes 40-44.
    pub bitmask: u32,
    /// Bytes 44-60, four little-endian u32 configuration words.
    pub config: [u32; 4],
    /// Bytes 128-132. Expected to equal [`SYNC_WORD`]; not enforced.
    pub sync_word: u32,
    /// Wall-clock start instant decoded from the BCD fields at bytes 132-140, or the file's
    /// mtime if the BCD calendar fields did not form a valid date.
    pub start: NaiveDateTime,
    /// Set when `start` came from the file's mtime rather than the header's BCD fields.
    pub start_from_mtime: bool,
}

impl SensorHeader {
    /// Decodes a [`SensorHeader`] from the first [`HEADER_LEN`] bytes of a file.
    ///
    /// `path` is used only to build error messages and to re-derive the fallback timestamp;
    /// `mtime` is passed in by the caller (rather than read here) so the BCD-substitution
    /// path stays unit-testable without touching the filesystem.
    pub fn from_bytes(bytes: &[u8], path: &Path, mtime: SystemTime) -> Result<Self, TelemetryError> {
        if bytes.len() < HEADER_LEN {
            return Err(TelemetryError::Truncated {
                path: path.to_path_buf(),
                needed: HEADER_LEN,
                found: bytes.len(),
            });
        }

        let magic = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let device_id = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let sensor_name = ascii_bytes_to_string(&bytes[8..24]);
        let sample_rate = u32::from_le_bytes(bytes[28..32].try_into().unwrap());
        let bitmask = u32::from_le_bytes(bytes[40..44].try_into().unwrap());
        let config = [
            u32::from_le_bytes(bytes[44..48].try_into().unwrap()),
            u32::from_le_bytes(bytes[48..52].try_into().unwrap()),
            u32::from_le_bytes(bytes[52..56].try_into().unwrap()),
            u32::from_le_bytes(bytes[56..60].try_into().unwrap()),
        ];
        let sync_word = u32::from_le_bytes(bytes[128..132].try_into().unwrap());

        let (start, start_from_mtime) = match decode_bcd_instant(&bytes[132..140]) {
            Some(dt) => (dt, false),
            None => (mtime_to_naive(mtime), true),
        };

        Ok(SensorHeader {
            magic,
            device_id,
            sensor_name,
            sample_rate,
            bitmask,
            config,
            sync_word,
            start,
            start_from_mtime,
        })
    }

    /// Hardware identifier: not a distinct byte range, aliases `config[0]`.
    pub fn hardware_id(&self) -> u32 {
        self.config[0]
    }

    /// Firmware identifier: not a distinct byte range, aliases `config[1]`.
    pub fn firmware_id(&self) -> u32 {
        self.config[1]
    }

    /// Windowing decimation rate, packed into the upper 16 bits of `bitmask`.
    pub fn win_rate(&self) -> u32 {
        self.bitmask >> 16
    }

    /// Windowing decimation length, packed into the lower 16 bits of `bitmask`.
    pub fn win_len(&self) -> u32 {
        self.bitmask & 0xFFFF
    }
}

/// Decodes the BCD time/date fields at offsets 132..140 of the header (`hh,mm,ss,pad,mon,day,yr,pad`
/// relative to the slice start) into a calendar instant. Returns `None` when the fields do not
/// form a valid date, matching §4.1's "substitute the file's mtime" contract.
fn decode_bcd_instant(bcd: &[u8]) -> Option<NaiveDateTime> {
    let h = bcd_to_u32(bcd[0]);
    let m = bcd_to_u32(bcd[1]);
    let s = bcd_to_u32(bcd[2]);
    // bcd[3] is the documented padding byte between time and date.
    let month = bcd_to_u32(bcd[5]);
    let day = bcd_to_u32(bcd[6]);
    let year = 2000 + bcd_to_u32(bcd[7]);

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(2000..=2099).contains(&year) {
        return None;
    }

    chrono::NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|d| d.and_hms_opt(h, m, s))
}

fn mtime_to_naive(mtime: SystemTime) -> NaiveDateTime {
    let secs = mtime
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or(chrono::NaiveDateTime::UNIX_EPOCH)
}
