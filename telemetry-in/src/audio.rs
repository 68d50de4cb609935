//! Audio stream reconstruction (§4.3): excises in-stream footers and reassembles the PCM.
use crate::{mtime_of, read_whole_file, warn_on_bad_magic, TelemetryError};
use telemetry_core::bcd::hex_digits_to_u32;
use telemetry_core::header::{SensorHeader, HEADER_LEN};
use telemetry_core::model::{AudioStream, DriftTimestamp};
use telemetry_core::{PipelineConfig, FOOTER_LEN, FOOTER_MAGIC};
use std::path::Path;

/// Decodes one audio file: splices out every embedded footer, recovers its drift timestamp
/// if valid, and reassembles the remaining bytes into a signed 16-bit PCM stream.
///
/// Pure: this decoder performs no output I/O, unlike the GPS snapshot decoder.
pub fn decode_audio_file(path: &Path, config: &PipelineConfig) -> Result<AudioStream, TelemetryError> {
    let bytes = read_whole_file(path)?;
    let header = SensorHeader::from_bytes(&bytes, path, mtime_of(path))?;
    warn_on_bad_magic(&header, path);
    let payload = &bytes[HEADER_LEN.min(bytes.len())..];

    if payload.is_empty() {
        return Err(TelemetryError::EmptyPayload { path: path.to_path_buf() });
    }

    let (splice, drift_timestamps) = splice_footers(payload, config.footer_margin_left, config.footer_margin_right);

    let pcm = splice
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(AudioStream { header, pcm, drift_timestamps })
}

/// The linear scan described in §4.3: walk the payload once, cutting `margin_left` bytes
/// before and `margin_right` bytes after every footer occurrence.
fn splice_footers(payload: &[u8], margin_left: usize, margin_right: usize) -> (Vec<u8>, Vec<DriftTimestamp>) {
    let mut out = Vec::with_capacity(payload.len());
    let mut timestamps = Vec::new();
    let mut cursor = 0usize;

    loop {
        match find(payload, &FOOTER_MAGIC, cursor) {
            None => {
                out.extend_from_slice(&payload[cursor..]);
                break;
            }
            Some(f) => {
                let cut = f.saturating_sub(margin_left).max(cursor);
                out.extend_from_slice(&payload[cursor..cut]);

                if let Some(ts) = decode_footer_timestamp(payload, f) {
                    timestamps.push(ts);
                }

                cursor = (f + FOOTER_LEN + margin_right).min(payload.len());
                if f + FOOTER_LEN > payload.len() {
                    break;
                }
            }
        }
    }

    (out, timestamps)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Decodes the 8-byte `hh,mm,ss,pad,pad,mon,day,yy` timestamp at `footer_start + 4`, reading
/// every field as literal hex digits (§4.3, §9's resolved BCD-vs-hex ambiguity). Returns
/// `None` if the footer runs past the end of the payload or the month/day bytes are out of
/// the documented hex-digit range.
fn decode_footer_timestamp(payload: &[u8], footer_start: usize) -> Option<DriftTimestamp> {
    let ts_bytes = payload.get(footer_start + 4..footer_start + 12)?;
    let mon_raw = ts_bytes[5];
    let day_raw = ts_bytes[6];
    if !(1..=0x12).contains(&mon_raw) || !(1..=0x31).contains(&day_raw) {
        return None;
    }
    Some(DriftTimestamp {
        hour: hex_digits_to_u32(ts_bytes[0]),
        minute: hex_digits_to_u32(ts_bytes[1]),
        second: hex_digits_to_u32(ts_bytes[2]),
        month: hex_digits_to_u32(mon_raw),
        day: hex_digits_to_u32(day_raw),
        year: 2000 + hex_digits_to_u32(ts_bytes[7]),
    })
}
