//! Session aggregation (§4.5): orders and merges per-file IMU decode results into one
//! per-session table. Audio and GPS are never aggregated across files.
use telemetry_core::model::ImuTable;
use telemetry_core::SensorHeader;
use std::path::Path;

/// Sort key for an IMU input file: the first integer token in its basename, falling back
/// to lexical ordering on the basename itself when no digits are present.
pub fn basename_sort_key(path: &Path) -> (Option<i64>, String) {
    let basename = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
    let digits: String = basename.chars().take_while(|c| c.is_ascii_digit()).collect();
    let leading = if digits.is_empty() {
        basename.chars().skip_while(|c| !c.is_ascii_digit()).take_while(|c| c.is_ascii_digit()).collect::<String>()
    } else {
        digits
    };
    (leading.parse::<i64>().ok(), basename)
}

/// Merges already-decoded, already-ordered IMU chunks into one session table.
///
/// The first chunk's header becomes the session header, with its `start` overwritten by
/// the merged table's first row once the safety-net re-sort (§4.5) has run. Chunks with an
/// empty table are dropped before merging, per §4.2's "aggregator will drop it" contract.
/// Returns `None` if every chunk was empty.
pub fn merge_imu(chunks: Vec<(ImuTable, SensorHeader)>) -> Option<(ImuTable, SensorHeader)> {
    let mut chunks = chunks.into_iter().filter(|(t, _)| !t.is_empty());
    let (mut table, mut header) = chunks.next()?;

    for (next_table, _) in chunks {
        table.extend(next_table);
    }
    table.sort_by_time();
    header.start = table.time[0];

    Some((table, header))
}
