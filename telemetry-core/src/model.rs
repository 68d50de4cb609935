//! Decoded record types shared between the decoder and writer crates.
use crate::header::SensorHeader;
use chrono::NaiveDateTime;

/// Width, in bytes, of one IMU record.
pub const IMU_RECORD_LEN: usize = 42;

/// One 42-byte IMU record: three float32 triples (gyro, then acc, then mag — note gyro
/// precedes acc in memory, the reverse of common convention) followed by 6 opaque bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSample {
    pub gyro: [f32; 3],
    pub acc: [f32; 3],
    pub mag: [f32; 3],
}

/// A decoded IMU file: its header plus the ordered samples found in its payload.
#[derive(Debug, Clone)]
pub struct ImuChunk {
    pub header: SensorHeader,
    pub samples: Vec<ImuSample>,
}

impl ImuChunk {
    /// Timestamp of sample `i`, per §4.2: `header.start + i / sample_rate` seconds.
    pub fn timestamp(&self, i: usize) -> NaiveDateTime {
        let offset_seconds = i as f64 / self.header.sample_rate as f64;
        self.header.start + chrono::Duration::nanoseconds((offset_seconds * 1e9) as i64)
    }
}

/// A wall-clock drift reading embedded in the audio stream every `FOOTER_LEN`-aligned block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftTimestamp {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub month: u32,
    pub day: u32,
    pub year: u32,
}

impl std::fmt::Display for DriftTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// A decoded audio file: its header, the reconstructed PCM stream, and whatever drift
/// timestamps were found embedded in it.
#[derive(Debug, Clone)]
pub struct AudioStream {
    pub header: SensorHeader,
    pub pcm: Vec<i16>,
    pub drift_timestamps: Vec<DriftTimestamp>,
}

impl AudioStream {
    /// `end = start + num_samples / sample_rate`, per §4.6.
    pub fn end_instant(&self) -> NaiveDateTime {
        let seconds = self.pcm.len() as f64 / self.header.sample_rate as f64;
        self.header.start + chrono::Duration::nanoseconds((seconds * 1e9) as i64)
    }
}

/// A decoded GPS snapshot: the preamble's timestamp plus the word-swapped payload.
#[derive(Debug, Clone)]
pub struct GpsSnapshot {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub month: u32,
    pub day: u32,
    pub year: u32,
    pub words: Vec<u32>,
}

impl GpsSnapshot {
    /// Deterministic output basename per §4.4: `snap.{Y}_{M}_{D}_{h}_{m}_{s}_GC0.dat`.
    pub fn filename(&self) -> String {
        format!(
            "snap.{}_{:02}_{:02}_{:02}_{:02}_{:02}_GC0.dat",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// An aggregated, per-session IMU table: parallel columns plus the merged header.
///
/// Kept columnar rather than as a `Vec<ImuSample>` of rows because the writer formats each
/// column independently (§9: "this becomes an explicit columnar buffer... No library
/// dependence is required").
#[derive(Debug, Clone, Default)]
pub struct ImuTable {
    pub time: Vec<NaiveDateTime>,
    pub acc_x: Vec<f32>,
    pub acc_y: Vec<f32>,
    pub acc_z: Vec<f32>,
    pub gyro_x: Vec<f32>,
    pub gyro_y: Vec<f32>,
    pub gyro_z: Vec<f32>,
    pub mag_x: Vec<f32>,
    pub mag_y: Vec<f32>,
    pub mag_z: Vec<f32>,
}

impl ImuTable {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn push(&mut self, time: NaiveDateTime, sample: ImuSample) {
        self.time.push(time);
        self.acc_x.push(sample.acc[0]);
        self.acc_y.push(sample.acc[1]);
        self.acc_z.push(sample.acc[2]);
        self.gyro_x.push(sample.gyro[0]);
        self.gyro_y.push(sample.gyro[1]);
        self.gyro_z.push(sample.gyro[2]);
        self.mag_x.push(sample.mag[0]);
        self.mag_y.push(sample.mag[1]);
        self.mag_z.push(sample.mag[2]);
    }

    /// Appends `other`'s rows after this table's rows, in order.
    pub fn extend(&mut self, other: ImuTable) {
        self.time.extend(other.time);
        self.acc_x.extend(other.acc_x);
        self.acc_y.extend(other.acc_y);
        self.acc_z.extend(other.acc_z);
        self.gyro_x.extend(other.gyro_x);
        self.gyro_y.extend(other.gyro_y);
        self.gyro_z.extend(other.gyro_z);
        self.mag_x.extend(other.mag_x);
        self.mag_y.extend(other.mag_y);
        self.mag_z.extend(other.mag_z);
    }

    /// Re-sorts every column by `time`, per §4.5's "safety net" re-sort.
    pub fn sort_by_time(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.time[i]);
        self.time = order.iter().map(|&i| self.time[i]).collect();
        self.acc_x = order.iter().map(|&i| self.acc_x[i]).collect();
        self.acc_y = order.iter().map(|&i| self.acc_y[i]).collect();
        self.acc_z = order.iter().map(|&i| self.acc_z[i]).collect();
        self.gyro_x = order.iter().map(|&i| self.gyro_x[i]).collect();
        self.gyro_y = order.iter().map(|&i| self.gyro_y[i]).collect();
        self.gyro_z = order.iter().map(|&i| self.gyro_z[i]).collect();
        self.mag_x = order.iter().map(|&i| self.mag_x[i]).collect();
        self.mag_y = order.iter().map(|&i| self.mag_y[i]).collect();
        self.mag_z = order.iter().map(|&i| self.mag_z[i]).collect();
    }
}
