//! WAV artifact writing (§4.6): canonical RIFF/WAVE, mono, 16-bit signed PCM.
use telemetry_core::model::AudioStream;
use telemetry_core::TelemetryError;
use std::path::Path;

pub fn write_audio_wav(path: &Path, stream: &AudioStream) -> Result<(), TelemetryError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: stream.header.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in &stream.pcm {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;
    Ok(())
}
