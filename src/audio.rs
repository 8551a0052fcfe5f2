//! Audio file decoding and WAV output
//!
//! Only the first channel of a decoded track is kept.

use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::conv::IntoSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_GAIN: f32 = 0.5;

/// Mono samples from a decoded audio file
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Channel 0, nominally in `[-1, 1]`
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channel count of the source, before the mono pick
    pub channels: usize,
}

impl DecodedAudio {
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// How decoded samples are rendered for listening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    pub sample_rate: u32,
    /// Linear gain applied before writing
    pub gain: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            gain: DEFAULT_GAIN,
        }
    }
}

/// Decode an audio file to channel 0 samples
///
/// # Errors
///
/// Returns an error if the file cannot be opened, has no audio track, or
/// fails to decode.
pub fn read_audio_file(path: &Path) -> Result<DecodedAudio> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported audio format")?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let channels = track
        .codec_params
        .channels
        .map_or(1, |c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => append_first_channel(&decoded, &mut samples),
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("skipping undecodable packet: {e}");
            }
            Err(e) => return Err(e).context("Error decoding packet"),
        }
    }

    if channels > 1 {
        log::info!("using channel 0 of {channels}");
    }
    log::debug!(
        "decoded {} samples at {sample_rate} Hz from {}",
        samples.len(),
        path.display()
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

fn append_first_channel(buffer: &AudioBufferRef, samples: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => samples.extend_from_slice(buf.chan(0)),
        AudioBufferRef::F64(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::S8(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::S16(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::S24(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::S32(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::U8(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::U16(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::U24(buf) => extend_converted(buf.chan(0), samples),
        AudioBufferRef::U32(buf) => extend_converted(buf.chan(0), samples),
    }
}

#[inline]
fn extend_converted<S: IntoSample<f32> + Copy>(channel: &[S], samples: &mut Vec<f32>) {
    samples.extend(channel.iter().map(|&s| s.into_sample()));
}

/// Write mono samples as a 32-bit float WAV file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_wav(path: &Path, samples: &[f32], options: &PlaybackOptions) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: options.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    for &sample in samples {
        writer
            .write_sample(sample * options.gain)
            .context("Failed to write WAV sample")?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    log::debug!(
        "wrote {} samples at {} Hz to {}",
        samples.len(),
        options.sample_rate,
        path.display()
    );
    Ok(())
}
