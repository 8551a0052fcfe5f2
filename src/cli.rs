use crate::audio::{DEFAULT_GAIN, DEFAULT_SAMPLE_RATE, PlaybackOptions};
use crate::codec::{CodecConfig, NumeralMode, Scheme};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turn audio into images and images back into audio
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Encode audio file(s) as images, one pixel per sample
    Encode(EncodeArgs),
    /// Decode image file(s) back into WAV audio
    Decode(DecodeArgs),
}

impl Command {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Command::Encode(args) => &args.files,
            Command::Decode(args) => &args.files,
        }
    }

    #[must_use]
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Command::Encode(args) => args.output.as_ref(),
            Command::Decode(args) => args.output.as_ref(),
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Audio file path(s) to encode
    #[arg(value_name = "AUDIO")]
    pub files: Vec<PathBuf>,

    /// Output image (png, bmp or tiff); defaults to the input name with .png
    #[arg(short, long, value_name = "IMAGE")]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    #[command(flatten)]
    pub codec: CodecArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Image file path(s) to decode
    #[arg(value_name = "IMAGE")]
    pub files: Vec<PathBuf>,

    /// Output WAV file; defaults to the input name with .wav
    #[arg(short, long, value_name = "WAV")]
    pub output: Option<PathBuf>,

    /// Sample rate written to the WAV header
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Linear gain applied to decoded samples
    #[arg(short, long, default_value_t = DEFAULT_GAIN)]
    pub gain: f32,

    #[command(flatten)]
    pub codec: CodecArgs,
}

impl DecodeArgs {
    #[must_use]
    pub fn playback(&self) -> PlaybackOptions {
        PlaybackOptions {
            sample_rate: self.sample_rate,
            gain: self.gain,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CodecArgs {
    /// Pixel layout
    #[arg(long, value_enum, default_value_t = Scheme::DigitSplit)]
    pub scheme: Scheme,

    /// How fractional digits are split (digit-split scheme only)
    #[arg(long, value_enum, default_value_t = NumeralMode::FixedPoint)]
    pub numeral: NumeralMode,
}

impl CodecArgs {
    #[must_use]
    pub fn config(&self) -> CodecConfig {
        CodecConfig::new(self.scheme, self.numeral)
    }
}
