use clap::Parser;
use pixwave::audio;
use pixwave::cli::{Args, Command, DecodeArgs, EncodeArgs};
use pixwave::codec;
use pixwave::error::ProcessError;
use pixwave::image;
use std::path::{Path, PathBuf};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let files = args.command.files();
    if files.is_empty() {
        println!("Error: no input files given");
        std::process::exit(2);
    }
    if files.len() > 1 && args.command.output().is_some() {
        println!("Error: --output needs a single input file");
        std::process::exit(2);
    }

    let multiple_files = files.len() > 1;
    let mut any_failed = false;

    for file_path in files {
        let result = match &args.command {
            Command::Encode(encode) => encode_file(file_path, encode),
            Command::Decode(decode) => decode_file(file_path, decode),
        };

        match result {
            Ok(output) if multiple_files => {
                println!("{} -> {}", file_path.display(), output.display());
            }
            Ok(output) => println!("{}", output.display()),
            Err(e) => {
                if multiple_files {
                    println!("{}", file_path.display());
                }
                println!("Error: {e}");
                any_failed = true;
            }
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn output_path(input: &Path, explicit: Option<&PathBuf>, extension: &str) -> PathBuf {
    explicit.cloned().unwrap_or_else(|| input.with_extension(extension))
}

/// Encode one audio file into an image, returning the image path
fn encode_file(file_path: &Path, args: &EncodeArgs) -> Result<PathBuf, ProcessError> {
    let output = output_path(file_path, args.output.as_ref(), "png");

    // Stage 1: Refuse lossy targets before doing any work
    image::lossless_format(&output).map_err(ProcessError::WriteFailed)?;

    // Stage 2: Decode audio to channel 0 samples
    let decoded = audio::read_audio_file(file_path).map_err(ProcessError::ReadFailed)?;
    log::info!(
        "{}: {} samples, {} Hz, {:.2}s",
        file_path.display(),
        decoded.samples.len(),
        decoded.sample_rate,
        decoded.duration_secs()
    );

    // Stage 3: Encode the whole buffer
    let pixels = codec::encode_with(&decoded.samples, &args.codec.config())?;

    // Stage 4: Fit the pixels to the canvas
    let dims = image::resolve_dimensions(args.width, args.height, decoded.samples.len());
    let pixels = image::fit_to_canvas(pixels, dims);

    // Stage 5: Write
    image::save_pixels(&output, &pixels, dims).map_err(ProcessError::WriteFailed)?;

    Ok(output)
}

/// Decode one image into a WAV file, returning the WAV path
fn decode_file(file_path: &Path, args: &DecodeArgs) -> Result<PathBuf, ProcessError> {
    let output = output_path(file_path, args.output.as_ref(), "wav");

    // Stage 1: Read pixels
    let (pixels, dims) = image::read_pixels(file_path).map_err(ProcessError::ReadFailed)?;
    log::info!("{}: {dims} image", file_path.display());

    // Stage 2: Decode
    let samples = codec::decode_with(&pixels, &args.codec.config())?;

    // Stage 3: Write
    audio::write_wav(&output, &samples, &args.playback()).map_err(ProcessError::WriteFailed)?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pixwave::cli::CodecArgs;
    use pixwave::{CodecError, Pixel};

    fn write_tone(path: &Path, len: usize) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..len {
            let t = i as f32 / 8_000.0;
            writer
                .write_sample(0.8 * (std::f32::consts::TAU * 440.0 * t).sin())
                .unwrap();
        }
        writer.finalize().unwrap();
    }

    fn encode_args(output: PathBuf) -> EncodeArgs {
        EncodeArgs {
            files: Vec::new(),
            output: Some(output),
            width: None,
            height: None,
            codec: CodecArgs::default(),
        }
    }

    fn decode_args(output: PathBuf) -> DecodeArgs {
        DecodeArgs {
            files: Vec::new(),
            output: Some(output),
            sample_rate: 8_000,
            gain: 1.0,
            codec: CodecArgs::default(),
        }
    }

    #[test]
    fn test_audio_to_image_to_audio() {
        let dir = tempfile::tempdir().unwrap();
        let tone = dir.path().join("tone.wav");
        let art = dir.path().join("tone.png");
        let back = dir.path().join("back.wav");
        write_tone(&tone, 1000);

        let written = encode_file(&tone, &encode_args(art.clone())).unwrap();
        assert_eq!(written, art);

        let (pixels, dims) = image::read_pixels(&art).unwrap();
        // 1000 samples on the smallest near-square canvas
        assert_eq!(dims.width, 32);
        assert_eq!(dims.height, 32);
        assert!(pixels.iter().all(|p| p.a == 255));

        decode_file(&art, &decode_args(back.clone())).unwrap();
        let decoded = audio::read_audio_file(&back).unwrap();
        assert_eq!(decoded.samples.len(), 1024);
        assert_eq!(decoded.sample_rate, 8_000);
    }

    #[test]
    fn test_default_output_names() {
        assert_eq!(
            output_path(Path::new("a/song.mp3"), None, "png"),
            PathBuf::from("a/song.png")
        );
        let explicit = PathBuf::from("x.bmp");
        assert_eq!(output_path(Path::new("song.mp3"), Some(&explicit), "png"), explicit);
    }

    #[test]
    fn test_silent_audio_returns_codecfailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let silence = dir.path().join("silence.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&silence, spec).unwrap();
        for _ in 0..64 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let result = encode_file(&silence, &encode_args(dir.path().join("silence.png")));
        assert_matches!(
            result,
            Err(ProcessError::CodecFailed(CodecError::DegenerateRange { .. }))
        );
    }

    #[test]
    fn test_solid_image_returns_codecfailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let solid = dir.path().join("solid.png");
        let dims = pixwave::Dimensions::new(4, 4);
        image::save_pixels(&solid, &vec![Pixel::opaque(9, 9, 9); 16], dims).unwrap();

        let result = decode_file(&solid, &decode_args(dir.path().join("solid.wav")));
        assert_matches!(
            result,
            Err(ProcessError::CodecFailed(CodecError::SolidColor { r: 9, g: 9, b: 9 }))
        );
    }

    #[test]
    fn test_grayscale_canvas_normalizes_before_trimming() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("three.wav");
        let art = dir.path().join("three.png");
        audio::write_wav(
            &input,
            &[0.5, 1.0, -1.0],
            &audio::PlaybackOptions {
                sample_rate: 8_000,
                gain: 1.0,
            },
        )
        .unwrap();

        let mut args = encode_args(art.clone());
        args.width = Some(2);
        args.height = Some(1);
        args.codec.scheme = codec::Scheme::Grayscale;
        encode_file(&input, &args).unwrap();

        let (pixels, _) = image::read_pixels(&art).unwrap();
        assert_eq!(pixels, vec![Pixel::opaque(191, 191, 191), Pixel::opaque(255, 255, 255)]);

        args.width = Some(3);
        args.height = Some(2);
        encode_file(&input, &args).unwrap();

        let (pixels, _) = image::read_pixels(&art).unwrap();
        assert_eq!(pixels[2], Pixel::opaque(0, 0, 0));
        assert_eq!(&pixels[3..], &[Pixel::opaque(0, 0, 0); 3]);
    }

    #[test]
    fn test_missing_input_returns_readfailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_file(
            &dir.path().join("missing.wav"),
            &encode_args(dir.path().join("missing.png")),
        );
        assert_matches!(result, Err(ProcessError::ReadFailed(_)));
    }

    #[test]
    fn test_jpeg_output_returns_writefailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let tone = dir.path().join("tone.wav");
        write_tone(&tone, 100);

        let result = encode_file(&tone, &encode_args(dir.path().join("tone.jpg")));
        assert_matches!(result, Err(ProcessError::WriteFailed(_)));
    }
}
