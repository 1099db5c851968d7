use std::path::PathBuf;
use std::process;

use clap::Parser;

use facepass_core::blurring::infrastructure::cpu_face_blurrer::CpuFaceBlurrer;
use facepass_core::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use facepass_core::pipeline::control::{CancellationToken, PauseSwitch};
use facepass_core::pipeline::frame_transformer::FrameTransformer;
use facepass_core::pipeline::job::{JobCallbacks, JobOutcome};
use facepass_core::pipeline::process_video_use_case::ProcessVideoUseCase;
use facepass_core::recognition::domain::identity_matcher::IdentityMatcher;
use facepass_core::recognition::infrastructure::onnx_embedding_provider::OnnxEmbeddingProvider;
use facepass_core::recognition::infrastructure::whitelist_loader::load_whitelist_dir;
use facepass_core::shared::constants::{
    DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL, EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL,
};
use facepass_core::shared::model_resolver;
use facepass_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use facepass_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Blurs every face in a video except the ones you whitelist.
#[derive(Parser)]
#[command(name = "facepass")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Output video file.
    output: PathBuf,

    /// Directory of reference images, one whitelisted person per file.
    #[arg(long)]
    whitelist: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.9")]
    detection_confidence: f64,

    /// Maximum embedding distance treated as a whitelist match.
    #[arg(long, default_value = "0.8")]
    match_threshold: f64,

    /// Gaussian blur kernel size (must be odd).
    #[arg(long, default_value = "99")]
    blur_strength: usize,

    /// Disable hardware-accelerated inference, forcing plain CPU.
    #[arg(long)]
    cpu: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let use_acceleration = !cli.cpu;
    let detector_model = resolve_model(DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL)?;
    let embedder_model = resolve_model(EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL)?;

    let mut detector = OnnxFaceDetector::new(&detector_model, use_acceleration)?;
    let embedder = OnnxEmbeddingProvider::new(&embedder_model, use_acceleration)?;

    log::info!("Building whitelist from {}", cli.whitelist.display());
    let store = load_whitelist_dir(&cli.whitelist, &mut detector, &embedder)?;
    if store.is_empty() {
        return Err(format!(
            "no usable reference faces in {}",
            cli.whitelist.display()
        )
        .into());
    }
    eprintln!(
        "Whitelisted {} identities: {}",
        store.len(),
        store.labels().collect::<Vec<_>>().join(", ")
    );

    let transformer = FrameTransformer::new(
        Box::new(detector),
        Box::new(embedder),
        Box::new(CpuFaceBlurrer::new(cli.blur_strength)),
        IdentityMatcher::new(cli.match_threshold),
        cli.detection_confidence,
    );

    let callbacks = JobCallbacks::none().with_progress(|processed, total| {
        eprint!("\rProcessing frame {processed}/{total}");
    });

    let use_case = ProcessVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        transformer,
        CancellationToken::new(),
        PauseSwitch::new(),
        callbacks,
    );

    let report = use_case.run(&cli.input, &cli.output, &store)?;
    eprintln!();
    eprintln!("{}", report.summary());

    match report.outcome {
        JobOutcome::Completed => {
            log::info!("Output written to {}", cli.output.display());
            Ok(())
        }
        JobOutcome::Cancelled => Err("job was cancelled".into()),
        JobOutcome::Failed(reason) => Err(reason.into()),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("input file not found: {}", cli.input.display()).into());
    }
    if !cli.whitelist.is_dir() {
        return Err(format!(
            "whitelist directory not found: {}",
            cli.whitelist.display()
        )
        .into());
    }
    if cli.blur_strength == 0 || cli.blur_strength % 2 == 0 {
        return Err(format!(
            "blur strength must be a positive odd integer, got {}",
            cli.blur_strength
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.detection_confidence) {
        return Err(format!(
            "detection confidence must be between 0.0 and 1.0, got {}",
            cli.detection_confidence
        )
        .into());
    }
    if cli.match_threshold <= 0.0 {
        return Err(format!(
            "match threshold must be positive, got {}",
            cli.match_threshold
        )
        .into());
    }
    Ok(())
}

fn resolve_model(name: &str, url: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {name}");
    let owned = name.to_string();
    let path = model_resolver::resolve(
        name,
        url,
        None,
        Some(Box::new(move |downloaded, total| {
            if total > 0 {
                let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
                eprint!("\rDownloading {owned}... {pct}%");
            } else {
                eprint!("\rDownloading {owned}... {downloaded} bytes");
            }
        })),
    )?;
    eprintln!();
    Ok(path)
}
