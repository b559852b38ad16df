use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use vision_pairs::{
    ConfigError, FrameGeometry, FrameProcessor, JsonLinesTelemetry, NullFrameSink,
    ProcessorParams, ReplayError, ReplaySource, SharedFlag, StreamSpec, VisionConfig,
    VisionWorker, DEFAULT_CONFIG_PATH,
};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("could not start frame worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("frame worker panicked")]
    WorkerPanicked,
    #[error("invalid log level '{0}'")]
    LogLevel(String),
    #[error("could not install logger: {0}")]
    Logger(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "vision-pairs",
    version,
    about = "Left/right vision-target pairing: replay recorded contours and check camera descriptors"
)]
struct Cli {
    /// Log level (error, warn, info, debug, trace). Ignored with the `tracing` feature; use RUST_LOG.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run recorded contour frames through the frame worker, printing telemetry as JSON lines.
    Replay(ReplayArgs),
    /// Parse a camera descriptor and print what would be used.
    CheckConfig {
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON array of recorded frames.
    #[arg(long)]
    frames: PathBuf,
    /// Camera descriptor; supplies frame size and frame-cycle settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Treat the camera as mounted upside down.
    #[arg(long)]
    inverted: bool,
    /// Frame width; overrides the descriptor.
    #[arg(long)]
    width: Option<u32>,
    /// Frame height; overrides the descriptor.
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Replay(args) => replay(args),
        Command::CheckConfig { path } => check_config(path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: &str) -> Result<(), CliError> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| CliError::LogLevel(level.to_string()))?;
    vision_pairs::core::init_with_level(level).map_err(|err| CliError::Logger(err.to_string()))
}

#[cfg(feature = "tracing")]
fn init_logging(_level: &str) -> Result<(), CliError> {
    vision_pairs::core::init_tracing(false).map_err(|err| CliError::Logger(err.to_string()))
}

fn replay(args: ReplayArgs) -> Result<(), CliError> {
    let config = args.config.as_ref().map(VisionConfig::load_json).transpose()?;

    let stream = StreamSpec::default();
    let configured = config
        .as_ref()
        .and_then(VisionConfig::primary_camera)
        .and_then(|cam| cam.geometry());
    let geometry = FrameGeometry::new(
        args.width
            .or(configured.map(|g| g.width))
            .unwrap_or(stream.width),
        args.height
            .or(configured.map(|g| g.height))
            .unwrap_or(stream.height),
    );
    let params = config
        .map(|cfg| cfg.vision)
        .unwrap_or_else(ProcessorParams::default);

    let source = ReplaySource::load_json(&args.frames, geometry)?;
    log::info!(
        "replaying {} frames from {} at {}x{}",
        source.remaining(),
        args.frames.display(),
        geometry.width,
        geometry.height
    );

    let inverted = SharedFlag::new(args.inverted);
    let processor = FrameProcessor::new(geometry, params, inverted);
    let telemetry = JsonLinesTelemetry::new(std::io::stdout());

    let worker = VisionWorker::spawn(source, processor, NullFrameSink, telemetry)?;
    let stats = worker.join().map_err(|_| CliError::WorkerPanicked)?;
    log::info!(
        "done: {} frames processed, {} skipped",
        stats.frames_processed,
        stats.frames_skipped
    );
    Ok(())
}

fn check_config(path: PathBuf) -> Result<(), CliError> {
    let cfg = VisionConfig::load_json(&path)?;
    println!("team: {}", cfg.team);
    println!("network mode: {:?}", cfg.network_mode());
    println!("telemetry table: {}", cfg.vision.table);
    for (i, cam) in cfg.cameras.iter().enumerate() {
        let size = cam
            .geometry()
            .map(|g| format!("{}x{}", g.width, g.height))
            .unwrap_or_else(|| "default size".to_string());
        let role = if i == 0 { "processed" } else { "streamed only" };
        println!("camera {i}: '{}' on {} ({size}, {role})", cam.name, cam.path);
    }
    if cfg.cameras.is_empty() {
        println!("no cameras: nothing to process");
    }
    Ok(())
}
