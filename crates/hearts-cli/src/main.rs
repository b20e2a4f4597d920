use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use hearts_core::{Color, Emitter, EmitterConfig, ShapeFrame, ShapeId};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Simulates a floating hearts emitter headlessly and prints one NDJSON line
/// per frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON emitter config (defaults are used for missing fields)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output NDJSON path (stdout if omitted)
    #[arg(long, short, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Container height in layout units
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Total simulated time in seconds
    #[arg(long, default_value_t = 4.0)]
    seconds: f64,

    /// Times (in seconds) at which the trigger count is incremented
    #[arg(long, value_delimiter = ',', default_value = "0,0.25,0.5,1")]
    taps: Vec<f64>,

    /// RNG seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

/// One shape in one output line.
#[derive(Serialize)]
struct FrameRecord {
    #[serde(flatten)]
    frame: ShapeFrame,
    color: Color,
}

/// One output line.
#[derive(Serialize)]
struct FrameLine {
    frame: u64,
    time: f64,
    count: i64,
    shapes: Vec<FrameRecord>,
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse()?)
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<EmitterConfig> {
    let mut config = match &cli.config {
        Some(path) => EmitterConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EmitterConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    if cli.fps == 0 {
        bail!("--fps must be greater than zero");
    }
    if !cli.seconds.is_finite() || cli.seconds < 0.0 {
        bail!("--seconds must be a non-negative number");
    }

    let config = load_config(&cli)?;
    let heart_height = config.heart_size;
    let mut emitter = Emitter::new(config).context("invalid emitter config")?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut taps = cli.taps.clone();
    taps.retain(|t| t.is_finite());
    taps.sort_by(|a, b| a.total_cmp(b));
    let mut taps = taps.into_iter().peekable();

    let dt = 1.0 / cli.fps as f64;
    let total_frames = (cli.seconds * cli.fps as f64).ceil() as u64;
    // Shapes mounted this frame get their own layout on the next one.
    let mut awaiting_layout: Vec<ShapeId> = Vec::new();

    info!(height = cli.height, fps = cli.fps, frames = total_frames, "Starting simulation");
    emitter.on_layout(cli.height);

    for frame in 0..total_frames {
        let time = frame as f64 * dt;

        for id in awaiting_layout.drain(..) {
            emitter.on_shape_layout(id, heart_height);
        }

        while taps.next_if(|&t| t <= time).is_some() {
            let next = emitter.count() + 1;
            let created = emitter.set_count(next);
            debug!(time, count = next, created = created.len(), "Tap");
            awaiting_layout.extend(created);
        }

        let removed = emitter.tick(dt);
        if !removed.is_empty() {
            debug!(time, removed = ?removed, "Shapes completed");
        }

        let line = FrameLine {
            frame,
            time,
            count: emitter.count(),
            shapes: emitter
                .render_items()
                .map(|item| FrameRecord {
                    frame: item.frame,
                    color: item.color,
                })
                .collect(),
        };
        serde_json::to_writer(&mut out, &line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(
        created = emitter.created(),
        completed = emitter.completed(),
        active = emitter.len(),
        "Simulation complete"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level, cli.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!("Simulation failed: {:#}", e);
        std::process::exit(1);
    }
}
