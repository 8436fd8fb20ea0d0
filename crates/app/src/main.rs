use std::{
    io::Write,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use particle_field_core::{
    AppConfig, FrameLoop, ParticleField, PixelSurface, Recorder, RecordingSettings, Typewriter,
    Viewport,
};
use tracing_subscriber::EnvFilter;

fn main() -> particle_field_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            surface,
            frames,
            duration_secs,
        } => run_live(&config, &surface, frames, duration_secs),
        Commands::Record {
            surface,
            output,
            frames,
            every,
        } => run_record(&config, &surface, output, frames, every),
        Commands::Type { text } => run_typing(config, text),
    }
}

fn load_config(path: Option<&Path>) -> particle_field_core::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

fn attach_field(
    config: &AppConfig,
    args: &SurfaceArgs,
) -> particle_field_core::Result<Option<ParticleField<PixelSurface>>> {
    let surface = PixelSurface::new(Viewport::new(args.width, args.height));
    match args.seed {
        Some(seed) => ParticleField::with_seed(Some(surface), config.field.clone(), seed),
        None => ParticleField::attach(Some(surface), config.field.clone()),
    }
}

fn run_live(
    config: &AppConfig,
    args: &SurfaceArgs,
    frames: Option<u64>,
    duration_secs: Option<f32>,
) -> particle_field_core::Result<()> {
    let Some(mut field) = attach_field(config, args)? else {
        return Ok(());
    };
    tracing::info!(
        particles = field.particles().len(),
        width = args.width,
        height = args.height,
        "starting particle field"
    );

    let mut frame_loop = FrameLoop::from_config(&config.frame);
    if let Some(frames) = frames {
        frame_loop = frame_loop.with_frame_limit(frames);
    }

    if let Some(limit) = duration_secs.and_then(|secs| Duration::try_from_secs_f32(secs).ok()) {
        let stop = frame_loop.stop_handle();
        thread::spawn(move || {
            thread::sleep(limit);
            stop.stop();
        });
    }

    let mut respawned = 0usize;
    let ran = frame_loop.run(|frame| {
        respawned += field.tick();
        if frame > 0 && frame % 300 == 0 {
            tracing::info!(frame, respawned, "particle field running");
        }
        Ok(())
    })?;

    tracing::info!(frames = ran, respawned, "particle field stopped");
    Ok(())
}

fn run_record(
    config: &AppConfig,
    args: &SurfaceArgs,
    output: PathBuf,
    frames: u64,
    every: u64,
) -> particle_field_core::Result<()> {
    let Some(mut field) = attach_field(config, args)? else {
        return Ok(());
    };
    let mut recorder = Recorder::new(RecordingSettings {
        output_dir: output,
        every_nth: every,
        ..Default::default()
    })?;
    tracing::info!(frames, ?recorder, "recording particle field");

    for frame in 0..frames {
        field.tick();
        recorder.capture(frame, field.surface())?;
    }

    tracing::info!(
        written = recorder.frames_written(),
        output = ?recorder.settings().output_dir,
        "recording finished"
    );
    Ok(())
}

fn run_typing(mut config: AppConfig, text: Option<String>) -> particle_field_core::Result<()> {
    if let Some(text) = text {
        config.typing.text = text;
    }
    let typer = Typewriter::from_config(&config.typing);
    thread::sleep(typer.start_delay());

    let mut stdout = std::io::stdout().lock();
    for step in typer {
        write!(stdout, "\r{}", step.visible)?;
        stdout.flush()?;
        if let Some(delay) = step.delay_after {
            thread::sleep(delay);
        }
    }
    writeln!(stdout)?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Ambient particle field for the portfolio page", long_about = None)]
struct Cli {
    /// JSON configuration file. Missing keys fall back to defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Seed for a reproducible particle sequence.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the particle field in real time on an off-screen surface.
    Run {
        #[command(flatten)]
        surface: SurfaceArgs,
        /// Stop after this many frames.
        #[arg(long)]
        frames: Option<u64>,
        /// Stop after this many seconds.
        #[arg(long)]
        duration_secs: Option<f32>,
    },
    /// Render frames to PNG images.
    Record {
        #[command(flatten)]
        surface: SurfaceArgs,
        /// Directory the frames are written to.
        #[arg(short, long)]
        output: PathBuf,
        /// Number of frames to simulate.
        #[arg(long, default_value_t = 120)]
        frames: u64,
        /// Write one frame out of every N.
        #[arg(long, default_value_t = 1)]
        every: u64,
    },
    /// Play the hero typing animation in the terminal.
    Type {
        /// Text to type instead of the configured one.
        #[arg(long)]
        text: Option<String>,
    },
}
