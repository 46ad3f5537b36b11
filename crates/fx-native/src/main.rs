use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use glam::Vec2;

use fx_core::{
    AmbientConfig, AmbientField, AmbientMode, DissolveStyle, Runner, TitleAnimator, TitleConfig,
};
use fx_native::{drive, DriveOptions, FrameDump};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Title,
    Drift,
    Wander,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Dissolve {
    Scatter,
    Burst,
}

/// Render the portfolio particle effects off-screen and report the timeline.
#[derive(Parser, Debug)]
#[command(name = "fx-preview", version, about)]
struct Args {
    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    #[arg(long, value_enum, default_value_t = Mode::Title)]
    mode: Mode,
    /// Run length for the ambient modes (the title stops by itself)
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,
    /// Word spelled by the title
    #[arg(long)]
    word: Option<String>,
    /// Advisory minimum display time; a mismatch with the phase durations is reported
    #[arg(long)]
    min_display_ms: Option<u64>,
    /// Disable the pre-exit intensification step
    #[arg(long)]
    no_pre_exit: bool,
    #[arg(long, value_enum, default_value_t = Dissolve::Scatter)]
    dissolve: Dissolve,
    /// Write every Nth frame as a PNG image into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,
    #[arg(long, default_value_t = 10)]
    dump_every: u64,
    /// Hold the pointer at X,Y (surface pixels) so the ambient modes draw grab links
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Vec2>,
}

fn parse_point(raw: &str) -> Result<Vec2, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {raw:?}"))?;
    let coord = |v: &str| v.trim().parse::<f32>().map_err(|e| format!("{v:?}: {e}"));
    Ok(Vec2::new(coord(x)?, coord(y)?))
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

impl Args {
    fn drive_options(&self) -> DriveOptions {
        DriveOptions {
            width: self.width,
            height: self.height,
            fps: self.fps,
            dump: self.dump_dir.clone().map(|dir| FrameDump {
                dir,
                every: self.dump_every,
            }),
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive");
    match args.mode {
        Mode::Title => run_title(&args),
        Mode::Drift => run_ambient(&args, AmbientMode::Drift),
        Mode::Wander => run_ambient(&args, AmbientMode::Wander),
    }
}

fn run_title(args: &Args) -> anyhow::Result<()> {
    let mut config = TitleConfig {
        seed: args.seed,
        min_display: args.min_display_ms.map(Duration::from_millis),
        dissolve: match args.dissolve {
            Dissolve::Scatter => DissolveStyle::Scatter,
            Dissolve::Burst => DissolveStyle::Burst,
        },
        ..TitleConfig::default()
    };
    if let Some(word) = &args.word {
        config.word = word.clone();
    }
    if args.no_pre_exit {
        config.timings.pre_exit = None;
    }
    let budget = config.timings.total();
    let title = TitleAnimator::new(config, args.width, args.height, Duration::ZERO)?;
    log::info!(
        "title: {} particles, phases take {}ms",
        title.particle_count(),
        budget.as_millis()
    );

    let completed = Rc::new(Cell::new(false));
    let done = completed.clone();
    let mut runner = Runner::new(title).on_complete(move || done.set(true));

    // generous cap in case the clock never reaches the end
    let max_frames = ((budget.as_secs_f64() + 2.0) * args.fps).ceil() as u64;
    let frames = drive(&mut runner, &args.drive_options(), max_frames, |title, now| {
        if let Some(t) = title.last_transition() {
            log::info!(
                "{:>6}ms  {} -> {} (scheduled {}ms)",
                now.as_millis(),
                t.from.name(),
                t.to.name(),
                t.at.as_millis()
            );
        }
    })?;

    anyhow::ensure!(
        completed.get(),
        "title did not complete within {} frames",
        max_frames
    );
    log::info!("completed after {} frames", frames);
    Ok(())
}

fn run_ambient(args: &Args, mode: AmbientMode) -> anyhow::Result<()> {
    let config = AmbientConfig {
        mode,
        seed: args.seed,
        ..AmbientConfig::default()
    };
    let mut field = AmbientField::new(config, args.width, args.height, Duration::ZERO)?;
    field.set_pointer(args.pointer);
    log::info!("ambient: {} particles ({:?})", field.particle_count(), mode);
    let mut runner = Runner::new(field);
    let max_frames = (args.seconds.max(0.0) * args.fps).round() as u64;
    let frames = drive(&mut runner, &args.drive_options(), max_frames, |_, _| {})?;
    runner.teardown();
    log::info!("rendered {} frames", frames);
    Ok(())
}
