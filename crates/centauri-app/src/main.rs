//! `centauri`: run the orbit scene headless and report what it drew.
//!
//! Run with: `cargo run -p centauri-app -- --frames 600 --drag-start 120`

use std::path::PathBuf;
use std::process::ExitCode;

use centauri_app::platform::PlatformDirs;
use centauri_app::preview::{PreviewOptions, run_preview};
use centauri_app::sprite::export_sprite;
use centauri_app::trace_sink::TraceSink;
use centauri_config::{CliArgs, Config};
use centauri_motion::{ParallaxTracker, ScrollTransform};
use centauri_scene::{DragController, InstantClock, ManualClock, SceneView, WallClock};
use clap::Parser;
use glam::DVec2;
use tracing::{error, info};

/// CLI arguments for the preview binary.
#[derive(Parser, Debug)]
#[command(name = "centauri", about = "Headless preview of the Centauri orbit scene")]
struct PreviewArgs {
    #[command(flatten)]
    scene: CliArgs,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Use measured frame times instead of `--frame-dt`.
    #[arg(long)]
    realtime: bool,

    /// Frame on which to start a scripted drag.
    #[arg(long)]
    drag_start: Option<u32>,

    /// Length of the scripted drag in frames.
    #[arg(long, default_value_t = 30)]
    drag_frames: u32,

    /// Pointer movement per drag frame in pixels.
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    drag_dx: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Also report the hero transform at this scroll progress.
    #[arg(long)]
    scroll: Option<f64>,

    /// Mount on a renderer without a context to exercise the placeholder.
    #[arg(long)]
    simulate_context_loss: bool,

    /// Write the star sprite to this PNG and continue.
    #[arg(long)]
    export_sprite: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = PreviewArgs::parse();

    let dirs = match args.scene.config.clone() {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            centauri_log::init_logging(None, false, None);
            error!("Failed to load config from {}: {e}", dirs.config_dir.display());
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args.scene);

    centauri_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    info!("Centauri orbit preview");
    info!(
        "Orbit: rate={} rad/s, distance={}, reduced_motion={}",
        config.scene.orbit_rate, config.scene.camera_distance, config.motion.reduced_motion
    );

    if let Some(path) = &args.export_sprite
        && let Err(e) = export_sprite(&config.twin_stars, path)
    {
        error!("Sprite export failed: {e}");
    }

    let options = PreviewOptions {
        frames: args.frames,
        frame_dt: args.frame_dt,
        realtime: args.realtime,
        drag_start: args.drag_start,
        drag_frames: args.drag_frames,
        drag_dx: args.drag_dx,
        viewport: DVec2::new(args.width, args.height),
    };

    let drag = DragController::new(config.motion.drag_rotate_speed, args.height);
    let sink = if args.simulate_context_loss {
        TraceSink::unavailable(drag)
    } else {
        TraceSink::new(drag, config.debug.log_transforms)
    };

    // Fixed-step runs pace the pulse with scene time so output is reproducible.
    let manual = ManualClock::new();
    let wall: Box<dyn WallClock> = if args.realtime {
        Box::new(InstantClock::new())
    } else {
        Box::new(manual.clone())
    };
    let mut view = SceneView::mount_with_clock(sink, &config, false, wall);
    let mut parallax = ParallaxTracker::new(&config.motion, false);

    let report = run_preview(&mut view, &config, &options, &mut parallax, |dt| {
        manual.advance(dt)
    });

    info!(
        "Finished {} frames: angle={:.4} rad, elapsed={:.3}s, mode={:?}",
        report.frames, report.angle, report.elapsed, report.mode
    );
    match report.camera {
        Some(camera) => info!(
            "Camera at ({:.3}, {:.3}, {:.3}) with {} live bodies",
            camera.x, camera.y, camera.z, report.live_bodies
        ),
        None => info!("Scene rendered as placeholder"),
    }
    info!(
        "Parallax ({:.3}, {:.3}), node shift ({:.4}, {:.4}), drift ({:.1}, {:.1})px",
        report.parallax.x,
        report.parallax.y,
        report.node_offset.x,
        report.node_offset.y,
        report.backdrop_drift.x,
        report.backdrop_drift.y
    );

    if let Some(progress) = args.scroll {
        let hero = ScrollTransform::at(progress);
        info!(
            "Hero at scroll {progress}: opacity={:.2}, scale={:.2}, translate_y={:.1}px",
            hero.opacity, hero.scale, hero.translate_y
        );
    }

    drop(view);
    ExitCode::SUCCESS
}
