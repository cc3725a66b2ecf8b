mod script;
mod stage;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec3;

use fpcontroller::{ControllerConfig, FpController, InputState, TickOutput};
use script::Script;
use stage::Stage;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// rapier3d world with a ground slab.
    Rapier,
    /// Analytic infinite floor.
    Plane,
}

#[derive(Parser)]
#[command(name = "fp-sandbox")]
#[command(about = "Drives the first-person controller headless with scripted input")]
struct Args {
    #[arg(short, long, help = "TOML file with controller overrides")]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Backend::Rapier)]
    backend: Backend,

    #[arg(short, long, value_enum, default_value_t = Script::Tour)]
    script: Script,

    #[arg(short, long, default_value_t = 360)]
    frames: u32,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long, default_value_t = 30, help = "Frames between progress lines")]
    report_every: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ControllerConfig::from_toml(&source)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => ControllerConfig::default(),
    };

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;

    let mut stage = match args.backend {
        Backend::Rapier => Stage::rapier(&config, dt),
        Backend::Plane => Stage::plane(&config),
    };
    let mut controller = stage.spawn(config)?;
    let mut input = InputState::new();

    log::info!(
        "Running {:?} for {} frames at {} fps on {:?}",
        args.script,
        args.frames,
        fps,
        args.backend
    );

    let mut last: Option<TickOutput> = None;
    for frame in 0..args.frames {
        for event in args.script.events(frame, fps) {
            input.apply(event);
        }

        let snapshot = input.snapshot();
        let output = stage.tick(&mut controller, &snapshot, dt)?;

        if args.report_every > 0 && frame % args.report_every == 0 {
            report(frame, &controller, stage.feet()?, &output);
        }
        last = Some(output);
    }

    if let Some(output) = last {
        report(args.frames, &controller, stage.feet()?, &output);
    }
    log::info!("Done");

    Ok(())
}

fn report(frame: u32, controller: &FpController, feet: Vec3, output: &TickOutput) {
    log::info!(
        "frame {:>4} feet=({:>6.2}, {:>5.2}, {:>6.2}) speed={:>5.2} vy={:>6.2} grounded={} crouch={} slide={} fov={:>5.1} eye={:.2} yaw={:>6.1} pitch={:>5.1}",
        frame,
        feet.x,
        feet.y,
        feet.z,
        controller.current_speed(),
        controller.vertical_velocity(),
        output.grounded,
        controller.is_crouching(),
        controller.is_sliding(),
        output.camera.fov,
        output.camera.local_offset.y,
        output.yaw,
        output.pitch,
    );
}
