use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use voxelbox::event::Event;
use voxelbox::{Key, Session, SessionConfig};

/// Run a headless sandbox session from a short scripted input sequence.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World width/depth (10, 20, 30, 40 or 50); overrides the config file
    #[arg(long)]
    size: Option<u32>,
    /// Generator seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Session config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Hold W for the whole run
    #[arg(long)]
    walk: bool,
    /// Start in flight mode
    #[arg(long)]
    fly: bool,
    /// Removal attempts, spread over the run
    #[arg(long, default_value_t = 0)]
    dig: u32,
    /// Placement attempts, spread over the run
    #[arg(long, default_value_t = 0)]
    build: u32,
}

#[derive(Default, Debug)]
struct Tally {
    added: usize,
    removed: usize,
    rejected: usize,
    jumps: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = LevelFilter::from_str(&args.log_level)?;
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };
    if let Some(size) = args.size {
        config.world.size = size;
    }
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    let mut session = Session::new(config)?;
    session.set_captured(true);
    if args.fly {
        session.key_down(Key::F);
    }
    if args.walk {
        session.key_down(Key::W);
    }
    // look down and ahead so edits have something to hit
    session.player.pitch = -1.0;

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let actions = args.dig + args.build;
    let every = if actions > 0 {
        (args.ticks / actions).max(1)
    } else {
        u32::MAX
    };
    let (mut digs_left, mut builds_left) = (args.dig, args.build);
    let mut tally = Tally::default();

    for frame in 0..args.ticks {
        session.tick(dt);
        if frame % every == every - 1 {
            let outcome = if builds_left > 0 && (digs_left == 0 || frame / every % 2 == 0) {
                builds_left -= 1;
                session.place()
            } else if digs_left > 0 {
                digs_left -= 1;
                session.remove()
            } else {
                continue;
            };
            if let Err(e) = outcome {
                tally.rejected += 1;
                log::debug!(target: "session", "frame {}: {}", frame, e);
            }
        }
        // keep hopping while walking so low steps do not stall the run
        if args.walk && !args.fly && session.player.grounded {
            session.key_down(Key::Space);
            session.key_up(Key::Space);
        }
        for env in session.drain_events() {
            match env.kind {
                Event::BlockAdded { .. } => tally.added += 1,
                Event::BlockRemoved { .. } => tally.removed += 1,
                Event::Jumped => tally.jumps += 1,
                _ => {}
            }
        }
    }

    let hud = session.hud();
    let p = &session.player;
    log::info!(
        "{} frames at {} fps: {} blocks ({} floor), player at ({:.2}, {:.2}, {:.2}) grounded={}",
        args.ticks,
        fps,
        session.world.len(),
        session.world.floor_count(),
        p.pos.x,
        p.pos.y,
        p.pos.z,
        p.grounded
    );
    log::info!(
        "added {} removed {} rejected {} jumps {} | {} | {}",
        tally.added,
        tally.removed,
        tally.rejected,
        tally.jumps,
        hud.selected,
        hud.fly_status
    );
    Ok(())
}
